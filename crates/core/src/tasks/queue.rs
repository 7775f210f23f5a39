//! Main thread task queue
//!
//! Any thread may queue work; the host drains the queue on its main thread
//! once per tick.

use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

/// A task to execute on the main thread
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Capacity of the process queue, also the per-tick drain limit
pub const QUEUE_CAPACITY: usize = 1024;

/// Why a task was not queued
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TaskQueueError {
    #[error("task queue is full")]
    Full,

    #[error("task queue is disconnected")]
    Disconnected,
}

/// Bounded multi-producer task queue
pub struct TaskQueue {
    sender: Sender<Task>,
    receiver: Receiver<Task>,
    capacity: usize,
}

impl TaskQueue {
    /// Create a queue holding at most `capacity` tasks
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Queue a task without blocking
    ///
    /// A task that does not fit is dropped.
    pub fn push<F>(&self, task: F) -> Result<(), TaskQueueError>
    where
        F: FnOnce() + Send + 'static,
    {
        match self.sender.try_send(Box::new(task)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Task queue full, dropping task");
                Err(TaskQueueError::Full)
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Task queue disconnected");
                Err(TaskQueueError::Disconnected)
            }
        }
    }

    /// Queue a task, blocking while the queue is full
    pub fn push_blocking<F>(&self, task: F) -> Result<(), TaskQueueError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.send(Box::new(task)).map_err(|_| {
            tracing::error!("Task queue disconnected");
            TaskQueueError::Disconnected
        })
    }

    /// Run queued tasks, at most one capacity's worth
    ///
    /// A panicking task is logged and the rest still run. Returns the number
    /// of tasks run.
    pub fn drain(&self) -> usize {
        let mut count = 0;

        while let Ok(task) = self.receiver.try_recv() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
                let message = payload
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("unknown panic");
                tracing::error!("Queued task panicked: {}", message);
            }
            count += 1;

            if count >= self.capacity {
                break;
            }
        }

        count
    }

    /// Number of tasks waiting
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Whether no task is waiting
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

static TASK_QUEUE: LazyLock<TaskQueue> = LazyLock::new(|| TaskQueue::new(QUEUE_CAPACITY));

/// Queue a task to run on the next host tick
///
/// This is safe to call from any thread.
#[tracing::instrument(skip(task))]
pub fn queue_task<F>(task: F) -> Result<(), TaskQueueError>
where
    F: FnOnce() + Send + 'static,
{
    TASK_QUEUE.push(task)
}

/// Queue a task, blocking if the queue is full
///
/// # Warning
/// Only call from background threads, never from the main thread
/// (would deadlock if the queue is full and waiting for a tick)
#[tracing::instrument(skip(task))]
pub fn queue_task_blocking<F>(task: F)
where
    F: FnOnce() + Send + 'static,
{
    if let Err(e) = TASK_QUEUE.push_blocking(task) {
        tracing::error!("Failed to queue task (blocking): {}", e);
    }
}

/// Run queued tasks
///
/// Called by the host on the main thread once per tick.
/// Returns the number of tasks run.
#[tracing::instrument]
pub fn process_queued_tasks() -> usize {
    TASK_QUEUE.drain()
}

/// Check how many tasks are currently queued
pub fn queued_task_count() -> usize {
    TASK_QUEUE.len()
}
