//! Per-namespace publish/subscribe primitive
//!
//! Listener lists are keyed by event name and invoked in subscription order.
//! `emit` takes a snapshot of the list and releases the lock before calling
//! anything, so listeners may freely subscribe and unsubscribe:
//!
//! - a listener added during an emit is not called by that emit
//! - a listener removed during an emit is still called by that emit,
//!   except `once` listeners, which never run more than once

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;

use fxrs_engine::Scope;

use super::logger::EventLogger;
use super::types::Callback;

type ListenerMap = HashMap<String, Vec<Listener>>;

/// A subscribed listener
#[derive(Clone)]
struct Listener {
    /// Unique within the emitter
    id: u64,
    /// What gets invoked (the `once` adapter for one-shot listeners)
    invoke: Callback,
    /// What the caller subscribed, matched by `off`
    origin: Callback,
}

/// Named listener lists for one namespace
pub struct EventEmitter {
    scope: Scope,
    listeners: Arc<RwLock<ListenerMap>>,
    next_id: AtomicU64,
    logger: Arc<EventLogger>,
}

impl EventEmitter {
    /// Create an empty emitter reporting failures to `logger`
    pub fn new(scope: Scope, logger: Arc<EventLogger>) -> Self {
        Self {
            scope,
            listeners: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicU64::new(1),
            logger,
        }
    }

    /// Namespace this emitter belongs to
    pub fn scope(&self) -> Scope {
        self.scope
    }

    fn push(&self, name: &str, listener: Listener) {
        let mut listeners = self.listeners.write();
        let list = listeners.entry(name.to_string()).or_default();
        list.push(listener);

        tracing::trace!(
            "[{}] subscribed to '{}' (total: {})",
            self.scope,
            name,
            list.len()
        );
    }

    /// Append a listener
    ///
    /// The same callback may be added more than once and then runs once per
    /// registration.
    pub fn on(&self, name: &str, callback: Callback) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.push(
            name,
            Listener {
                id,
                invoke: callback.clone(),
                origin: callback,
            },
        );
    }

    /// Append a listener that runs at most once
    ///
    /// The listener unsubscribes itself before it is invoked. `off` with the
    /// same callback removes it if it has not fired yet.
    pub fn once(&self, name: &str, callback: Callback) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let fired = AtomicBool::new(false);
        let listeners: Weak<RwLock<ListenerMap>> = Arc::downgrade(&self.listeners);
        let event = name.to_string();
        let origin = callback.clone();

        let adapter = Callback::new(move |args| {
            if fired.swap(true, Ordering::AcqRel) {
                return Ok(());
            }
            if let Some(listeners) = listeners.upgrade() {
                remove_by_id(&mut listeners.write(), &event, id);
            }
            origin.call(args)
        });

        self.push(
            name,
            Listener {
                id,
                invoke: adapter,
                origin: callback,
            },
        );
    }

    /// Remove the first registration of `callback`
    ///
    /// Returns `true` if a registration was removed.
    pub fn off(&self, name: &str, callback: &Callback) -> bool {
        let mut listeners = self.listeners.write();
        let Some(list) = listeners.get_mut(name) else {
            return false;
        };
        let Some(position) = list.iter().position(|l| &l.origin == callback) else {
            return false;
        };

        list.remove(position);
        if list.is_empty() {
            listeners.remove(name);
        }
        tracing::trace!("[{}] unsubscribed from '{}'", self.scope, name);
        true
    }

    /// Remove every listener of `name`, or of every event when `None`
    pub fn remove_all_listeners(&self, name: Option<&str>) {
        let mut listeners = self.listeners.write();
        match name {
            Some(name) => {
                listeners.remove(name);
            }
            None => listeners.clear(),
        }
    }

    /// Number of listeners subscribed to `name`
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.read().get(name).map_or(0, Vec::len)
    }

    /// Names with at least one listener
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.read().keys().cloned().collect()
    }

    /// Invoke every listener of `name` with `args`
    ///
    /// Each listener is isolated: an `Err` or a panic is reported to the
    /// logger and the remaining listeners still run. Emitting a name with no
    /// listeners does nothing.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, name: &str, args: &[Value]) -> usize {
        let snapshot: Vec<Listener> = match self.listeners.read().get(name) {
            Some(list) => list.clone(),
            None => return 0,
        };

        tracing::trace!(
            "[{}] emitting '{}' to {} listener(s)",
            self.scope,
            name,
            snapshot.len()
        );

        for listener in &snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| listener.invoke.call(args))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => self.logger.log_error(self.scope, name, &err),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    self.logger
                        .log_error(self.scope, name, &format_args!("panicked: {}", message));
                }
            }
        }

        snapshot.len()
    }
}

fn remove_by_id(listeners: &mut ListenerMap, name: &str, id: u64) {
    if let Some(list) = listeners.get_mut(name) {
        list.retain(|l| l.id != id);
        if list.is_empty() {
            listeners.remove(name);
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;

    fn emitter() -> Arc<EventEmitter> {
        Arc::new(EventEmitter::new(
            Scope::Local,
            Arc::new(EventLogger::default()),
        ))
    }

    /// A callback that records `tag` into `log` each time it runs
    fn recorder(log: &Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> Callback {
        let log = log.clone();
        Callback::new(move |_| {
            log.lock().push(tag);
            Ok(())
        })
    }

    #[test]
    fn test_emit_without_listeners_is_noop() {
        assert_eq!(emitter().emit("nothing", &[]), 0);
    }

    #[test]
    fn test_fan_out_in_subscription_order() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));

        emitter.on("tick", recorder(&log, "a"));
        emitter.on("tick", recorder(&log, "b"));
        emitter.on("tick", recorder(&log, "c"));

        assert_eq!(emitter.emit("tick", &[]), 3);
        assert_eq!(*log.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_listeners_receive_args() {
        let emitter = emitter();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        emitter.on(
            "hit",
            Callback::new(move |args| {
                sink.lock().extend_from_slice(args);
                Ok(())
            }),
        );

        emitter.emit("hit", &[json!(1), json!("x")]);
        assert_eq!(*seen.lock(), vec![json!(1), json!("x")]);
    }

    #[test]
    fn test_error_and_panic_are_isolated() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));

        emitter.on("boom", recorder(&log, "first"));
        emitter.on("boom", Callback::new(|_| Err("bad input".into())));
        emitter.on("boom", Callback::new(|_| panic!("listener exploded")));
        emitter.on("boom", recorder(&log, "last"));

        assert_eq!(emitter.emit("boom", &[]), 4);
        assert_eq!(*log.lock(), vec!["first", "last"]);
    }

    #[test]
    fn test_duplicate_registration_runs_twice() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let cb = recorder(&log, "dup");

        emitter.on("e", cb.clone());
        emitter.on("e", cb.clone());
        emitter.emit("e", &[]);
        assert_eq!(log.lock().len(), 2);

        // off removes only the first registration
        assert!(emitter.off("e", &cb));
        assert_eq!(emitter.listener_count("e"), 1);
        emitter.emit("e", &[]);
        assert_eq!(log.lock().len(), 3);
    }

    #[test]
    fn test_off_unknown_is_noop() {
        let emitter = emitter();
        let cb = Callback::new(|_| Ok(()));
        assert!(!emitter.off("never", &cb));

        emitter.on("e", Callback::new(|_| Ok(())));
        assert!(!emitter.off("e", &cb));
        assert_eq!(emitter.listener_count("e"), 1);
    }

    #[test]
    fn test_once_fires_once_and_is_removed() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));

        emitter.once("e", recorder(&log, "once"));
        assert_eq!(emitter.listener_count("e"), 1);

        emitter.emit("e", &[]);
        assert_eq!(emitter.listener_count("e"), 0);
        emitter.emit("e", &[]);
        emitter.emit("e", &[]);

        assert_eq!(*log.lock(), vec!["once"]);
    }

    #[test]
    fn test_off_removes_pending_once() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let cb = recorder(&log, "once");

        emitter.once("e", cb.clone());
        assert!(emitter.off("e", &cb));
        emitter.emit("e", &[]);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_once_survives_reentrant_emit() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));

        // The first listener re-emits the same event before the once listener runs
        let inner = emitter.clone();
        let depth = Arc::new(AtomicBool::new(false));
        emitter.on(
            "e",
            Callback::new(move |_| {
                if !depth.swap(true, Ordering::SeqCst) {
                    inner.emit("e", &[]);
                }
                Ok(())
            }),
        );
        emitter.once("e", recorder(&log, "once"));

        emitter.emit("e", &[]);
        assert_eq!(*log.lock(), vec!["once"]);
    }

    #[test]
    fn test_snapshot_policy() {
        let emitter = emitter();
        let log = Arc::new(Mutex::new(Vec::new()));
        let late = recorder(&log, "late");
        let victim = recorder(&log, "victim");

        // First listener adds `late` and removes `victim`
        let inner = emitter.clone();
        let (add, remove) = (late.clone(), victim.clone());
        emitter.on(
            "e",
            Callback::new(move |_| {
                inner.on("e", add.clone());
                inner.off("e", &remove);
                Ok(())
            }),
        );
        emitter.on("e", victim);

        emitter.emit("e", &[]);
        // Snapshot taken before the first listener ran
        assert_eq!(*log.lock(), vec!["victim"]);
    }

    #[test]
    fn test_remove_all_listeners() {
        let emitter = emitter();
        emitter.on("a", Callback::new(|_| Ok(())));
        emitter.on("b", Callback::new(|_| Ok(())));

        emitter.remove_all_listeners(Some("a"));
        assert_eq!(emitter.listener_count("a"), 0);
        assert_eq!(emitter.listener_count("b"), 1);

        emitter.remove_all_listeners(None);
        assert!(emitter.event_names().is_empty());
    }
}
