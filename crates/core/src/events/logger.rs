//! Dispatch logging
//!
//! Two independent switches: listener errors (on by default) and event
//! traffic (off by default). The switches only decide whether a line is
//! written; they never change what gets dispatched.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use bitflags::bitflags;
use serde_json::Value;

use fxrs_engine::Scope;

bitflags! {
    /// Which dispatch activity is logged
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LogFlags: u8 {
        /// Listener failures
        const ERRORS = 0x01;
        /// Every inbound and outbound event
        const TRAFFIC = 0x02;
    }
}

impl Default for LogFlags {
    fn default() -> Self {
        LogFlags::ERRORS
    }
}

/// Direction of an event relative to this process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Delivered by the host
    Inbound,
    /// Handed to the host
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Inbound => "<-",
            Direction::Outbound => "->",
        })
    }
}

/// Togglable dispatch logger
#[derive(Debug)]
pub struct EventLogger {
    flags: AtomicU8,
}

impl Default for EventLogger {
    fn default() -> Self {
        Self::new(LogFlags::default())
    }
}

impl EventLogger {
    /// Create a logger with the given switches
    pub fn new(flags: LogFlags) -> Self {
        Self {
            flags: AtomicU8::new(flags.bits()),
        }
    }

    /// Current switches
    pub fn flags(&self) -> LogFlags {
        LogFlags::from_bits_truncate(self.flags.load(Ordering::Relaxed))
    }

    fn set(&self, flag: LogFlags, enabled: bool) {
        if enabled {
            self.flags.fetch_or(flag.bits(), Ordering::Relaxed);
        } else {
            self.flags.fetch_and(!flag.bits(), Ordering::Relaxed);
        }
    }

    /// Enable or disable listener error logging
    pub fn set_log_errors(&self, enabled: bool) {
        self.set(LogFlags::ERRORS, enabled);
    }

    /// Enable or disable traffic logging
    pub fn set_log_events(&self, enabled: bool) {
        self.set(LogFlags::TRAFFIC, enabled);
    }

    /// Whether listener errors are logged
    pub fn logs_errors(&self) -> bool {
        self.flags().contains(LogFlags::ERRORS)
    }

    /// Whether traffic is logged
    pub fn logs_events(&self) -> bool {
        self.flags().contains(LogFlags::TRAFFIC)
    }

    /// Record a listener failure
    pub fn log_error(&self, scope: Scope, event: &str, error: &dyn fmt::Display) {
        if self.logs_errors() {
            tracing::error!("[{}] listener for '{}' failed: {}", scope, event, error);
        }
    }

    /// Record an event crossing the host boundary
    pub fn log_traffic(&self, direction: Direction, scope: Scope, event: &str, args: &[Value]) {
        if self.logs_events() {
            tracing::info!("[{}] {} {} {:?}", scope, direction, event, args);
        }
    }
}
