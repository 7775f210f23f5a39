//! Task queue for main thread execution
//!
//! Lets background threads hand work to the host's main thread. Tasks run
//! when the host ticks the plugin.

pub mod queue;

pub use queue::*;
