//! fxrs Engine - Host Runtime Surface and Global Storage
//!
//! This crate handles:
//! - The [`HostRuntime`] trait: every primitive the framework consumes from
//!   the surrounding game runtime (event subscription, triggering, entity
//!   network ids, NUI callbacks, native invocation)
//! - Storing the installed host in a process-wide static
//! - An in-process [`LoopbackHost`] for tests and tooling
//!
//! # Architecture
//!
//! The host is installed once during plugin load via [`init_host`] and is
//! accessed through [`host()`]. Nothing in this crate knows about
//! application-level events; it only moves raw argument lists in and out.
//!
//! # Thread Safety
//!
//! The installed host lives for the plugin's lifetime. The thread that
//! installed it is recorded for runtime checks via [`is_main_thread()`].

pub mod error;
pub mod globals;
pub mod host;
pub mod loopback;

pub use error::HostError;
pub use globals::{host, init_host, is_host_installed, is_main_thread, try_host};
pub use host::{HostHandler, HostRuntime, NuiHandler, Scope};
pub use loopback::{LoopbackHost, NativeCall, SentEvent};
