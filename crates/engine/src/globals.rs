//! Global host storage
//!
//! The host runtime is installed once during plugin load and stored here.
//! Access is thread-safe via OnceLock.

use std::sync::{Arc, OnceLock};
use std::thread::ThreadId;

use crate::error::HostError;
use crate::host::HostRuntime;

/// Installed host state
struct HostGlobals {
    /// The host runtime
    runtime: Arc<dyn HostRuntime>,

    /// Dispatch thread ID for thread safety checks
    main_thread_id: ThreadId,
}

/// Global host storage
static HOST: OnceLock<HostGlobals> = OnceLock::new();

/// Install the process host runtime
///
/// Called once during plugin load. Records the calling thread as the
/// dispatch thread. Returns an error if a host is already installed.
pub fn init_host(runtime: Arc<dyn HostRuntime>) -> Result<(), HostError> {
    HOST.set(HostGlobals {
        runtime,
        main_thread_id: std::thread::current().id(),
    })
    .map_err(|_| HostError::AlreadyInstalled)?;

    tracing::info!("Host runtime installed");
    Ok(())
}

/// Get the installed host runtime
pub fn host() -> Result<&'static Arc<dyn HostRuntime>, HostError> {
    try_host().ok_or(HostError::NotInstalled)
}

/// Try to get the installed host runtime
pub fn try_host() -> Option<&'static Arc<dyn HostRuntime>> {
    HOST.get().map(|g| &g.runtime)
}

/// Check if a host runtime is installed
pub fn is_host_installed() -> bool {
    HOST.get().is_some()
}

/// Check if current thread is the dispatch thread
pub fn is_main_thread() -> bool {
    HOST.get()
        .map(|g| std::thread::current().id() == g.main_thread_id)
        .unwrap_or(false)
}
