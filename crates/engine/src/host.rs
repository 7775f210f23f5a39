//! The host runtime surface
//!
//! Every primitive the framework consumes from the surrounding game runtime.
//! Implementations are provided by the FFI layer (a real host) or by
//! [`LoopbackHost`](crate::LoopbackHost) for in-process use.

use std::fmt;

use fxrs_sdk::{EntityHandle, NetworkId};
use serde_json::Value;

use crate::error::HostError;

/// Handler invoked by the host with the raw positional argument list
pub type HostHandler = Box<dyn Fn(Vec<Value>) + Send + Sync>;

/// Handler invoked by the host for an NUI callback
///
/// Receives the request payload and returns the response payload.
pub type NuiHandler = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Event namespace on the host side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// In-process events
    Local,
    /// Client <-> server events
    Network,
}

impl Scope {
    /// Short name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Local => "local",
            Scope::Network => "net",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitives provided by the host runtime
///
/// All methods are called from the dispatch thread. Handlers passed to the
/// host may be invoked re-entrantly from within `trigger_event` and
/// `trigger_net_event`.
pub trait HostRuntime: Send + Sync {
    /// Subscribe to a host-level local event
    fn add_event_handler(&self, name: &str, handler: HostHandler) -> Result<(), HostError>;

    /// Subscribe to a host-level networked event
    fn add_net_event_handler(&self, name: &str, handler: HostHandler) -> Result<(), HostError>;

    /// Trigger a local event
    fn trigger_event(&self, name: &str, args: Vec<Value>) -> Result<(), HostError>;

    /// Emit a networked event
    fn trigger_net_event(&self, name: &str, args: Vec<Value>) -> Result<(), HostError>;

    /// Resolve an entity to its network id
    ///
    /// Returns `None` if the entity does not exist or is not networked.
    fn network_id(&self, entity: EntityHandle) -> Option<NetworkId>;

    /// Register an NUI callback
    fn register_nui_callback(&self, name: &str, handler: NuiHandler) -> Result<(), HostError>;

    /// Invoke a host native by name with positional arguments
    fn invoke_native(&self, name: &str, args: &[Value]) -> Result<Value, HostError>;
}
