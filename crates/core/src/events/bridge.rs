//! Host bridging for local and networked events
//!
//! Application code subscribes to event names; the host only needs to know
//! about each name once per namespace. The first subscription to a name
//! registers a single host handler which decodes the raw arguments and fans
//! them out through the namespace emitter. Later subscriptions only touch
//! the emitter.
//!
//! ```text
//! host event -> bridge handler -> argument codec -> emitter -> listeners
//! ```
//!
//! Networked events use `net::`-prefixed names on the wire. Events the host
//! delivers before the first subscription to their name are not buffered.

use serde_json::Value;

use fxrs_engine::{HostHandler, HostRuntime, Scope};

use super::codec::{encode_argument, parse_all_arguments};
use super::context::EventContext;
use super::logger::Direction;
use super::types::{Callback, EventArg, EventError};

/// Prefix of networked event names on the wire
pub const NET_EVENT_PREFIX: &str = "net::";

/// Wire name of a networked event
///
/// Prefixes `name` with [`NET_EVENT_PREFIX`] unless it already has it.
pub fn wire_event_name(name: &str) -> String {
    if name.starts_with(NET_EVENT_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", NET_EVENT_PREFIX, name)
    }
}

/// Turn an outbound argument into a wire value
///
/// Entities become their network id (or their raw handle when the host has
/// none); arrays and objects are JSON-encoded.
pub fn resolve_argument(host: &dyn HostRuntime, arg: EventArg) -> Value {
    match arg {
        EventArg::Entity(handle) => match host.network_id(handle) {
            Some(id) => Value::from(id.raw()),
            None => {
                tracing::debug!("{} has no network id, sending raw handle", handle);
                Value::from(handle.raw())
            }
        },
        EventArg::Value(value) => encode_argument(value),
    }
}

impl EventContext {
    /// Make sure the host delivers `name` to this context
    ///
    /// Registers at most one host handler per (scope, name), no matter how
    /// often it is called. If the host refuses the registration the name is
    /// left unbridged so a later call can retry.
    pub fn setup_listener(&self, scope: Scope, name: &str) -> Result<(), EventError> {
        let namespace = self.namespace(scope);
        if !namespace.claim_bridge(name) {
            return Ok(());
        }

        let target = namespace.clone();
        let logger = self.shared_logger().clone();
        let event = name.to_string();
        let handler: HostHandler = Box::new(move |raw| {
            let args = parse_all_arguments(raw);
            target.emitter().emit(&event, &args);
            logger.log_traffic(Direction::Inbound, scope, &event, &args);
        });

        let registered = match scope {
            Scope::Local => self.host().add_event_handler(name, handler),
            Scope::Network => self
                .host()
                .add_net_event_handler(&wire_event_name(name), handler),
        };

        if let Err(err) = registered {
            namespace.release_bridge(name);
            return Err(err.into());
        }

        tracing::debug!("[{}] bridged '{}' to host", scope, name);
        Ok(())
    }

    /// Bridge `name` and subscribe `callback`
    pub fn register_event(
        &self,
        scope: Scope,
        name: &str,
        callback: Callback,
    ) -> Result<(), EventError> {
        self.setup_listener(scope, name)?;
        self.namespace(scope).emitter().on(name, callback);
        Ok(())
    }

    /// Bridge `name` and subscribe `callback` for a single invocation
    pub fn register_event_once(
        &self,
        scope: Scope,
        name: &str,
        callback: Callback,
    ) -> Result<(), EventError> {
        self.setup_listener(scope, name)?;
        self.namespace(scope).emitter().once(name, callback);
        Ok(())
    }

    /// Unsubscribe the first registration of `callback`
    ///
    /// The host subscription stays in place.
    pub fn remove_listener(&self, scope: Scope, name: &str, callback: &Callback) -> bool {
        self.namespace(scope).emitter().off(name, callback)
    }

    /// Unsubscribe every listener of `name` (or of everything) in `scope`
    pub fn remove_scope_listeners(&self, scope: Scope, name: Option<&str>) {
        self.namespace(scope).emitter().remove_all_listeners(name);
    }

    /// Hand an event to the host
    ///
    /// Local events are triggered under their own name, networked events
    /// under their wire name.
    pub fn send(&self, scope: Scope, name: &str, args: Vec<EventArg>) -> Result<(), EventError> {
        let host = self.host().as_ref();
        let values: Vec<Value> = args
            .into_iter()
            .map(|arg| resolve_argument(host, arg))
            .collect();

        self.logger()
            .log_traffic(Direction::Outbound, scope, name, &values);

        match scope {
            Scope::Local => host.trigger_event(name, values)?,
            Scope::Network => host.trigger_net_event(&wire_event_name(name), values)?,
        }
        Ok(())
    }

    /// Subscribe to a local event
    pub fn on(&self, key: &str, callback: Callback) -> Result<(), EventError> {
        self.register_event(Scope::Local, key, callback)
    }

    /// Subscribe to a local event for a single invocation
    pub fn once(&self, key: &str, callback: Callback) -> Result<(), EventError> {
        self.register_event_once(Scope::Local, key, callback)
    }

    /// Unsubscribe from a local event
    pub fn off(&self, key: &str, callback: &Callback) -> bool {
        self.remove_listener(Scope::Local, key, callback)
    }

    /// Trigger a local event
    pub fn emit(&self, key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
        self.send(Scope::Local, key, args)
    }

    /// Subscribe to a networked event
    pub fn on_server(&self, key: &str, callback: Callback) -> Result<(), EventError> {
        self.register_event(Scope::Network, key, callback)
    }

    /// Subscribe to a networked event for a single invocation
    pub fn once_server(&self, key: &str, callback: Callback) -> Result<(), EventError> {
        self.register_event_once(Scope::Network, key, callback)
    }

    /// Unsubscribe from a networked event
    pub fn off_server(&self, key: &str, callback: &Callback) -> bool {
        self.remove_listener(Scope::Network, key, callback)
    }

    /// Emit a networked event
    pub fn emit_server(&self, key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
        self.send(Scope::Network, key, args)
    }

    /// Unsubscribe every listener of `key` (or of everything) in both
    /// namespaces
    pub fn remove_all_listeners(&self, key: Option<&str>) {
        self.remove_scope_listeners(Scope::Local, key);
        self.remove_scope_listeners(Scope::Network, key);
    }

    /// Register a UI callback with the host
    ///
    /// Goes straight to the host; UI callbacks bypass the namespaces.
    pub fn on_nui<F>(&self, name: &str, handler: F) -> Result<(), EventError>
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.host().register_nui_callback(name, Box::new(handler))?;
        tracing::debug!("Registered NUI callback '{}'", name);
        Ok(())
    }
}
