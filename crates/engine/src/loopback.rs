//! In-process host runtime
//!
//! `LoopbackHost` stands in for the game runtime when there is none:
//! triggered events are delivered synchronously to the handlers registered
//! in the same scope, networked emits loop straight back to networked
//! handlers. Every subscription and every outbound event is recorded so
//! callers can inspect exactly what reached the host.

use std::collections::HashMap;
use std::sync::Arc;

use fxrs_sdk::{EntityHandle, NetworkId};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;

use crate::error::HostError;
use crate::host::{HostHandler, HostRuntime, NuiHandler, Scope};

type SharedHandler = Arc<dyn Fn(Vec<Value>) + Send + Sync>;
type SharedNuiHandler = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// An event that was handed to the host
#[derive(Debug, Clone, PartialEq)]
pub struct SentEvent {
    pub scope: Scope,
    pub name: String,
    pub args: Vec<Value>,
}

/// A native call that reached the host
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    pub name: String,
    pub args: Vec<Value>,
}

/// In-process host runtime
#[derive(Default)]
pub struct LoopbackHost {
    local: RwLock<HashMap<String, Vec<SharedHandler>>>,
    net: RwLock<HashMap<String, Vec<SharedHandler>>>,
    nui: RwLock<HashMap<String, SharedNuiHandler>>,
    network_ids: RwLock<HashMap<EntityHandle, NetworkId>>,
    natives: RwLock<HashMap<String, Value>>,
    native_calls: Mutex<Vec<NativeCall>>,
    sent: Mutex<Vec<SentEvent>>,
}

impl LoopbackHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty host behind an `Arc`
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn handlers(&self, scope: Scope) -> &RwLock<HashMap<String, Vec<SharedHandler>>> {
        match scope {
            Scope::Local => &self.local,
            Scope::Network => &self.net,
        }
    }

    /// Number of host-level subscriptions for a local event name
    pub fn local_subscriptions(&self, name: &str) -> usize {
        self.local.read().get(name).map_or(0, Vec::len)
    }

    /// Number of host-level subscriptions for a networked event name
    pub fn net_subscriptions(&self, name: &str) -> usize {
        self.net.read().get(name).map_or(0, Vec::len)
    }

    /// Deliver an event to the handlers of `scope` as if it came from the
    /// game (not recorded in [`sent`](Self::sent))
    ///
    /// Returns the number of handlers invoked.
    pub fn deliver(&self, scope: Scope, name: &str, args: Vec<Value>) -> usize {
        // Clone the list so handlers may subscribe while being dispatched
        let handlers: Vec<SharedHandler> = self
            .handlers(scope)
            .read()
            .get(name)
            .cloned()
            .unwrap_or_default();

        for handler in &handlers {
            handler(args.clone());
        }
        handlers.len()
    }

    /// Invoke an NUI callback as the UI layer would
    pub fn call_nui(&self, name: &str, payload: Value) -> Option<Value> {
        let handler = self.nui.read().get(name).cloned()?;
        Some(handler(payload))
    }

    /// Every event handed to `trigger_event` / `trigger_net_event`, in order
    pub fn sent(&self) -> Vec<SentEvent> {
        self.sent.lock().clone()
    }

    /// Forget recorded outbound events
    pub fn clear_sent(&self) {
        self.sent.lock().clear();
    }

    /// Give an entity a network id
    pub fn set_network_id(&self, entity: EntityHandle, id: NetworkId) {
        self.network_ids.write().insert(entity, id);
    }

    /// Set the value a native returns
    pub fn set_native(&self, name: &str, value: Value) {
        self.natives.write().insert(name.to_string(), value);
    }

    /// Every native call that reached the host, in order
    pub fn native_calls(&self) -> Vec<NativeCall> {
        self.native_calls.lock().clone()
    }

    fn record(&self, scope: Scope, name: &str, args: &[Value]) {
        self.sent.lock().push(SentEvent {
            scope,
            name: name.to_string(),
            args: args.to_vec(),
        });
    }
}

impl HostRuntime for LoopbackHost {
    fn add_event_handler(&self, name: &str, handler: HostHandler) -> Result<(), HostError> {
        self.local
            .write()
            .entry(name.to_string())
            .or_default()
            .push(Arc::from(handler));
        Ok(())
    }

    fn add_net_event_handler(&self, name: &str, handler: HostHandler) -> Result<(), HostError> {
        self.net
            .write()
            .entry(name.to_string())
            .or_default()
            .push(Arc::from(handler));
        Ok(())
    }

    fn trigger_event(&self, name: &str, args: Vec<Value>) -> Result<(), HostError> {
        self.record(Scope::Local, name, &args);
        self.deliver(Scope::Local, name, args);
        Ok(())
    }

    fn trigger_net_event(&self, name: &str, args: Vec<Value>) -> Result<(), HostError> {
        self.record(Scope::Network, name, &args);
        self.deliver(Scope::Network, name, args);
        Ok(())
    }

    fn network_id(&self, entity: EntityHandle) -> Option<NetworkId> {
        self.network_ids.read().get(&entity).copied()
    }

    fn register_nui_callback(&self, name: &str, handler: NuiHandler) -> Result<(), HostError> {
        self.nui.write().insert(name.to_string(), Arc::from(handler));
        Ok(())
    }

    fn invoke_native(&self, name: &str, args: &[Value]) -> Result<Value, HostError> {
        self.native_calls.lock().push(NativeCall {
            name: name.to_string(),
            args: args.to_vec(),
        });
        self.natives
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::UnknownNative(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_trigger_reaches_same_scope_only() {
        let host = LoopbackHost::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        host.add_event_handler(
            "ping",
            Box::new(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

        host.trigger_event("ping", vec![]).unwrap();
        host.trigger_net_event("ping", vec![]).unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(host.local_subscriptions("ping"), 1);
        assert_eq!(host.net_subscriptions("ping"), 0);
        assert_eq!(host.sent().len(), 2);
        assert_eq!(host.sent()[1].scope, Scope::Network);
    }

    #[test]
    fn test_deliver_is_not_recorded() {
        let host = LoopbackHost::new();
        host.add_net_event_handler("net::hit", Box::new(|_| {})).unwrap();

        assert_eq!(host.deliver(Scope::Network, "net::hit", vec![Value::from(1)]), 1);
        assert!(host.sent().is_empty());
    }

    #[test]
    fn test_handler_may_subscribe_during_dispatch() {
        let host = LoopbackHost::shared();
        let inner = host.clone();
        host.add_event_handler(
            "grow",
            Box::new(move |_| {
                let _ = inner.add_event_handler("grow", Box::new(|_| {}));
            }),
        )
        .unwrap();

        host.trigger_event("grow", vec![]).unwrap();
        assert_eq!(host.local_subscriptions("grow"), 2);
    }

    #[test]
    fn test_natives_and_network_ids() {
        let host = LoopbackHost::new();
        host.set_native("GET_RAIN_LEVEL", Value::from(0.5));
        host.set_network_id(EntityHandle(12), NetworkId(300));

        assert_eq!(
            host.invoke_native("GET_RAIN_LEVEL", &[]).unwrap(),
            Value::from(0.5)
        );
        assert_eq!(
            host.invoke_native("NOPE", &[]),
            Err(HostError::UnknownNative("NOPE".into()))
        );
        assert_eq!(host.native_calls().len(), 2);
        assert_eq!(host.network_id(EntityHandle(12)), Some(NetworkId(300)));
        assert_eq!(host.network_id(EntityHandle(13)), None);
    }

    #[test]
    fn test_nui_roundtrip() {
        let host = LoopbackHost::new();
        host.register_nui_callback("close", Box::new(|payload| payload))
            .unwrap();
        assert_eq!(
            host.call_nui("close", Value::from("bye")),
            Some(Value::from("bye"))
        );
        assert_eq!(host.call_nui("missing", Value::Null), None);
    }
}
