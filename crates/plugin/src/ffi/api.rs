//! Host function table
//!
//! The host passes an [`FxHostApi`] at load. [`FfiHost`] implements
//! [`HostRuntime`] on top of it. Rust handlers never cross the boundary:
//! they stay in a slot map and the host only sees their ids, which it hands
//! back through `fxrs_on_event` / `fxrs_on_nui`.
//!
//! Argument lists cross as JSON arrays, single values as JSON.

use std::ffi::{c_char, c_void};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use slotmap::{new_key_type, Key, KeyData, SlotMap};

use fxrs_engine::{HostError, HostHandler, HostRuntime, NuiHandler, Scope};
use fxrs_sdk::{EntityHandle, NetworkId};

use super::strings::{borrow_str, to_c_string};

/// Opaque id of a Rust handler, as seen by the host
pub type HandlerId = u64;

/// Event namespace, as seen by the host
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FxScope {
    Local = 0,
    Network = 1,
}

impl From<Scope> for FxScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Local => FxScope::Local,
            Scope::Network => FxScope::Network,
        }
    }
}

/// Receives a JSON result from the host; `json` may be null for "no value"
pub type FxResultFn = unsafe extern "C" fn(sink: *mut c_void, json: *const c_char);

/// Subscribe `handler_id` to a host event. Returns false if refused.
pub type FxAddEventHandlerFn = unsafe extern "C" fn(
    user_data: *mut c_void,
    scope: FxScope,
    name: *const c_char,
    handler_id: HandlerId,
) -> bool;

/// Trigger a host event with a JSON argument array. Returns false if refused.
pub type FxTriggerEventFn = unsafe extern "C" fn(
    user_data: *mut c_void,
    scope: FxScope,
    name: *const c_char,
    args_json: *const c_char,
) -> bool;

/// Resolve an entity's network id. Returns false if it has none.
pub type FxNetworkIdFn =
    unsafe extern "C" fn(user_data: *mut c_void, entity: i32, out_id: *mut i32) -> bool;

/// Register `handler_id` as a UI callback. Returns false if refused.
pub type FxRegisterNuiFn = unsafe extern "C" fn(
    user_data: *mut c_void,
    name: *const c_char,
    handler_id: HandlerId,
) -> bool;

/// Invoke a native with a JSON argument array. The host passes the JSON
/// result to `on_result` before returning.
///
/// Returns [`NATIVE_OK`], [`NATIVE_UNKNOWN`] or [`NATIVE_FAILED`].
pub type FxInvokeNativeFn = unsafe extern "C" fn(
    user_data: *mut c_void,
    name: *const c_char,
    args_json: *const c_char,
    sink: *mut c_void,
    on_result: FxResultFn,
) -> i32;

pub const NATIVE_OK: i32 = 0;
pub const NATIVE_UNKNOWN: i32 = 1;
/// The native raised; the result, if any, is the error message
pub const NATIVE_FAILED: i32 = 2;

/// Functions provided by the host
///
/// `add_event_handler` and `trigger_event` are required; the rest may be
/// null when the host lacks the feature.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct FxHostApi {
    /// Passed back to every function
    pub user_data: *mut c_void,
    pub add_event_handler: Option<FxAddEventHandlerFn>,
    pub trigger_event: Option<FxTriggerEventFn>,
    pub network_id: Option<FxNetworkIdFn>,
    pub register_nui_callback: Option<FxRegisterNuiFn>,
    pub invoke_native: Option<FxInvokeNativeFn>,
}

new_key_type! {
    struct HandlerKey;
}

type SharedHandler = Arc<dyn Fn(Vec<Value>) + Send + Sync>;
type SharedNuiHandler = Arc<dyn Fn(Value) -> Value + Send + Sync>;

fn key_from_id(id: HandlerId) -> HandlerKey {
    HandlerKey::from(KeyData::from_ffi(id))
}

/// [`HostRuntime`] over a host function table
pub struct FfiHost {
    api: FxHostApi,
    handlers: RwLock<SlotMap<HandlerKey, SharedHandler>>,
    nui: RwLock<SlotMap<HandlerKey, SharedNuiHandler>>,
}

// SAFETY: the host guarantees its function table and user data may be used
// from whichever thread it calls into the plugin on.
unsafe impl Send for FfiHost {}
unsafe impl Sync for FfiHost {}

impl FfiHost {
    /// Wrap a host function table
    pub fn new(api: FxHostApi) -> Result<Self, HostError> {
        if api.add_event_handler.is_none() {
            return Err(HostError::Unsupported("add_event_handler"));
        }
        if api.trigger_event.is_none() {
            return Err(HostError::Unsupported("trigger_event"));
        }

        Ok(Self {
            api,
            handlers: RwLock::new(SlotMap::with_key()),
            nui: RwLock::new(SlotMap::with_key()),
        })
    }

    fn subscribe(&self, scope: Scope, name: &str, handler: HostHandler) -> Result<(), HostError> {
        let add = self
            .api
            .add_event_handler
            .ok_or(HostError::Unsupported("add_event_handler"))?;
        let c_name = to_c_string(name)?;

        // Insert first: the host may deliver as soon as it accepts
        let key = self.handlers.write().insert(Arc::from(handler));
        let id = key.data().as_ffi();

        let accepted = unsafe { add(self.api.user_data, scope.into(), c_name.as_ptr(), id) };
        if !accepted {
            self.handlers.write().remove(key);
            return Err(HostError::Rejected {
                operation: "add_event_handler",
                name: name.to_string(),
            });
        }

        tracing::debug!("[{}] host handler {} for '{}'", scope, id, name);
        Ok(())
    }

    fn trigger(&self, scope: Scope, name: &str, args: Vec<Value>) -> Result<(), HostError> {
        let trigger = self
            .api
            .trigger_event
            .ok_or(HostError::Unsupported("trigger_event"))?;
        let c_name = to_c_string(name)?;
        let c_args = to_c_string(&Value::Array(args).to_string())?;

        if unsafe { trigger(self.api.user_data, scope.into(), c_name.as_ptr(), c_args.as_ptr()) } {
            Ok(())
        } else {
            Err(HostError::Rejected {
                operation: "trigger_event",
                name: name.to_string(),
            })
        }
    }

    /// Run the event handler registered under `id`
    ///
    /// Returns false if there is no such handler.
    pub fn dispatch(&self, id: HandlerId, args: Vec<Value>) -> bool {
        // Clone out so the handler may subscribe while running
        let handler = self.handlers.read().get(key_from_id(id)).cloned();
        match handler {
            Some(handler) => {
                handler(args);
                true
            }
            None => {
                tracing::warn!("Host delivered to unknown handler {}", id);
                false
            }
        }
    }

    /// Run the UI callback registered under `id`
    pub fn dispatch_nui(&self, id: HandlerId, payload: Value) -> Option<Value> {
        let handler = self.nui.read().get(key_from_id(id)).cloned();
        match handler {
            Some(handler) => Some(handler(payload)),
            None => {
                tracing::warn!("Host called unknown NUI callback {}", id);
                None
            }
        }
    }

    /// Number of live event handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.read().len()
    }
}

/// Result slot filled by [`receive_result`]
type ResultSink = Option<String>;

unsafe extern "C" fn receive_result(sink: *mut c_void, json: *const c_char) {
    let Some(sink) = (sink as *mut ResultSink).as_mut() else {
        return;
    };
    *sink = borrow_str(json).map(str::to_string);
}

impl HostRuntime for FfiHost {
    fn add_event_handler(&self, name: &str, handler: HostHandler) -> Result<(), HostError> {
        self.subscribe(Scope::Local, name, handler)
    }

    fn add_net_event_handler(&self, name: &str, handler: HostHandler) -> Result<(), HostError> {
        self.subscribe(Scope::Network, name, handler)
    }

    fn trigger_event(&self, name: &str, args: Vec<Value>) -> Result<(), HostError> {
        self.trigger(Scope::Local, name, args)
    }

    fn trigger_net_event(&self, name: &str, args: Vec<Value>) -> Result<(), HostError> {
        self.trigger(Scope::Network, name, args)
    }

    fn network_id(&self, entity: EntityHandle) -> Option<NetworkId> {
        let resolve = self.api.network_id?;
        let mut id = 0;
        let found = unsafe { resolve(self.api.user_data, entity.raw(), &mut id) };
        found.then_some(NetworkId(id))
    }

    fn register_nui_callback(&self, name: &str, handler: NuiHandler) -> Result<(), HostError> {
        let register = self
            .api
            .register_nui_callback
            .ok_or(HostError::Unsupported("register_nui_callback"))?;
        let c_name = to_c_string(name)?;

        let key = self.nui.write().insert(Arc::from(handler));
        if unsafe { register(self.api.user_data, c_name.as_ptr(), key.data().as_ffi()) } {
            Ok(())
        } else {
            self.nui.write().remove(key);
            Err(HostError::Rejected {
                operation: "register_nui_callback",
                name: name.to_string(),
            })
        }
    }

    fn invoke_native(&self, name: &str, args: &[Value]) -> Result<Value, HostError> {
        let invoke = self
            .api
            .invoke_native
            .ok_or(HostError::Unsupported("invoke_native"))?;
        let c_name = to_c_string(name)?;
        let c_args = to_c_string(&Value::Array(args.to_vec()).to_string())?;

        let mut result: ResultSink = None;
        let status = unsafe {
            invoke(
                self.api.user_data,
                c_name.as_ptr(),
                c_args.as_ptr(),
                &mut result as *mut ResultSink as *mut c_void,
                receive_result,
            )
        };

        match status {
            NATIVE_OK => match result {
                None => Ok(Value::Null),
                Some(json) => serde_json::from_str(&json).map_err(|err| HostError::NativeFailed {
                    name: name.to_string(),
                    reason: format!("invalid result JSON: {}", err),
                }),
            },
            NATIVE_UNKNOWN => Err(HostError::UnknownNative(name.to_string())),
            _ => Err(HostError::NativeFailed {
                name: name.to_string(),
                reason: result.unwrap_or_else(|| format!("host status {}", status)),
            }),
        }
    }
}
