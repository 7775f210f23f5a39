//! Event System
//!
//! Publish/subscribe over two namespaces: local events stay inside the
//! runtime, networked events travel between client and server. Subscribing
//! to a name for the first time registers one host-level handler for it;
//! arguments delivered by the host are decoded before they reach listeners.
//!
//! # Architecture
//!
//! ```text
//! host event -> bridge handler -> argument codec -> emitter -> callbacks
//! emit()     -> entity resolution -> argument encoding -> host trigger
//! ```
//!
//! # Example
//!
//! ```ignore
//! use fxrs_core::{args, events::{self, Callback}};
//!
//! events::on("hit", Callback::new(|args| {
//!     tracing::info!("hit with {:?}", args);
//!     Ok(())
//! }))?;
//!
//! events::emit_server("hit", args![vehicle, 12, "headshot"])?;
//! ```
//!
//! The free functions operate on the default [`EventContext`] installed by
//! [`init`]. Every operation is also a method on `EventContext`.

mod bridge;
pub mod builtin;
mod codec;
mod context;
mod emitter;
mod logger;
mod registry;
mod types;

pub use bridge::{resolve_argument, wire_event_name, NET_EVENT_PREFIX};
pub use codec::{decode_argument, encode_argument, parse_all_arguments, parse_argument, Decoded};
pub use context::{context, init, install, is_initialized, EventContext};
pub use emitter::EventEmitter;
pub use fxrs_engine::Scope;
pub use logger::{Direction, EventLogger, LogFlags};
pub use registry::{EventRegistry, Namespace};
pub use types::{
    decode_arg, ArgumentError, Callback, EventArg, EventError, ListenerError, ListenerResult,
};

pub use builtin::{
    on_entity_damaged, on_game_event, on_ped_created, on_resource_start, on_resource_starting,
    on_resource_stop, on_voice_connected, on_voice_disconnected,
};

use serde_json::Value;

use crate::tasks;

/// Subscribe to a local event
pub fn on(key: &str, callback: Callback) -> Result<(), EventError> {
    context()?.on(key, callback)
}

/// Subscribe to a local event for a single invocation
pub fn once(key: &str, callback: Callback) -> Result<(), EventError> {
    context()?.once(key, callback)
}

/// Unsubscribe the first registration of `callback` from a local event
///
/// Returns whether a registration was removed.
pub fn off(key: &str, callback: &Callback) -> Result<bool, EventError> {
    Ok(context()?.off(key, callback))
}

/// Trigger a local event
pub fn emit(key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
    context()?.emit(key, args)
}

/// Subscribe to a networked event
pub fn on_server(key: &str, callback: Callback) -> Result<(), EventError> {
    context()?.on_server(key, callback)
}

/// Subscribe to a networked event for a single invocation
pub fn once_server(key: &str, callback: Callback) -> Result<(), EventError> {
    context()?.once_server(key, callback)
}

/// Unsubscribe the first registration of `callback` from a networked event
pub fn off_server(key: &str, callback: &Callback) -> Result<bool, EventError> {
    Ok(context()?.off_server(key, callback))
}

/// Emit a networked event
pub fn emit_server(key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
    context()?.emit_server(key, args)
}

/// Unsubscribe every listener of `key` in both namespaces, or every
/// listener at all when `key` is `None`
///
/// Host-level subscriptions stay in place.
pub fn remove_all_listeners(key: Option<&str>) -> Result<(), EventError> {
    context()?.remove_all_listeners(key);
    Ok(())
}

/// Enable or disable logging of listener failures (on by default)
pub fn set_log_event_errors(enabled: bool) -> Result<(), EventError> {
    context()?.set_log_event_errors(enabled);
    Ok(())
}

/// Enable or disable logging of every inbound and outbound event
pub fn set_log_events(enabled: bool) -> Result<(), EventError> {
    context()?.set_log_events(enabled);
    Ok(())
}

/// Register a UI callback with the host
pub fn on_nui<F>(name: &str, handler: F) -> Result<(), EventError>
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    context()?.on_nui(name, handler)
}

/// Queue a local emission for the next host tick
///
/// Safe to call from any thread; the emission runs on the main thread.
pub fn queue_emit(key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
    queue_send(Scope::Local, key, args)
}

/// Queue a networked emission for the next host tick
pub fn queue_emit_server(key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
    queue_send(Scope::Network, key, args)
}

fn queue_send(scope: Scope, key: &str, args: Vec<EventArg>) -> Result<(), EventError> {
    let context = context()?;
    let key = key.to_string();
    tasks::queue_task(move || {
        if let Err(err) = context.send(scope, &key, args) {
            tracing::error!("[{}] queued emit of '{}' failed: {}", scope, key, err);
        }
    })?;
    Ok(())
}
