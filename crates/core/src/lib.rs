//! fxrs - Core Logic
//!
//! This crate contains the event dispatch layer and the typed native
//! bindings of the fxrs scripting framework.
//!
//! # Re-exports
//!
//! This crate re-exports the SDK and engine crates for convenience:
//! - [`sdk`] - Host value types, event and native names
//! - [`engine`] - The host runtime surface and its global storage

// Allow the crate to refer to itself as `fxrs_core` for proc macro compatibility
extern crate self as fxrs_core;

use tracing::info;

// Re-export SDK and engine crates
pub use fxrs_engine as engine;
pub use fxrs_sdk as sdk;

pub mod config;
pub mod entities;
pub mod events;
pub mod natives;
pub mod tasks;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use events::{
    emit, emit_server, off, off_server, on, on_nui, on_server, once, once_server,
    queue_emit, queue_emit_server, remove_all_listeners, set_log_event_errors, set_log_events,
    Callback, EventArg, EventContext, EventError, ListenerError, ListenerResult, Scope,
};
pub use tasks::queue_task;

// Re-export entity types
pub use entities::{Entity, NetworkEntity, Ped, Prop, Vehicle};

// Re-export config types
pub use config::{ConfigError, ConfigResult, CoreConfig, ResourceConfig};

// Re-export native error type
pub use natives::NativeError;

// Re-export macros
pub use fxrs_macros::event_handler;

/// Items used by generated code. Not part of the public API.
#[doc(hidden)]
pub mod __private {
    pub use serde_json;
}

/// Shutdown the framework
///
/// Called from the FFI layer when the host unloads the plugin.
pub fn shutdown() {
    let pending = tasks::process_queued_tasks();
    if pending > 0 {
        tracing::debug!("Flushed {} queued tasks during shutdown", pending);
    }
    info!("fxrs shutting down...");
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use crate::testing::{global_context, global_host};
    use crate::{args, emit, emit_server, event_handler};

    static TYPED: Mutex<Vec<(u32, String, Option<bool>)>> = Mutex::new(Vec::new());
    static SERVER_ONCE: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static REPEATED: Mutex<usize> = Mutex::new(0);

    #[event_handler("lib_tests::typed")]
    fn record_typed(amount: u32, label: String, flag: Option<bool>) {
        TYPED.lock().push((amount, label, flag));
    }

    #[event_handler("lib_tests::server_once", server, once)]
    fn record_server_once(name: String) -> Result<(), std::fmt::Error> {
        SERVER_ONCE.lock().push(name);
        Ok(())
    }

    #[event_handler("lib_tests::repeated")]
    fn record_repeated() {
        *REPEATED.lock() += 1;
    }

    #[test]
    fn test_sdk_types_exist() {
        // Verify SDK types are accessible through the re-export
        use crate::sdk::EntityHandle;
        assert!(!EntityHandle::NULL.is_valid());
    }

    #[test]
    fn test_event_handler_decodes_parameters() {
        global_context();
        record_typed_register().unwrap();

        emit("lib_tests::typed", args![5, "first"]).unwrap();
        // Mistyped argument fails the listener without reaching the body
        emit("lib_tests::typed", args!["many", "second"]).unwrap();
        emit("lib_tests::typed", args![7, "third", true]).unwrap();

        assert!(record_typed_unregister());
        assert!(!record_typed_unregister());
        emit("lib_tests::typed", args![9, "fourth"]).unwrap();

        assert_eq!(
            *TYPED.lock(),
            vec![
                (5, "first".to_string(), None),
                (7, "third".to_string(), Some(true)),
            ]
        );
    }

    #[test]
    fn test_event_handler_server_once() {
        global_context();
        record_server_once_register().unwrap();

        emit_server("lib_tests::server_once", args!["a"]).unwrap();
        emit_server("lib_tests::server_once", args!["b"]).unwrap();

        assert_eq!(*SERVER_ONCE.lock(), vec!["a".to_string()]);
        assert_eq!(
            global_host().net_subscriptions("net::lib_tests::server_once"),
            1
        );
    }

    #[test]
    fn test_event_handler_register_twice_runs_once() {
        global_context();
        let first = record_repeated_register().unwrap();
        let second = record_repeated_register().unwrap();
        assert_eq!(first, second);

        emit("lib_tests::repeated", args![]).unwrap();
        assert_eq!(*REPEATED.lock(), 1);

        assert!(record_repeated_unregister());
        emit("lib_tests::repeated", args![]).unwrap();
        assert_eq!(*REPEATED.lock(), 1);
    }
}
