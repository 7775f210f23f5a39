//! C-compatible exports called by the host

use std::ffi::{c_char, c_void};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

use serde_json::Value;
use tracing::instrument;

use fxrs_core::{events, CoreConfig};
use fxrs_engine::init_host;

use super::api::{FfiHost, FxHostApi, FxResultFn, HandlerId};
use super::strings::{borrow_str, to_c_string, write_error};

// Plugin metadata - static strings with null terminators for C compatibility
static AUTHOR: &[u8] = b"fxrs contributors\0";
static NAME: &[u8] = b"fxrs\0";
static DESCRIPTION: &[u8] = b"Rust scripting runtime with local and networked events\0";
static LICENSE: &[u8] = b"MIT\0";
static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
static LOG_TAG: &[u8] = b"FXRS\0";

/// The host installed at load
static PLUGIN: OnceLock<Arc<FfiHost>> = OnceLock::new();

fn init_logging(config: &CoreConfig) {
    let level = if config.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

fn load(api: FxHostApi) -> Result<(), String> {
    let config = CoreConfig::load();
    init_logging(config.as_ref().unwrap_or(&CoreConfig::default()));

    tracing::info!("fxrs loading...");
    let config = config.unwrap_or_else(|e| {
        tracing::warn!("Using default core config: {}", e);
        CoreConfig::default()
    });

    let host = Arc::new(FfiHost::new(api).map_err(|e| format!("Host error: {}", e))?);
    PLUGIN
        .set(host.clone())
        .map_err(|_| "Plugin already loaded".to_string())?;

    init_host(host.clone()).map_err(|e| e.to_string())?;
    let context = events::init(host).map_err(|e| e.to_string())?;
    config.apply(&context);

    tracing::info!("fxrs loaded successfully!");
    tracing::info!("Main thread ID: {:?}", std::thread::current().id());
    Ok(())
}

/// Called when the host loads the plugin
///
/// # Safety
/// - `api` must point to a valid host function table; it is copied
/// - `error` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn fxrs_plugin_load(
    api: *const FxHostApi,
    error: *mut c_char,
    maxlen: usize,
) -> bool {
    if api.is_null() {
        write_error(error, maxlen, "Host API is null");
        return false;
    }
    let api = *api;

    match panic::catch_unwind(AssertUnwindSafe(move || load(api))) {
        Ok(Ok(())) => true,
        Ok(Err(msg)) => {
            tracing::error!("Failed to load: {}", msg);
            write_error(error, maxlen, &msg);
            false
        }
        Err(_) => {
            write_error(error, maxlen, "Panic during load");
            false
        }
    }
}

/// Called when the host unloads the plugin
///
/// # Safety
/// - `error` must be a valid pointer to a buffer of at least `maxlen` bytes, or null
#[no_mangle]
#[instrument(skip_all)]
pub unsafe extern "C" fn fxrs_plugin_unload(error: *mut c_char, maxlen: usize) -> bool {
    tracing::info!("fxrs unloading...");

    match panic::catch_unwind(|| {
        let _ = events::remove_all_listeners(None);
        crate::shutdown();
    }) {
        Ok(()) => true,
        Err(_) => {
            write_error(error, maxlen, "Panic during shutdown");
            false
        }
    }
}

/// Parse a JSON argument list from the host
///
/// Null or empty means no arguments; a non-array value is one argument.
fn parse_args(json: Option<&str>) -> Result<Vec<Value>, serde_json::Error> {
    let Some(json) = json.filter(|j| !j.trim().is_empty()) else {
        return Ok(Vec::new());
    };
    Ok(match serde_json::from_str(json)? {
        Value::Array(args) => args,
        Value::Null => Vec::new(),
        other => vec![other],
    })
}

/// Deliver a host event to the handler registered under `handler_id`
///
/// Returns false if the handler is unknown or the arguments are not JSON.
///
/// # Safety
/// - `args_json` must be a valid null-terminated C string or null
#[no_mangle]
pub unsafe extern "C" fn fxrs_on_event(handler_id: HandlerId, args_json: *const c_char) -> bool {
    let Some(host) = PLUGIN.get() else {
        return false;
    };
    let args = match parse_args(borrow_str(args_json)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("Invalid arguments for handler {}: {}", handler_id, e);
            return false;
        }
    };

    panic::catch_unwind(AssertUnwindSafe(|| host.dispatch(handler_id, args))).unwrap_or_else(|_| {
        tracing::error!("Panic while dispatching handler {}", handler_id);
        false
    })
}

/// Run the UI callback registered under `handler_id`
///
/// The JSON response is passed to `on_result` before returning.
///
/// # Safety
/// - `payload_json` must be a valid null-terminated C string or null
/// - `on_result` is called with `sink` and must accept it
#[no_mangle]
pub unsafe extern "C" fn fxrs_on_nui(
    handler_id: HandlerId,
    payload_json: *const c_char,
    sink: *mut c_void,
    on_result: Option<FxResultFn>,
) -> bool {
    let Some(host) = PLUGIN.get() else {
        return false;
    };
    let payload = borrow_str(payload_json)
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or(Value::Null);

    let response = panic::catch_unwind(AssertUnwindSafe(|| host.dispatch_nui(handler_id, payload)));
    let Ok(Some(response)) = response else {
        return false;
    };

    if let Some(on_result) = on_result {
        match to_c_string(&response.to_string()) {
            Ok(json) => on_result(sink, json.as_ptr()),
            Err(e) => {
                tracing::error!("NUI response not passable: {}", e);
                return false;
            }
        }
    }
    true
}

/// Called by the host once per tick on the main thread
///
/// Runs queued tasks and returns how many ran.
#[no_mangle]
#[instrument(skip_all)]
pub extern "C" fn fxrs_on_tick() -> usize {
    fxrs_core::tasks::process_queued_tasks()
}

// Metadata exports - these return static strings for the host to display

#[no_mangle]
pub extern "C" fn fxrs_get_author() -> *const c_char {
    AUTHOR.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn fxrs_get_name() -> *const c_char {
    NAME.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn fxrs_get_description() -> *const c_char {
    DESCRIPTION.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn fxrs_get_license() -> *const c_char {
    LICENSE.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn fxrs_get_version() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}

#[no_mangle]
pub extern "C" fn fxrs_get_log_tag() -> *const c_char {
    LOG_TAG.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    use parking_lot::Mutex;
    use serde_json::json;

    use crate::ffi::api::tests::{api_for, FakeHost};
    use crate::ffi::FxScope;
    use fxrs_core::{args, Callback};

    #[test]
    fn test_parse_args_shapes() {
        assert_eq!(parse_args(None).unwrap(), Vec::<Value>::new());
        assert_eq!(parse_args(Some("  ")).unwrap(), Vec::<Value>::new());
        assert_eq!(parse_args(Some("null")).unwrap(), Vec::<Value>::new());
        assert_eq!(parse_args(Some("[1,\"a\"]")).unwrap(), vec![json!(1), json!("a")]);
        assert_eq!(parse_args(Some("5")).unwrap(), vec![json!(5)]);
        assert!(parse_args(Some("[1,")).is_err());
    }

    #[test]
    fn test_metadata_is_nul_terminated() {
        let version = unsafe { CStr::from_ptr(fxrs_get_version()) };
        assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
        let name = unsafe { CStr::from_ptr(fxrs_get_name()) };
        assert_eq!(name.to_str().unwrap(), "fxrs");
    }

    #[test]
    fn test_load_and_event_round_trip() {
        // Globals: this is the only test that loads the plugin
        std::env::set_var(
            fxrs_core::config::HOME_ENV,
            std::env::temp_dir().join("fxrs-plugin-test"),
        );
        let fake: &'static FakeHost = Box::leak(Box::default());
        let api = api_for(fake);

        let mut error = [0 as c_char; 128];
        assert!(unsafe { fxrs_plugin_load(&api, error.as_mut_ptr(), error.len()) });
        assert!(!unsafe { fxrs_plugin_load(&api, error.as_mut_ptr(), error.len()) });

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        events::on_server(
            "plugin_test::hit",
            Callback::new(move |args| {
                sink.lock().extend_from_slice(args);
                Ok(())
            }),
        )
        .unwrap();

        // The host saw one wire-named subscription
        let (scope, name, id) = fake.subscriptions.lock()[0].clone();
        assert_eq!(scope, FxScope::Network);
        assert_eq!(name, "net::plugin_test::hit");

        let payload = c"[\"{\\\"dmg\\\":5}\"]";
        assert!(unsafe { fxrs_on_event(id, payload.as_ptr()) });
        assert_eq!(*seen.lock(), vec![json!({"dmg": 5})]);

        events::emit_server("plugin_test::out", args![json!([1, 2])]).unwrap();
        let (_, name, json) = fake.triggers.lock()[0].clone();
        assert_eq!(name, "net::plugin_test::out");
        assert_eq!(json, "[\"[1,2]\"]");

        assert!(unsafe { fxrs_plugin_unload(error.as_mut_ptr(), error.len()) });
    }
}
