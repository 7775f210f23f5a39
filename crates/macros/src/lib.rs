//! fxrs Proc Macros
//!
//! - `#[event_handler]` - Register a typed function as an event listener
//!
//! # Example
//!
//! ```ignore
//! use fxrs_core::event_handler;
//!
//! #[event_handler("hit")]
//! fn on_hit(damage: u32, weapon: String) {
//!     tracing::info!("took {} from {}", damage, weapon);
//! }
//!
//! #[event_handler("garage:store", server)]
//! fn on_store(plate: String, slot: Option<u8>) -> Result<(), StoreError> {
//!     store(&plate, slot.unwrap_or(0))
//! }
//!
//! // Generated:
//! // - on_hit() - The handler itself
//! // - on_hit_register() - Subscribe it
//! // - on_hit_unregister() - Unsubscribe it
//! ```
//!
//! # Attributes
//!
//! - First argument: **Required.** The event name.
//! - `server` - Subscribe to the networked event instead of the local one.
//! - `once` - Unsubscribe after the first invocation.

mod event_handler;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, ItemFn};

/// Attribute macro for event handler registration
///
/// Marks a function as an event listener and generates helper functions
/// for registration and unregistration.
///
/// Parameters must implement `serde::de::DeserializeOwned`. Parameter `n`
/// is decoded from the event's argument `n`; a missing argument decodes as
/// `null`, so trailing `Option` parameters are optional. An argument that
/// does not decode fails the listener, which is logged like any other
/// listener error.
///
/// The function returns `()` or `Result<(), E>` where `E` converts into a
/// boxed error.
///
/// # Generated Code
///
/// - The original function
/// - `{name}_register() -> Result<Callback, EventError>` - Subscribe on the
///   default event context
/// - `{name}_unregister() -> bool` - Unsubscribe
/// - A static holding the callback
#[proc_macro_attribute]
pub fn event_handler(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match parse::parse_event_handler_args(attr.into()) {
        Ok(args) => args,
        Err(err) => return err.write_errors().into(),
    };
    let func = parse_macro_input!(item as ItemFn);

    match event_handler::generate_event_handler(args, func) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
