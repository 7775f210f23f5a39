//! Attribute parsing for the event_handler macro

use darling::ast::NestedMeta;
use darling::util::Flag;
use darling::{Error, FromMeta};
use proc_macro2::TokenStream;
use syn::{Lit, LitStr};

/// Optional words after the event name
#[derive(Debug, Default, FromMeta)]
pub struct HandlerFlags {
    /// Subscribe in the networked namespace
    #[darling(default)]
    pub server: Flag,

    /// Unsubscribe after the first invocation
    #[darling(default)]
    pub once: Flag,
}

/// Parsed `#[event_handler(...)]` arguments
///
/// Usage:
/// - `#[event_handler("hit")]`
/// - `#[event_handler("hit", server)]`
/// - `#[event_handler("hit", server, once)]`
#[derive(Debug)]
pub struct EventHandlerArgs {
    /// Event name as seen by the application
    pub name: LitStr,
    pub flags: HandlerFlags,
}

/// Parse the attribute tokens into EventHandlerArgs
pub fn parse_event_handler_args(attr: TokenStream) -> darling::Result<EventHandlerArgs> {
    let items = NestedMeta::parse_meta_list(attr)?;

    let Some((first, rest)) = items.split_first() else {
        return Err(Error::custom("expected an event name, e.g. #[event_handler(\"hit\")]"));
    };

    let name = match first {
        NestedMeta::Lit(Lit::Str(name)) => name.clone(),
        other => {
            return Err(Error::custom("the first argument must be the event name as a string")
                .with_span(other))
        }
    };

    if name.value().is_empty() {
        return Err(Error::custom("event name must not be empty").with_span(&name));
    }

    Ok(EventHandlerArgs {
        name,
        flags: HandlerFlags::from_list(rest)?,
    })
}
