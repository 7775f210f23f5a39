//! Event handler attribute macro implementation
//!
//! Turns a function with typed parameters into an event listener. Each
//! parameter is decoded from the positional argument at the same index.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{FnArg, Ident, ItemFn, ReturnType};

use crate::parse::EventHandlerArgs;

/// Generate the event_handler implementation
pub fn generate_event_handler(args: EventHandlerArgs, func: ItemFn) -> syn::Result<TokenStream> {
    let sig = &func.sig;
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "event handlers must be synchronous",
        ));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &sig.generics,
            "event handlers cannot be generic",
        ));
    }

    let fn_name = &sig.ident;
    let fn_vis = &func.vis;
    let event_name = &args.name;

    // One decoder per parameter, bound to a fresh name
    let mut decoders = Vec::new();
    let mut bindings = Vec::new();
    for (index, input) in sig.inputs.iter().enumerate() {
        match input {
            FnArg::Receiver(receiver) => {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "event handlers cannot take `self`",
                ));
            }
            FnArg::Typed(param) => {
                let ty = &param.ty;
                let binding = format_ident!("__arg{}", index);
                decoders.push(quote! {
                    let #binding: #ty = ::fxrs_core::events::decode_arg(__args, #index)?;
                });
                bindings.push(binding);
            }
        }
    }

    let invoke = match &sig.output {
        ReturnType::Default => quote! {
            #fn_name(#(#bindings),*);
            ::std::result::Result::Ok(())
        },
        ReturnType::Type(..) => quote! {
            #fn_name(#(#bindings),*).map_err(::std::convert::Into::into)
        },
    };

    let (subscribe, unsubscribe) = match (
        args.flags.server.is_present(),
        args.flags.once.is_present(),
    ) {
        (false, false) => (quote!(on), quote!(off)),
        (false, true) => (quote!(once), quote!(off)),
        (true, false) => (quote!(on_server), quote!(off_server)),
        (true, true) => (quote!(once_server), quote!(off_server)),
    };

    // Static holder for the callback so unregister can find it
    let callback_static = Ident::new(
        &format!("__{}_EVENT_CALLBACK", fn_name.to_string().to_uppercase()),
        fn_name.span(),
    );
    let register_fn_name = format_ident!("{}_register", fn_name);
    let unregister_fn_name = format_ident!("{}_unregister", fn_name);

    Ok(quote! {
        static #callback_static: ::std::sync::OnceLock<::fxrs_core::events::Callback> =
            ::std::sync::OnceLock::new();

        // The original function, untouched
        #func

        /// Subscribe this handler to its event
        #fn_vis fn #register_fn_name() -> ::std::result::Result<
            ::fxrs_core::events::Callback,
            ::fxrs_core::events::EventError,
        > {
            let callback = #callback_static
                .get_or_init(|| {
                    ::fxrs_core::events::Callback::new(
                        |__args: &[::fxrs_core::__private::serde_json::Value]| {
                            #(#decoders)*
                            #invoke
                        },
                    )
                })
                .clone();
            // Drop an earlier registration so the handler runs once per emit
            ::fxrs_core::events::#unsubscribe(#event_name, &callback)?;
            ::fxrs_core::events::#subscribe(#event_name, callback.clone())?;
            ::std::result::Result::Ok(callback)
        }

        /// Unsubscribe this handler
        #fn_vis fn #unregister_fn_name() -> bool {
            match #callback_static.get() {
                ::std::option::Option::Some(callback) => {
                    ::fxrs_core::events::#unsubscribe(#event_name, callback).unwrap_or(false)
                }
                ::std::option::Option::None => false,
            }
        }
    })
}
