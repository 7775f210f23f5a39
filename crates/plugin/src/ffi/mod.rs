//! C ABI surface
//!
//! - [`api`] - The host function table and the runtime built on it
//! - [`exports`] - Functions the host calls

pub mod api;
pub mod exports;
mod strings;

pub use api::{FfiHost, FxHostApi, FxScope, HandlerId};
