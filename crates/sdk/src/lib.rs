//! fxrs SDK - Host Runtime Type Definitions
//!
//! This crate contains the plain data types shared between the host runtime
//! and the framework. It has no dependencies and compiles quickly, allowing
//! parallel compilation of dependent crates.
//!
//! # Modules
//!
//! - [`types`] - Entity handles, network ids and vectors
//! - [`events`] - Names of events predefined by the host
//! - [`natives`] - Names of host natives wrapped by the framework

pub mod events;
pub mod natives;
pub mod types;

pub use natives::NATIVE_NAMES;
pub use types::*;
