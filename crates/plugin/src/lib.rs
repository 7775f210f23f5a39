//! fxrs Plugin - FFI Layer
//!
//! This crate provides the FFI boundary between a native game host and the
//! Rust core logic. It compiles to a cdylib (.so/.dll); the host hands over
//! a table of its functions at load and calls back into the exports for
//! events, UI callbacks and ticks.

pub mod ffi;

pub use fxrs_core::shutdown;
