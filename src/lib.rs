//! Wraptrace - Method-call tracing through instrumented clones
//!
//! This crate re-exports all layers of the wraptrace system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: wraptrace_debug      — Text rendering, formatters, demo binary
//! Layer 1: wraptrace_engine     — Cloner, injector, call path, classifier, tracer
//! Layer 0: wraptrace_foundation — Core types (Value, Object, Error)
//! ```

pub use wraptrace_debug as debug;
pub use wraptrace_engine as engine;
pub use wraptrace_foundation as foundation;
