//! Core values, objects, and errors for wraptrace.
//!
//! This crate provides:
//! - [`Value`] - The dynamic value type carried by object properties, arguments and results
//! - [`Object`] - Shared objects with an own tier and a delegated (inherited) tier
//! - [`Function`] - Callable property values, invoked with an explicit receiver
//! - [`ValueKind`] and [`Origin`] - The two axes of property classification
//! - [`Error`] - Rich error types with context
//! - [`PVec`] - Persistent vector backing array values

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod object;
pub mod types;
pub mod value;

pub use collections::PVec;
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use object::Object;
pub use types::{Origin, ValueKind};
pub use value::{Function, Opaque, Value};
