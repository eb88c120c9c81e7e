//! Cloning, call interception, call-path tracking and property classification.
//!
//! This crate provides:
//! - [`WrapperTracer`] - Builds an instrumented clone of an object and records its calls
//! - [`Cloner`] - Copies own properties and delegates inherited ones
//! - [`Injector`] - Replaces methods with timing shims
//! - [`CallPath`] - Separator-joined stack describing the live call nesting
//! - [`classify`] and [`PropertyIndex`] - Kind/origin classification of properties
//! - [`TraceRecorder`] - Latest invocation record per method name
//! - [`Renderer`] - The interface trace consumers implement
//!
//! # Example
//!
//! ```
//! use wraptrace_engine::{TracerConfig, WrapperTracer};
//! use wraptrace_foundation::{Object, Value};
//!
//! let target = Object::new().with_method("inc", |_, args| {
//!     Ok(Value::from(args[0].expect_number()? + 1.0))
//! });
//! let tracer = WrapperTracer::with_config(target, None, None, TracerConfig::isolated());
//!
//! let result = tracer.wrapped().call("inc", &[Value::from(5)]).unwrap();
//! assert_eq!(result, Value::from(6));
//! assert_eq!(tracer.info()["inc"].path, "root.inc");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod classify;
pub mod clone;
pub mod config;
pub mod descriptor;
pub mod inject;
pub mod path;
pub mod recorder;
pub mod renderer;
pub mod tracer;

pub use classify::{Classification, classify};
pub use clone::{Cloned, Cloner};
pub use config::TracerConfig;
pub use descriptor::{OwnFilter, PropertyDescriptor, PropertyIndex, describe};
pub use inject::{CallEvent, Hook, Injector, hook};
pub use path::{CallPath, PathGuard, PathScope};
pub use recorder::{TraceRecord, TraceRecorder};
pub use renderer::{Container, RenderEvent, Renderer};
pub use tracer::WrapperTracer;
