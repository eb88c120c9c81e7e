//! Rendering and formatting for wraptrace.
//!
//! This crate provides:
//! - [`TextRenderer`] - A [`Renderer`](wraptrace_engine::Renderer) writing the object skeleton and one line per call
//! - [`HumanFormatter`] / [`JsonFormatter`] - Formatting of recorded traces
//! - [`RenderConfig`] - Output destination and line contents

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod trace;

pub use config::RenderConfig;
pub use trace::{
    HumanFormatter, JsonFormatter, LineBuffer, SkeletonGroup, TextRenderer, TraceFormatter,
    TraceOutput, skeleton,
};
