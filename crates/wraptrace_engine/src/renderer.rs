//! The interface trace consumers implement.
//!
//! A [`Renderer`] is told once about the object being traced and then about
//! every completed call. Rendering itself (text, panels, whatever) is the
//! consumer's business; the engine only hands over structured events.

use std::sync::Arc;
use std::time::Duration;

use wraptrace_foundation::{Object, Result, Value};

use crate::classify::Classification;
use crate::descriptor::PropertyIndex;

/// A completed call, enriched with the method's classification.
#[derive(Clone, Copy, Debug)]
pub struct RenderEvent<'a> {
    /// Call path while the method ran.
    pub path: &'a str,
    /// Nesting depth of the call: 1 for a top-level call.
    pub depth: usize,
    /// Time spent in the original implementation.
    pub elapsed: Duration,
    /// Method name.
    pub name: &'a str,
    /// Returned value.
    pub result: &'a Value,
    /// Positional arguments.
    pub args: &'a [Value],
    /// Classification of the method on the target.
    pub classification: Classification,
}

/// Consumer of trace events.
pub trait Renderer: Send + Sync {
    /// Called once when the renderer is attached to a tracer.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer cannot be used. The tracer then
    /// detaches it and keeps tracing without rendering.
    fn prepare(&self, target: &Object, props: &PropertyIndex) -> Result<()> {
        let _ = (target, props);
        Ok(())
    }

    /// Called after every successful call of a traced method.
    fn render(&self, event: &RenderEvent<'_>);
}

/// Shared renderer handle.
pub type Container = Arc<dyn Renderer>;
