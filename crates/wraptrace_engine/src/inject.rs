//! Call interception.
//!
//! The [`Injector`] replaces every method of a wrapped object with a shim
//! that times the original implementation, keeps the call path balanced and
//! reports each completed call to its hooks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use wraptrace_foundation::{Function, Object, Origin, Value};

use crate::descriptor::PropertyDescriptor;
use crate::path::CallPath;

/// A completed method call, as seen by hooks.
#[derive(Clone, Copy, Debug)]
pub struct CallEvent<'a> {
    /// Call path while the method ran, e.g. `root.outer.inner`.
    pub path: &'a str,
    /// Nesting depth of the call: 1 for a top-level call.
    pub depth: usize,
    /// Wall-clock time spent in the original implementation.
    pub elapsed: Duration,
    /// Method name.
    pub name: &'a str,
    /// Value the method returned.
    pub result: &'a Value,
    /// Positional arguments.
    pub args: &'a [Value],
}

impl CallEvent<'_> {
    /// Returns the elapsed time in fractional milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Observer invoked after every successful shimmed call.
pub type Hook = Arc<dyn Fn(&CallEvent<'_>) + Send + Sync>;

/// Wraps a closure as a [`Hook`].
pub fn hook<F>(f: F) -> Hook
where
    F: Fn(&CallEvent<'_>) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Installs timing shims on wrapped objects.
///
/// The internal hook runs before the external one.
#[derive(Clone)]
pub struct Injector {
    path: CallPath,
    internal: Option<Hook>,
    external: Option<Hook>,
}

impl Injector {
    /// Creates an injector pushing onto `path`, with no hooks.
    #[must_use]
    pub fn new(path: CallPath) -> Self {
        Self {
            path,
            internal: None,
            external: None,
        }
    }

    /// Sets the hook the tracer itself uses for bookkeeping.
    #[must_use]
    pub fn with_internal_hook(mut self, hook: Hook) -> Self {
        self.internal = Some(hook);
        self
    }

    /// Sets the user-supplied hook.
    #[must_use]
    pub fn with_external_hook(mut self, hook: Option<Hook>) -> Self {
        self.external = hook;
        self
    }

    /// Replaces every callable property named in `descriptors` with a shim.
    ///
    /// Original implementations are taken from `target`, so they are fixed at
    /// wrap time. Each shim is installed in the tier of `wrapped` where the
    /// property lives: own properties on `wrapped` itself, inherited ones on
    /// its prototype. Returns the number of shims installed.
    pub fn wrap(
        &self,
        wrapped: &Object,
        target: &Object,
        descriptors: &[PropertyDescriptor],
    ) -> usize {
        let mut installed = 0;
        for descriptor in descriptors.iter().filter(|d| d.is_callable()) {
            let Some(Value::Fn(original)) = target.get(&descriptor.name) else {
                continue;
            };
            let tier = match descriptor.origin {
                Origin::Own => wrapped,
                Origin::Inherited => wrapped.prototype().unwrap_or(wrapped),
            };
            tier.set(&descriptor.name, self.shim(descriptor.name.clone(), original));
            installed += 1;
        }
        installed
    }

    fn shim(&self, name: Arc<str>, original: Function) -> Function {
        let path = self.path.clone();
        let internal = self.internal.clone();
        let external = self.external.clone();
        Function::new(name.clone(), move |this, args| {
            let guard = path.enter(&name);
            tracing::trace!(path = %path, "enter");
            let start = Instant::now();

            let result = match original.call(this, args) {
                Ok(result) => result,
                Err(err) => {
                    tracing::trace!(path = %path, error = %err, "method failed");
                    return Err(err);
                }
            };

            let elapsed = start.elapsed();
            let current = guard.path().path();
            let event = CallEvent {
                path: &current,
                depth: guard.depth(),
                elapsed,
                name: &name,
                result: &result,
                args,
            };
            if let Some(hook) = &internal {
                hook(&event);
            }
            if let Some(hook) = &external {
                hook(&event);
            }
            tracing::trace!(path = %current, elapsed_ms = event.elapsed_ms(), "exit");
            drop(guard);
            Ok(result)
        })
    }
}
