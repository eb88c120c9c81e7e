//! The public tracing handle.
//!
//! # Lifecycle
//!
//! [`WrapperTracer::with_config`] runs the whole pipeline once:
//!
//! 1. Describe the target's properties ([`PropertyIndex`]).
//! 2. Clone the target ([`Cloner`]).
//! 3. Install shims on the clone ([`Injector`]), wiring the tracer's own
//!    bookkeeping hook ahead of the caller's hook.
//!
//! After that the tracer only observes: every call through
//! [`wrapped`](WrapperTracer::wrapped) updates the recorder and the attached
//! renderer, if any. Calls made on the target directly are not traced.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use wraptrace_foundation::{Object, Result, Value};

use crate::clone::{Cloned, Cloner};
use crate::config::TracerConfig;
use crate::descriptor::PropertyIndex;
use crate::inject::{CallEvent, Hook, Injector, hook};
use crate::path::CallPath;
use crate::recorder::{TraceRecord, TraceRecorder};
use crate::renderer::{Container, RenderEvent};

/// An instrumented clone of an object together with its trace.
pub struct WrapperTracer {
    id: String,
    target: Object,
    wrapped: Object,
    callback: Option<Hook>,
    props: Arc<PropertyIndex>,
    recorder: TraceRecorder,
    path: CallPath,
    container: Arc<RwLock<Option<Container>>>,
    config: TracerConfig,
}

impl WrapperTracer {
    /// Wraps `target` with the default configuration.
    ///
    /// The default configuration pushes onto the process-wide call path.
    #[must_use]
    pub fn create(target: Object, container: Option<Container>, callback: Option<Hook>) -> Self {
        Self::with_config(target, container, callback, TracerConfig::default())
    }

    /// Wraps `target`.
    ///
    /// If `container` fails to prepare, the failure is logged and the tracer
    /// is returned without a renderer; use
    /// [`set_container`](Self::set_container) to observe the error.
    #[must_use]
    pub fn with_config(
        target: Object,
        container: Option<Container>,
        callback: Option<Hook>,
        config: TracerConfig,
    ) -> Self {
        let props = Arc::new(PropertyIndex::from_object(&target));
        let Cloned { id, wrapped } = Cloner::new(config.id_prefix.as_str()).clone_object(&target);
        let path = config.scope.resolve();
        let recorder = TraceRecorder::new();
        let slot: Arc<RwLock<Option<Container>>> = Arc::new(RwLock::new(None));

        let mut injector = Injector::new(path.clone()).with_external_hook(callback.clone());
        if config.record_calls {
            injector = injector.with_internal_hook(Self::notify(&recorder, &props, &slot));
        } else {
            injector = injector.with_internal_hook(Self::render_only(&props, &slot));
        }
        let shims = injector.wrap(&wrapped, &target, props.descriptors());

        tracing::debug!(
            id = %id,
            class = target.class_name().unwrap_or("Object"),
            shims,
            scope = ?config.scope,
            "tracer created"
        );

        let tracer = Self {
            id,
            target,
            wrapped,
            callback,
            props,
            recorder,
            path,
            container: slot,
            config,
        };
        if container.is_some() {
            // Failure is already logged and leaves the tracer without a renderer.
            let _ = tracer.set_container(container);
        }
        tracer
    }

    fn notify(
        recorder: &TraceRecorder,
        props: &Arc<PropertyIndex>,
        slot: &Arc<RwLock<Option<Container>>>,
    ) -> Hook {
        let recorder = recorder.clone();
        let render = Self::render_only(props, slot);
        let props = Arc::clone(props);
        hook(move |event: &CallEvent<'_>| {
            let classification = props.classification(event.name);
            recorder.record(event.name, TraceRecord::from_event(event, classification));
            render(event);
        })
    }

    fn render_only(props: &Arc<PropertyIndex>, slot: &Arc<RwLock<Option<Container>>>) -> Hook {
        let props = Arc::clone(props);
        let slot = Arc::clone(slot);
        hook(move |event: &CallEvent<'_>| {
            let Some(container) = slot.read().clone() else {
                return;
            };
            container.render(&RenderEvent {
                path: event.path,
                depth: event.depth,
                elapsed: event.elapsed,
                name: event.name,
                result: event.result,
                args: event.args,
                classification: props.classification(event.name),
            });
        })
    }

    /// Returns the identifier of the clone.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the original object.
    #[must_use]
    pub fn target(&self) -> &Object {
        &self.target
    }

    /// Returns the instrumented clone.
    #[must_use]
    pub fn wrapped(&self) -> &Object {
        &self.wrapped
    }

    /// Returns the caller's hook.
    #[must_use]
    pub fn callback(&self) -> Option<&Hook> {
        self.callback.as_ref()
    }

    /// Returns the target's property descriptors.
    #[must_use]
    pub fn props(&self) -> &PropertyIndex {
        &self.props
    }

    /// Returns the latest record of every method called so far.
    #[must_use]
    pub fn info(&self) -> BTreeMap<String, TraceRecord> {
        self.recorder.snapshot()
    }

    /// Returns the recorder behind [`info`](Self::info).
    #[must_use]
    pub fn recorder(&self) -> &TraceRecorder {
        &self.recorder
    }

    /// Returns the call path this tracer's shims push onto.
    #[must_use]
    pub fn call_path(&self) -> &CallPath {
        &self.path
    }

    /// Returns the configuration the tracer was built with.
    #[must_use]
    pub fn config(&self) -> &TracerConfig {
        &self.config
    }

    /// Returns the attached renderer.
    #[must_use]
    pub fn container(&self) -> Option<Container> {
        self.container.read().clone()
    }

    /// Attaches `container`, or detaches the current one with `None`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`Renderer::prepare`](crate::Renderer::prepare).
    /// The tracer is then left without a renderer.
    pub fn set_container(&self, container: Option<Container>) -> Result<()> {
        let Some(container) = container else {
            *self.container.write() = None;
            return Ok(());
        };
        if let Err(err) = container.prepare(&self.target, &self.props) {
            tracing::warn!(id = %self.id, error = %err, "renderer failed to prepare; detached");
            *self.container.write() = None;
            return Err(err);
        }
        *self.container.write() = Some(container);
        Ok(())
    }

    /// Calls method `name` on the clone.
    ///
    /// # Errors
    ///
    /// Returns whatever [`Object::call`] returns.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.wrapped.call(name, args)
    }
}

impl std::fmt::Debug for WrapperTracer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapperTracer")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("methods", &self.props.callable().count())
            .field("recorded", &self.recorder.len())
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
