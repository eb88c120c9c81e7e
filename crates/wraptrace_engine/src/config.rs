//! Tracer configuration.

use crate::path::{CallPath, PathScope};

/// Prefix of generated wrapper identifiers.
pub const DEFAULT_ID_PREFIX: &str = "wraptrace";

/// Configuration for a [`WrapperTracer`](crate::WrapperTracer).
#[derive(Clone, Debug)]
pub struct TracerConfig {
    /// Which call path the tracer's shims push onto.
    pub scope: PathScope,
    /// Prefix of the generated identifier.
    pub id_prefix: String,
    /// Whether calls are recorded for [`info`](crate::WrapperTracer::info).
    ///
    /// When false, calls still reach the renderer and the user hook.
    pub record_calls: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            scope: PathScope::Global,
            id_prefix: DEFAULT_ID_PREFIX.to_string(),
            record_calls: true,
        }
    }
}

impl TracerConfig {
    /// Configuration with a call path private to the tracer.
    #[must_use]
    pub fn isolated() -> Self {
        Self::default().with_scope(PathScope::Isolated)
    }

    /// Configuration pushing onto `path`.
    #[must_use]
    pub fn shared(path: CallPath) -> Self {
        Self::default().with_scope(PathScope::Shared(path))
    }

    /// Sets the path scope.
    #[must_use]
    pub fn with_scope(mut self, scope: PathScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sets the identifier prefix.
    #[must_use]
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Enables or disables call recording.
    #[must_use]
    pub fn with_record_calls(mut self, record: bool) -> Self {
        self.record_calls = record;
        self
    }
}
