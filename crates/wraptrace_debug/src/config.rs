//! Configuration for text rendering.

use crate::trace::TraceOutput;

/// Configuration for a [`TextRenderer`](crate::TextRenderer).
///
/// Controls where lines go and what each line shows.
#[derive(Clone, Debug)]
pub struct RenderConfig {
    /// Where rendered lines are written besides the line buffer.
    pub output: TraceOutput,

    /// Output format: true for JSON, false for human-readable.
    pub json_output: bool,

    /// Line buffer size (number of lines to retain).
    pub buffer_size: usize,

    /// Whether to write the object skeleton when attached.
    pub show_skeleton: bool,

    /// Whether call lines include the elapsed time.
    pub show_elapsed: bool,

    /// Whether call lines include the classification label.
    pub show_labels: bool,

    /// Indentation added per nesting level.
    pub indent: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output: TraceOutput::None,
            json_output: false,
            buffer_size: 10_000,
            show_skeleton: true,
            show_elapsed: true,
            show_labels: true,
            indent: "  ".to_string(),
        }
    }
}

impl RenderConfig {
    /// Creates a configuration that also writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::default().with_output(TraceOutput::Stderr)
    }

    /// Creates a configuration producing one JSON document per call.
    #[must_use]
    pub fn json() -> Self {
        Self {
            json_output: true,
            show_skeleton: false,
            ..Self::default()
        }
    }

    /// Builder method to set the output destination.
    #[must_use]
    pub fn with_output(mut self, output: TraceOutput) -> Self {
        self.output = output;
        self
    }

    /// Builder method to enable/disable JSON output.
    #[must_use]
    pub fn with_json_output(mut self, json: bool) -> Self {
        self.json_output = json;
        self
    }

    /// Builder method to set the line buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to enable/disable the skeleton.
    #[must_use]
    pub fn with_skeleton(mut self, show: bool) -> Self {
        self.show_skeleton = show;
        self
    }

    /// Builder method to enable/disable elapsed times.
    #[must_use]
    pub fn with_elapsed(mut self, show: bool) -> Self {
        self.show_elapsed = show;
        self
    }

    /// Builder method to enable/disable classification labels.
    #[must_use]
    pub fn with_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Builder method to set the per-level indentation.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }
}
