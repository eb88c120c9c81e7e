//! Text rendering of traced calls.
//!
//! [`TextRenderer`] is a [`Renderer`] that turns trace events into lines:
//! the object skeleton once when attached, then one line per completed call,
//! indented by nesting depth. Lines are kept in a [`LineBuffer`] and can
//! additionally be written to stderr.
//!
//! # Example
//!
//! ```text
//! OBJECT SKELETON: 'Counter' [object]
//! ...
//!   inc ( 5 ) -> 6  [3us]  <function OWN>  @ root.inc
//! ```

pub mod buffer;
pub mod format;
pub mod skeleton;

pub use buffer::LineBuffer;
pub use format::{HumanFormatter, JsonFormatter, TraceFormatter};
pub use skeleton::{SkeletonGroup, skeleton};

use std::io::{self, Write};

use parking_lot::Mutex;
use wraptrace_engine::{PropertyIndex, RenderEvent, Renderer, TraceRecord};
use wraptrace_foundation::{Error, Object, Result};

use crate::config::RenderConfig;

// =============================================================================
// Trace Output
// =============================================================================

/// Where rendered lines should be sent besides the line buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// No output (lines still kept in the buffer).
    #[default]
    None,
    /// Write to stderr.
    Stderr,
}

// =============================================================================
// Text Renderer
// =============================================================================

/// Renders trace events as text lines.
pub struct TextRenderer {
    config: RenderConfig,
    human: HumanFormatter,
    json: JsonFormatter,
    buffer: Mutex<LineBuffer>,
}

impl TextRenderer {
    /// Creates a renderer with the given configuration.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let mut human = HumanFormatter::new();
        human.show_elapsed = config.show_elapsed;
        human.show_labels = config.show_labels;
        let buffer = Mutex::new(LineBuffer::new(config.buffer_size));
        Self {
            config,
            human,
            json: JsonFormatter::new(),
            buffer,
        }
    }

    /// Creates a renderer that also writes to stderr.
    #[must_use]
    pub fn to_stderr() -> Self {
        Self::new(RenderConfig::stderr())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Returns a copy of the buffered lines, oldest first.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lock().iter().map(str::to_string).collect()
    }

    /// Returns the buffered lines joined with newlines.
    #[must_use]
    pub fn contents(&self) -> String {
        self.buffer.lock().contents()
    }

    /// Clears the line buffer.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }

    fn emit(&self, line: String) {
        if self.config.output == TraceOutput::Stderr {
            let _ = writeln!(io::stderr(), "{line}");
        }
        self.buffer.lock().push(line);
    }

    fn format_event(&self, event: &RenderEvent<'_>) -> String {
        if self.config.json_output {
            let record = TraceRecord {
                path: event.path.to_string(),
                elapsed: event.elapsed,
                result: event.result.clone(),
                args: event.args.to_vec(),
                classification: event.classification,
            };
            return self.json.format(event.name, &record);
        }
        let indent = self.config.indent.repeat(event.depth.saturating_sub(1));
        let line = self.human.format_parts(
            event.name,
            event.args,
            event.result,
            event.elapsed,
            event.classification,
            event.path,
        );
        format!("{indent}{line}")
    }
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

impl Renderer for TextRenderer {
    fn prepare(&self, target: &Object, props: &PropertyIndex) -> Result<()> {
        if self.config.buffer_size == 0 && self.config.output == TraceOutput::None {
            return Err(Error::renderer(
                "no destination: line buffer disabled and no output configured",
            ));
        }
        if self.config.show_skeleton && !self.config.json_output {
            for line in skeleton(target, props) {
                self.emit(line);
            }
        }
        Ok(())
    }

    fn render(&self, event: &RenderEvent<'_>) {
        let line = self.format_event(event);
        self.emit(line);
    }
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("config", &self.config)
            .field("lines", &self.buffer.lock().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
