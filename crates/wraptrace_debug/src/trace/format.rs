//! Trace output formatters.
//!
//! Provides human-readable and JSON formatters for trace records.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

use serde::Serialize;
use wraptrace_engine::{Classification, TraceRecord};
use wraptrace_foundation::Value;

// =============================================================================
// Trace Formatter Trait
// =============================================================================

/// Trait for formatting trace records.
pub trait TraceFormatter {
    /// Formats the latest record of method `name`.
    fn format(&self, name: &str, record: &TraceRecord) -> String;

    /// Formats every record, one per line, in name order.
    fn format_many(&self, records: &BTreeMap<String, TraceRecord>) -> String {
        records
            .iter()
            .map(|(name, record)| self.format(name, record))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Formats a duration with a unit suited to its size.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let us = elapsed.as_micros();
    if us >= 1_000_000 {
        format!("{:.3}s", us as f64 / 1_000_000.0)
    } else if us >= 1000 {
        format!("{:.3}ms", us as f64 / 1000.0)
    } else {
        format!("{us}us")
    }
}

/// Formats an argument list as `( a, b )`, or `( )` when empty.
#[must_use]
pub fn format_arg_list(args: &[Value]) -> String {
    if args.is_empty() {
        return "( )".to_string();
    }
    let list: Vec<_> = args.iter().map(ToString::to_string).collect();
    format!("( {} )", list.join(", "))
}

/// Formats one call as `name ( args ) -> result`.
#[must_use]
pub fn format_call(name: &str, args: &[Value], result: &Value) -> String {
    format!("{name} {} -> {result}", format_arg_list(args))
}

// =============================================================================
// Human-Readable Formatter
// =============================================================================

/// Formats trace records in human-readable form.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include the elapsed time.
    pub show_elapsed: bool,
    /// Whether to include the classification label.
    pub show_labels: bool,
}

impl HumanFormatter {
    /// Creates a new human formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show elapsed times.
    #[must_use]
    pub fn with_elapsed(mut self) -> Self {
        self.show_elapsed = true;
        self
    }

    /// Builder method to show classification labels.
    #[must_use]
    pub fn with_labels(mut self) -> Self {
        self.show_labels = true;
        self
    }

    /// Formats the parts of a call shared by records and live events.
    #[must_use]
    pub fn format_parts(
        &self,
        name: &str,
        args: &[Value],
        result: &Value,
        elapsed: Duration,
        classification: Classification,
        path: &str,
    ) -> String {
        let mut line = format_call(name, args, result);
        if self.show_elapsed {
            let _ = write!(line, "  [{}]", format_elapsed(elapsed));
        }
        if self.show_labels {
            let _ = write!(line, "  <{classification}>");
        }
        let _ = write!(line, "  @ {path}");
        line
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, name: &str, record: &TraceRecord) -> String {
        self.format_parts(
            name,
            &record.args,
            &record.result,
            record.elapsed,
            record.classification,
            &record.path,
        )
    }
}

// =============================================================================
// JSON Formatter
// =============================================================================

#[derive(Serialize)]
struct Entry<'a> {
    name: &'a str,
    #[serde(flatten)]
    record: &'a TraceRecord,
}

/// Formats trace records as JSON.
#[derive(Clone, Debug, Default)]
pub struct JsonFormatter {
    /// Whether to pretty-print JSON.
    pub pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method for pretty printing.
    #[must_use]
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn to_json<T: Serialize>(&self, value: &T) -> String {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.unwrap_or_else(|err| serde_json::json!({ "error": err.to_string() }).to_string())
    }
}

impl TraceFormatter for JsonFormatter {
    fn format(&self, name: &str, record: &TraceRecord) -> String {
        self.to_json(&Entry { name, record })
    }

    fn format_many(&self, records: &BTreeMap<String, TraceRecord>) -> String {
        let entries: Vec<_> = records
            .iter()
            .map(|(name, record)| Entry { name, record })
            .collect();
        self.to_json(&entries)
    }
}

// =============================================================================
// Tests
// =============================================================================
