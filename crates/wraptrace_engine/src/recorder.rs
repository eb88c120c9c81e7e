//! Latest-call bookkeeping.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use wraptrace_foundation::Value;

use crate::classify::Classification;
use crate::inject::CallEvent;

/// The most recent invocation of one method.
#[derive(Clone, Debug, PartialEq)]
pub struct TraceRecord {
    /// Call path while the method ran.
    pub path: String,
    /// Time spent in the original implementation.
    pub elapsed: Duration,
    /// Returned value.
    pub result: Value,
    /// Positional arguments.
    pub args: Vec<Value>,
    /// Classification of the method on the target.
    pub classification: Classification,
}

impl TraceRecord {
    /// Builds a record from a call event.
    #[must_use]
    pub fn from_event(event: &CallEvent<'_>, classification: Classification) -> Self {
        Self {
            path: event.path.to_string(),
            elapsed: event.elapsed,
            result: event.result.clone(),
            args: event.args.to_vec(),
            classification,
        }
    }

    /// Returns the elapsed time in fractional milliseconds.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TraceRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("TraceRecord", 5)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("elapsed_ms", &self.elapsed_ms())?;
        state.serialize_field("result", &self.result)?;
        state.serialize_field("args", &self.args)?;
        state.serialize_field("classification", &self.classification)?;
        state.end()
    }
}

/// Last-write-wins map from method name to its latest [`TraceRecord`].
///
/// Records are keyed by name only, so two methods with the same name at
/// different paths overwrite each other.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder(Arc<Mutex<BTreeMap<String, TraceRecord>>>);

impl TraceRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `record` under `name`, returning the record it replaced.
    pub fn record(&self, name: &str, record: TraceRecord) -> Option<TraceRecord> {
        self.0.lock().insert(name.to_string(), record)
    }

    /// Returns a copy of the latest record for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<TraceRecord> {
        self.0.lock().get(name).cloned()
    }

    /// Returns a copy of every record.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, TraceRecord> {
        self.0.lock().clone()
    }

    /// Returns the recorded method names in order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.0.lock().keys().cloned().collect()
    }

    /// Returns the number of methods recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }

    /// Discards every record.
    pub fn clear(&self) {
        self.0.lock().clear();
    }
}
