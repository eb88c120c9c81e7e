//! Call path tracking.
//!
//! A [`CallPath`] is a stack of method names encoded as one separator-joined
//! string, e.g. `root.outer.inner` while `inner` runs inside `outer`. The root
//! segment is permanent.
//!
//! Shims never push and pop by hand: [`CallPath::enter`] returns a
//! [`PathGuard`] that pops when dropped, so the path stays balanced when a
//! method returns an error or panics.

use std::fmt;
use std::sync::{Arc, LazyLock};

use parking_lot::Mutex;

/// Root segment of a default path.
pub const DEFAULT_ROOT: &str = "root";

/// Separator of a default path.
pub const DEFAULT_SEPARATOR: &str = ".";

static GLOBAL: LazyLock<CallPath> = LazyLock::new(CallPath::default);

struct PathState {
    root: String,
    separator: String,
    path: String,
    // Length of `path` before each push, innermost last.
    marks: Vec<usize>,
}

impl PathState {
    // Returns the depth before the push.
    fn push(&mut self, name: &str) -> usize {
        let depth = self.marks.len();
        self.marks.push(self.path.len());
        self.path.push_str(&self.separator);
        self.path.push_str(name);
        depth
    }

    fn truncate_to(&mut self, depth: usize) {
        if let Some(&len) = self.marks.get(depth) {
            self.path.truncate(len);
            self.marks.truncate(depth);
        }
    }
}

/// Shared, mutable call path.
///
/// Cloning the handle shares the underlying path.
#[derive(Clone)]
pub struct CallPath(Arc<Mutex<PathState>>);

impl CallPath {
    /// Creates a path containing only `root`.
    ///
    /// An empty separator falls back to [`DEFAULT_SEPARATOR`].
    #[must_use]
    pub fn new(root: &str, separator: &str) -> Self {
        let separator = if separator.is_empty() {
            DEFAULT_SEPARATOR
        } else {
            separator
        };
        Self(Arc::new(Mutex::new(PathState {
            root: root.to_string(),
            separator: separator.to_string(),
            path: root.to_string(),
            marks: Vec::new(),
        })))
    }

    /// Returns the process-wide path shared by every tracer using
    /// [`PathScope::Global`].
    #[must_use]
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Appends a segment.
    pub fn push(&self, name: &str) {
        self.0.lock().push(name);
    }

    /// Removes the last segment and returns it.
    ///
    /// Segments are removed exactly as pushed, even when a name contains the
    /// separator. The root is never removed; popping at the root returns
    /// `None`.
    pub fn pop(&self) -> Option<String> {
        let mut state = self.0.lock();
        let Some(len) = state.marks.pop() else {
            tracing::trace!(path = %state.path, "pop at root ignored");
            return None;
        };
        let last = state.path[len + state.separator.len()..].to_string();
        state.path.truncate(len);
        Some(last)
    }

    /// Returns the last segment.
    #[must_use]
    pub fn last(&self) -> String {
        let state = self.0.lock();
        match state.marks.last() {
            Some(&len) => state.path[len + state.separator.len()..].to_string(),
            None => state.root.clone(),
        }
    }

    /// Returns the number of segments, root included.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.0.lock().marks.len()
    }

    /// Returns the nesting depth: 0 at the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.count() - 1
    }

    /// Truncates the path back to the root.
    pub fn reset(&self) {
        let mut state = self.0.lock();
        tracing::debug!(path = %state.path, "call path reset");
        state.truncate_to(0);
    }

    /// Returns the full path string.
    #[must_use]
    pub fn path(&self) -> String {
        self.0.lock().path.clone()
    }

    /// Returns the root segment.
    #[must_use]
    pub fn root(&self) -> String {
        self.0.lock().root.clone()
    }

    /// Returns the separator.
    #[must_use]
    pub fn separator(&self) -> String {
        self.0.lock().separator.clone()
    }

    /// Returns the segments below the root, outermost first.
    #[must_use]
    pub fn segments(&self) -> Vec<String> {
        let state = self.0.lock();
        let sep = state.separator.len();
        let mut ends = state.marks.iter().skip(1).copied().collect::<Vec<_>>();
        ends.push(state.path.len());
        state
            .marks
            .iter()
            .zip(ends)
            .map(|(&start, end)| state.path[start + sep..end].to_string())
            .collect()
    }

    /// Pushes `name` and returns a guard that restores the path when dropped.
    ///
    /// The guard truncates back to the depth it was created at, so anything
    /// pushed after it and left behind is released as well.
    pub fn enter(&self, name: &str) -> PathGuard {
        let depth = self.0.lock().push(name);
        PathGuard {
            path: self.clone(),
            depth,
        }
    }

    /// Returns true if both handles share the same path.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for CallPath {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT, DEFAULT_SEPARATOR)
    }
}

impl fmt::Debug for CallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallPath").field(&self.path()).finish()
    }
}

impl fmt::Display for CallPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Scoped path segment. Pops its segment when dropped.
#[must_use = "the segment is popped as soon as the guard is dropped"]
pub struct PathGuard {
    path: CallPath,
    depth: usize,
}

impl PathGuard {
    /// Returns the path this guard pushed onto.
    #[must_use]
    pub fn path(&self) -> &CallPath {
        &self.path
    }

    /// Returns the nesting depth of the guarded segment: 1 for a top-level
    /// call.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth + 1
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        self.path.0.lock().truncate_to(self.depth);
    }
}

impl fmt::Debug for PathGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathGuard")
            .field("path", &self.path)
            .field("depth", &self.depth())
            .finish()
    }
}

/// Which call path a tracer pushes onto.
#[derive(Clone, Debug, Default)]
pub enum PathScope {
    /// The process-wide path; every tracer with this scope shares it.
    #[default]
    Global,
    /// A fresh path owned by one tracer.
    Isolated,
    /// A caller-supplied path, shared by every tracer given it.
    Shared(CallPath),
}

impl PathScope {
    /// Returns the path this scope designates.
    ///
    /// Each call on `Isolated` creates a new path.
    #[must_use]
    pub fn resolve(&self) -> CallPath {
        match self {
            Self::Global => CallPath::global(),
            Self::Isolated => CallPath::default(),
            Self::Shared(path) => path.clone(),
        }
    }
}
