//! Ring buffer for rendered lines.
//!
//! Keeps the most recent output of a renderer so it can be inspected after
//! the fact, independently of whether lines were also written to stderr.

use std::collections::VecDeque;

// =============================================================================
// Line Buffer
// =============================================================================

/// A ring buffer of rendered lines.
///
/// Maintains a fixed maximum size, discarding the oldest lines when full.
#[derive(Clone, Debug)]
pub struct LineBuffer {
    /// The lines, oldest first.
    lines: VecDeque<String>,
    /// Maximum number of lines to store.
    max_size: usize,
    /// Total number of lines ever pushed.
    pushed: u64,
}

impl LineBuffer {
    /// Creates a new buffer with the given maximum size.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            pushed: 0,
        }
    }

    /// Pushes a line, evicting the oldest if over capacity.
    pub fn push(&mut self, line: String) {
        self.pushed += 1;
        self.lines.push_back(line);
        while self.lines.len() > self.max_size {
            self.lines.pop_front();
        }
    }

    /// Returns the number of lines held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of lines evicted so far.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.pushed - self.lines.len() as u64
    }

    /// Clears all lines. The eviction count is kept.
    pub fn clear(&mut self) {
        self.pushed -= self.lines.len() as u64;
        self.lines.clear();
    }

    /// Returns an iterator over the lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns the most recent `count` lines.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&str> {
        let start = self.lines.len().saturating_sub(count);
        self.iter().skip(start).collect()
    }

    /// Returns every line joined with newlines.
    #[must_use]
    pub fn contents(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new(10_000)
    }
}
