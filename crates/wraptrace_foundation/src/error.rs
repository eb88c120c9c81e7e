//! Error types for wraptrace.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::ValueKind;
use crate::value::Value;

/// Result alias used throughout wraptrace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for wraptrace operations.
///
/// Errors raised by a method body travel through instrumentation untouched:
/// the caller of a wrapped method sees exactly the error the original
/// method returned.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: ValueKind, actual: ValueKind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates a property not found error.
    #[must_use]
    pub fn property_not_found(name: String) -> Self {
        Self::new(ErrorKind::PropertyNotFound(name))
    }

    /// Creates a not callable error.
    #[must_use]
    pub fn not_callable(name: String, kind: ValueKind) -> Self {
        Self::new(ErrorKind::NotCallable { name, kind })
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: String, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates an error carrying a value thrown by a method body.
    #[must_use]
    pub fn thrown(value: impl Into<Value>) -> Self {
        Self::new(ErrorKind::Thrown(value.into()))
    }

    /// Creates a renderer error.
    #[must_use]
    pub fn renderer(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Renderer(message.into()))
    }

    /// Returns the thrown value, if this error carries one.
    #[must_use]
    pub fn thrown_value(&self) -> Option<&Value> {
        match &self.kind {
            ErrorKind::Thrown(value) => Some(value),
            _ => None,
        }
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value had the wrong kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected kind.
        expected: ValueKind,
        /// The kind actually encountered.
        actual: ValueKind,
    },

    /// A property did not resolve on the object or its prototype chain.
    #[error("property not found: {0}")]
    PropertyNotFound(String),

    /// A property was invoked but does not hold a function.
    #[error("{name} is not a function (it is {kind})")]
    NotCallable {
        /// The property name.
        name: String,
        /// The kind of value the property holds.
        kind: ValueKind,
    },

    /// Wrong number of arguments to a method.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// Description of expected arity.
        expected: String,
        /// Actual number of arguments.
        actual: usize,
    },

    /// A method body raised a value.
    #[error("uncaught exception: {0}")]
    Thrown(Value),

    /// A renderer could not attach to its container.
    #[error("renderer unavailable: {0}")]
    Renderer(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Class or object name the error originated on.
    pub source: Option<String>,
    /// Call path segments leading to the error, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "on {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
