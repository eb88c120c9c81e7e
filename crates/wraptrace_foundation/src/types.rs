//! Value kinds and property origins.
//!
//! These are the two axes along which every property of an object is
//! classified: what kind of value it holds, and whether it lives on the
//! object itself or is reached through delegation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a value, in classification precedence order.
///
/// The declaration order is load-bearing: it fixes each kind's index and so
/// the numeric classification code (`index * 2 + origin`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueKind {
    /// Callable value.
    Function,
    /// Plain object (not an array, not null).
    Object,
    /// Array value.
    Array,
    /// String value.
    String,
    /// Numeric value.
    Number,
    /// Boolean value.
    Boolean,
    /// The undefined value.
    Undefined,
    /// The null value.
    Null,
    /// Host value of a kind the classifier does not recognize.
    Unknown,
}

impl ValueKind {
    /// Every kind, in index order.
    pub const ALL: [ValueKind; 9] = [
        Self::Function,
        Self::Object,
        Self::Array,
        Self::String,
        Self::Number,
        Self::Boolean,
        Self::Undefined,
        Self::Null,
        Self::Unknown,
    ];

    /// Returns the position of this kind in [`ValueKind::ALL`].
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a property was found relative to the object it was looked up on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Origin {
    /// Defined directly on the object.
    Own,
    /// Resolved through the object's prototype chain.
    Inherited,
}

impl Origin {
    /// Returns `Own` when `own` is true, `Inherited` otherwise.
    #[must_use]
    pub const fn from_own(own: bool) -> Self {
        if own { Self::Own } else { Self::Inherited }
    }

    /// Returns true for `Own`.
    #[must_use]
    pub const fn is_own(self) -> bool {
        matches!(self, Self::Own)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Own => write!(f, "OWN"),
            Self::Inherited => write!(f, "INHERITED"),
        }
    }
}
