//! Property classification by value kind and origin.

use std::fmt;

use wraptrace_foundation::{Object, Origin, ValueKind};

/// Classification of one property of one object.
///
/// Every real property maps to a `{kind, origin}` pair. The numeric
/// [`code`](Classification::code) is kept for consumers that index palettes or
/// tables by number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    /// A property that resolves on the subject.
    Property {
        /// The kind of value the property holds.
        kind: ValueKind,
        /// Whether the property is own or inherited.
        origin: Origin,
    },
    /// The property does not resolve on the subject.
    Unclassifiable,
    /// No subject object was supplied.
    NoSubject,
}

impl Classification {
    /// Code reported when the property does not resolve.
    pub const UNCLASSIFIABLE_CODE: u8 = 19;

    /// Code reported when there is no subject object.
    pub const NO_SUBJECT_CODE: u8 = 20;

    /// Creates a property classification.
    #[must_use]
    pub const fn property(kind: ValueKind, origin: Origin) -> Self {
        Self::Property { kind, origin }
    }

    /// Returns the numeric code: `kind * 2` for own, `kind * 2 + 1` for inherited.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Property { kind, origin } => {
                kind.index() * 2
                    + match origin {
                        Origin::Own => 0,
                        Origin::Inherited => 1,
                    }
            }
            Self::Unclassifiable => Self::UNCLASSIFIABLE_CODE,
            Self::NoSubject => Self::NO_SUBJECT_CODE,
        }
    }

    /// Decodes a numeric code. Unknown codes decode as `Unclassifiable`.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            Self::NO_SUBJECT_CODE => Self::NoSubject,
            0..=17 => Self::Property {
                kind: ValueKind::ALL[usize::from(code / 2)],
                origin: Origin::from_own(code % 2 == 0),
            },
            _ => Self::Unclassifiable,
        }
    }

    /// Returns the value kind, if this is a property classification.
    #[must_use]
    pub const fn kind(self) -> Option<ValueKind> {
        match self {
            Self::Property { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Returns the origin, if this is a property classification.
    #[must_use]
    pub const fn origin(self) -> Option<Origin> {
        match self {
            Self::Property { origin, .. } => Some(origin),
            _ => None,
        }
    }

    /// Returns true if the property is a method.
    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(
            self,
            Self::Property {
                kind: ValueKind::Function,
                ..
            }
        )
    }

    /// Returns a label such as `function OWN` or `array INHERITED`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Property { kind, origin } => format!("{kind} {origin}"),
            Self::Unclassifiable => "NON-EXISTENT".to_string(),
            Self::NoSubject => "NO SUBJECT".to_string(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Classification {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Classification", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("label", &self.label())?;
        state.end()
    }
}

/// Classifies property `name` of `obj`.
///
/// Precedence follows [`ValueKind`]: callables first, then arrays and null
/// (which would otherwise look like objects), then plain objects and scalars.
/// `None` yields [`Classification::NoSubject`]; a name that does not resolve
/// yields [`Classification::Unclassifiable`].
#[must_use]
pub fn classify(obj: Option<&Object>, name: &str) -> Classification {
    let Some(obj) = obj else {
        return Classification::NoSubject;
    };
    match obj.resolve(name) {
        Some((value, origin)) => Classification::property(value.kind(), origin),
        None => Classification::Unclassifiable,
    }
}
