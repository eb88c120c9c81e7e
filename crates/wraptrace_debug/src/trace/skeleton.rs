//! Object skeleton: a one-time listing of every property of a traced object.

use wraptrace_engine::PropertyIndex;
use wraptrace_foundation::{Object, ValueKind};

/// Section of the skeleton a property is listed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkeletonGroup {
    /// Strings, numbers, booleans, undefined and null.
    Scalars,
    /// Objects and arrays.
    Composites,
    /// Methods and host values.
    Functions,
}

impl SkeletonGroup {
    /// All groups in display order.
    pub const ALL: [Self; 3] = [Self::Scalars, Self::Composites, Self::Functions];

    /// Returns the group properties of `kind` are listed under.
    #[must_use]
    pub const fn of(kind: ValueKind) -> Self {
        match kind {
            ValueKind::String
            | ValueKind::Number
            | ValueKind::Boolean
            | ValueKind::Undefined
            | ValueKind::Null => Self::Scalars,
            ValueKind::Object | ValueKind::Array => Self::Composites,
            ValueKind::Function | ValueKind::Unknown => Self::Functions,
        }
    }

    /// Returns the section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Scalars => "NUMBERS, STRINGS, ...",
            Self::Composites => "OBJECTS, ARRAYS, ...",
            Self::Functions => "FUNCTIONS, ...",
        }
    }
}

/// Renders the skeleton of `target` as lines.
///
/// Values are read from `target` at the time of the call.
#[must_use]
pub fn skeleton(target: &Object, props: &PropertyIndex) -> Vec<String> {
    let mut lines = vec![format!(
        "OBJECT SKELETON: '{}' [object]",
        target.class_name().unwrap_or("Object")
    )];
    for group in SkeletonGroup::ALL {
        lines.push(group.title().to_string());
        for descriptor in props
            .descriptors()
            .iter()
            .filter(|d| SkeletonGroup::of(d.kind) == group)
        {
            let value = target.get(&descriptor.name).unwrap_or_default();
            lines.push(format!(
                "  = {} = <{}> {value}",
                descriptor.name,
                descriptor.classification()
            ));
        }
    }
    lines
}
