//! One-time reflection pass over an object's properties.
//!
//! [`describe`] walks the enumerable properties of an object once and records
//! a [`PropertyDescriptor`] for each. The injector decides what to instrument
//! from these descriptors, and [`PropertyIndex`] keeps them grouped by kind so
//! classifications never need to be recomputed per call.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use wraptrace_foundation::{Object, Origin, ValueKind};

use crate::classify::Classification;

/// Kind and origin of one property, captured at wrap time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: Arc<str>,
    /// Kind of the value the property held when described.
    pub kind: ValueKind,
    /// Own or inherited.
    pub origin: Origin,
}

impl PropertyDescriptor {
    /// Returns true if the property holds a method.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        self.kind == ValueKind::Function
    }

    /// Returns the classification of this property.
    #[must_use]
    pub fn classification(&self) -> Classification {
        Classification::property(self.kind, self.origin)
    }
}

/// Describes every enumerable property of `obj`, own first, in enumeration order.
#[must_use]
pub fn describe(obj: &Object) -> Vec<PropertyDescriptor> {
    obj.keys()
        .into_iter()
        .filter_map(|(name, origin)| {
            let kind = obj.get(&name)?.kind();
            Some(PropertyDescriptor { name, kind, origin })
        })
        .collect()
}

/// Which origins a property listing includes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OwnFilter {
    /// Only own properties.
    Own,
    /// Only inherited properties.
    Inherited,
    /// Both.
    #[default]
    All,
}

impl OwnFilter {
    /// Returns true if properties of `origin` pass this filter.
    #[must_use]
    pub fn admits(self, origin: Origin) -> bool {
        match self {
            Self::Own => origin == Origin::Own,
            Self::Inherited => origin == Origin::Inherited,
            Self::All => true,
        }
    }
}

/// Descriptors of an object, indexed by name and groupable by kind.
#[derive(Clone, Debug, Default)]
pub struct PropertyIndex {
    descriptors: Vec<PropertyDescriptor>,
    by_name: HashMap<Arc<str>, usize>,
}

impl PropertyIndex {
    /// Describes `obj` and indexes the result.
    #[must_use]
    pub fn from_object(obj: &Object) -> Self {
        Self::from_descriptors(describe(obj))
    }

    /// Indexes existing descriptors.
    #[must_use]
    pub fn from_descriptors(descriptors: Vec<PropertyDescriptor>) -> Self {
        let by_name = descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), i))
            .collect();
        Self {
            descriptors,
            by_name,
        }
    }

    /// Returns all descriptors in enumeration order.
    #[must_use]
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// Returns the number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if the object had no enumerable properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Returns the descriptor for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.by_name.get(name).map(|&i| &self.descriptors[i])
    }

    /// Returns the cached classification for `name`.
    #[must_use]
    pub fn classification(&self, name: &str) -> Classification {
        self.get(name)
            .map_or(Classification::Unclassifiable, PropertyDescriptor::classification)
    }

    /// Returns the methods, in enumeration order.
    pub fn callable(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.descriptors.iter().filter(|d| d.is_callable())
    }

    /// Returns the names of properties of `kind` admitted by `filter`.
    #[must_use]
    pub fn names(&self, kind: ValueKind, filter: OwnFilter) -> Vec<&str> {
        self.descriptors
            .iter()
            .filter(|d| d.kind == kind && filter.admits(d.origin))
            .map(|d| d.name.as_ref())
            .collect()
    }

    /// Groups the names admitted by `filter` by kind.
    ///
    /// Kinds with no admitted properties are absent from the result.
    #[must_use]
    pub fn grouped(&self, filter: OwnFilter) -> BTreeMap<ValueKind, Vec<Arc<str>>> {
        let mut groups: BTreeMap<ValueKind, Vec<Arc<str>>> = BTreeMap::new();
        for d in self.descriptors.iter().filter(|d| filter.admits(d.origin)) {
            groups.entry(d.kind).or_default().push(d.name.clone());
        }
        groups
    }
}
