//! Shared objects with an own tier and a delegated tier.
//!
//! # Storage model
//!
//! Every [`Object`] holds its own properties in an insertion-ordered map and
//! optionally delegates to a prototype object. Lookup ([`Object::resolve`])
//! checks the own tier first and then walks the prototype chain, reporting
//! which [`Origin`] the property came from.
//!
//! Properties carry an enumerable flag. Hidden (non-enumerable) properties
//! resolve normally but are skipped by [`Object::keys`], so anything that
//! copies an object by enumeration leaves them behind.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::error::{Error, ErrorContext, Result};
use crate::types::Origin;
use crate::value::{Function, Value};

#[derive(Clone)]
struct Slot {
    value: Value,
    enumerable: bool,
}

struct ObjectInner {
    class_name: Option<Arc<str>>,
    properties: RwLock<IndexMap<Arc<str>, Slot>>,
    prototype: Option<Object>,
}

/// Shared, mutable object handle.
///
/// Cloning the handle yields another reference to the same object. The lock
/// guarding the properties is never held while a method body runs, so
/// methods may freely read and write their receiver.
#[derive(Clone)]
pub struct Object(Arc<ObjectInner>);

impl Object {
    /// Creates an empty object with no class name and no prototype.
    #[must_use]
    pub fn new() -> Self {
        Self::create(None, None)
    }

    /// Creates an empty object with the given class name.
    #[must_use]
    pub fn with_class(class_name: &str) -> Self {
        Self::create(Some(class_name), None)
    }

    /// Creates an empty object delegating to `prototype`.
    ///
    /// The class name is taken from the prototype.
    #[must_use]
    pub fn with_prototype(prototype: Object) -> Self {
        let class_name = prototype.0.class_name.clone();
        Self(Arc::new(ObjectInner {
            class_name,
            properties: RwLock::new(IndexMap::new()),
            prototype: Some(prototype),
        }))
    }

    /// Creates an empty object from its parts.
    #[must_use]
    pub fn create(class_name: Option<&str>, prototype: Option<Object>) -> Self {
        Self(Arc::new(ObjectInner {
            class_name: class_name.map(Arc::from),
            properties: RwLock::new(IndexMap::new()),
            prototype,
        }))
    }

    /// Sets an own property and returns the handle, for building objects inline.
    #[must_use]
    pub fn with(self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Defines a method as an own property and returns the handle.
    #[must_use]
    pub fn with_method<F>(self, name: &str, func: F) -> Self
    where
        F: Fn(&Object, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.set(name, Function::new(name, func));
        self
    }

    /// Returns the class name, if any.
    #[must_use]
    pub fn class_name(&self) -> Option<&str> {
        self.0.class_name.as_deref()
    }

    /// Returns the prototype this object delegates to.
    #[must_use]
    pub fn prototype(&self) -> Option<&Object> {
        self.0.prototype.as_ref()
    }

    /// Returns true if both handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Sets an own property.
    ///
    /// Overwriting keeps the property's position and enumerability.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let mut props = self.0.properties.write();
        if let Some(slot) = props.get_mut(name) {
            slot.value = value;
        } else {
            props.insert(
                Arc::from(name),
                Slot {
                    value,
                    enumerable: true,
                },
            );
        }
    }

    /// Defines a non-enumerable own property.
    pub fn define_hidden(&self, name: &str, value: impl Into<Value>) {
        self.0.properties.write().insert(
            Arc::from(name),
            Slot {
                value: value.into(),
                enumerable: false,
            },
        );
    }

    /// Removes an own property, returning its value.
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.0
            .properties
            .write()
            .shift_remove(name)
            .map(|slot| slot.value)
    }

    /// Returns true if `name` is defined directly on this object.
    #[must_use]
    pub fn has_own(&self, name: &str) -> bool {
        self.0.properties.read().contains_key(name)
    }

    /// Returns true if `name` resolves on this object or its prototype chain.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Looks up `name`, own tier first, then the prototype chain.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.resolve(name).map(|(value, _)| value)
    }

    /// Looks up `name` and reports where it was found.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<(Value, Origin)> {
        if let Some(slot) = self.0.properties.read().get(name) {
            return Some((slot.value.clone(), Origin::Own));
        }
        let mut proto = self.prototype();
        while let Some(obj) = proto {
            if let Some(slot) = obj.0.properties.read().get(name) {
                return Some((slot.value.clone(), Origin::Inherited));
            }
            proto = obj.prototype();
        }
        None
    }

    /// Returns the enumerable own property names, in definition order.
    #[must_use]
    pub fn own_keys(&self) -> Vec<Arc<str>> {
        self.0
            .properties
            .read()
            .iter()
            .filter(|(_, slot)| slot.enumerable)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Returns every enumerable property name visible on this object.
    ///
    /// Own properties come first, then each prototype's in chain order. A name
    /// defined closer to the object shadows the same name further up, even
    /// when the closer definition is hidden.
    #[must_use]
    pub fn keys(&self) -> Vec<(Arc<str>, Origin)> {
        let mut seen: HashSet<Arc<str>> = HashSet::new();
        let mut keys = Vec::new();
        let mut current = Some(self);
        let mut origin = Origin::Own;
        while let Some(obj) = current {
            for (name, slot) in obj.0.properties.read().iter() {
                if seen.insert(name.clone()) && slot.enumerable {
                    keys.push((name.clone(), origin));
                }
            }
            current = obj.prototype();
            origin = Origin::Inherited;
        }
        keys
    }

    /// Invokes the method `name` with this object as receiver.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` does not resolve, if it resolves to a
    /// non-callable value, or if the method body itself fails.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        let context = || ErrorContext::new().with_source(self.class_name().unwrap_or("Object"));
        match self.get(name) {
            Some(Value::Fn(func)) => func.call(self, args),
            Some(other) => {
                Err(Error::not_callable(name.to_string(), other.kind()).with_context(context()))
            }
            None => Err(Error::property_not_found(name.to_string()).with_context(context())),
        }
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Object {
    // Property values are not printed: objects may reference themselves.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.keys().into_iter().map(|(name, _)| name).collect();
        write!(
            f,
            "{} {{{}}}",
            self.class_name().unwrap_or("Object"),
            names.join(", ")
        )
    }
}
