//! Shallow cloning of traced objects.
//!
//! The clone keeps the target's own/inherited partition: own properties are
//! copied onto the clone, inherited ones onto a private defaults object the
//! clone delegates to. Nested objects and arrays are shared, not copied.
//! Hidden properties are not enumerable and are therefore left behind.

use std::time::{SystemTime, UNIX_EPOCH};

use wraptrace_foundation::{Object, Origin};

use crate::config::DEFAULT_ID_PREFIX;

/// Name of the hidden property holding a clone's identifier.
pub const ID_PROPERTY: &str = "__wraptrace_id";

/// A freshly cloned object and its identifier.
#[derive(Clone, Debug)]
pub struct Cloned {
    /// Identifier unique to this clone.
    pub id: String,
    /// The clone.
    pub wrapped: Object,
}

/// Builds shallow clones.
#[derive(Clone, Debug)]
pub struct Cloner {
    id_prefix: String,
}

impl Default for Cloner {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

impl Cloner {
    /// Creates a cloner whose identifiers start with `id_prefix`.
    #[must_use]
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
        }
    }

    /// Clones `target`.
    ///
    /// The target itself is only read.
    #[must_use]
    pub fn clone_object(&self, target: &Object) -> Cloned {
        let defaults = Object::create(target.class_name(), None);
        let wrapped = Object::with_prototype(defaults.clone());

        for (name, origin) in target.keys() {
            let Some(value) = target.get(&name) else {
                continue;
            };
            match origin {
                Origin::Own => wrapped.set(&name, value),
                Origin::Inherited => defaults.set(&name, value),
            }
        }

        let id = self.generate_id();
        wrapped.define_hidden(ID_PROPERTY, id.as_str());
        Cloned { id, wrapped }
    }

    /// Returns `<prefix>-<unix millis>-<random hex>`.
    #[must_use]
    pub fn generate_id(&self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis());
        format!("{}-{millis}-{:08x}", self.id_prefix, rand::random::<u32>())
    }
}
