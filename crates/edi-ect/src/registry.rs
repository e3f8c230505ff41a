//! Per-conversion class table used to deduplicate classes by name

use crate::config::NameConflictPolicy;
use crate::{Error, Result};
use edi_metamodel::annotation::{keys, kinds};
use edi_metamodel::{Annotated, ClassDescriptor, ClassId, Feature, PackageDescriptor};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Registry of the classes created during one conversion.
///
/// Classes are stored in the package being built; the registry only keeps
/// the name index. It lives for a single conversion and is dropped with it.
pub struct ClassRegistry<'p> {
    package: &'p mut PackageDescriptor,
    index: HashMap<String, ClassId>,
    policy: NameConflictPolicy,
}

/// Kind marker of a class. Group classes carry no marker.
pub fn class_kind(class: &ClassDescriptor) -> &str {
    class.smooks(keys::TYPE).unwrap_or(kinds::SEGMENT_GROUP)
}

impl<'p> ClassRegistry<'p> {
    /// Create a registry filling the given package
    pub fn new(package: &'p mut PackageDescriptor) -> Self {
        Self::with_policy(package, NameConflictPolicy::default())
    }

    pub fn with_policy(package: &'p mut PackageDescriptor, policy: NameConflictPolicy) -> Self {
        let index = package
            .classes()
            .map(|(id, class)| (class.name.clone(), id))
            .collect();
        Self {
            package,
            index,
            policy,
        }
    }

    /// Get a registered class id by name
    pub fn get(&self, name: &str) -> Option<ClassId> {
        self.index.get(name).copied()
    }

    /// Check if a class name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassDescriptor> {
        self.package.class(id)
    }

    /// Look up a class that a node of kind `requested` would reuse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClassNameConflict`] when the name belongs to a class of
    /// another kind and the policy is [`NameConflictPolicy::Fail`].
    pub fn resolve(&self, name: &str, requested: &str) -> Result<Option<ClassId>> {
        let Some(id) = self.get(name) else {
            return Ok(None);
        };
        let existing = self.class(id).map_or(kinds::SEGMENT_GROUP, class_kind);
        if existing == requested {
            debug!(class = %name, kind = requested, "Reusing registered class");
            return Ok(Some(id));
        }

        match self.policy {
            NameConflictPolicy::Fail => Err(Error::class_name_conflict(name, existing, requested)),
            NameConflictPolicy::ReuseFirst => {
                debug!(
                    class = %name,
                    existing,
                    requested,
                    "Class name registered for another kind, reusing first class"
                );
                Ok(Some(id))
            }
        }
    }

    /// Register a new class. A class already registered under the same name
    /// is returned instead and `class` is discarded.
    pub fn register(&mut self, class: ClassDescriptor) -> ClassId {
        if let Some(id) = self.get(&class.name) {
            debug!(class = %class.name, "Class already registered");
            return id;
        }
        trace!(class = %class.name, "Registering class");
        let name = class.name.clone();
        let id = self.package.add_class(class);
        self.index.insert(name, id);
        id
    }

    /// Append a feature to a registered class
    pub fn add_feature(&mut self, id: ClassId, feature: impl Into<Feature>) {
        if let Some(class) = self.package.class_mut(id) {
            class.add_feature(feature);
        }
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
