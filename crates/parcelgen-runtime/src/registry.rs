//! Registry of generated classes, keyed by concrete class name.

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{Instance, zero_value};
use parcelgen_core::GeneratedArtifact;
use parcelgen_core::ir::{ClassDecl, FieldDecl};
use std::collections::{BTreeMap, BTreeSet};

/// Generated base classes available to the codecs.
///
/// A class is registered under its concrete name (`Business`), the name
/// references and parents use, while the protocol methods come from its
/// generated base (`_Business`).
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<String, ClassDecl>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, artifact: &GeneratedArtifact) {
        self.classes
            .insert(artifact.name.clone(), artifact.base.class.clone());
    }

    /// Builder-style registration.
    pub fn with(mut self, artifact: &GeneratedArtifact) -> Self {
        self.register(artifact);
        self
    }

    pub fn get(&self, class: &str) -> RuntimeResult<&ClassDecl> {
        self.classes
            .get(class)
            .ok_or_else(|| RuntimeError::UnknownClass(class.to_string()))
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains_key(class)
    }

    /// Parent class name of a generated base, if any.
    pub fn parent_of(decl: &ClassDecl) -> Option<&str> {
        decl.extends.as_deref().filter(|p| *p != "Object")
    }

    /// Storage fields of a class and all of its registered ancestors.
    pub fn fields(&self, class: &str) -> RuntimeResult<Vec<&FieldDecl>> {
        let mut fields = Vec::new();
        let mut visited = BTreeSet::new();
        let mut next = Some(class);

        // a class extending itself (directly or not) stops at the repeat
        while let Some(name) = next.filter(|n| visited.insert(*n)) {
            let decl = self.get(name)?;
            fields.extend(decl.fields());
            next = Self::parent_of(decl);
        }

        Ok(fields)
    }

    /// A fresh instance with every field at its initial value.
    pub fn instantiate(&self, class: &str) -> RuntimeResult<Instance> {
        let mut instance = Instance::new(class);
        for field in self.fields(class)? {
            instance.set(&field.field.member, zero_value(&field.category));
        }
        Ok(instance)
    }
}
