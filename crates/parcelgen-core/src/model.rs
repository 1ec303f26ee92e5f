//! Property model: the normalized, canonically ordered schema both emitters consume.
//!
//! A [`SchemaDescription`] is what a loader produces: a class name and the
//! declared `(type, member)` pairs in declaration order. [`ClassSchema::build`]
//! resolves it against [`GenerationOptions`] into immutable [`Property`] values
//! in canonical order.
//!
//! # Canonical Order
//!
//! With [`FieldOrder::ByType`] (the default) properties are ordered
//! byte-lexicographically by type token (`Date` < `String` < `boolean` < `int`)
//! and keep declaration order inside a type. [`FieldOrder::Declaration`] keeps
//! plain declaration order. The resolved order fixes the field sequence of the
//! binary protocol, so it is part of the wire contract.

use crate::error::{GenError, GenResult};
use crate::ir::FieldRef;
use crate::naming::{camel_to_snake, is_identifier, storage_name};
use crate::options::{ConstructorSpec, FieldOrder, GenerationOptions};
use crate::taxonomy::{PropertyCategory, classify, normalize_type_token};
use std::collections::HashMap;
use tracing::warn;

/// One declared member, as read from a schema source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub ty: String,
    pub name: String,
}

/// A class description before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDescription {
    /// Concrete class name (the generated base class is `_` + this name).
    pub class_name: String,

    /// Members in declaration order.
    pub declarations: Vec<Declaration>,
}

impl SchemaDescription {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            declarations: Vec::new(),
        }
    }

    /// Builder-style declaration.
    pub fn declare(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.push(ty, name);
        self
    }

    pub fn push(&mut self, ty: impl Into<String>, name: impl Into<String>) {
        self.declarations.push(Declaration {
            ty: ty.into(),
            name: name.into(),
        });
    }
}

/// A resolved property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Member name (camelCase identifier)
    pub name: String,

    /// Declared type token, normalized (`X[]` -> `ArrayList<X>`)
    pub ty: String,

    pub category: PropertyCategory,

    /// Key in the textual protocol
    pub json_key: String,

    /// Java literal assigned when the key is absent
    pub default_value: Option<String>,

    /// Skipped by the textual protocol
    pub json_excluded: bool,

    /// Skipped by the binary protocol
    pub transient: bool,

    /// Absence fails textual decoding
    pub required: bool,
}

impl Property {
    pub fn storage_name(&self) -> String {
        storage_name(&self.name)
    }

    pub fn field_ref(&self) -> FieldRef {
        FieldRef::new(&self.name)
    }
}

/// The immutable, resolved schema of one generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSchema {
    name: String,
    package: String,
    properties: Vec<Property>,
    parent: Option<String>,
    implements: Vec<String>,
    constructors: Vec<ConstructorSpec>,
    imports: Vec<String>,
    emit_textual_reader: bool,
    emit_textual_writer: bool,
    support_package: String,
}

impl ClassSchema {
    /// Resolve a description against generation options.
    ///
    /// Fails on the first invalid member name, case-insensitive name collision,
    /// unclassifiable type token or contradictory option.
    pub fn build(description: &SchemaDescription, options: &GenerationOptions) -> GenResult<Self> {
        if !is_identifier(&description.class_name) {
            return Err(GenError::InvalidIdentifier(description.class_name.clone()));
        }

        let mut properties: Vec<Property> = Vec::with_capacity(description.declarations.len());
        let mut seen: HashMap<String, String> = HashMap::new();

        for decl in &description.declarations {
            let name = decl.name.trim();
            if !is_identifier(name) {
                return Err(GenError::InvalidIdentifier(decl.name.clone()));
            }
            if let Some(existing) = seen.insert(name.to_lowercase(), name.to_string()) {
                return Err(GenError::DuplicateMember {
                    name: name.to_string(),
                    existing,
                });
            }

            let ty = normalize_type_token(&decl.ty);
            let category = classify(&ty, &options.serializables)?;
            let property = Property {
                name: name.to_string(),
                json_key: options
                    .json_keys
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| camel_to_snake(name)),
                default_value: options.default_values.get(name).cloned(),
                json_excluded: options.json_blacklist.contains(name),
                transient: options.transient.contains(name),
                required: options.required.contains(name),
                category,
                ty,
            };

            if property.required && property.default_value.is_some() {
                return Err(GenError::ConflictingOptions {
                    member: property.name,
                    reason: "a required member cannot declare a default value".into(),
                });
            }

            properties.push(property);
        }

        if options.field_order == FieldOrder::ByType {
            // stable: declaration order survives inside a type
            properties.sort_by(|a, b| a.ty.cmp(&b.ty));
        }

        for constructor in &options.constructors {
            if let Some((_, bad)) = constructor.args.iter().find(|(_, n)| !is_identifier(n)) {
                return Err(GenError::InvalidIdentifier(bad.clone()));
            }
        }

        warn_unknown_members(&seen, options);

        Ok(Self {
            name: description.class_name.clone(),
            package: options.package.clone(),
            properties,
            parent: options.parent().map(str::to_string),
            implements: options.implements.clone(),
            constructors: options.constructors.clone(),
            imports: options.imports.clone(),
            emit_textual_reader: options.emit_textual_reader,
            emit_textual_writer: options.emit_textual_writer,
            support_package: options.support_package.clone(),
        })
    }

    /// Concrete (hand-editable) class name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generated base class name.
    pub fn base_name(&self) -> String {
        format!("_{}", self.name)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// All properties in canonical order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties().find(|p| p.name == name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether any property falls in the given category predicate.
    pub fn any(&self, predicate: impl Fn(&PropertyCategory) -> bool) -> bool {
        self.properties().any(|p| predicate(&p.category))
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn implements(&self) -> &[String] {
        &self.implements
    }

    pub fn constructors(&self) -> &[ConstructorSpec] {
        &self.constructors
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    pub fn emit_textual_reader(&self) -> bool {
        self.emit_textual_reader
    }

    pub fn emit_textual_writer(&self) -> bool {
        self.emit_textual_writer
    }

    /// Whether any textual method is emitted.
    pub fn emits_textual(&self) -> bool {
        self.emit_textual_reader || self.emit_textual_writer
    }

    pub fn support_package(&self) -> &str {
        &self.support_package
    }
}

/// Option entries naming members the schema does not declare are ignored.
fn warn_unknown_members(seen: &HashMap<String, String>, options: &GenerationOptions) {
    let declared = |name: &String| seen.values().any(|n| n == name);

    let named = options
        .default_values
        .keys()
        .chain(options.json_keys.keys())
        .chain(options.json_blacklist.iter())
        .chain(options.transient.iter())
        .chain(options.required.iter());

    for name in named.filter(|n| !declared(n)) {
        warn!(member = %name, "option refers to an undeclared member, ignoring");
    }
}
