//! Generation options

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Options controlling what the assembler emits for one schema.
///
/// Every field has a default, so partially specified options (and options
/// deserialized from sparse config files) are always valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Java package of the generated classes
    pub package: String,

    /// Emit `readFromJson`
    pub emit_textual_reader: bool,

    /// Emit `writeJSON`
    pub emit_textual_writer: bool,

    /// Reference types written with the generic serializable channel
    pub serializables: BTreeSet<String>,

    /// Members skipped by the textual protocol
    pub json_blacklist: BTreeSet<String>,

    /// Member -> Java literal assigned when the key is absent
    pub default_values: BTreeMap<String, String>,

    /// Member -> explicit JSON key
    pub json_keys: BTreeMap<String, String>,

    /// Members excluded from the binary protocol and declared `transient`
    pub transient: BTreeSet<String>,

    /// Members whose absence fails textual decoding
    pub required: BTreeSet<String>,

    /// Parent class (`None` or `Object` for no parent)
    pub extends: Option<String>,

    /// Implemented capabilities besides `Parcelable` (e.g. `Serializable`)
    pub implements: Vec<String>,

    /// User-declared constructors; when empty, constructors are synthesized
    pub constructors: Vec<ConstructorSpec>,

    /// Additional imports for the generated units
    pub imports: Vec<String>,

    /// Package holding the `JsonUtil` and `JsonParser` support classes
    pub support_package: String,

    /// Property order, which fixes the binary field sequence
    pub field_order: FieldOrder,
}

/// How resolved properties are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrder {
    /// Byte-lexicographic by type token, then declaration order
    #[default]
    ByType,

    /// Declaration order
    Declaration,
}

fn default_package() -> String {
    "org.pretz.parcelgen".to_string()
}

fn default_support_package() -> String {
    "com.yelp.parcelgen".to_string()
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            package: default_package(),
            emit_textual_reader: true,
            emit_textual_writer: false,
            serializables: BTreeSet::new(),
            json_blacklist: BTreeSet::new(),
            default_values: BTreeMap::new(),
            json_keys: BTreeMap::new(),
            transient: BTreeSet::new(),
            required: BTreeSet::new(),
            extends: None,
            implements: Vec::new(),
            constructors: Vec::new(),
            imports: Vec::new(),
            support_package: default_support_package(),
            field_order: FieldOrder::ByType,
        }
    }
}

impl GenerationOptions {
    /// Create options with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent class, with `Object` treated as no parent
    pub fn parent(&self) -> Option<&str> {
        self.extends
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "Object")
    }
}

/// A user-declared constructor: ordered `(type, name)` parameters delegating to
/// the parent constructor with the same arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorSpec {
    pub args: Vec<(String, String)>,

    #[serde(default)]
    pub throws: Vec<String>,
}

impl ConstructorSpec {
    pub fn new(args: Vec<(String, String)>) -> Self {
        Self {
            args,
            throws: Vec::new(),
        }
    }

    pub fn with_throws(mut self, throws: Vec<String>) -> Self {
        self.throws = throws;
        self
    }
}
