//! Generator configuration (`-c`): package defaults and per-object overrides.
//!
//! ```yaml
//! Target:
//!   default_package: com.example.model
//! Config:
//!   Business:
//!     rename: {id: businessId}
//!     implement: [Serializable]
//!     extends: BaseModel
//!     do_json_writer: true
//! ```
//!
//! The same structure is accepted as TOML (`[Target]`, `[Config.Business]`).

use anyhow::{Context, Result};
use parcelgen_core::{ConstructorSpec, FieldOrder, GenerationOptions};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// Parsed generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct GeneratorConfig {
    pub target: TargetSection,

    /// Overrides keyed by concrete class name
    pub config: BTreeMap<String, ObjectConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TargetSection {
    pub default_package: Option<String>,
}

/// Per-object overrides. Absent entries leave the schema's own value alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ObjectConfig {
    /// Source key -> member name
    pub rename: BTreeMap<String, String>,
    pub implement: Option<Vec<String>>,
    /// Added to the schema's transient set
    pub transient: Vec<String>,
    pub extends: Option<String>,
    pub constructors: Option<Vec<ConstructorSpec>>,
    pub do_json_writer: Option<bool>,
    pub serializables: Option<BTreeSet<String>>,
    pub json_blacklist: Option<BTreeSet<String>>,
    pub default_values: Option<BTreeMap<String, JavaLiteral>>,
    pub imports: Option<Vec<String>>,
    pub package: Option<String>,
    pub required: Option<BTreeSet<String>>,
    pub field_order: Option<FieldOrder>,
}

/// A Java literal written in a schema or config file.
///
/// Numbers and booleans may be written unquoted; strings are taken verbatim,
/// so a Java string literal keeps its own quotes (`"\"unknown\""`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JavaLiteral {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for JavaLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaLiteral::Bool(b) => write!(f, "{b}"),
            JavaLiteral::Int(i) => write!(f, "{i}"),
            JavaLiteral::Float(x) => write!(f, "{x:?}"),
            JavaLiteral::Text(s) => f.write_str(s),
        }
    }
}

/// Render literal maps into the option form.
pub(crate) fn literals(values: &BTreeMap<String, JavaLiteral>) -> BTreeMap<String, String> {
    values
        .iter()
        .map(|(member, literal)| (member.clone(), literal.to_string()))
        .collect()
}

impl GeneratorConfig {
    /// Load a config file; `.toml` is read as TOML, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {path:?}"))?;

        if path.extension().is_some_and(|e| e == "toml") {
            Self::from_toml_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
        .with_context(|| format!("Failed to parse config: {path:?}"))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // an empty document is an empty config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn default_package(&self) -> Option<&str> {
        self.target.default_package.as_deref()
    }

    pub fn object(&self, class_name: &str) -> Option<&ObjectConfig> {
        self.config.get(class_name)
    }
}

impl ObjectConfig {
    /// Apply the overrides on top of options built from a schema.
    pub fn apply(&self, options: &mut GenerationOptions) {
        if let Some(implement) = &self.implement {
            options.implements = implement.clone();
        }
        options.transient.extend(self.transient.iter().cloned());
        if let Some(extends) = &self.extends {
            options.extends = Some(extends.clone());
        }
        if let Some(constructors) = &self.constructors {
            options.constructors = constructors.clone();
        }
        if let Some(writer) = self.do_json_writer {
            options.emit_textual_writer = writer;
        }
        if let Some(serializables) = &self.serializables {
            options.serializables = serializables.clone();
        }
        if let Some(blacklist) = &self.json_blacklist {
            options.json_blacklist = blacklist.clone();
        }
        if let Some(defaults) = &self.default_values {
            options.default_values = literals(defaults);
        }
        if let Some(imports) = &self.imports {
            options.imports = imports.clone();
        }
        if let Some(package) = &self.package {
            options.package = package.clone();
        }
        if let Some(required) = &self.required {
            options.required = required.clone();
        }
        if let Some(order) = self.field_order {
            options.field_order = order;
        }
    }
}
