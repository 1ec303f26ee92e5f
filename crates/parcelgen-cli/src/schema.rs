//! Schema loaders: turn `.json` and `.yaml` description files into a
//! [`SchemaDescription`] plus [`GenerationOptions`].
//!
//! # JSON Descriptions
//!
//! ```json
//! {
//!     "package": "com.example.model",
//!     "props": {"String": ["name", "phone"], "int": ["reviewCount"]},
//!     "json_map": {"phone": "display_phone"},
//!     "do_json_writer": true
//! }
//! ```
//!
//! Member names are given directly; JSON keys default to the snake_case form.
//!
//! # YAML Descriptions
//!
//! ```yaml
//! String:
//!   name: Business name
//!   display_phone: {desc: Formatted phone number, ex: "+1-415-908-3801"}
//! Integer:
//!   review_count: Number of reviews
//! Review[]:
//!   - reviews: Up to three review excerpts
//! ```
//!
//! Keys are JSON names; member names are the camelCase form unless the
//! generator config renames them. Simple type names are aliased to natives
//! (`Integer` -> `int`, `Url` -> `Uri`, ...).
//!
//! The concrete class name is the file name up to the first `.`.

use crate::config::{GeneratorConfig, JavaLiteral, literals};
use anyhow::{Context, Result};
use parcelgen_core::naming::snake_to_camel;
use parcelgen_core::{ConstructorSpec, FieldOrder, GenError, GenerationOptions, SchemaDescription};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Source format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Json,
    Yaml,
}

impl SourceKind {
    /// Detect the format from the file extension.
    pub fn of(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(SourceKind::Json),
            "yaml" | "yml" => Some(SourceKind::Yaml),
            _ => None,
        }
    }
}

/// A loaded schema, ready for generation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSchema {
    pub description: SchemaDescription,
    pub options: GenerationOptions,
}

/// Concrete class name of a schema file.
pub fn class_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.split('.').next())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a class name from {path:?}"))
}

/// Load a schema file. The format is chosen by extension before anything is read.
pub fn load(path: &Path, config: Option<&GeneratorConfig>) -> Result<LoadedSchema> {
    let kind = SourceKind::of(path)
        .ok_or_else(|| GenError::UnsupportedSource(path.display().to_string()))?;
    let class_name = class_name_of(path)?;

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema: {path:?}"))?;

    let loaded = match kind {
        SourceKind::Json => from_json_str(&class_name, &content, config),
        SourceKind::Yaml => from_yaml_str(&class_name, &content, config),
    }
    .with_context(|| format!("Failed to load schema: {path:?}"))?;

    debug!(
        class = %class_name,
        members = loaded.description.declarations.len(),
        ?kind,
        "loaded schema"
    );
    Ok(loaded)
}

// ============================================================================
// JSON
// ============================================================================

/// A `.json` description file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsonDescription {
    props: Props,
    package: Option<String>,
    imports: Vec<String>,
    json_map: BTreeMap<String, String>,
    default_values: BTreeMap<String, JavaLiteral>,
    transient: BTreeSet<String>,
    make_serializable: bool,
    do_json: Option<bool>,
    do_json_writer: bool,
    json_blacklist: BTreeSet<String>,
    serializables: BTreeSet<String>,
    required: BTreeSet<String>,
    extends: Option<String>,
    constructors: Vec<ConstructorSpec>,
    field_order: Option<FieldOrder>,
}

/// Parse a JSON description.
///
/// The description's own `package` wins over `Target.default_package`; a
/// `Config.<Class>` entry is applied last.
pub fn from_json_str(
    class_name: &str,
    content: &str,
    config: Option<&GeneratorConfig>,
) -> Result<LoadedSchema> {
    let json: JsonDescription = serde_json::from_str(content)?;

    let mut description = SchemaDescription::new(class_name);
    for (ty, members) in &json.props.0 {
        for member in members {
            description.push(ty.as_str(), member.as_str());
        }
    }

    let mut options = GenerationOptions {
        imports: json.imports,
        json_keys: json.json_map,
        default_values: literals(&json.default_values),
        transient: json.transient,
        emit_textual_reader: json.do_json.unwrap_or(true),
        emit_textual_writer: json.do_json_writer,
        json_blacklist: json.json_blacklist,
        serializables: json.serializables,
        required: json.required,
        extends: json.extends,
        constructors: json.constructors,
        field_order: json.field_order.unwrap_or_default(),
        ..GenerationOptions::default()
    };
    if json.make_serializable {
        options.implements = vec!["Serializable".to_string()];
    }
    if let Some(package) = json
        .package
        .or_else(|| config.and_then(|c| c.default_package()).map(str::to_string))
    {
        options.package = package;
    }

    if let Some(object) = config.and_then(|c| c.object(class_name)) {
        if !object.rename.is_empty() {
            warn!(class = %class_name, "rename applies to YAML schemas only, ignoring");
        }
        object.apply(&mut options);
    }

    Ok(LoadedSchema {
        description,
        options,
    })
}

/// `props`: type token -> member names, in document order.
#[derive(Debug, Default)]
struct Props(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for Props {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropsVisitor;

        impl<'de> Visitor<'de> for PropsVisitor {
            type Value = Props;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of type names to member name lists")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Props, E> {
                Ok(Props::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Props, A::Error> {
                let mut entries = Vec::new();
                while let Some((ty, members)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((ty, members));
                }
                Ok(Props(entries))
            }
        }

        deserializer.deserialize_any(PropsVisitor)
    }
}

// ============================================================================
// YAML
// ============================================================================

/// Simple YAML type names and the declared type they stand for.
const YAML_TYPE_ALIASES: [(&str, &str); 6] = [
    ("Integer", "int"),
    ("Boolean", "boolean"),
    ("Float", "float"),
    ("Long", "long"),
    ("Double", "double"),
    ("Url", "Uri"),
];

fn yaml_type(token: &str) -> &str {
    YAML_TYPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == token)
        .map_or(token, |(_, ty)| *ty)
}

/// One YAML-declared property.
#[derive(Debug, Clone, PartialEq, Eq)]
struct YamlProperty {
    key: String,
    ty: String,
}

/// Parse a YAML object description.
///
/// The package comes from `Target.default_package`; `Config.<Class>` supplies
/// renames and overrides. Every member's JSON key is its YAML name.
pub fn from_yaml_str(
    class_name: &str,
    content: &str,
    config: Option<&GeneratorConfig>,
) -> Result<LoadedSchema> {
    let document: YamlValue = serde_yaml::from_str(content)?;
    let properties = yaml_properties(&document)?;

    let mut options = GenerationOptions::default();
    if let Some(package) = config.and_then(|c| c.default_package()) {
        options.package = package.to_string();
    }
    let object = config.and_then(|c| c.object(class_name));
    if let Some(object) = object {
        object.apply(&mut options);
    }

    let mut description = SchemaDescription::new(class_name);
    for property in properties {
        let member = object
            .and_then(|o| o.rename.get(&property.key))
            .cloned()
            .unwrap_or_else(|| snake_to_camel(&property.key));
        options.json_keys.insert(member.clone(), property.key);
        description.push(property.ty, member);
    }

    Ok(LoadedSchema {
        description,
        options,
    })
}

fn yaml_properties(document: &YamlValue) -> Result<Vec<YamlProperty>> {
    let root = match document {
        YamlValue::Null => return Ok(Vec::new()),
        YamlValue::Mapping(root) => root,
        other => anyhow::bail!("expected a map of types at the top level, found {other:?}"),
    };

    let mut properties = Vec::new();
    for (ty, node) in root {
        let ty = yaml_string(ty).context("type names must be strings")?;
        let ty = yaml_type(ty);

        match node {
            YamlValue::Sequence(items) => {
                for item in items {
                    collect_members(ty, item, &mut properties)?;
                }
            }
            node => collect_members(ty, node, &mut properties)?,
        }
    }

    Ok(properties)
}

/// Members of one type node: `{key: desc}`, `{key: {desc, ex}}` or a bare key.
fn collect_members(ty: &str, node: &YamlValue, out: &mut Vec<YamlProperty>) -> Result<()> {
    let push = |out: &mut Vec<YamlProperty>, key: &str| {
        out.push(YamlProperty {
            key: key.to_string(),
            ty: ty.to_string(),
        });
    };

    match node {
        YamlValue::Mapping(members) => {
            for (key, _meta) in members {
                let key = yaml_string(key)
                    .with_context(|| format!("member names under `{ty}` must be strings"))?;
                push(out, key);
            }
        }
        YamlValue::String(key) => push(out, key),
        YamlValue::Null => {}
        other => anyhow::bail!("unexpected member entry under `{ty}`: {other:?}"),
    }
    Ok(())
}

fn yaml_string(value: &YamlValue) -> Option<&str> {
    match value {
        YamlValue::String(s) => Some(s),
        _ => None,
    }
}
