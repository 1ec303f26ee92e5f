//! Dynamic values held by instances of generated classes.

use crate::error::{RuntimeError, RuntimeResult};
use parcelgen_core::{PropertyCategory, ScalarKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A member value.
///
/// Dates are epoch milliseconds, URIs their string form. Decimals serialize
/// as their IEEE bit patterns, so serializable blobs keep infinities and NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Int(i32),
    Long(i64),
    Float(#[serde(with = "f32_bits")] f32),
    Double(#[serde(with = "f64_bits")] f64),
    Str(String),
    Date(i64),
    Uri(String),
    List(Vec<Value>),
    Object(Instance),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Byte(_) => "byte",
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Str(_) => "String",
            Value::Date(_) => "Date",
            Value::Uri(_) => "Uri",
            Value::List(_) => "List",
            Value::Object(_) => "Object",
        }
    }
}

/// An instance of a generated class: the concrete class name plus every
/// member value, inherited ones included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub class: String,
    pub fields: BTreeMap<String, Value>,
}

impl Instance {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style member assignment.
    pub fn with(mut self, member: impl Into<String>, value: Value) -> Self {
        self.fields.insert(member.into(), value);
        self
    }

    /// Member value; unknown members read as `Null`.
    pub fn get(&self, member: &str) -> &Value {
        self.fields.get(member).unwrap_or(&Value::Null)
    }

    pub fn set(&mut self, member: &str, value: Value) {
        self.fields.insert(member.to_string(), value);
    }
}

/// Value of a freshly constructed field (Java field initialization).
pub fn zero_value(category: &PropertyCategory) -> Value {
    match category {
        PropertyCategory::NativeScalar { kind } => match kind {
            ScalarKind::Byte => Value::Byte(0),
            ScalarKind::Int => Value::Int(0),
            ScalarKind::Long => Value::Long(0),
            ScalarKind::Float => Value::Float(0.0),
            ScalarKind::Double => Value::Double(0.0),
            ScalarKind::Boolean => Value::Bool(false),
            ScalarKind::String => Value::Null,
        },
        _ => Value::Null,
    }
}

/// Evaluate a Java default-value literal for a member of the given category.
pub fn parse_literal(member: &str, category: &PropertyCategory, literal: &str) -> RuntimeResult<Value> {
    let literal = literal.trim();
    let unsupported = || RuntimeError::UnsupportedLiteral {
        member: member.to_string(),
        literal: literal.to_string(),
    };

    if literal == "null" && category.is_nullable() {
        return Ok(Value::Null);
    }

    let kind = match category {
        PropertyCategory::NativeScalar { kind } | PropertyCategory::BoxedScalar { kind } => *kind,
        _ => return Err(unsupported()),
    };

    let number = |suffixes: &[char]| literal.trim_end_matches(suffixes);
    let value = match kind {
        ScalarKind::String => literal
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
            .map(|s| Value::Str(s.to_string())),
        ScalarKind::Boolean => literal.parse().ok().map(Value::Bool),
        ScalarKind::Byte => literal.parse().ok().map(Value::Byte),
        ScalarKind::Int => literal.parse().ok().map(Value::Int),
        ScalarKind::Long => number(&['L', 'l']).parse().ok().map(Value::Long),
        ScalarKind::Float => number(&['F', 'f']).parse().ok().map(Value::Float),
        ScalarKind::Double => number(&['D', 'd']).parse().ok().map(Value::Double),
    };

    value.ok_or_else(unsupported)
}

mod f32_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        u32::deserialize(deserializer).map(f32::from_bits)
    }
}

mod f64_bits {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.to_bits())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        u64::deserialize(deserializer).map(f64::from_bits)
    }
}
