//! `org.json.JSONObject` access semantics over `serde_json` values.
//!
//! The `opt*` accessors never fail: a missing or mistyped key yields the zero
//! value (`0`, `false`, `0.0` for doubles). [`JsonObject::opt_string`] returns
//! `""` for a missing key and the literal text `"null"` for an explicit null,
//! which is why nullable members are read behind a presence guard.

use crate::error::{RuntimeError, RuntimeResult};
use serde_json::{Map, Value as Json};

/// Read-only view of one JSON object.
#[derive(Debug, Clone, Copy)]
pub struct JsonObject<'a> {
    map: &'a Map<String, Json>,
}

impl<'a> JsonObject<'a> {
    pub fn new(map: &'a Map<String, Json>) -> Self {
        Self { map }
    }

    /// View a JSON value that must be an object.
    pub fn from_value(value: &'a Json) -> RuntimeResult<Self> {
        value.as_object().map(Self::new).ok_or_else(|| RuntimeError::TypeMismatch {
            member: "<root>".into(),
            expected: "JSONObject".into(),
            found: json_kind(value).into(),
        })
    }

    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Missing keys count as null.
    pub fn is_null(&self, key: &str) -> bool {
        self.map.get(key).is_none_or(Json::is_null)
    }

    /// The guard condition of the textual reader.
    pub fn present(&self, key: &str) -> bool {
        self.has(key) && !self.is_null(key)
    }

    pub fn opt_long(&self, key: &str) -> i64 {
        match self.map.get(key) {
            Some(Json::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or(0),
            Some(Json::String(s)) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64))
                .unwrap_or(0),
            _ => 0,
        }
    }

    pub fn opt_int(&self, key: &str) -> i32 {
        // narrowing like Number.intValue()
        self.opt_long(key) as i32
    }

    pub fn opt_double(&self, key: &str) -> f64 {
        match self.map.get(key) {
            Some(Json::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Json::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn opt_boolean(&self, key: &str) -> bool {
        match self.map.get(key) {
            Some(Json::Bool(b)) => *b,
            Some(Json::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    pub fn opt_string(&self, key: &str) -> String {
        match self.map.get(key) {
            None => String::new(),
            Some(Json::Null) => "null".into(),
            Some(Json::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// `getString`: fails on a missing key or a non-string value.
    pub fn get_string(&self, key: &str) -> RuntimeResult<String> {
        match self.map.get(key) {
            Some(Json::String(s)) => Ok(s.clone()),
            Some(other) => Err(type_error(key, "String", other)),
            None => Err(RuntimeError::MissingKey(key.to_string())),
        }
    }

    /// `getJSONObject`
    pub fn get_object(&self, key: &str) -> RuntimeResult<JsonObject<'a>> {
        match self.map.get(key) {
            Some(Json::Object(map)) => Ok(JsonObject::new(map)),
            Some(other) => Err(type_error(key, "JSONObject", other)),
            None => Err(RuntimeError::MissingKey(key.to_string())),
        }
    }

    /// `optJSONArray`
    pub fn opt_array(&self, key: &str) -> Option<&'a [Json]> {
        match self.map.get(key) {
            Some(Json::Array(items)) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// `JsonUtil.parseTimestamp`: epoch seconds in the document, milliseconds out.
    pub fn parse_timestamp(&self, key: &str) -> i64 {
        self.opt_long(key).saturating_mul(1000)
    }
}

pub(crate) fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "String",
        Json::Array(_) => "JSONArray",
        Json::Object(_) => "JSONObject",
    }
}

fn type_error(key: &str, expected: &str, found: &Json) -> RuntimeError {
    RuntimeError::TypeMismatch {
        member: key.to_string(),
        expected: expected.to_string(),
        found: json_kind(found).to_string(),
    }
}
