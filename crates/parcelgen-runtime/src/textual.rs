//! Interpreter for `readFromJson` / `writeJSON` statements.

use crate::codec::Codec;
use crate::error::{RuntimeError, RuntimeResult};
use crate::json::{JsonObject, json_kind};
use crate::registry::ClassRegistry;
use crate::value::{Instance, Value, parse_literal};
use parcelgen_core::ScalarKind;
use parcelgen_core::ir::{FieldRef, PutExpr, Stmt, TextExpr};
use serde_json::{Map, Number, Value as Json};
use tracing::debug;

/// Executes the textual protocol of registered classes.
#[derive(Debug, Clone, Copy)]
pub struct TextualCodec<'r> {
    registry: &'r ClassRegistry,
}

impl<'r> TextualCodec<'r> {
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self { registry }
    }

    /// `Class.CREATOR.parse(json)`: a fresh instance, then `readFromJson`.
    pub fn read_json(&self, class: &str, json: JsonObject<'_>) -> RuntimeResult<Instance> {
        let decl = self.registry.get(class)?;
        let stmts = decl.read_from_json().ok_or_else(|| RuntimeError::MissingMethod {
            class: class.to_string(),
            method: "readFromJson",
        })?;

        let mut instance = self.registry.instantiate(class)?;
        self.exec_read(stmts, json, &mut instance)?;
        Ok(instance)
    }

    /// `instance.writeJSON()`
    pub fn write_json(&self, instance: &Instance) -> RuntimeResult<Json> {
        let decl = self.registry.get(&instance.class)?;
        let stmts = decl.write_json().ok_or_else(|| RuntimeError::MissingMethod {
            class: instance.class.clone(),
            method: "writeJSON",
        })?;

        let mut out = Map::new();
        self.exec_write(stmts, instance, &mut out)?;
        Ok(Json::Object(out))
    }

    fn exec_read(&self, stmts: &[Stmt], json: JsonObject<'_>, instance: &mut Instance) -> RuntimeResult<()> {
        for stmt in stmts {
            match stmt {
                Stmt::Assign { target, value } => {
                    let value = self.eval(value, json, instance, target)?;
                    instance.set(&target.member, value);
                }
                Stmt::Guard {
                    key,
                    then,
                    otherwise,
                } => {
                    let branch = if json.present(key) { then } else { otherwise };
                    self.exec_read(branch, json, instance)?;
                }
                Stmt::Require { key } => {
                    if !json.present(key) {
                        return Err(RuntimeError::MissingKey(key.clone()));
                    }
                }
                Stmt::Loop { target, key, elem } => {
                    let mut items = match instance.get(&target.member) {
                        Value::List(items) => items.clone(),
                        _ => Vec::new(),
                    };
                    for item in json.opt_array(key).unwrap_or_default() {
                        items.push(coerce_element(*elem, &target.member, item)?);
                    }
                    instance.set(&target.member, Value::List(items));
                }
                other => return Err(unexpected("readFromJson", other)),
            }
        }
        Ok(())
    }

    fn eval(
        &self,
        expr: &TextExpr,
        json: JsonObject<'_>,
        instance: &Instance,
        target: &FieldRef,
    ) -> RuntimeResult<Value> {
        Ok(match expr {
            TextExpr::Opt { kind, key } => match kind {
                ScalarKind::Int => Value::Int(json.opt_int(key)),
                ScalarKind::Long => Value::Long(json.opt_long(key)),
                ScalarKind::Double => Value::Double(json.opt_double(key)),
                ScalarKind::Float => Value::Float(json.opt_double(key) as f32),
                ScalarKind::Byte => Value::Byte(json.opt_int(key) as i8),
                ScalarKind::Boolean => Value::Bool(json.opt_boolean(key)),
                ScalarKind::String => Value::Str(json.opt_string(key)),
            },
            TextExpr::Timestamp { key } => Value::Date(json.parse_timestamp(key)),
            TextExpr::Uri { key } => Value::Uri(json.get_string(key)?),
            TextExpr::StringList { key } => match json.opt_array(key) {
                None => Value::Null,
                Some(items) => Value::List(
                    items
                        .iter()
                        .map(|item| match item {
                            Json::String(s) => Value::Str(s.clone()),
                            other => Value::Str(other.to_string()),
                        })
                        .collect(),
                ),
            },
            TextExpr::ObjectList { key, elem } => match json.opt_array(key) {
                None => Value::Null,
                Some(items) => Value::List(
                    items
                        .iter()
                        .map(|item| {
                            let nested = JsonObject::from_value(item)?;
                            self.read_json(elem, nested).map(Value::Object)
                        })
                        .collect::<RuntimeResult<_>>()?,
                ),
            },
            TextExpr::Object { ty, key } => Value::Object(self.read_json(ty, json.get_object(key)?)?),
            TextExpr::EmptyList { .. } => Value::List(Vec::new()),
            TextExpr::Literal(literal) => {
                let fields = self.registry.fields(&instance.class)?;
                let field = fields
                    .iter()
                    .find(|f| f.field.member == target.member)
                    .ok_or_else(|| RuntimeError::UnknownClass(format!("{}.{}", instance.class, target.member)))?;
                parse_literal(&target.member, &field.category, literal)?
            }
            TextExpr::Null => Value::Null,
        })
    }

    fn exec_write(&self, stmts: &[Stmt], instance: &Instance, out: &mut Map<String, Json>) -> RuntimeResult<()> {
        for stmt in stmts {
            match stmt {
                Stmt::NullGuard { target, then } => {
                    if !instance.get(&target.member).is_null() {
                        self.exec_write(then, instance, out)?;
                    }
                }
                Stmt::Put { key, value } => {
                    out.insert(key.clone(), self.put_value(value, instance)?);
                }
                Stmt::Placeholder { target } => {
                    debug!(class = %instance.class, member = %target.member, "list member not written");
                }
                other => return Err(unexpected("writeJSON", other)),
            }
        }
        Ok(())
    }

    fn put_value(&self, expr: &PutExpr, instance: &Instance) -> RuntimeResult<Json> {
        Ok(match expr {
            PutExpr::Field(field) => scalar_json(&field.member, instance.get(&field.member))?,
            PutExpr::EpochSeconds(field) => match instance.get(&field.member) {
                Value::Date(ms) => Json::from(ms / 1000),
                other => return Err(RuntimeError::mismatch(&field.member, "Date", other)),
            },
            PutExpr::UriString(field) => match instance.get(&field.member) {
                Value::Uri(uri) => Json::String(uri.clone()),
                other => return Err(RuntimeError::mismatch(&field.member, "Uri", other)),
            },
            PutExpr::Nested(field) => match instance.get(&field.member) {
                Value::Object(nested) => self.write_json(nested)?,
                other => return Err(RuntimeError::mismatch(&field.member, "JSON object", other)),
            },
        })
    }
}

impl Codec for TextualCodec<'_> {
    type Encoded = Json;

    fn encode(&self, instance: &Instance) -> RuntimeResult<Json> {
        self.write_json(instance)
    }

    fn decode(&self, class: &str, encoded: &Json) -> RuntimeResult<Instance> {
        self.read_json(class, JsonObject::from_value(encoded)?)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}

/// Coerce one `JSONArray` element, as `getInt(i)` and friends do.
fn coerce_element(kind: ScalarKind, member: &str, item: &Json) -> RuntimeResult<Value> {
    let mismatch = || RuntimeError::TypeMismatch {
        member: member.to_string(),
        expected: kind.boxed_name().to_string(),
        found: json_kind(item).to_string(),
    };
    let number = || {
        item.as_f64()
            .or_else(|| item.as_str().and_then(|s| s.trim().parse().ok()))
            .ok_or_else(mismatch)
    };

    Ok(match kind {
        ScalarKind::String => match item {
            Json::String(s) => Value::Str(s.clone()),
            Json::Null => return Err(mismatch()),
            other => Value::Str(other.to_string()),
        },
        ScalarKind::Boolean => match item {
            Json::Bool(b) => Value::Bool(*b),
            Json::String(s) if s.eq_ignore_ascii_case("true") => Value::Bool(true),
            Json::String(s) if s.eq_ignore_ascii_case("false") => Value::Bool(false),
            _ => return Err(mismatch()),
        },
        ScalarKind::Long => match item.as_i64() {
            Some(v) => Value::Long(v),
            None => Value::Long(number()? as i64),
        },
        ScalarKind::Int => Value::Int(number()? as i32),
        ScalarKind::Byte => Value::Byte(number()? as i8),
        ScalarKind::Double => Value::Double(number()?),
        ScalarKind::Float => Value::Float(number()? as f32),
    })
}

fn scalar_json(member: &str, value: &Value) -> RuntimeResult<Json> {
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Byte(v) => Json::from(*v),
        Value::Int(v) => Json::from(*v),
        Value::Long(v) => Json::from(*v),
        Value::Float(v) => Number::from_f64(f64::from(*v)).map_or(Json::Null, Json::Number),
        Value::Double(v) => Number::from_f64(*v).map_or(Json::Null, Json::Number),
        Value::Str(s) => Json::String(s.clone()),
        other => return Err(RuntimeError::mismatch(member, "scalar", other)),
    })
}

fn unexpected(method: &'static str, stmt: &Stmt) -> RuntimeError {
    RuntimeError::UnexpectedStatement {
        method,
        statement: format!("{stmt:?}"),
    }
}
