//! Interpreter for `writeToParcel` / `readFromParcel` statements.

use crate::codec::Codec;
use crate::error::{RuntimeError, RuntimeResult};
use crate::parcel::Parcel;
use crate::registry::ClassRegistry;
use crate::value::{Instance, Value};
use parcelgen_core::ScalarKind;
use parcelgen_core::ir::{ClassDecl, FieldRef, Slot, Wire};
use tracing::trace;

/// Executes the binary protocol of registered classes.
#[derive(Debug, Clone, Copy)]
pub struct BinaryCodec<'r> {
    registry: &'r ClassRegistry,
}

impl<'r> BinaryCodec<'r> {
    pub fn new(registry: &'r ClassRegistry) -> Self {
        Self { registry }
    }

    /// `instance.writeToParcel(parcel)`
    pub fn write_to_parcel(&self, instance: &Instance, parcel: &mut Parcel) -> RuntimeResult<()> {
        self.write_class(&instance.class, instance, parcel)
    }

    /// `Class.CREATOR.createFromParcel(parcel)`
    pub fn read_from_parcel(&self, class: &str, parcel: &mut Parcel) -> RuntimeResult<Instance> {
        let mut instance = self.registry.instantiate(class)?;
        self.read_class(class, &mut instance, parcel)?;
        Ok(instance)
    }

    fn write_class(&self, class: &str, instance: &Instance, parcel: &mut Parcel) -> RuntimeResult<()> {
        let decl = self.registry.get(class)?;
        let stmts = decl.write_to_parcel().ok_or_else(|| missing(class, "writeToParcel"))?;

        for stmt in stmts {
            trace!(class, slot = ?stmt, "write");
            match stmt {
                Slot::Parent => {
                    self.write_class(parent(class, decl)?, instance, parcel)?;
                }
                Slot::BooleanArray(fields) => {
                    let flags = fields
                        .iter()
                        .map(|f| match instance.get(&f.member) {
                            Value::Bool(b) => Ok(*b),
                            other => Err(RuntimeError::mismatch(&f.member, "boolean", other)),
                        })
                        .collect::<RuntimeResult<Vec<_>>>()?;
                    parcel.write_boolean_array(&flags);
                }
                Slot::Field { wire, field } => {
                    self.write_field(wire, field, instance.get(&field.member), parcel)?;
                }
            }
        }
        Ok(())
    }

    fn write_field(
        &self,
        wire: &Wire,
        field: &FieldRef,
        value: &Value,
        parcel: &mut Parcel,
    ) -> RuntimeResult<()> {
        let member = field.member.as_str();
        match (wire, value) {
            (Wire::Native(kind), value) => write_native(*kind, member, value, parcel)?,
            (Wire::Value(_), value) => parcel.write_value(value)?,
            (Wire::DateMillis, Value::Date(ms)) => parcel.write_long(*ms),
            (Wire::DateMillis, Value::Null) => parcel.write_long(i64::MIN),
            (Wire::Uri, Value::Uri(uri)) => parcel.write_string(Some(uri)),
            (Wire::Uri | Wire::Parcelable(_) | Wire::Serializable(_), Value::Null) => {
                parcel.write_string(None)
            }
            (Wire::StringList, Value::Null) => parcel.write_string_list(None),
            (Wire::StringList, Value::List(items)) => {
                let strings = items
                    .iter()
                    .map(|v| match v {
                        Value::Str(s) => Ok(s.clone()),
                        other => Err(RuntimeError::mismatch(member, "String element", other)),
                    })
                    .collect::<RuntimeResult<Vec<_>>>()?;
                parcel.write_string_list(Some(&strings));
            }
            (Wire::Serializable(_), value) => {
                parcel.write_string(Some(&serde_json::to_string(value)?));
            }
            (Wire::TypedList(_), Value::Null) => parcel.write_int(-1),
            (Wire::TypedList(_), Value::List(items)) => {
                parcel.write_int(i32::try_from(items.len()).unwrap_or(i32::MAX));
                for item in items {
                    match item {
                        Value::Null => parcel.write_int(0),
                        Value::Object(nested) => {
                            parcel.write_int(1);
                            self.write_to_parcel(nested, parcel)?;
                        }
                        other => return Err(RuntimeError::mismatch(member, "Parcelable element", other)),
                    }
                }
            }
            (Wire::Parcelable(_), Value::Object(nested)) => {
                parcel.write_string(Some(&nested.class));
                self.write_to_parcel(nested, parcel)?;
            }
            (wire, other) => return Err(RuntimeError::mismatch(member, format!("{wire:?}"), other)),
        }
        Ok(())
    }

    fn read_class(&self, class: &str, instance: &mut Instance, parcel: &mut Parcel) -> RuntimeResult<()> {
        let decl = self.registry.get(class)?;
        let stmts = decl.read_from_parcel().ok_or_else(|| missing(class, "readFromParcel"))?;

        for stmt in stmts {
            trace!(class, slot = ?stmt, "read");
            match stmt {
                Slot::Parent => {
                    self.read_class(parent(class, decl)?, instance, parcel)?;
                }
                Slot::BooleanArray(fields) => {
                    let flags = parcel.read_boolean_array()?.unwrap_or_default();
                    if flags.len() < fields.len() {
                        return Err(RuntimeError::TypeMismatch {
                            member: class.to_string(),
                            expected: format!("boolean[{}]", fields.len()),
                            found: format!("boolean[{}]", flags.len()),
                        });
                    }
                    for (field, flag) in fields.iter().zip(flags) {
                        instance.set(&field.member, Value::Bool(flag));
                    }
                }
                Slot::Field { wire, field } => {
                    let value = self.read_field(wire, parcel)?;
                    instance.set(&field.member, value);
                }
            }
        }
        Ok(())
    }

    fn read_field(&self, wire: &Wire, parcel: &mut Parcel) -> RuntimeResult<Value> {
        Ok(match wire {
            Wire::Native(kind) => read_native(*kind, parcel)?,
            Wire::Value(_) => parcel.read_value()?,
            Wire::DateMillis => match parcel.read_long()? {
                i64::MIN => Value::Null,
                ms => Value::Date(ms),
            },
            Wire::Uri => parcel.read_string()?.map_or(Value::Null, Value::Uri),
            Wire::StringList => parcel
                .read_string_list()?
                .map_or(Value::Null, |l| Value::List(l.into_iter().map(Value::Str).collect())),
            Wire::Serializable(_) => match parcel.read_string()? {
                None => Value::Null,
                Some(json) => serde_json::from_str(&json)?,
            },
            Wire::TypedList(elem) => match parcel.read_len()? {
                None => Value::Null,
                Some(len) => {
                    let mut items = Vec::with_capacity(len.min(parcel.remaining() / 4));
                    for _ in 0..len {
                        items.push(match parcel.read_int()? {
                            0 => Value::Null,
                            _ => Value::Object(self.read_from_parcel(elem, parcel)?),
                        });
                    }
                    Value::List(items)
                }
            },
            Wire::Parcelable(_) => match parcel.read_string()? {
                None => Value::Null,
                // the runtime class written by the sender, not the declared type
                Some(class) => Value::Object(self.read_from_parcel(&class, parcel)?),
            },
        })
    }
}

impl Codec for BinaryCodec<'_> {
    type Encoded = Vec<u8>;

    fn encode(&self, instance: &Instance) -> RuntimeResult<Vec<u8>> {
        let mut parcel = Parcel::new();
        self.write_to_parcel(instance, &mut parcel)?;
        Ok(parcel.into_bytes())
    }

    fn decode(&self, class: &str, encoded: &Vec<u8>) -> RuntimeResult<Instance> {
        let mut parcel = Parcel::from_bytes(encoded.clone());
        self.read_from_parcel(class, &mut parcel)
    }

    fn name(&self) -> &'static str {
        "parcel"
    }
}

fn write_native(kind: ScalarKind, member: &str, value: &Value, parcel: &mut Parcel) -> RuntimeResult<()> {
    match (kind, value) {
        (ScalarKind::Int, Value::Int(v)) => parcel.write_int(*v),
        (ScalarKind::Long, Value::Long(v)) => parcel.write_long(*v),
        (ScalarKind::Float, Value::Float(v)) => parcel.write_float(*v),
        (ScalarKind::Double, Value::Double(v)) => parcel.write_double(*v),
        (ScalarKind::Byte, Value::Byte(v)) => parcel.write_byte(*v),
        (ScalarKind::Boolean, Value::Bool(v)) => parcel.write_int(i32::from(*v)),
        (ScalarKind::String, Value::Str(s)) => parcel.write_string(Some(s)),
        (ScalarKind::String, Value::Null) => parcel.write_string(None),
        (kind, other) => return Err(RuntimeError::mismatch(member, kind.native_name(), other)),
    }
    Ok(())
}

fn read_native(kind: ScalarKind, parcel: &mut Parcel) -> RuntimeResult<Value> {
    Ok(match kind {
        ScalarKind::Int => Value::Int(parcel.read_int()?),
        ScalarKind::Long => Value::Long(parcel.read_long()?),
        ScalarKind::Float => Value::Float(parcel.read_float()?),
        ScalarKind::Double => Value::Double(parcel.read_double()?),
        ScalarKind::Byte => Value::Byte(parcel.read_byte()?),
        ScalarKind::Boolean => Value::Bool(parcel.read_int()? != 0),
        ScalarKind::String => parcel.read_string()?.map_or(Value::Null, Value::Str),
    })
}

fn parent<'d>(class: &str, decl: &'d ClassDecl) -> RuntimeResult<&'d str> {
    ClassRegistry::parent_of(decl).ok_or_else(|| RuntimeError::UnknownClass(format!("parent of {class}")))
}

fn missing(class: &str, method: &'static str) -> RuntimeError {
    RuntimeError::MissingMethod {
        class: class.to_string(),
        method,
    }
}
