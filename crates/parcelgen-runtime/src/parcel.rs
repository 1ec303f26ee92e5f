//! In-memory model of an Android `Parcel`.
//!
//! Values are little-endian and unaligned. Strings and arrays carry an `i32`
//! length prefix with `-1` for null, matching the framework's null conventions.
//!
//! | Primitive | Layout |
//! |-----------|--------|
//! | `int` / `long` / `float` / `double` | fixed width |
//! | `byte` | one `int` |
//! | `String` | length + UTF-8 bytes, `-1` for null |
//! | `boolean[]` | length + one `int` per element |
//! | `List<String>` | count + strings, `-1` for null |
//! | value | `VAL_*` tag + payload |

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::Value;

// Tags of the generic value channel (android.os.Parcel.VAL_*)
const VAL_NULL: i32 = -1;
const VAL_STRING: i32 = 0;
const VAL_INTEGER: i32 = 1;
const VAL_LONG: i32 = 6;
const VAL_FLOAT: i32 = 7;
const VAL_DOUBLE: i32 = 8;
const VAL_BOOLEAN: i32 = 9;
const VAL_BYTE: i32 = 20;

/// A write-then-read byte container with a read cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parcel {
    data: Vec<u8>,
    pos: usize,
}

impl Parcel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap marshalled bytes for reading from the start.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data, pos: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Bytes left after the read cursor.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    // ------------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------------

    pub fn write_int(&mut self, v: i32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_long(&mut self, v: i64) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_float(&mut self, v: f32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_double(&mut self, v: f64) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_byte(&mut self, v: i8) {
        self.write_int(i32::from(v));
    }

    pub fn write_string(&mut self, v: Option<&str>) {
        match v {
            None => self.write_int(-1),
            Some(s) => {
                self.write_len(s.len());
                self.data.extend_from_slice(s.as_bytes());
            }
        }
    }

    pub fn write_boolean_array(&mut self, values: &[bool]) {
        self.write_len(values.len());
        for v in values {
            self.write_int(i32::from(*v));
        }
    }

    pub fn write_string_list(&mut self, values: Option<&[String]>) {
        match values {
            None => self.write_int(-1),
            Some(list) => {
                self.write_len(list.len());
                for s in list {
                    self.write_string(Some(s));
                }
            }
        }
    }

    /// Tagged write through the generic value channel.
    ///
    /// Only scalar values (and null) have a tag.
    pub fn write_value(&mut self, value: &Value) -> RuntimeResult<()> {
        match value {
            Value::Null => self.write_int(VAL_NULL),
            Value::Str(s) => {
                self.write_int(VAL_STRING);
                self.write_string(Some(s));
            }
            Value::Int(v) => {
                self.write_int(VAL_INTEGER);
                self.write_int(*v);
            }
            Value::Long(v) => {
                self.write_int(VAL_LONG);
                self.write_long(*v);
            }
            Value::Float(v) => {
                self.write_int(VAL_FLOAT);
                self.write_float(*v);
            }
            Value::Double(v) => {
                self.write_int(VAL_DOUBLE);
                self.write_double(*v);
            }
            Value::Bool(v) => {
                self.write_int(VAL_BOOLEAN);
                self.write_int(i32::from(*v));
            }
            Value::Byte(v) => {
                self.write_int(VAL_BYTE);
                self.write_byte(*v);
            }
            other => return Err(RuntimeError::mismatch("value", "tagged scalar", other)),
        }
        Ok(())
    }

    fn write_len(&mut self, len: usize) {
        // lengths past i32::MAX cannot be marshalled by the framework either
        self.write_int(i32::try_from(len).unwrap_or(i32::MAX));
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn read_int(&mut self) -> RuntimeResult<i32> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    pub fn read_long(&mut self) -> RuntimeResult<i64> {
        Ok(i64::from_le_bytes(self.take()?))
    }

    pub fn read_float(&mut self) -> RuntimeResult<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    pub fn read_double(&mut self) -> RuntimeResult<f64> {
        Ok(f64::from_le_bytes(self.take()?))
    }

    pub fn read_byte(&mut self) -> RuntimeResult<i8> {
        // truncating, as the framework does
        Ok(self.read_int()? as i8)
    }

    pub fn read_string(&mut self) -> RuntimeResult<Option<String>> {
        let Some(len) = self.read_len()? else {
            return Ok(None);
        };
        let offset = self.pos;
        let bytes = self.take_slice(len)?.to_vec();
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| RuntimeError::InvalidUtf8 { offset })
    }

    pub fn read_boolean_array(&mut self) -> RuntimeResult<Option<Vec<bool>>> {
        let Some(len) = self.read_len()? else {
            return Ok(None);
        };
        (0..len)
            .map(|_| self.read_int().map(|v| v != 0))
            .collect::<RuntimeResult<Vec<_>>>()
            .map(Some)
    }

    pub fn read_string_list(&mut self) -> RuntimeResult<Option<Vec<String>>> {
        let Some(len) = self.read_len()? else {
            return Ok(None);
        };
        let mut list = Vec::with_capacity(len.min(self.remaining() / 4));
        for _ in 0..len {
            // null entries come back as empty strings, like Parcel.readStringList
            list.push(self.read_string()?.unwrap_or_default());
        }
        Ok(Some(list))
    }

    pub fn read_value(&mut self) -> RuntimeResult<Value> {
        let tag = self.read_int()?;
        Ok(match tag {
            VAL_NULL => Value::Null,
            VAL_STRING => self.read_string()?.map_or(Value::Null, Value::Str),
            VAL_INTEGER => Value::Int(self.read_int()?),
            VAL_LONG => Value::Long(self.read_long()?),
            VAL_FLOAT => Value::Float(self.read_float()?),
            VAL_DOUBLE => Value::Double(self.read_double()?),
            VAL_BOOLEAN => Value::Bool(self.read_int()? != 0),
            VAL_BYTE => Value::Byte(self.read_byte()?),
            other => return Err(RuntimeError::UnknownTag(other)),
        })
    }

    /// Length prefix; `None` for the null marker.
    pub(crate) fn read_len(&mut self) -> RuntimeResult<Option<usize>> {
        let len = self.read_int()?;
        Ok(usize::try_from(len).ok())
    }

    fn take<const N: usize>(&mut self) -> RuntimeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take_slice(N)?);
        Ok(out)
    }

    fn take_slice(&mut self, n: usize) -> RuntimeResult<&[u8]> {
        if self.remaining() < n {
            return Err(RuntimeError::UnexpectedEof {
                offset: self.pos,
                needed: n,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }
}
