#[cfg(feature = "serde_json")]
use serde_json::{Number, Value as JsonValue};
#[cfg(feature = "smol_str")]
use smol_str::SmolStr;

#[cfg(any(feature = "serde_json", feature = "smol_str"))]
use crate::core::*;
#[cfg(any(feature = "serde_json", feature = "smol_str"))]
use crate::*;
#[cfg(any(feature = "serde_json", feature = "smol_str"))]
use bytes::{Buf, BytesMut};
#[cfg(feature = "serde_json")]
use bytes::BufMut;

// --- serde_json::Value ---
#[cfg(feature = "serde_json")]
const JSON_EXPECTED: &str = "null, bool, number, string or array";

/// Converts JSON into the value model.
///
/// Integers become `Int`, other numbers `Float`, arrays `Tuple`.
///
/// # Errors
/// Objects have no representation and fail with `UnsupportedType`.
#[cfg(feature = "serde_json")]
impl TryFrom<JsonValue> for Value {
    type Error = CodecError;

    fn try_from(json: JsonValue) -> Result<Self> {
        match json {
            JsonValue::Null => Ok(Value::Nil),
            JsonValue::Bool(b) => Ok(Value::Bool(b)),
            JsonValue::Number(n) => number_to_value(&n),
            JsonValue::String(s) => Ok(Value::Str(s)),
            JsonValue::Array(items) => items
                .into_iter()
                .map(Value::try_from)
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple),
            JsonValue::Object(_) => Err(CodecError::UnsupportedType {
                expected: JSON_EXPECTED,
                found: "object",
            }),
        }
    }
}

/// Converts a value into JSON.
///
/// # Errors
/// `Bytes` has no JSON form and fails with `UnsupportedType`; non-finite floats and
/// integers outside `i64::MIN..=u64::MAX` fail with `ValueOutOfRange`.
#[cfg(feature = "serde_json")]
impl TryFrom<Value> for JsonValue {
    type Error = CodecError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Nil => Ok(JsonValue::Null),
            Value::Bool(b) => Ok(JsonValue::Bool(b)),
            Value::Int(i) => {
                if let Ok(u) = u64::try_from(i) {
                    Ok(JsonValue::Number(u.into()))
                } else if let Ok(s) = i64::try_from(i) {
                    Ok(JsonValue::Number(s.into()))
                } else {
                    Err(CodecError::ValueOutOfRange(format!(
                        "integer {} has no JSON representation",
                        i
                    )))
                }
            }
            Value::Float(f) => Number::from_f64(f).map(JsonValue::Number).ok_or_else(|| {
                CodecError::ValueOutOfRange(format!("float {} has no JSON representation", f))
            }),
            Value::Str(s) => Ok(JsonValue::String(s)),
            Value::Bytes(_) => Err(CodecError::UnsupportedType {
                expected: JSON_EXPECTED,
                found: "bytes",
            }),
            Value::Tuple(items) => items
                .into_iter()
                .map(JsonValue::try_from)
                .collect::<Result<Vec<_>>>()
                .map(JsonValue::Array),
        }
    }
}

#[cfg(feature = "serde_json")]
fn number_to_value(n: &Number) -> Result<Value> {
    if let Some(u) = n.as_u64() {
        Ok(Value::Int(u as i128))
    } else if let Some(i) = n.as_i64() {
        Ok(Value::Int(i as i128))
    } else if let Some(f) = n.as_f64() {
        Ok(Value::Float(f))
    } else {
        Err(CodecError::ValueOutOfRange(format!(
            "JSON number {} is not representable",
            n
        )))
    }
}

/// Encodes JSON directly, without building an intermediate [`Value`].
#[cfg(feature = "serde_json")]
impl Encoder for JsonValue {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match self {
            JsonValue::Null => {
                writer.put_u8(TAG_NIL);
                Ok(())
            }
            JsonValue::Bool(b) => b.encode(writer),
            JsonValue::Number(n) => number_to_value(n)?.encode(writer),
            JsonValue::String(s) => s.encode(writer),
            JsonValue::Array(items) => items.as_slice().encode(writer),
            JsonValue::Object(_) => Err(CodecError::UnsupportedType {
                expected: JSON_EXPECTED,
                found: "object",
            }),
        }
    }
}

#[cfg(feature = "serde_json")]
impl Decoder for JsonValue {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        JsonValue::try_from(Value::decode(reader)?)
    }
}

// --- SmolStr ---
#[cfg(feature = "smol_str")]
impl Encoder for SmolStr {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        self.as_str().encode(writer)
    }
}

#[cfg(feature = "smol_str")]
impl Decoder for SmolStr {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        let tag = read_tag(reader)?;
        Ok(SmolStr::from(read_str(tag, reader)?))
    }
}
