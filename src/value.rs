//! The dynamic value tree.

use crate::core::*;
use crate::dispatch::decode_value;
use crate::*;
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// A value of the closed value model.
///
/// `Tuple` is the only composite and owns its elements, so every value is a tree
/// with no shared or cyclic references.
///
/// `Int` is stored as `i128` so that one variant covers both `i64::MIN` and
/// `u64::MAX`. A producer may build an `Int` outside that span; encoding it fails
/// with [`CodecError::ValueOutOfRange`]. Decoding never produces one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
    Bytes(Bytes),
    Tuple(Vec<Value>),
}

impl Value {
    /// Builds a tuple from anything convertible into values.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Name of this value's kind, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Tuple(_) => "tuple",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_ref()),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

/// Encodes a value in its canonical (narrowest) representation.
impl Encoder for Value {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match self {
            Value::Nil => {
                writer.put_u8(TAG_NIL);
                Ok(())
            }
            Value::Bool(b) => b.encode(writer),
            Value::Int(i) => write_int(*i, writer),
            Value::Float(f) => f.encode(writer),
            Value::Str(s) => s.as_str().encode(writer),
            Value::Bytes(b) => b.encode(writer),
            Value::Tuple(items) => items.as_slice().encode(writer),
        }
    }
}

/// Decodes any supported value through the route table.
///
/// # Errors
/// Fails on truncated input, unsupported tags, invalid UTF-8, or tuples nested
/// deeper than [`dispatch::MAX_DEPTH`](crate::dispatch::MAX_DEPTH).
impl Decoder for Value {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        decode_value(reader, 0)
    }
}

// --- Conversions ---
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(i: $ty) -> Self {
                    Value::Int(i as i128)
                }
            }
        )*
    };
}

impl_from_integer!(u8, u16, u32, u64, usize, i8, i16, i32, i64, i128, isize);

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Tuple(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

macro_rules! impl_from_tuple {
    ($($T:ident : $idx:tt),+) => {
        impl<$($T: Into<Value>),+> From<($($T,)+)> for Value {
            fn from(t: ($($T,)+)) -> Self {
                Value::Tuple(vec![$(t.$idx.into()),+])
            }
        }
    };
}

impl_from_tuple!(T0: 0);
impl_from_tuple!(T0: 0, T1: 1);
impl_from_tuple!(T0: 0, T1: 1, T2: 2);
impl_from_tuple!(T0: 0, T1: 1, T2: 2, T3: 3);
impl_from_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4);
impl_from_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5);
impl_from_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6);
impl_from_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7);
