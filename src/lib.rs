//! # pynto
//!
//! A compact binary codec for a closed set of immutable values, byte-compatible with
//! MessagePack.
//!
//! - One leading tag byte per value, big-endian size prefixes for variable-sized values
//! - Encoding always picks the narrowest representation (fixint before uint8, fixstr before str8, ...)
//! - Decoding is driven by a 256-entry route table keyed by the first byte of the input
//! - A dynamic [`Value`] tree plus typed `Encoder`/`Decoder` impls for Rust primitives, tuples and derived structs
//!
//! ## Value Model
//!
//! `nil`, booleans, integers from `-2^63` to `2^64 - 1`, 64-bit floats, UTF-8 strings,
//! raw byte blobs, and ordered tuples of the same model. Maps, extension types and
//! narrower floats are never emitted.
//!
//! ## Derive Macros
//!
//! `#[derive(Encode, Decode)]` maps a struct to a tuple of its fields in declaration order.
//!
//! - `#[pynto(skip)]`: The field is not written. On decode, it is set to `Default::default()`.
//! - `#[pynto(default)]`: If the decoded tuple ends before this field, it is set to `Default::default()`.
//!   Default fields must come after every required field:
//!
//! ```rust,compile_fail
//! #[derive(pynto::Decode)]
//! struct Misordered {
//!     #[pynto(default)]
//!     label: String,
//!     id: u32,
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serde_json`: Conversions between `serde_json::Value` and [`Value`], and encoding/decoding of `serde_json::Value`.
//! - `smol_str`: Enables encoding/decoding of `smol_str::SmolStr`.

pub mod core;
pub mod dispatch;
mod features;
pub mod stream;
pub mod value;

pub use bytes;
use bytes::{Buf, Bytes, BytesMut};
pub use pynto_derive::{Decode, Encode};
pub use stream::{decode_all, ValueReader};
pub use value::Value;

/// Errors that can occur during encoding or decoding operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value is outside the closed value model, or a decoded value has a kind the
    /// requested Rust type cannot hold.
    #[error("Unsupported type: expected {expected}, found {found}")]
    UnsupportedType {
        expected: &'static str,
        found: &'static str,
    },
    /// An integer, length or element count exceeds every representable size class.
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
    /// The leading byte does not start any supported wire type.
    #[error("Unsupported tag: 0x{0:02x}")]
    UnsupportedTag(u8),
    /// The buffer ended before the value was complete.
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    /// A string payload is not valid UTF-8.
    #[error("Invalid string encoding: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),
    /// A fixed-arity Rust tuple or array was decoded from a tuple of another length.
    #[error("Length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Tuples are nested deeper than [`dispatch::MAX_DEPTH`].
    #[error("Nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),
    /// Struct-specific decode error
    #[error(transparent)]
    StructDecode(#[from] StructDecodeError),
}

/// The result type used throughout this crate for encode/decode operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Derive-specific error types for struct operations
#[derive(Debug, thiserror::Error)]
pub enum StructDecodeError {
    #[error("Field count mismatch for struct {struct_name}: expected {expected}, got {actual}")]
    FieldCountMismatch {
        struct_name: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Trait for types that can be encoded into the wire format.
///
/// Most users should use `#[derive(Encode)]` or [`Value`] instead of a manual implementation.
///
/// # Errors
/// Returns `CodecError` if the value cannot be encoded. Bytes already written to
/// `writer` are left in place; [`encode`] discards them.
pub trait Encoder {
    /// Encode the value into the given buffer.
    ///
    /// # Arguments
    /// * `writer` - The buffer to write the encoded bytes into.
    fn encode(&self, writer: &mut BytesMut) -> Result<()>;
}

/// Trait for types that can be decoded from the wire format.
///
/// Decoding consumes exactly the bytes of one value from `reader`; whatever is left
/// is the remainder for the next value.
///
/// # Errors
/// Returns `CodecError` if the data is truncated, malformed, or of a kind `Self` cannot hold.
pub trait Decoder: Sized {
    /// Decode one value from the front of the given buffer.
    ///
    /// # Arguments
    /// * `reader` - The buffer to read the encoded bytes from.
    fn decode<B: Buf>(reader: &mut B) -> Result<Self>;
}

/// Convenience function to encode a value to bytes.
///
/// # Example
/// ```rust
/// use pynto::{encode, Value};
///
/// let value = Value::from((Value::Nil, true, 40000u32));
/// let bytes = encode(&value).unwrap();
/// assert_eq!(&bytes[..], &[0x93, 0xc0, 0xc3, 0xcd, 0x9c, 0x40]);
/// ```
pub fn encode<T: Encoder + ?Sized>(value: &T) -> Result<Bytes> {
    let mut writer = BytesMut::new();
    value.encode(&mut writer)?;
    Ok(writer.freeze())
}

/// Convenience function to decode a typed value from the front of a buffer.
///
/// This is equivalent to calling `T::decode(reader)`; the reader is left at the
/// first byte after the value.
///
/// # Example
/// ```rust
/// use pynto::{encode, decode};
///
/// let mut buf = encode(&(1u8, "hi".to_string())).unwrap();
/// let decoded: (u8, String) = decode(&mut buf).unwrap();
/// assert_eq!(decoded, (1, "hi".to_string()));
/// ```
pub fn decode<T: Decoder, B: Buf>(reader: &mut B) -> Result<T> {
    T::decode(reader)
}

/// Decodes a single [`Value`] from the front of `buf`, ignoring any trailing bytes.
///
/// # Example
/// ```rust
/// use pynto::{decode_one, Value};
///
/// assert_eq!(decode_one(&[0xd1, 0xff, 0x38]).unwrap(), Value::Int(-200));
/// ```
pub fn decode_one(buf: &[u8]) -> Result<Value> {
    decode_one_with_remainder(buf).map(|(value, _)| value)
}

/// Decodes a single [`Value`] from the front of `buf` and returns the unconsumed remainder.
///
/// # Example
/// ```rust
/// use pynto::{decode_one_with_remainder, Value};
///
/// let (first, rest) = decode_one_with_remainder(&[0x01, 0xc0]).unwrap();
/// assert_eq!(first, Value::Int(1));
/// let (second, rest) = decode_one_with_remainder(rest).unwrap();
/// assert_eq!(second, Value::Nil);
/// assert!(rest.is_empty());
/// ```
pub fn decode_one_with_remainder(buf: &[u8]) -> Result<(Value, &[u8])> {
    let mut reader = buf;
    let value = Value::decode(&mut reader)?;
    Ok((value, reader))
}
