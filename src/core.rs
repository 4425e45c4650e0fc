use crate::dispatch::{route, unexpected_tag, Route};
use crate::*;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::sync::Arc;

/// Type tags used in the wire format.
///
/// These tags are written as the first byte of each encoded value. They are the
/// MessagePack tags for the subset of types this crate supports and are part of the
/// wire format. Most users do not need to use these directly.
///
/// - Fixint, fixstr and fixarray embed the value or length in the tag itself.
/// - Every other tag is followed by a 1, 2, 4 or 8 byte big-endian field.

///< 0x00..=0x7f: the tag is the value
pub const TAG_POSITIVE_FIXINT_MAX: u8 = 0x7f;
///< 0x90..=0x9f: tuple with 0..=15 elements
pub const TAG_FIXARRAY_BASE: u8 = 0x90;
pub const TAG_FIXARRAY_MAX: u8 = 0x9f;
///< 0xa0..=0xbf: string with 0..=31 bytes
pub const TAG_FIXSTR_BASE: u8 = 0xa0;
pub const TAG_FIXSTR_MAX: u8 = 0xbf;
pub const TAG_NIL: u8 = 0xc0;
pub const TAG_FALSE: u8 = 0xc2;
pub const TAG_TRUE: u8 = 0xc3;
pub const TAG_BIN8: u8 = 0xc4;
pub const TAG_BIN16: u8 = 0xc5;
pub const TAG_BIN32: u8 = 0xc6;
///< Decode only; floats are always encoded as `TAG_F64`
pub const TAG_F32: u8 = 0xca;
pub const TAG_F64: u8 = 0xcb;
pub const TAG_U8: u8 = 0xcc;
pub const TAG_U16: u8 = 0xcd;
pub const TAG_U32: u8 = 0xce;
pub const TAG_U64: u8 = 0xcf;
pub const TAG_I8: u8 = 0xd0;
pub const TAG_I16: u8 = 0xd1;
pub const TAG_I32: u8 = 0xd2;
pub const TAG_I64: u8 = 0xd3;
pub const TAG_STR8: u8 = 0xd9;
pub const TAG_STR16: u8 = 0xda;
pub const TAG_STR32: u8 = 0xdb;
pub const TAG_ARRAY16: u8 = 0xdc;
pub const TAG_ARRAY32: u8 = 0xdd;
///< 0xe0..=0xff: the tag is the value plus 256 (-32..=-1)
pub const TAG_NEGATIVE_FIXINT_MIN: u8 = 0xe0;

/// Longest string (in UTF-8 bytes) whose length fits in a fixstr tag.
pub const MAX_FIXSTR_LEN: usize = (TAG_FIXSTR_MAX - TAG_FIXSTR_BASE) as usize;
/// Largest tuple whose element count fits in a fixarray tag.
pub const MAX_FIXARRAY_LEN: usize = (TAG_FIXARRAY_MAX - TAG_FIXARRAY_BASE) as usize;
/// Longest string or byte blob that can be encoded.
pub const MAX_BLOB_LEN: u64 = u32::MAX as u64;
/// Largest tuple that can be encoded.
pub const MAX_TUPLE_LEN: u64 = u32::MAX as u64 - 1;

// --- Common read functions ---
/// Fails with `TruncatedInput` unless `reader` holds at least `needed` more bytes.
#[inline]
pub fn ensure_remaining<B: Buf>(reader: &B, needed: usize) -> Result<()> {
    if reader.remaining() < needed {
        return Err(CodecError::TruncatedInput {
            needed,
            remaining: reader.remaining(),
        });
    }
    Ok(())
}

/// Reads the leading tag byte of the next value.
#[inline]
pub fn read_tag<B: Buf>(reader: &mut B) -> Result<u8> {
    ensure_remaining(reader, 1)?;
    Ok(reader.get_u8())
}

/// Returns the leading tag byte of the next value without consuming it.
#[inline]
pub fn peek_tag<B: Buf>(reader: &B) -> Result<u8> {
    ensure_remaining(reader, 1)?;
    Ok(reader.chunk()[0])
}

/// Reads an unsigned big-endian length field of `width` bytes (1, 2 or 4).
#[inline]
fn read_length<B: Buf>(reader: &mut B, width: usize) -> Result<usize> {
    ensure_remaining(reader, width)?;
    let len = match width {
        1 => reader.get_u8() as u64,
        2 => reader.get_u16() as u64,
        _ => reader.get_u32() as u64,
    };
    usize::try_from(len).map_err(|_| {
        CodecError::ValueOutOfRange(format!("length {} exceeds usize", len))
    })
}

/// Decodes an integer whose tag has already been read.
///
/// Accepts every integer class: positive/negative fixint, uint8..uint64 and int8..int64.
///
/// # Errors
/// Returns an error if the tag does not start an integer.
pub fn read_int<B: Buf>(tag: u8, reader: &mut B) -> Result<i128> {
    match tag {
        0x00..=TAG_POSITIVE_FIXINT_MAX => Ok(tag as i128),
        TAG_NEGATIVE_FIXINT_MIN..=0xff => Ok(tag as i8 as i128),
        TAG_U8 => {
            ensure_remaining(reader, 1)?;
            Ok(reader.get_u8() as i128)
        }
        TAG_U16 => {
            ensure_remaining(reader, 2)?;
            Ok(reader.get_u16() as i128)
        }
        TAG_U32 => {
            ensure_remaining(reader, 4)?;
            Ok(reader.get_u32() as i128)
        }
        TAG_U64 => {
            ensure_remaining(reader, 8)?;
            Ok(reader.get_u64() as i128)
        }
        TAG_I8 => {
            ensure_remaining(reader, 1)?;
            Ok(reader.get_i8() as i128)
        }
        TAG_I16 => {
            ensure_remaining(reader, 2)?;
            Ok(reader.get_i16() as i128)
        }
        TAG_I32 => {
            ensure_remaining(reader, 4)?;
            Ok(reader.get_i32() as i128)
        }
        TAG_I64 => {
            ensure_remaining(reader, 8)?;
            Ok(reader.get_i64() as i128)
        }
        other => Err(unexpected_tag(other, "int")),
    }
}

/// Decodes a float whose tag has already been read. 32-bit floats are widened.
pub fn read_float<B: Buf>(tag: u8, reader: &mut B) -> Result<f64> {
    match tag {
        TAG_F32 => {
            ensure_remaining(reader, 4)?;
            Ok(reader.get_f32() as f64)
        }
        TAG_F64 => {
            ensure_remaining(reader, 8)?;
            Ok(reader.get_f64())
        }
        other => Err(unexpected_tag(other, "float")),
    }
}

/// Decodes the byte length of a string whose tag has already been read.
pub fn read_str_len<B: Buf>(tag: u8, reader: &mut B) -> Result<usize> {
    match tag {
        TAG_FIXSTR_BASE..=TAG_FIXSTR_MAX => Ok((tag - TAG_FIXSTR_BASE) as usize),
        TAG_STR8 => read_length(reader, 1),
        TAG_STR16 => read_length(reader, 2),
        TAG_STR32 => read_length(reader, 4),
        other => Err(unexpected_tag(other, "str")),
    }
}

/// Decodes the length of a byte blob whose tag has already been read.
pub fn read_bin_len<B: Buf>(tag: u8, reader: &mut B) -> Result<usize> {
    match tag {
        TAG_BIN8 => read_length(reader, 1),
        TAG_BIN16 => read_length(reader, 2),
        TAG_BIN32 => read_length(reader, 4),
        other => Err(unexpected_tag(other, "bytes")),
    }
}

/// Decodes the element count of a tuple whose tag has already been read.
pub fn read_array_len<B: Buf>(tag: u8, reader: &mut B) -> Result<usize> {
    match tag {
        TAG_FIXARRAY_BASE..=TAG_FIXARRAY_MAX => Ok((tag - TAG_FIXARRAY_BASE) as usize),
        TAG_ARRAY16 => read_length(reader, 2),
        TAG_ARRAY32 => read_length(reader, 4),
        other => Err(unexpected_tag(other, "tuple")),
    }
}

/// Decodes a UTF-8 string whose tag has already been read into an owned `String`.
pub fn read_str<B: Buf>(tag: u8, reader: &mut B) -> Result<String> {
    let len = read_str_len(tag, reader)?;
    ensure_remaining(reader, len)?;
    let mut bytes = vec![0u8; len];
    if len > 0 {
        reader.copy_to_slice(&mut bytes);
    }
    String::from_utf8(bytes).map_err(|e| CodecError::InvalidEncoding(e.utf8_error()))
}

/// Decodes a byte blob whose tag has already been read.
///
/// When `reader` is itself `Bytes` the payload shares its allocation; from any other
/// buffer it is copied.
pub fn read_bin<B: Buf>(tag: u8, reader: &mut B) -> Result<Bytes> {
    let len = read_bin_len(tag, reader)?;
    ensure_remaining(reader, len)?;
    Ok(reader.copy_to_bytes(len))
}

// --- Common write functions ---
/// Writes an integer in the narrowest class that holds it.
///
/// Classes are tried in order: positive fixint, negative fixint, uint8, uint16,
/// uint32, uint64, int8, int16, int32, int64.
///
/// # Errors
/// Returns `ValueOutOfRange` for values below `i64::MIN` or above `u64::MAX`.
pub fn write_int(value: i128, writer: &mut BytesMut) -> Result<()> {
    if (0..=TAG_POSITIVE_FIXINT_MAX as i128).contains(&value) {
        writer.put_u8(value as u8);
    } else if (-32..=-1).contains(&value) {
        writer.put_u8(value as i8 as u8);
    } else if (0..=u8::MAX as i128).contains(&value) {
        writer.put_u8(TAG_U8);
        writer.put_u8(value as u8);
    } else if (0..=u16::MAX as i128).contains(&value) {
        writer.put_u8(TAG_U16);
        writer.put_u16(value as u16);
    } else if (0..=u32::MAX as i128).contains(&value) {
        writer.put_u8(TAG_U32);
        writer.put_u32(value as u32);
    } else if (0..=u64::MAX as i128).contains(&value) {
        writer.put_u8(TAG_U64);
        writer.put_u64(value as u64);
    } else if (i8::MIN as i128..=-1).contains(&value) {
        writer.put_u8(TAG_I8);
        writer.put_i8(value as i8);
    } else if (i16::MIN as i128..=-1).contains(&value) {
        writer.put_u8(TAG_I16);
        writer.put_i16(value as i16);
    } else if (i32::MIN as i128..=-1).contains(&value) {
        writer.put_u8(TAG_I32);
        writer.put_i32(value as i32);
    } else if (i64::MIN as i128..=-1).contains(&value) {
        writer.put_u8(TAG_I64);
        writer.put_i64(value as i64);
    } else {
        return Err(CodecError::ValueOutOfRange(format!(
            "integer {} is outside {}..={}",
            value,
            i64::MIN,
            u64::MAX
        )));
    }
    Ok(())
}

/// Writes the tag and length prefix of a UTF-8 string of `len` bytes.
pub fn write_str_header(len: usize, writer: &mut BytesMut) -> Result<()> {
    if len <= MAX_FIXSTR_LEN {
        writer.put_u8(TAG_FIXSTR_BASE + len as u8);
    } else if len <= u8::MAX as usize {
        writer.put_u8(TAG_STR8);
        writer.put_u8(len as u8);
    } else if len <= u16::MAX as usize {
        writer.put_u8(TAG_STR16);
        writer.put_u16(len as u16);
    } else if len as u64 <= MAX_BLOB_LEN {
        writer.put_u8(TAG_STR32);
        writer.put_u32(len as u32);
    } else {
        return Err(CodecError::ValueOutOfRange(format!(
            "string of {} bytes exceeds {} bytes",
            len, MAX_BLOB_LEN
        )));
    }
    Ok(())
}

/// Writes the tag and length prefix of a byte blob of `len` bytes.
pub fn write_bin_header(len: usize, writer: &mut BytesMut) -> Result<()> {
    if len <= u8::MAX as usize {
        writer.put_u8(TAG_BIN8);
        writer.put_u8(len as u8);
    } else if len <= u16::MAX as usize {
        writer.put_u8(TAG_BIN16);
        writer.put_u16(len as u16);
    } else if len as u64 <= MAX_BLOB_LEN {
        writer.put_u8(TAG_BIN32);
        writer.put_u32(len as u32);
    } else {
        return Err(CodecError::ValueOutOfRange(format!(
            "byte blob of {} bytes exceeds {} bytes",
            len, MAX_BLOB_LEN
        )));
    }
    Ok(())
}

/// Writes the tag and count prefix of a tuple with `len` elements.
pub fn write_array_header(len: usize, writer: &mut BytesMut) -> Result<()> {
    if len <= MAX_FIXARRAY_LEN {
        writer.put_u8(TAG_FIXARRAY_BASE + len as u8);
    } else if len <= u16::MAX as usize {
        writer.put_u8(TAG_ARRAY16);
        writer.put_u16(len as u16);
    } else if len as u64 <= MAX_TUPLE_LEN {
        writer.put_u8(TAG_ARRAY32);
        writer.put_u32(len as u32);
    } else {
        return Err(CodecError::ValueOutOfRange(format!(
            "tuple of {} elements exceeds {} elements",
            len, MAX_TUPLE_LEN
        )));
    }
    Ok(())
}

/// Skips one encoded value of any type.
///
/// Nested tuples are walked iteratively, so skipping is not bounded by
/// [`dispatch::MAX_DEPTH`](crate::dispatch::MAX_DEPTH). Strings are not checked for valid UTF-8.
///
/// # Errors
/// Returns an error if the value is truncated or starts with an unsupported tag.
pub fn skip_value<B: Buf>(reader: &mut B) -> Result<()> {
    let mut pending: u64 = 1;
    while pending > 0 {
        pending -= 1;
        let tag = read_tag(reader)?;
        let route = route(tag).ok_or(CodecError::UnsupportedTag(tag))?;
        let skip = match route {
            Route::Nil | Route::Bool | Route::PositiveFixint | Route::NegativeFixint => 0,
            // Low two bits select 1, 2, 4 or 8 payload bytes.
            Route::Uint | Route::Int => 1 << (tag & 0x03),
            Route::Float => {
                if tag == TAG_F32 {
                    4
                } else {
                    8
                }
            }
            Route::FixStr | Route::Str => read_str_len(tag, reader)?,
            Route::Bin => read_bin_len(tag, reader)?,
            Route::FixArray | Route::Array => {
                pending += read_array_len(tag, reader)? as u64;
                0
            }
        };
        ensure_remaining(reader, skip)?;
        reader.advance(skip);
    }
    Ok(())
}

// --- bool ---
/// Encodes a `bool` as a single tag byte: `TAG_FALSE` or `TAG_TRUE`.
impl Encoder for bool {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        writer.put_u8(if *self { TAG_TRUE } else { TAG_FALSE });
        Ok(())
    }
}
/// Decodes a `bool` from a single tag byte.
///
/// # Errors
/// Returns an error if the tag is not `TAG_FALSE` or `TAG_TRUE`.
impl Decoder for bool {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        match read_tag(reader)? {
            TAG_FALSE => Ok(false),
            TAG_TRUE => Ok(true),
            other => Err(unexpected_tag(other, "bool")),
        }
    }
}

// --- Integer types ---
/// Encodes integers in the narrowest wire class and decodes from any integer class.
///
/// Decoding fails with `ValueOutOfRange` when the wire value does not fit `Self`.
macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl Encoder for $ty {
                fn encode(&self, writer: &mut BytesMut) -> Result<()> {
                    let value = i128::try_from(*self).map_err(|_| {
                        CodecError::ValueOutOfRange(format!("integer {} is outside {}..={}", self, i64::MIN, u64::MAX))
                    })?;
                    write_int(value, writer)
                }
            }
            impl Decoder for $ty {
                fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
                    let tag = read_tag(reader)?;
                    let value = read_int(tag, reader)?;
                    <$ty>::try_from(value).map_err(|_| {
                        CodecError::ValueOutOfRange(format!("{} does not fit in {}", value, stringify!($ty)))
                    })
                }
            }
        )*
    };
}

impl_integer!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

// --- f32/f64 ---
/// Encodes an `f32` widened to a 64-bit float; narrower floats are never emitted.
impl Encoder for f32 {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        (*self as f64).encode(writer)
    }
}
/// Decodes an `f32` from any float or integer tag (with precision loss).
impl Decoder for f32 {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        Ok(f64::decode(reader)? as f32)
    }
}
/// Encodes an `f64` as `TAG_F64` and 8 bytes (big-endian IEEE 754).
impl Encoder for f64 {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        writer.put_u8(TAG_F64);
        writer.put_f64(*self);
        Ok(())
    }
}
/// Decodes an `f64` from a 32 or 64-bit float tag, or from any integer tag.
impl Decoder for f64 {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        let tag = read_tag(reader)?;
        match route(tag) {
            Some(Route::Float) => read_float(tag, reader),
            Some(Route::PositiveFixint | Route::NegativeFixint | Route::Uint | Route::Int) => {
                Ok(read_int(tag, reader)? as f64)
            }
            _ => Err(unexpected_tag(tag, "float")),
        }
    }
}

// --- String ---
/// Encodes a `str` as UTF-8 with a length prefix (up to 31 bytes the length lives in the tag).
impl Encoder for str {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        write_str_header(self.len(), writer)?;
        writer.put_slice(self.as_bytes());
        Ok(())
    }
}
impl Encoder for String {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        self.as_str().encode(writer)
    }
}
impl Decoder for String {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        let tag = read_tag(reader)?;
        read_str(tag, reader)
    }
}

// --- Bytes ---
/// Encodes `Bytes` as a binary blob with a 1, 2 or 4 byte length prefix.
impl Encoder for Bytes {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        write_bin_header(self.len(), writer)?;
        writer.put_slice(self);
        Ok(())
    }
}
impl Decoder for Bytes {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        let tag = read_tag(reader)?;
        read_bin(tag, reader)
    }
}

// --- Option ---
/// Encodes `None` as nil and `Some(value)` as the value itself.
///
/// `Option<Option<T>>` cannot distinguish `Some(None)` from `None`.
impl<T: Encoder> Encoder for Option<T> {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        match self {
            Some(value) => value.encode(writer),
            None => {
                writer.put_u8(TAG_NIL);
                Ok(())
            }
        }
    }
}
impl<T: Decoder> Decoder for Option<T> {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        if peek_tag(reader)? == TAG_NIL {
            reader.advance(1);
            return Ok(None);
        }
        Ok(Some(T::decode(reader)?))
    }
}

// --- Vec<T> ---
/// Encodes a `Vec<T>` as a tuple. Use `Bytes` for binary blobs.
impl<T: Encoder> Encoder for Vec<T> {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        self.as_slice().encode(writer)
    }
}
impl<T: Encoder> Encoder for [T] {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        write_array_header(self.len(), writer)?;
        for item in self {
            item.encode(writer)?;
        }
        Ok(())
    }
}
impl<T: Decoder> Decoder for Vec<T> {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        let tag = read_tag(reader)?;
        let len = read_array_len(tag, reader)?;
        // Every element takes at least one byte.
        let mut vec = Vec::with_capacity(len.min(reader.remaining()));
        for _ in 0..len {
            vec.push(T::decode(reader)?);
        }
        Ok(vec)
    }
}

// --- Array ---
/// Encodes a fixed-size array as a tuple of `N` elements.
impl<T: Encoder, const N: usize> Encoder for [T; N] {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        self.as_slice().encode(writer)
    }
}
/// Decodes a fixed-size array from a tuple of exactly `N` elements.
impl<T: Decoder, const N: usize> Decoder for [T; N] {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        let tag = read_tag(reader)?;
        let len = read_array_len(tag, reader)?;
        if len != N {
            return Err(CodecError::LengthMismatch {
                expected: N,
                actual: len,
            });
        }
        let mut array = Vec::with_capacity(N);
        for _ in 0..N {
            array.push(T::decode(reader)?);
        }
        array.try_into().map_err(|_| CodecError::LengthMismatch {
            expected: N,
            actual: len,
        })
    }
}

// --- Tuple ---
/// Implements encoding/decoding for Rust tuples up to 12 elements.
///
/// Each tuple is encoded as a wire tuple of its elements; decoding requires the exact arity.
macro_rules! impl_tuple {
    ($($T:ident : $idx:tt),*) => {
        impl<$($T: Encoder),*> Encoder for ($($T,)*) {
            fn encode(&self, writer: &mut BytesMut) -> Result<()> {
                write_array_header(count_args!($($T),*), writer)?;
                $(
                    self.$idx.encode(writer)?;
                )*
                Ok(())
            }
        }
        impl<$($T: Decoder),*> Decoder for ($($T,)*) {
            fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
                let tag = read_tag(reader)?;
                let len = read_array_len(tag, reader)?;
                let expected = count_args!($($T),*);
                if len != expected {
                    return Err(CodecError::LengthMismatch { expected, actual: len });
                }
                Ok(($(
                    $T::decode(reader)?,
                )*))
            }
        }
    };
}

macro_rules! count_args {
    () => { 0 };
    ($head:ident $(, $tail:ident)*) => { 1 + count_args!($($tail),*) };
}

// Generate tuple implementations for 0 to 12 elements
impl_tuple!();
impl_tuple!(T0: 0);
impl_tuple!(T0: 0, T1: 1);
impl_tuple!(T0: 0, T1: 1, T2: 2);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10);
impl_tuple!(T0: 0, T1: 1, T2: 2, T3: 3, T4: 4, T5: 5, T6: 6, T7: 7, T8: 8, T9: 9, T10: 10, T11: 11);

// --- Arc<T> ---
/// Encodes an `Arc<T>` by encoding the inner value.
impl<T: Encoder + ?Sized> Encoder for Arc<T> {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        (**self).encode(writer)
    }
}
/// Decodes an `Arc<T>` by decoding the inner value and wrapping it in an Arc.
impl<T: Decoder> Decoder for Arc<T> {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        Ok(Arc::new(T::decode(reader)?))
    }
}

// --- Box<T> ---
impl<T: Encoder + ?Sized> Encoder for Box<T> {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        (**self).encode(writer)
    }
}
impl<T: Decoder> Decoder for Box<T> {
    fn decode<B: Buf>(reader: &mut B) -> Result<Self> {
        Ok(Box::new(T::decode(reader)?))
    }
}

/// Implementation for references - delegates to the referenced value
impl<T: Encoder + ?Sized> Encoder for &T {
    fn encode(&self, writer: &mut BytesMut) -> Result<()> {
        (**self).encode(writer)
    }
}
