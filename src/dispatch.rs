//! Decode routing keyed by the leading tag byte.
//!
//! The route table is a `static` computed at compile time: every one of the 256
//! possible leading bytes maps to at most one [`Route`], and the table can never be
//! mutated after construction.

use crate::core::*;
use crate::*;
use bytes::Buf;

/// Maximum tuple nesting accepted when decoding a dynamic [`Value`].
pub const MAX_DEPTH: usize = 512;

/// A decode routine, registered for one or more tag bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `0x00..=0x7f`
    PositiveFixint,
    /// `0x90..=0x9f`
    FixArray,
    /// `0xa0..=0xbf`
    FixStr,
    Nil,
    Bool,
    Bin,
    /// Both float widths; 32-bit values are widened.
    Float,
    Uint,
    Int,
    Str,
    Array,
    /// `0xe0..=0xff`
    NegativeFixint,
}

impl Route {
    /// Name of the value kind this route produces.
    pub const fn kind(self) -> &'static str {
        match self {
            Route::Nil => "nil",
            Route::Bool => "bool",
            Route::PositiveFixint | Route::NegativeFixint | Route::Uint | Route::Int => "int",
            Route::Float => "float",
            Route::FixStr | Route::Str => "str",
            Route::Bin => "bytes",
            Route::FixArray | Route::Array => "tuple",
        }
    }
}

/// Builds the tag-to-route table.
///
/// Tags for maps, extension types and the reserved byte `0xc1` have no route.
pub const fn build_routes() -> [Option<Route>; 256] {
    let mut table = [None; 256];
    let mut tag = 0;
    while tag < 256 {
        table[tag] = match tag as u8 {
            0x00..=TAG_POSITIVE_FIXINT_MAX => Some(Route::PositiveFixint),
            TAG_FIXARRAY_BASE..=TAG_FIXARRAY_MAX => Some(Route::FixArray),
            TAG_FIXSTR_BASE..=TAG_FIXSTR_MAX => Some(Route::FixStr),
            TAG_NIL => Some(Route::Nil),
            TAG_FALSE | TAG_TRUE => Some(Route::Bool),
            TAG_BIN8 | TAG_BIN16 | TAG_BIN32 => Some(Route::Bin),
            TAG_F32 | TAG_F64 => Some(Route::Float),
            TAG_U8..=TAG_U64 => Some(Route::Uint),
            TAG_I8..=TAG_I64 => Some(Route::Int),
            TAG_STR8..=TAG_STR32 => Some(Route::Str),
            TAG_ARRAY16 | TAG_ARRAY32 => Some(Route::Array),
            TAG_NEGATIVE_FIXINT_MIN..=0xff => Some(Route::NegativeFixint),
            _ => None,
        };
        tag += 1;
    }
    table
}

/// The process-wide route table.
pub static ROUTES: [Option<Route>; 256] = build_routes();

/// Looks up the route registered for a leading tag byte.
#[inline]
pub fn route(tag: u8) -> Option<Route> {
    ROUTES[tag as usize]
}

/// Builds the error for a tag that does not start the `expected` kind.
///
/// Unregistered tags are `UnsupportedTag`; registered tags of another kind are `UnsupportedType`.
pub(crate) fn unexpected_tag(tag: u8, expected: &'static str) -> CodecError {
    match route(tag) {
        Some(found) => CodecError::UnsupportedType {
            expected,
            found: found.kind(),
        },
        None => CodecError::UnsupportedTag(tag),
    }
}

/// Decodes one value from the front of `reader`, leaving the remainder in place.
///
/// `depth` is the number of tuples enclosing this value.
pub(crate) fn decode_value<B: Buf>(reader: &mut B, depth: usize) -> Result<Value> {
    let tag = read_tag(reader)?;
    let route = route(tag).ok_or(CodecError::UnsupportedTag(tag))?;
    match route {
        Route::Nil => Ok(Value::Nil),
        Route::Bool => Ok(Value::Bool(tag == TAG_TRUE)),
        Route::PositiveFixint | Route::NegativeFixint | Route::Uint | Route::Int => {
            Ok(Value::Int(read_int(tag, reader)?))
        }
        Route::Float => Ok(Value::Float(read_float(tag, reader)?)),
        Route::FixStr | Route::Str => Ok(Value::Str(read_str(tag, reader)?)),
        Route::Bin => Ok(Value::Bytes(read_bin(tag, reader)?)),
        Route::FixArray | Route::Array => {
            if depth >= MAX_DEPTH {
                return Err(CodecError::DepthLimitExceeded(MAX_DEPTH));
            }
            let len = read_array_len(tag, reader)?;
            // Every element takes at least one byte.
            let mut items = Vec::with_capacity(len.min(reader.remaining()));
            for _ in 0..len {
                items.push(decode_value(reader, depth + 1)?);
            }
            Ok(Value::Tuple(items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrouted_tags() {
        let unrouted: Vec<u8> = (0..=255u8).filter(|&tag| route(tag).is_none()).collect();
        let mut expected: Vec<u8> = (0x80..=0x8f).collect();
        expected.extend([0xc1, 0xc7, 0xc8, 0xc9]);
        expected.extend(0xd4..=0xd8);
        expected.extend([0xde, 0xdf]);
        assert_eq!(unrouted, expected);
    }

    #[test]
    fn static_table_matches_builder() {
        assert_eq!(ROUTES, build_routes());
    }

    #[test]
    fn depth_limit_at_max() {
        let mut nested = vec![TAG_FIXARRAY_BASE + 1; MAX_DEPTH];
        nested.push(TAG_NIL);
        let mut reader = nested.as_slice();
        assert!(decode_value(&mut reader, 0).is_ok());

        let mut reader = nested.as_slice();
        assert!(matches!(
            decode_value(&mut reader, 1),
            Err(CodecError::DepthLimitExceeded(MAX_DEPTH))
        ));
    }
}
