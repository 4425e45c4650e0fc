//! Reading a buffer of concatenated encoded values.

use crate::core::skip_value;
use crate::*;
use std::iter::FusedIterator;

/// Iterates over the values encoded back to back in a byte slice.
///
/// Each step decodes one value and keeps the remainder for the next. Iteration ends
/// when the slice is exhausted, or after yielding the first error.
///
/// # Example
/// ```rust
/// use pynto::{ValueReader, Value};
///
/// let buf = [0x01, 0xa2, b'h', b'i', 0xc0];
/// let values: Vec<Value> = ValueReader::new(&buf).collect::<pynto::Result<_>>().unwrap();
/// assert_eq!(values, vec![Value::Int(1), Value::from("hi"), Value::Nil]);
/// ```
#[derive(Debug, Clone)]
pub struct ValueReader<'a> {
    remaining: &'a [u8],
    failed: bool,
}

impl<'a> ValueReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            remaining: buf,
            failed: false,
        }
    }

    /// The bytes not yet consumed.
    pub fn remainder(&self) -> &'a [u8] {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Decodes the next value as `T`.
    ///
    /// On error the reader does not advance.
    pub fn read<T: Decoder>(&mut self) -> Result<T> {
        let mut cursor = self.remaining;
        let value = T::decode(&mut cursor)?;
        self.remaining = cursor;
        Ok(value)
    }

    /// Advances past the next value without building it.
    ///
    /// On error the reader does not advance.
    pub fn skip_next(&mut self) -> Result<()> {
        let mut cursor = self.remaining;
        skip_value(&mut cursor)?;
        self.remaining = cursor;
        Ok(())
    }
}

impl Iterator for ValueReader<'_> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining.is_empty() {
            return None;
        }
        let item = self.read::<Value>();
        self.failed = item.is_err();
        Some(item)
    }
}

impl FusedIterator for ValueReader<'_> {}

/// Decodes every value in a buffer of concatenated encoded values.
///
/// # Errors
/// Returns the first decode error; an empty buffer yields an empty vector.
pub fn decode_all(buf: &[u8]) -> Result<Vec<Value>> {
    ValueReader::new(buf).collect()
}
