use bytes::BytesMut;
use pynto::{decode_all, CodecError, Encoder, Value, ValueReader};

fn concatenated(values: &[Value]) -> Vec<u8> {
    let mut buffer = BytesMut::new();
    for value in values {
        value.encode(&mut buffer).unwrap();
    }
    buffer.to_vec()
}

#[test]
fn test_decode_all_in_order() {
    let values = vec![
        Value::from(1),
        Value::from("two"),
        Value::from((3, 4)),
        Value::Nil,
        Value::from(&b"five"[..]),
    ];
    let buffer = concatenated(&values);
    assert_eq!(decode_all(&buffer).unwrap(), values);
}

#[test]
fn test_decode_all_empty_buffer() {
    assert!(decode_all(&[]).unwrap().is_empty());
}

#[test]
fn test_decode_all_reports_first_error() {
    let mut buffer = concatenated(&[Value::from(1), Value::from(2)]);
    buffer.push(0xc1);
    assert!(matches!(
        decode_all(&buffer),
        Err(CodecError::UnsupportedTag(0xc1))
    ));
}

#[test]
fn test_reader_stops_after_error() {
    let buffer = [0x01, 0xd9, 0x05, b'a', 0x02];
    let mut reader = ValueReader::new(&buffer);
    assert_eq!(reader.next().unwrap().unwrap(), Value::Int(1));
    assert!(matches!(
        reader.next(),
        Some(Err(CodecError::TruncatedInput { .. }))
    ));
    assert!(reader.next().is_none());
    // The failed value was not consumed.
    assert_eq!(reader.remainder(), &buffer[1..]);
}

#[test]
fn test_reader_typed_reads_and_skip() {
    let values = vec![
        Value::from(("header", 1)),
        Value::from(Value::tuple(0..50)),
        Value::from(-3),
        Value::from("tail"),
    ];
    let buffer = concatenated(&values);
    let mut reader = ValueReader::new(&buffer);

    let header: (String, u8) = reader.read().unwrap();
    assert_eq!(header, ("header".to_string(), 1));
    reader.skip_next().unwrap();
    let number: i64 = reader.read().unwrap();
    assert_eq!(number, -3);

    // A failed typed read leaves the reader in place.
    assert!(reader.read::<u32>().is_err());
    assert_eq!(reader.read::<String>().unwrap(), "tail");
    assert!(reader.is_empty());
    assert!(reader.next().is_none());
}

#[test]
fn test_reader_skip_next() {
    let buffer = concatenated(&[Value::from("first"), Value::from((1, 2)), Value::Nil]);
    let mut reader = ValueReader::new(&buffer);
    reader.skip_next().unwrap();
    reader.skip_next().unwrap();
    assert_eq!(reader.next().unwrap().unwrap(), Value::Nil);
    assert!(reader.is_empty());

    // A truncated value is not skipped.
    let truncated = [0x92, 0x01];
    let mut reader = ValueReader::new(&truncated);
    assert!(matches!(
        reader.skip_next(),
        Err(CodecError::TruncatedInput { .. })
    ));
    assert_eq!(reader.remainder(), &truncated[..]);
}
