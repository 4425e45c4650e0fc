use bytes::{Bytes, BytesMut};
use pynto::{decode, decode_one, decode_one_with_remainder, encode, Decoder, Encoder, Value};
use std::sync::Arc;

fn round_trip(value: &Value) -> Value {
    let bytes = encode(value).unwrap();
    decode_one(&bytes).unwrap()
}

#[test]
fn test_integer_boundaries_round_trip() {
    let boundaries: Vec<i128> = vec![
        0,
        1,
        127,
        128,
        255,
        256,
        65535,
        65536,
        4294967295,
        4294967296,
        u64::MAX as i128,
        -1,
        -32,
        -33,
        -128,
        -129,
        -32768,
        -32769,
        -2147483648,
        -2147483649,
        i64::MIN as i128,
        i64::MAX as i128,
    ];
    for i in boundaries {
        let value = Value::Int(i);
        assert_eq!(round_trip(&value), value, "round trip of {}", i);
    }
}

#[test]
fn test_canonical_integer_width() {
    // (value, total encoded length)
    let cases: Vec<(i128, usize)> = vec![
        (0, 1),
        (127, 1),
        (128, 2),
        (255, 2),
        (256, 3),
        (65535, 3),
        (65536, 5),
        (4294967295, 5),
        (4294967296, 9),
        (u64::MAX as i128, 9),
        (-1, 1),
        (-32, 1),
        (-33, 2),
        (-128, 2),
        (-129, 3),
        (-32768, 3),
        (-32769, 5),
        (-2147483648, 5),
        (-2147483649, 9),
        (i64::MIN as i128, 9),
    ];
    for (i, len) in cases {
        let bytes = encode(&Value::Int(i)).unwrap();
        assert_eq!(bytes.len(), len, "encoded length of {}", i);
    }
}

#[test]
fn test_scalar_round_trip() {
    let values = vec![
        Value::Nil,
        Value::Bool(true),
        Value::Bool(false),
        Value::Float(0.1),
        Value::Float(-0.0),
        Value::Float(f64::INFINITY),
        Value::Float(f64::MIN_POSITIVE),
        Value::from(""),
        Value::from("Hello World"),
        Value::from("日本語のテキスト"),
        Value::from("x".repeat(31)),
        Value::from("x".repeat(32)),
        Value::from("x".repeat(256)),
        Value::from("x".repeat(70_000)),
        Value::Bytes(Bytes::new()),
        Value::from(&b"foostr"[..]),
        Value::Bytes(Bytes::from(vec![0u8; 1024])),
        Value::Bytes(Bytes::from(vec![7u8; 65536])),
    ];
    for value in values {
        assert_eq!(round_trip(&value), value);
    }
}

#[test]
fn test_float_nan_round_trip() {
    let bytes = encode(&Value::Float(f64::NAN)).unwrap();
    match decode_one(&bytes).unwrap() {
        Value::Float(f) => assert!(f.is_nan()),
        other => panic!("expected float, got {:?}", other),
    }
}

#[test]
fn test_tuple_round_trip() {
    let values = vec![
        Value::Tuple(vec![]),
        Value::from((Value::Nil, true, false, 1, 40, 40000)),
        Value::from(("a".repeat(200), 200, Value::Nil)),
        Value::tuple(0..15),
        Value::tuple(0..16),
        Value::tuple(0..70_000u32),
        Value::from((
            Value::Tuple(vec![]),
            (1, (2, (3, "deep"))),
            Value::from(&[1u8, 2, 3][..]),
        )),
    ];
    for value in values {
        assert_eq!(round_trip(&value), value);
    }
}

#[test]
fn test_mixed_tuple_of_samples() {
    let samples = vec![
        Value::from(1),
        Value::from(-5000),
        Value::from("Hello World"),
        Value::Nil,
        Value::from(0.1),
        Value::from(&b"foostr"[..]),
        Value::from((Value::Nil, true, false, 1, 40, 40000)),
    ];
    let big = Value::tuple((0..200).map(|i| samples[i % samples.len()].clone()));
    assert_eq!(round_trip(&big), big);
}

#[test]
fn test_concatenated_values_with_remainder() {
    let first = Value::from(("one", 1));
    let second = Value::from(-200);
    let mut buffer = BytesMut::new();
    first.encode(&mut buffer).unwrap();
    second.encode(&mut buffer).unwrap();

    let (decoded_first, rest) = decode_one_with_remainder(&buffer).unwrap();
    assert_eq!(decoded_first, first);
    let (decoded_second, rest) = decode_one_with_remainder(rest).unwrap();
    assert_eq!(decoded_second, second);
    assert!(rest.is_empty());
}

#[test]
fn test_decode_one_ignores_trailing_bytes() {
    assert_eq!(decode_one(&[0x05, 0xc0, 0xc3]).unwrap(), Value::Int(5));
}

#[test]
fn test_decoded_bytes_outlive_source_buffer() {
    let value = {
        let buffer = encode(&Value::from(&b"owned"[..])).unwrap().to_vec();
        decode_one(&buffer).unwrap()
    };
    assert_eq!(value.as_bytes(), Some(&b"owned"[..]));
}

#[test]
fn test_decode_from_bytes_leaves_remainder() {
    let mut buffer = BytesMut::new();
    Value::from("first").encode(&mut buffer).unwrap();
    Value::from(2).encode(&mut buffer).unwrap();
    let mut reader = buffer.freeze();
    assert_eq!(Value::decode(&mut reader).unwrap(), Value::from("first"));
    assert_eq!(reader.len(), 1);
    assert_eq!(Value::decode(&mut reader).unwrap(), Value::Int(2));
    assert!(reader.is_empty());
}

#[test]
fn test_accessors_and_kind() {
    let value = Value::from((1, "two", 3.0, true, Value::Nil));
    let items = value.as_tuple().unwrap();
    assert_eq!(value.kind(), "tuple");
    assert_eq!(items[0].as_int(), Some(1));
    assert_eq!(items[1].as_str(), Some("two"));
    assert_eq!(items[2].as_float(), Some(3.0));
    assert_eq!(items[3].as_bool(), Some(true));
    assert!(items[4].is_nil());
    assert_eq!(items[1].as_int(), None);
    assert_eq!(Value::from(Some(5u8)), Value::Int(5));
    assert_eq!(Value::from(None::<u8>), Value::Nil);
}

#[test]
fn test_typed_primitives() {
    let mut buffer = BytesMut::new();
    42u32.encode(&mut buffer).unwrap();
    (-42i32).encode(&mut buffer).unwrap();
    3.5f64.encode(&mut buffer).unwrap();
    true.encode(&mut buffer).unwrap();
    "text".encode(&mut buffer).unwrap();
    u64::MAX.encode(&mut buffer).unwrap();
    i64::MIN.encode(&mut buffer).unwrap();

    let mut reader = buffer.freeze();
    assert_eq!(u32::decode(&mut reader).unwrap(), 42);
    assert_eq!(i32::decode(&mut reader).unwrap(), -42);
    assert_eq!(f64::decode(&mut reader).unwrap(), 3.5);
    assert!(bool::decode(&mut reader).unwrap());
    assert_eq!(String::decode(&mut reader).unwrap(), "text");
    assert_eq!(u64::decode(&mut reader).unwrap(), u64::MAX);
    assert_eq!(i64::decode(&mut reader).unwrap(), i64::MIN);
    assert!(reader.is_empty());
}

#[test]
fn test_typed_matches_dynamic_encoding() {
    assert_eq!(encode(&200u8).unwrap(), encode(&Value::Int(200)).unwrap());
    assert_eq!(
        encode(&-5000i16).unwrap(),
        encode(&Value::Int(-5000)).unwrap()
    );
    assert_eq!(
        encode(&1.5f32).unwrap(),
        encode(&Value::Float(1.5)).unwrap()
    );
    assert_eq!(
        encode(&(1u8, "a", Option::<u8>::None)).unwrap(),
        encode(&Value::from((1, "a", Value::Nil))).unwrap()
    );
}

#[test]
fn test_typed_cross_width_decode() {
    let mut bytes = encode(&300u64).unwrap();
    let as_u16: u16 = decode(&mut bytes).unwrap();
    assert_eq!(as_u16, 300);

    let mut bytes = encode(&-7i64).unwrap();
    let as_f64: f64 = decode(&mut bytes).unwrap();
    assert_eq!(as_f64, -7.0);

    let mut bytes = encode(&2.5f32).unwrap();
    let as_f32: f32 = decode(&mut bytes).unwrap();
    assert_eq!(as_f32, 2.5);
}

#[test]
fn test_typed_containers() {
    let vec = vec![1i32, -2, 300];
    let mut bytes = encode(&vec).unwrap();
    let decoded: Vec<i32> = decode(&mut bytes).unwrap();
    assert_eq!(decoded, vec);

    let array = [1u8, 2, 3];
    let mut bytes = encode(&array).unwrap();
    let decoded: [u8; 3] = decode(&mut bytes).unwrap();
    assert_eq!(decoded, array);

    let options = vec![Some(1u8), None, Some(3)];
    let mut bytes = encode(&options).unwrap();
    let decoded: Vec<Option<u8>> = decode(&mut bytes).unwrap();
    assert_eq!(decoded, options);

    let tuple = (1u8, "two".to_string(), 3.0f64, Bytes::from_static(b"four"));
    let mut bytes = encode(&tuple).unwrap();
    let decoded: (u8, String, f64, Bytes) = decode(&mut bytes).unwrap();
    assert_eq!(decoded, tuple);

    let mut bytes = encode(&()).unwrap();
    assert_eq!(&bytes[..], &[0x90]);
    let _: () = decode(&mut bytes).unwrap();

    let boxed: Box<i64> = Box::new(-1);
    let mut bytes = encode(&boxed).unwrap();
    let decoded: Box<i64> = decode(&mut bytes).unwrap();
    assert_eq!(decoded, boxed);

    let shared = Arc::new("shared".to_string());
    let mut bytes = encode(&shared).unwrap();
    let decoded: Arc<String> = decode(&mut bytes).unwrap();
    assert_eq!(decoded, shared);
}

#[test]
fn test_typed_decode_of_dynamic_value() {
    let value = Value::from((7, "seven", Value::tuple(vec![1, 2])));
    let mut bytes = encode(&value).unwrap();
    let decoded: (u8, String, Vec<u8>) = decode(&mut bytes).unwrap();
    assert_eq!(decoded, (7, "seven".to_string(), vec![1, 2]));
}
