use deed::{encoding::constants::HEADER_LEN, prelude::*};

fn stream(body: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; HEADER_LEN];
    out[1] = 1;
    out.extend_from_slice(body);
    out
}

fn malformed_oid(body: &[u8]) -> u16 {
    match decode_full(&stream(body)) {
        Err(DeedError::MalformedPayload { oid, .. }) => oid,
        other => panic!("expected a malformed payload, got {:?}", other),
    }
}

#[test]
fn truncated_header() {
    let err = decode_full(&[0x00, 0x01, 0x00]).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn truncated_primitive() {
    let err = decode_full(&stream(&[0x00, 0x18, 0x00, 0x01])).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn truncated_string() {
    let err = decode_full(&stream(&[0x00, 0x50, 0, 0, 0, 5, b'a', b'b'])).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn vector_shorter_than_its_count() {
    assert_eq!(malformed_oid(&[0x00, 0x60, 0, 0, 0, 2, 0x00, 0x00]), oid::VECTOR);
}

#[test]
fn map_missing_a_value() {
    assert_eq!(malformed_oid(&[0x00, 0x64, 0, 0, 0, 1, 0x00, 0x51]), oid::MAP);
}

#[test]
fn seq_without_terminator() {
    assert_eq!(malformed_oid(&[0x00, 0x70, 0, 0, 0, 1, 0x00, 0x00]), oid::SEQ);
}

#[test]
fn byte_stream_without_terminator() {
    assert_eq!(malformed_oid(&[0x00, 0x54, 0, 0, 0, 1, 7]), oid::BYTE_STREAM);
    assert_eq!(malformed_oid(&[0x00, 0x54]), oid::BYTE_STREAM);
}

#[test]
fn seq_ending_after_its_oid() {
    assert_eq!(malformed_oid(&[0x00, 0x70]), oid::SEQ);
}

fn nested_vectors(depth: usize) -> Vec<u8> {
    let mut body = Vec::with_capacity(depth * 6 + 2);
    for _ in 0..depth {
        body.extend_from_slice(&[0x00, 0x60, 0, 0, 0, 1]);
    }
    body.extend_from_slice(&[0x00, 0x00]);
    body
}

#[test]
fn deep_nesting_is_refused() {
    assert_eq!(malformed_oid(&nested_vectors(20_000)), oid::VECTOR);
}

#[test]
fn nesting_within_the_bound_decodes() {
    let mut expected = Value::Null;
    for _ in 0..64 {
        expected = Value::Vector(vec![expected]);
    }
    assert_eq!(decode_full(&stream(&nested_vectors(64))).unwrap(), vec![expected]);
}

#[test]
fn max_depth_counts_the_outer_value() {
    let opts = Options::builder().max_depth(3).build();
    let decode = |depth| decode_with(&std::sync::Arc::new(Dispatch::new()), &opts, &stream(&nested_vectors(depth)));

    let two = Value::Vector(vec![Value::Vector(vec![Value::Null])]);
    assert_eq!(decode(2).unwrap(), vec![two]);
    match decode(3) {
        Err(DeedError::MalformedPayload { oid: tag, .. }) => assert_eq!(tag, oid::VECTOR),
        other => panic!("expected a malformed payload, got {:?}", other),
    }
}

#[test]
fn leap_nanos_outside_a_leap_second() {
    // 1970-01-01T00:00:00 with 1.5e9 nanos
    let body = [0x00, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0x59, 0x68, 0x2F, 0x00];
    assert_eq!(malformed_oid(&body), oid::INSTANT);
}

#[test]
fn time_past_midnight() {
    let mut body = vec![0x00, 0x82];
    body.extend_from_slice(&86_400_000_000_000i64.to_be_bytes());
    assert_eq!(malformed_oid(&body), oid::TIME);
}

#[test]
fn meta_without_value() {
    assert_eq!(malformed_oid(&[0x00, 0x01, 0x00, 0x65]), oid::META);
}

#[test]
fn negative_length() {
    assert_eq!(malformed_oid(&[0x00, 0x52, 0xff, 0xff, 0xff, 0xff]), oid::BYTES);
}

#[test]
fn invalid_utf8() {
    assert_eq!(malformed_oid(&[0x00, 0x50, 0, 0, 0, 2, 0xc3, 0x28]), oid::STRING);
}

#[test]
fn surrogate_char() {
    assert_eq!(malformed_oid(&[0x00, 0x32, 0, 0, 0xd8, 0x00]), oid::CHAR);
}

#[test]
fn zero_denominator() {
    // 3/0
    assert_eq!(
        malformed_oid(&[0x00, 0x45, 0, 0, 0, 1, 3, 0, 0, 0, 1, 0]),
        oid::RATIO
    );
}

#[test]
fn empty_big_integer() {
    assert_eq!(malformed_oid(&[0x00, 0x40, 0, 0, 0, 0]), oid::BIG_INT);
}

#[test]
fn bool_array_with_bad_byte() {
    assert_eq!(malformed_oid(&[0x00, 0x6b, 0, 0, 0, 1, 2]), oid::BOOL_ARRAY);
}

#[test]
fn invalid_regex() {
    assert_eq!(malformed_oid(&[0x00, 0x55, 0, 0, 0, 1, b'(']), oid::REGEX);
}

#[test]
fn throwable_with_non_throwable_cause() {
    // no message, no frames, a cause that is a null
    let body = [0x00, 0x90, 0, 0, 0, 0, 0, 1, 0x00, 0x00];
    assert_eq!(malformed_oid(&body), oid::THROWABLE);
}

#[test]
fn unassigned_builtin_oid() {
    match decode_full(&stream(&[0x00, 0x02])) {
        Err(DeedError::UnknownOid { oid }) => assert_eq!(oid, 0x0002),
        other => panic!("expected unknown oid, got {:?}", other),
    }
}

#[test]
fn newer_header_version_still_decodes() {
    let mut out = stream(&[0x00, 0x31]);
    out[1] = 9;
    let mut dec = Decoder::create(std::sync::Arc::new(Dispatch::new()), &out[..], Options::default()).unwrap();
    assert_eq!(dec.version(), 9);
    assert_eq!(dec.decode().unwrap(), Some(Value::Bool(false)));
}
