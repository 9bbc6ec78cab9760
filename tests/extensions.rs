use deed::{encoding::constants::HEADER_LEN, prelude::*};
use std::{
    net::{Ipv4Addr, Ipv6Addr, SocketAddrV4},
    sync::Arc,
};

#[derive(Debug, Clone, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Debug, PartialEq)]
struct Opaque(u8);

const POINT: u16 = 0x8001;

fn with_point() -> Arc<Dispatch> {
    let mut d = Dispatch::standard();
    d.register::<Point, _, _>(
        POINT,
        |p, w| {
            w.write_oid(POINT)?;
            w.write_i32(p.x)?;
            w.write_i32(p.y)
        },
        |r| {
            let x = r.read_i32()?;
            let y = r.read_i32()?;
            Ok(Value::object(Point { x, y }))
        },
    )
    .unwrap();
    Arc::new(d)
}

#[test]
fn registered_type_round_trips_either_way() {
    let v = Value::object(Point { x: 3, y: -4 });
    for &placeholders in &[true, false] {
        let opts = Options::builder().encode_unsupported(placeholders).build();
        let out = encode_with(&with_point(), &opts, &[v.clone()]).unwrap();
        assert_eq!(&out[HEADER_LEN..], &[0x80, 0x01, 0, 0, 0, 3, 0xff, 0xff, 0xff, 0xfc]);
        assert_eq!(decode_with(&with_point(), &opts, &out).unwrap(), vec![v.clone()]);
    }
}

#[test]
fn objects_nest_inside_aggregates() {
    let v = Value::Vector(vec![
        Value::object(Point { x: 0, y: 0 }),
        Value::Map(vec![(Value::from("p"), Value::object(Point { x: 1, y: 1 }))].into()),
    ]);
    let out = encode_with(&with_point(), &Options::default(), &[v.clone()]).unwrap();
    assert_eq!(decode_with(&with_point(), &Options::default(), &out).unwrap(), vec![v]);
}

#[test]
fn extension_values_carry_meta() {
    let meta: VecMap<Value, Value> = vec![(Value::from("unit"), Value::from("px"))].into();
    let v = Value::object(Point { x: 9, y: 9 }).with_meta(meta);
    let out = encode_with(&with_point(), &Options::default(), &[v.clone()]).unwrap();
    assert_eq!(decode_with(&with_point(), &Options::default(), &out).unwrap(), vec![v]);
}

#[test]
fn unregistered_type_becomes_placeholder() {
    let out = encode_full(&Value::object(Opaque(7))).unwrap();
    match &decode_full(&out).unwrap()[..] {
        [Value::Unsupported(u)] => {
            assert!(u.class_name.ends_with("Opaque"));
            assert_eq!(u.content, "Opaque(7)");
        }
        other => panic!("expected a placeholder, got {:?}", other),
    }
}

#[test]
fn unregistered_type_is_refused_without_placeholders() {
    let opts = Options::builder().encode_unsupported(false).build();
    let mut enc = Encoder::create(with_point(), Vec::new(), opts).unwrap();

    match enc.encode(&Value::object(Opaque(1))) {
        Err(DeedError::UnsupportedType { type_name }) => assert!(type_name.ends_with("Opaque")),
        other => panic!("expected unsupported type, got {:?}", other),
    }
    assert_eq!(enc.close().unwrap().len(), HEADER_LEN);
}

#[test]
fn unknown_extension_oid() {
    let out = encode_with(&with_point(), &Options::default(), &[Value::object(Point { x: 1, y: 2 })]).unwrap();
    match decode_full(&out) {
        Err(DeedError::UnknownOid { oid }) => assert_eq!(oid, POINT),
        other => panic!("expected unknown oid, got {:?}", other),
    }
}

#[test]
fn builtin_oids_are_reserved() {
    let mut d = Dispatch::new();
    match d.register_decoder(oid::STRING, |_| Ok(Value::Null)) {
        Err(DeedError::OidConflict { oid }) => assert_eq!(oid, 0x0050),
        other => panic!("expected a conflict, got {:?}", other.map(|_| ())),
    }
    assert!(!d.has_decoder(oid::STRING));
    assert!(d.register_decoder(0x9000, |_| Ok(Value::Null)).is_ok());
}

#[test]
fn later_registration_replaces_earlier() {
    let mut d = Dispatch::new();
    d.register_decoder(POINT, |_| Ok(Value::Int(1))).unwrap();
    d.register_decoder(POINT, |_| Ok(Value::Int(2))).unwrap();
    let d = Arc::new(d);

    let mut bytes = encode_with(&d, &Options::default(), &[]).unwrap();
    bytes.extend_from_slice(&[0x80, 0x01]);
    assert_eq!(decode_with(&d, &Options::default(), &bytes).unwrap(), vec![Value::Int(2)]);
}

#[test]
fn handlers_can_encode_nested_values() {
    #[derive(Debug, PartialEq)]
    struct Tagged(String, Vec<i64>);

    const TAGGED: u16 = 0x8100;

    let mut d = Dispatch::new();
    d.register::<Tagged, _, _>(
        TAGGED,
        |t, w| {
            w.write_oid(TAGGED)?;
            w.write_value(&Value::from(t.0.as_str()))?;
            w.write_value(&Value::LongArray(t.1.clone()))
        },
        |r| {
            let name = String::try_from(r.read_value()?).map_err(|e| {
                DeedError::MalformedPayload {
                    oid: TAGGED,
                    reason: e.to_string(),
                }
            })?;
            match r.read_value()? {
                Value::LongArray(a) => Ok(Value::object(Tagged(name, a))),
                other => Err(DeedError::MalformedPayload {
                    oid: TAGGED,
                    reason: format!("{:?}", other),
                }),
            }
        },
    )
    .unwrap();
    let d = Arc::new(d);

    let v = Value::object(Tagged("ids".into(), vec![1, 0, -1, 1 << 40]));
    let out = encode_with(&d, &Options::default(), &[v.clone()]).unwrap();
    assert_eq!(decode_with(&d, &Options::default(), &out).unwrap(), vec![v]);
}

#[test]
fn std_adapters() {
    let vs = vec![
        Value::object(Ipv4Addr::new(192, 168, 1, 20)),
        Value::object(Ipv6Addr::LOCALHOST),
        Value::object(SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), 8080)),
    ];
    let d = Arc::new(Dispatch::standard());
    let out = encode_with(&d, &Options::default(), &vs).unwrap();
    assert_eq!(decode_with(&d, &Options::default(), &out).unwrap(), vs);
}
