use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use deed::{
    prelude::{f16, BigDecimal, Frame, OffsetTime, Pattern, Period, Ratio, Throwable, ZoneId, ZonedDateTime},
    vecmap::VecMap,
    Value,
};
use num_bigint::BigInt;
use num_traits::Num;
use proptest::prelude::*;
use uuid::Uuid;

/// arbitrary Integer wider than 64 bits for use with proptest
pub fn arb_bigint() -> impl Strategy<Value = BigInt> {
    "-?1[0-1]{63,80}".prop_map(|n| -> BigInt { BigInt::from_str_radix(&n, 2).unwrap() })
}

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..64).prop_map(Bytes::from)
}

/// arbitrary text for use with proptest
pub fn arb_string() -> impl Strategy<Value = String> { ".{0,32}" }

/// arbitrary half precision float, NaN excluded
pub fn arb_f16() -> impl Strategy<Value = f16> {
    any::<u16>()
        .prop_map(f16::from_bits)
        .prop_filter("NaN never equals itself", |f| !f.is_nan())
}

/// arbitrary timestamp within a few thousand years of the epoch
pub fn arb_instant() -> impl Strategy<Value = DateTime<chrono::Utc>> {
    (-60_000_000_000i64..60_000_000_000, 0u32..1_000_000_000)
        .prop_map(|(s, n)| DateTime::from_timestamp(s, n).unwrap())
}

/// arbitrary zone identifier, never resolved so any text would do
pub fn arb_zone() -> impl Strategy<Value = ZoneId> {
    prop::sample::select(vec!["Europe/Paris", "UTC", "+02:00", "America/St_Johns", "Z"]).prop_map(ZoneId::new)
}

/// arbitrary calendar value for use with proptest
pub fn arb_temporal() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_instant().prop_map(Value::Instant),
        arb_instant().prop_map(|t| Value::DateTime(t.naive_utc())),
        (-700_000i32..700_000)
            .prop_map(|d| Value::Date(NaiveDate::from_num_days_from_ce_opt(719_163 + d).unwrap())),
        (0u32..86_400, 0u32..1_000_000_000).prop_map(|(s, n)| {
            Value::Time(NaiveTime::from_num_seconds_from_midnight_opt(s, n).unwrap())
        }),
        (arb_instant(), -64_800i32..=64_800).prop_map(|(t, off)| {
            Value::OffsetDateTime(t.with_timezone(&FixedOffset::east_opt(off).unwrap()))
        }),
        (-1_000_000_000_000i64..1_000_000_000_000, 0u32..1_000_000_000)
            .prop_map(|(s, n)| Value::Duration(TimeDelta::new(s, n).unwrap())),
        (any::<i32>(), any::<i32>(), any::<i32>())
            .prop_map(|(y, m, d)| Value::Period(Period::new(y, m, d))),
        (0u32..86_400, 0u32..1_000_000_000, -64_800i32..=64_800).prop_map(|(s, n, off)| {
            let time = NaiveTime::from_num_seconds_from_midnight_opt(s, n).unwrap();
            Value::OffsetTime(OffsetTime::new(time, FixedOffset::east_opt(off).unwrap()))
        }),
        (arb_instant(), arb_zone())
            .prop_map(|(t, z)| Value::ZonedDateTime(ZonedDateTime::new(t.naive_utc(), z))),
        arb_zone().prop_map(Value::ZoneId),
    ]
}

/// arbitrary exception chain for use with proptest
pub fn arb_throwable() -> impl Strategy<Value = Throwable> {
    let frame = (arb_string(), arb_string(), any::<i32>()).prop_map(|(c, m, line)| {
        let f = Frame::new(c, m);
        if line < 0 { f } else { f.at("Main.java", line) }
    });
    let one = (arb_string(), prop::collection::vec(frame, 0..4)).prop_map(|(msg, frames)| {
        frames.into_iter().fold(Throwable::new(msg), Throwable::with_frame)
    })
    .boxed();
    (one.clone(), prop::option::of(one.clone()), prop::collection::vec(one, 0..3)).prop_map(
        |(t, cause, suppressed)| {
            let t = suppressed.into_iter().fold(t, Throwable::with_suppressed);
            match cause {
                Some(c) => t.with_cause(c),
                None => t,
            }
        },
    )
}

/// arbitrary scalar value for use with proptest
pub fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        // misc
        any::<bool>().prop_map(Value::Bool),
        arb_string().prop_map(Value::from),
        any::<char>().prop_map(Value::from),
        // integers, with the folded values weighted up
        any::<i8>().prop_map(Value::from),
        any::<i16>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        (-1i64..=1).prop_map(Value::from),
        any::<u8>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        // floats
        arb_f16().prop_map(Value::from),
        any::<f32>().prop_filter("NaN", |f| !f.is_nan()).prop_map(Value::from),
        any::<f64>().prop_filter("NaN", |f| !f.is_nan()).prop_map(Value::from),
        // exact numbers
        arb_bigint().prop_map(Value::from),
        (any::<i64>(), any::<i32>()).prop_map(|(u, s)| Value::from(BigDecimal::new(u, s))),
        (any::<i64>(), any::<i64>().prop_filter("zero", |d| *d != 0))
            .prop_map(|(n, d)| Value::from(Ratio::new(n, d).unwrap())),
        // bytes and identifiers
        arb_bs().prop_map(Value::from),
        any::<u128>().prop_map(|u| Value::from(Uuid::from_u128(u))),
        prop::sample::select(vec!["a+b", "^[0-9]{3}$", "", "(?i)deed"])
            .prop_map(|s| Value::from(Pattern::new(s).unwrap())),
        // primitive arrays
        prop::collection::vec(any::<i32>(), 0..8).prop_map(Value::IntArray),
        prop::collection::vec(any::<i64>(), 0..8).prop_map(Value::LongArray),
        prop::collection::vec(any::<f64>().prop_filter("NaN", |f| !f.is_nan()), 0..8)
            .prop_map(Value::DoubleArray),
        prop::collection::vec(any::<bool>(), 0..8).prop_map(Value::BoolArray),
        prop::collection::vec(any::<i16>(), 0..8).prop_map(Value::ShortArray),
        prop::collection::vec(any::<f32>().prop_filter("NaN", |f| !f.is_nan()), 0..8)
            .prop_map(Value::FloatArray),
        prop::collection::vec(any::<char>(), 0..8).prop_map(Value::CharArray),
        arb_temporal(),
        arb_throwable().prop_map(Value::from),
    ]
}

/// arbitrary Value for use with proptest
///
/// Only produces values that decode back to themselves: no lazy sequences, streams,
/// futures or host objects.
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Vector),
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Set),
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::Seq),
                prop::collection::vec((arb_string().prop_map(Value::from), inner.clone()), 0..10)
                    .prop_map(|kv| Value::Map(kv.into_iter().collect::<VecMap<_, _>>())),
                (inner.clone(), prop::collection::vec((arb_string(), inner), 1..4)).prop_map(
                    |(v, kv)| {
                        let meta = kv.into_iter().map(|(k, v)| (Value::from(k), v)).collect();
                        v.with_meta(meta)
                    }
                ),
            ]
        },
    )
}
