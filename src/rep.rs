//! Conversions between Rust types and [`Value`].
//!
//! Host types convert into a [`Value`] with [`From`]. Getting them back out is fallible
//! and goes through [`TryFrom`], failing with a [`ConversionError`] that still owns the
//! value.
//!
//! # Example
//!
//! ```
//! use deed::prelude::*;
//!
//! let v = Value::from("hello");
//! assert_eq!(String::try_from(v).unwrap(), "hello");
//!
//! let err = i32::try_from(Value::from(true)).unwrap_err();
//! assert_eq!(err.into_value(), Value::Bool(true));
//! ```

use crate::{
    errors::ConversionError,
    types::{OffsetTime, Pattern, Period, Unsupported, ZoneId, ZonedDateTime},
    *,
};
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use half::f16;
use num_bigint::BigInt;
use regex::Regex;
use std::convert::TryFrom;
use uuid::Uuid;

from_fn!(Value, bool, Value::Bool);
from_fn!(Value, i8, Value::Byte);
from_fn!(Value, i16, Value::Short);
from_fn!(Value, i32, Value::Int);
from_fn!(Value, i64, Value::Long);

// unsigned integers widen to the next signed type that holds them
from_as!(Value, u8, i16);
from_as!(Value, u16, i32);
from_as!(Value, u32, i64);
from_fn!(Value, u64, |u: u64| {
    if u <= i64::max_value() as u64 {
        Value::Long(u as i64)
    } else {
        Value::BigInt(BigInt::from(u))
    }
});

from_fn!(Value, f16, Value::Half);
from_fn!(Value, f32, Value::Float);
from_fn!(Value, f64, Value::Double);
from_fn!(Value, char, Value::Char);

from_fn!(Value, BigInt, Value::BigInt);
from_fn!(Value, BigDecimal, Value::Decimal);
from_fn!(Value, Ratio, Value::Ratio);

from_fn!(Value, String, Value::String);
compose_from!(Value, String, &str);
from_fn!(Value, Bytes, Value::Bytes);
from_fn!(Value, &[u8], |b: &[u8]| Value::Bytes(Bytes::copy_from_slice(b)));
from_fn!(Value, Uuid, Value::Uuid);
from_fn!(Value, Pattern, Value::Regex);
compose_from!(Value, Pattern, Regex);

from_fn!(Value, DateTime<Utc>, Value::Instant);
from_fn!(Value, NaiveDate, Value::Date);
from_fn!(Value, NaiveTime, Value::Time);
from_fn!(Value, NaiveDateTime, Value::DateTime);
from_fn!(Value, DateTime<FixedOffset>, Value::OffsetDateTime);
from_fn!(Value, TimeDelta, Value::Duration);
from_fn!(Value, Period, Value::Period);
from_fn!(Value, OffsetTime, Value::OffsetTime);
from_fn!(Value, ZonedDateTime, Value::ZonedDateTime);
from_fn!(Value, ZoneId, Value::ZoneId);

from_fn!(Value, Throwable, |t| Value::Throwable(Box::new(t)));
from_fn!(Value, Unsupported, Value::Unsupported);
from_fn!(Value, Object, Value::Object);
from_fn!(Value, VecMap<Value, Value>, Value::Map);
from_fn!(Value, LazySeq, Value::Lazy);
from_fn!(Value, ByteStream, Value::Stream);
from_fn!(Value, Deferred, Value::Future);
from_fn!(Value, (), |_| Value::Null);

/// A `Vec` becomes a [`Value::Vector`]. Use [`Value::Bytes`] for raw bytes.
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value { Value::Vector(v.into_iter().map(Into::into).collect()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value { o.map_or(Value::Null, Into::into) }
}

macro_rules! try_from_value {
    ($t:ty, $expected:expr, $($pat:pat => $e:expr),+ $(,)*) => {
        impl TryFrom<Value> for $t {
            type Error = ConversionError;

            fn try_from(v: Value) -> std::result::Result<$t, ConversionError> {
                match v {
                    $($pat => Ok($e),)+
                    other => Err(ConversionError::new($expected, other)),
                }
            }
        }
    };
}

try_from_value!(bool, "bool", Value::Bool(b) => b);
try_from_value!(char, "char", Value::Char(c) => c);

try_from_value!(i8, "byte", Value::Byte(n) => n);
try_from_value!(i16, "short",
    Value::Byte(n) => i16::from(n),
    Value::Short(n) => n,
);
try_from_value!(i32, "int",
    Value::Byte(n) => i32::from(n),
    Value::Short(n) => i32::from(n),
    Value::Int(n) => n,
);
try_from_value!(i64, "long",
    Value::Byte(n) => i64::from(n),
    Value::Short(n) => i64::from(n),
    Value::Int(n) => i64::from(n),
    Value::Long(n) => n,
);
try_from_value!(BigInt, "big integer",
    Value::Byte(n) => BigInt::from(n),
    Value::Short(n) => BigInt::from(n),
    Value::Int(n) => BigInt::from(n),
    Value::Long(n) => BigInt::from(n),
    Value::BigInt(n) => n,
);

try_from_value!(f16, "half", Value::Half(x) => x);
try_from_value!(f32, "float",
    Value::Half(x) => x.to_f32(),
    Value::Float(x) => x,
);
try_from_value!(f64, "double",
    Value::Half(x) => x.to_f64(),
    Value::Float(x) => f64::from(x),
    Value::Double(x) => x,
);
try_from_value!(BigDecimal, "decimal", Value::Decimal(d) => d);
try_from_value!(Ratio, "ratio", Value::Ratio(r) => r);

try_from_value!(String, "string", Value::String(s) => s);
try_from_value!(Bytes, "bytes", Value::Bytes(b) => b);
try_from_value!(Uuid, "uuid", Value::Uuid(u) => u);
try_from_value!(Pattern, "regex", Value::Regex(p) => p);

try_from_value!(DateTime<Utc>, "instant", Value::Instant(t) => t);
try_from_value!(NaiveDate, "date", Value::Date(d) => d);
try_from_value!(NaiveTime, "time", Value::Time(t) => t);
try_from_value!(NaiveDateTime, "date-time", Value::DateTime(t) => t);
try_from_value!(DateTime<FixedOffset>, "offset date-time", Value::OffsetDateTime(t) => t);
try_from_value!(TimeDelta, "duration", Value::Duration(d) => d);
try_from_value!(Period, "period", Value::Period(p) => p);
try_from_value!(OffsetTime, "offset time", Value::OffsetTime(t) => t);
try_from_value!(ZonedDateTime, "zoned date-time", Value::ZonedDateTime(z) => z);
try_from_value!(ZoneId, "zone id", Value::ZoneId(z) => z);

try_from_value!(Vec<Value>, "sequence",
    Value::Vector(v) => v,
    Value::Set(v) => v,
    Value::Seq(v) => v,
);
try_from_value!(VecMap<Value, Value>, "map", Value::Map(m) => m);
try_from_value!(Vec<i32>, "int array", Value::IntArray(a) => a);
try_from_value!(Vec<i64>, "long array", Value::LongArray(a) => a);
try_from_value!(Vec<f64>, "double array", Value::DoubleArray(a) => a);
try_from_value!(Vec<bool>, "bool array", Value::BoolArray(a) => a);
try_from_value!(Vec<i16>, "short array", Value::ShortArray(a) => a);
try_from_value!(Vec<f32>, "float array", Value::FloatArray(a) => a);
try_from_value!(Vec<char>, "char array", Value::CharArray(a) => a);

try_from_value!(Throwable, "throwable", Value::Throwable(t) => *t);
try_from_value!(Object, "object", Value::Object(o) => o);
try_from_value!(Deferred, "future", Value::Future(d) => d);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_widening() {
        assert_eq!(Value::from(200u8), Value::Short(200));
        assert_eq!(Value::from(60_000u16), Value::Int(60_000));
        assert_eq!(Value::from(u32::max_value()), Value::Long(u32::max_value() as i64));
        assert_eq!(Value::from(5u64), Value::Long(5));
        assert_eq!(
            Value::from(u64::max_value()),
            Value::BigInt(BigInt::from(u64::max_value()))
        );
    }

    #[test]
    fn option_and_unit() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".to_string()));
        assert_eq!(Value::from(()), Value::Null);
    }

    #[test]
    fn vecs_become_vectors() {
        assert_eq!(
            Value::from(vec![1i8, 2]),
            Value::Vector(vec![Value::Byte(1), Value::Byte(2)])
        );
        assert_eq!(
            Value::from(&b"ab"[..]),
            Value::Bytes(Bytes::from_static(b"ab"))
        );
    }

    #[test]
    fn integer_extraction_widens() {
        assert_eq!(i64::try_from(Value::Byte(-3)).unwrap(), -3);
        assert_eq!(i32::try_from(Value::Short(300)).unwrap(), 300);
        assert_eq!(
            BigInt::try_from(Value::Long(7)).unwrap(),
            BigInt::from(7)
        );
        assert!(i8::try_from(Value::Short(1)).is_err());
    }

    #[test]
    fn failed_extraction_returns_value() {
        let err = String::try_from(Value::Int(4)).unwrap_err();
        assert_eq!(err.expected(), "string");
        assert_eq!(err.into_value(), Value::Int(4));
    }

    #[test]
    fn throwable_unboxes() {
        let t = Throwable::new("boom");
        assert_eq!(Throwable::try_from(Value::from(t.clone())).unwrap(), t);
    }

    #[test]
    fn zones_stay_text() {
        let z = ZonedDateTime::new(
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap().and_hms_opt(2, 30, 0).unwrap(),
            ZoneId::new("Europe/Paris"),
        );
        assert_eq!(ZonedDateTime::try_from(Value::from(z.clone())).unwrap(), z);
        assert_eq!(ZoneId::try_from(Value::from(ZoneId::new("UTC"))).unwrap().as_str(), "UTC");
        assert!(ZoneId::try_from(Value::from("UTC")).is_err());
    }

    #[test]
    fn arrays_extract_only_their_own_kind() {
        assert_eq!(Vec::<char>::try_from(Value::CharArray(vec!['a'])).unwrap(), vec!['a']);
        assert_eq!(Vec::<i16>::try_from(Value::ShortArray(vec![-2])).unwrap(), vec![-2]);
        let err = Vec::<f32>::try_from(Value::DoubleArray(vec![1.0])).unwrap_err();
        assert_eq!(err.expected(), "float array");
    }

    #[test]
    fn sequences_of_any_kind() {
        let items = vec![Value::Null];
        for v in vec![
            Value::Vector(items.clone()),
            Value::Set(items.clone()),
            Value::Seq(items.clone()),
        ] {
            assert_eq!(Vec::<Value>::try_from(v).unwrap(), items);
        }
    }
}
