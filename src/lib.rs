//! # deed
//!
//! deed is a streaming binary serialization format. A stream is a short header followed
//! by any number of self-describing values, each introduced by a two byte object
//! identifier (OID). Values can be written one at a time, and sequences of unknown length
//! can be written without buffering them.
//!
//! # Usage
//!
//! Values are represented by [`Value`]. Most Rust types convert into it with [`From`].
//!
//! ```
//! use deed::prelude::*;
//! use std::sync::Arc;
//!
//! let dispatch = Arc::new(Dispatch::standard());
//! let mut enc = Encoder::create(dispatch.clone(), Vec::new(), Options::default()).unwrap();
//!
//! enc.encode(&Value::from("a string")).unwrap();
//! enc.encode(&Value::from(vec![Value::from(1), Value::Null, Value::from(2.5)])).unwrap();
//!
//! let bytes = enc.close().unwrap();
//!
//! let dec = Decoder::create(dispatch, &bytes[..], Options::default()).unwrap();
//! let values: Vec<Value> = dec.collect::<Result<_, _>>().unwrap();
//! assert_eq!(values.len(), 2);
//! ```
//!
//! Types outside the built-in catalogue are carried as [`Object`]s and encoded by
//! whatever the [`Dispatch`] registry holds for them. See [`dispatch`] for an example.
//!
//! ## Integers and floats
//!
//! Fixed width integers (`i8` through `i64`), half, single and double precision floats,
//! arbitrary precision integers ([`BigInt`](num_bigint::BigInt)), exact decimals
//! ([`BigDecimal`]) and ratios ([`Ratio`]).
//!
//! ```
//! use deed::prelude::*;
//!
//! let small = Value::from(23i8);
//! let big = Value::from(BigInt::from(u64::max_value()) * 4u32);
//! let half = Value::from(f16::from_f32(1.5));
//! let exact = Value::from(BigDecimal::new(314, 2));
//! ```
//!
//! ## Text, bytes and identifiers
//!
//! Strings, byte strings ([`Bytes`](bytes::Bytes)), characters, UUIDs and regular
//! expressions.
//!
//! ## Time
//!
//! Instants, dates, times of day with and without an offset, date-times with an offset or
//! a zone identifier, durations and calendar periods, using [`chrono`] types.
//!
//! ## Collections
//!
//! Vectors, sets, maps with arbitrary keys ([`VecMap`]), primitive arrays, and
//! sequences. A [`LazySeq`] is drawn from an iterator while it is encoded and a
//! [`ByteStream`] is copied from a reader in chunks.
//!
//! ## Deferred values, errors and metadata
//!
//! A [`Deferred`] is resolved when it is encoded. A [`Throwable`] captures an error with
//! its stack and cause chain. Any value can carry a metadata map with
//! [`Value::with_meta`].
//!
//! # Wire format
//!
//! All multi-byte numbers are big-endian.
//!
//! ## Header
//!
//! | bytes | contents |
//! | ---   | ---      |
//! | 2     | version, currently `1` |
//! | 30    | reserved, written as zero and ignored when read |
//!
//! The header is left out when encoding with [`Options::append`] set.
//!
//! ## Values
//!
//! Every value starts with its OID. The full table is in [`encoding::oid`].
//!
//! Numeric types come in blocks of four OIDs: the first carries a payload, the
//! following three stand for `0`, `1` and `-1` and carry none. `true`, `false`, the empty
//! string, empty byte strings and the empty vector, set and map have their own OIDs too.
//!
//! Length-prefixed payloads (strings, byte strings, big integers) are a `u32` length
//! followed by the bytes. Lengths with the top bit set are rejected.
//!
//! ## Aggregates
//!
//! Countable aggregates (vectors, sets, primitive arrays) are the OID, a `u32` element
//! count and the elements. Maps are the OID, a `u32` pair count and alternating keys and
//! values.
//!
//! Uncountable aggregates are written in chunks:
//!
//! | field | contents |
//! | ---   | ---      |
//! | oid   | `SEQ` or `BYTE_STREAM` |
//! | chunk | `u32` count (never zero), then that many elements or bytes |
//! | ...   | more chunks |
//! | end   | `u32` zero |
//!
//! ## Metadata
//!
//! `META`, then an encoded map, then the annotated value.

#![warn(
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    macro_use_extern_crate,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::new_without_default)]

#[macro_use]
pub mod util;

pub mod adapters;
pub mod deferred;
pub mod dispatch;
pub mod encoding;
pub mod errors;
pub mod float;
pub mod inum;
pub mod lazy;
pub mod object;
pub mod options;
pub mod prelude;
mod rentable;
pub mod rep;
pub mod throwable;
pub mod types;
pub mod vecmap;

pub use crate::{
    deferred::Deferred,
    dispatch::Dispatch,
    encoding::{Decoder, Encoder},
    errors::{DeedError, DeferredFailure, Result},
    inum::{BigDecimal, Ratio},
    lazy::{ByteStream, LazySeq},
    object::Object,
    options::Options,
    throwable::Throwable,
    vecmap::VecMap,
};

use crate::{
    object::Extension,
    types::{OffsetTime, Pattern, Period, Unsupported, ZoneId, ZonedDateTime},
};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use half::f16;

#[derive(Clone, Debug, PartialEq)]
/// A value of the built-in catalogue.
pub enum Value {
    /// Absence of a value.
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Half(f16),
    Float(f32),
    Double(f64),
    Char(char),
    /// Arbitrary precision integer.
    BigInt(num_bigint::BigInt),
    Decimal(BigDecimal),
    Ratio(Ratio),
    String(String),
    Bytes(bytes::Bytes),
    Uuid(uuid::Uuid),
    Regex(Pattern),
    /// A point on the UTC time-line.
    Instant(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    Duration(TimeDelta),
    Period(Period),
    OffsetTime(OffsetTime),
    ZonedDateTime(ZonedDateTime),
    ZoneId(ZoneId),
    /// Ordered, countable.
    Vector(Vec<Value>),
    /// Unordered, countable. Element order is preserved on the wire but carries no
    /// meaning.
    Set(Vec<Value>),
    Map(VecMap<Value, Value>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    BoolArray(Vec<bool>),
    ShortArray(Vec<i16>),
    FloatArray(Vec<f32>),
    CharArray(Vec<char>),
    /// A sequence written in chunks. Decoding an uncountable aggregate produces this.
    Seq(Vec<Value>),
    /// A sequence drawn from an iterator while it is encoded. Never produced by decoding.
    Lazy(LazySeq),
    /// Bytes copied from a reader while they are encoded. Decodes to [`Value::Bytes`].
    Stream(ByteStream),
    Future(Deferred),
    Throwable(Box<Throwable>),
    /// Stand-in for a value that had no encoder.
    Unsupported(Unsupported),
    /// A host value handled by the [`Dispatch`] registry.
    Object(Object),
    /// A value annotated with a metadata map.
    WithMeta(Box<Value>, VecMap<Value, Value>),
}

impl Value {
    /// Wraps a host value as an [`Object`].
    pub fn object<T: Extension>(t: T) -> Value { Value::Object(Object::new(t)) }

    /// Attaches `meta`, replacing any metadata already attached.
    pub fn with_meta(self, meta: VecMap<Value, Value>) -> Value {
        match self {
            Value::WithMeta(inner, _) => Value::WithMeta(inner, meta),
            v => Value::WithMeta(Box::new(v), meta),
        }
    }

    /// The attached metadata, if any.
    pub fn meta(&self) -> Option<&VecMap<Value, Value>> {
        match self {
            Value::WithMeta(_, m) => Some(m),
            _ => None,
        }
    }

    /// The value without its metadata.
    pub fn unwrap_meta(&self) -> &Value {
        match self {
            Value::WithMeta(inner, _) => inner,
            v => v,
        }
    }

    pub fn is_null(&self) -> bool { *self.unwrap_meta() == Value::Null }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_is_replaced_not_nested() {
        let a: VecMap<Value, Value> = vec![(Value::from("a"), Value::Null)].into();
        let b: VecMap<Value, Value> = vec![(Value::from("b"), Value::Null)].into();
        let v = Value::Int(3).with_meta(a).with_meta(b.clone());
        assert_eq!(v.meta(), Some(&b));
        assert_eq!(v.unwrap_meta(), &Value::Int(3));
    }

    #[test]
    fn null_through_meta() {
        assert!(Value::Null.with_meta(VecMap::new()).is_null());
        assert!(!Value::Bool(false).is_null());
    }
}
