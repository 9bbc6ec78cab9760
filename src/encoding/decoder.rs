use super::*;
use crate::{
    deferred::Deferred,
    encoding::encoder::{NANOS_PER_SEC, UNIX_EPOCH_DAY_CE},
    inum::{BigDecimal, Ratio},
    throwable::{Frame, Throwable},
    types::{OffsetTime, Pattern, Period, Unsupported, ZoneId, ZonedDateTime},
};
use bytes::{Bytes, BytesMut};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use half::f16;
use num_bigint::BigInt;
use std::{
    cmp,
    convert::TryFrom,
    io::{self, BufRead, BufReader, Read},
    iter::FusedIterator,
    sync::Arc,
};
use tracing::{debug, warn};
use uuid::Uuid;

/// Upper bound on capacity reserved from an untrusted length.
const MAX_PREALLOC: usize = 1024;

/// Reads values from a source.
///
/// The source must be a [`BufRead`] so the end of the stream can be detected without
/// consuming input; see [`Decoder::buffered`] for plain readers.
pub struct Decoder<R: BufRead> {
    source: R,
    dispatch: Arc<Dispatch>,
    options: Options,
    version: u16,
    position: u64,
    extension: u16,
    depth: usize,
    done: bool,
}

impl<R: Read> Decoder<BufReader<R>> {
    /// Creates a decoder over `source` wrapped in a buffer of `input_buffer_size`.
    pub fn buffered(dispatch: Arc<Dispatch>, source: R, options: Options) -> Result<Self> {
        let source = BufReader::with_capacity(options.input_buffer_size(), source);
        Decoder::create(dispatch, source, options)
    }
}

impl<R: BufRead> Decoder<R> {
    /// Creates a decoder and reads the header.
    ///
    /// The version is not checked against [`HEADER_VERSION`]; see [`Decoder::version`].
    pub fn create(dispatch: Arc<Dispatch>, source: R, options: Options) -> Result<Self> {
        let mut dec = Decoder {
            source,
            dispatch,
            options,
            version: 0,
            position: 0,
            extension: oid::NULL,
            depth: 0,
            done: false,
        };
        dec.version = Header::read(&mut dec)?.version();
        if dec.version != HEADER_VERSION {
            warn!(version = dec.version, expected = HEADER_VERSION, "unexpected stream version");
        }
        debug!(version = dec.version, "decoder created");
        Ok(dec)
    }

    /// Version from the stream header.
    pub fn version(&self) -> u16 { self.version }

    pub fn options(&self) -> &Options { &self.options }

    /// Bytes consumed so far, header included.
    pub fn position(&self) -> u64 { self.position }

    /// Decodes the next value, or `None` at the end of the stream.
    ///
    /// Once the end is reached every further call returns `None`.
    pub fn decode(&mut self) -> Result<Option<Value>> {
        if self.at_eof()? {
            return Ok(None);
        }
        let oid = self.read_oid()?;
        self.decode_nested(oid, oid).map(Some)
    }

    /// Hands back the source.
    pub fn close(self) -> R {
        debug!(position = self.position, "decoder closed");
        self.source
    }

    fn at_eof(&mut self) -> Result<bool> {
        loop {
            match self.source.fill_buf() {
                Ok(buf) => return Ok(buf.is_empty()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DeedError::io("peek", 1, e)),
            }
        }
    }

    /// Decodes a value that `parent` requires; the stream may not end here.
    fn read_element(&mut self, parent: u16) -> Result<Value> {
        if self.at_eof()? {
            malformed!(parent, "stream ended where a value was expected")
        }
        let oid = self.read_oid()?;
        self.decode_nested(parent, oid)
    }

    /// Decodes one level deeper, refusing to go past `max_depth`.
    fn decode_nested(&mut self, parent: u16, oid: u16) -> Result<Value> {
        let max = self.options.max_depth();
        if self.depth >= max {
            malformed!(parent, "values nested deeper than {} levels", max)
        }
        self.depth += 1;
        let out = self.decode_oid(oid);
        self.depth -= 1;
        out
    }

    /// Reads the count of the next chunk; the stream may not end before the terminator.
    fn read_chunk_len(&mut self, oid: u16) -> Result<usize> {
        if self.at_eof()? {
            malformed!(oid, "stream ended before the chunk terminator")
        }
        self.read_len(oid)
    }

    fn read_elements(&mut self, parent: u16, len: usize) -> Result<Vec<Value>> {
        let mut out = Vec::with_capacity(cmp::min(len, MAX_PREALLOC));
        for _ in 0..len {
            out.push(self.read_element(parent)?);
        }
        Ok(out)
    }

    fn read_countable(&mut self, oid: u16) -> Result<Vec<Value>> {
        let len = self.read_len(oid)?;
        self.read_elements(oid, len)
    }

    fn read_map(&mut self, oid: u16) -> Result<VecMap<Value, Value>> {
        let len = self.read_len(oid)?;
        let mut m = VecMap::with_capacity(cmp::min(len, MAX_PREALLOC));
        for _ in 0..len {
            let k = self.read_element(oid)?;
            let v = self.read_element(oid)?;
            m.push(k, v);
        }
        Ok(m)
    }

    /// Any encoded map, empty or not.
    fn read_map_value(&mut self, parent: u16) -> Result<VecMap<Value, Value>> {
        match self.read_element(parent)? {
            Value::Map(m) => Ok(m),
            other => malformed!(parent, "expected a map, found {:?}", other),
        }
    }

    fn read_uncountable(&mut self, oid: u16) -> Result<Vec<Value>> {
        let mut out = Vec::new();
        loop {
            let count = self.read_chunk_len(oid)?;
            if count == 0 {
                return Ok(out);
            }
            out.extend(self.read_elements(oid, count)?);
        }
    }

    fn read_byte_stream(&mut self) -> Result<Bytes> {
        let mut out = BytesMut::new();
        loop {
            let len = self.read_chunk_len(oid::BYTE_STREAM)?;
            if len == 0 {
                return Ok(out.freeze());
            }
            out.extend_from_slice(&self.read_raw(len)?);
        }
    }

    fn read_array<T, F>(&mut self, oid: u16, mut f: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let len = self.read_len(oid)?;
        let mut out = Vec::with_capacity(cmp::min(len, MAX_PREALLOC));
        for _ in 0..len {
            out.push(f(self)?);
        }
        Ok(out)
    }

    fn read_timestamp(&mut self, oid: u16) -> Result<DateTime<chrono::Utc>> {
        let secs = self.read_i64()?;
        let nanos = self.read_i32()?;
        // leap seconds carry nanos in 1e9..2e9; chrono decides where they are allowed
        if nanos < 0 {
            malformed!(oid, "nanosecond field {} out of range", nanos)
        }
        match DateTime::from_timestamp(secs, nanos as u32) {
            Some(t) => Ok(t),
            None => malformed!(oid, "timestamp {}s {}ns out of range", secs, nanos),
        }
    }

    fn read_nano_of_day(&mut self, oid: u16) -> Result<NaiveTime> {
        let nanos = self.read_i64()?;
        let time = if nanos < 0 {
            None
        } else {
            let secs = nanos / NANOS_PER_SEC;
            let sub = nanos % NANOS_PER_SEC;
            u32::try_from(secs)
                .ok()
                .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, sub as u32))
        };
        match time {
            Some(t) => Ok(t),
            None => malformed!(oid, "nano of day {} out of range", nanos),
        }
    }

    fn read_offset(&mut self, oid: u16) -> Result<FixedOffset> {
        let secs = self.read_i32()?;
        match FixedOffset::east_opt(secs) {
            Some(off) => Ok(off),
            None => malformed!(oid, "offset {}s out of range", secs),
        }
    }

    fn read_frame(&mut self) -> Result<Frame> {
        let class = self.read_string(oid::THROWABLE)?;
        let method = self.read_string(oid::THROWABLE)?;
        let file = if self.read_bool(oid::THROWABLE)? {
            Some(self.read_string(oid::THROWABLE)?)
        } else {
            None
        };
        let line = self.read_i32()?;
        Ok(Frame {
            class,
            method,
            file,
            line,
        })
    }

    fn read_nested_throwable(&mut self) -> Result<Throwable> {
        match self.read_element(oid::THROWABLE)? {
            Value::Throwable(t) => Ok(*t),
            other => malformed!(oid::THROWABLE, "expected a throwable, found {:?}", other),
        }
    }

    fn read_throwable(&mut self, data: Option<VecMap<Value, Value>>) -> Result<Throwable> {
        let message = if self.read_bool(oid::THROWABLE)? {
            Some(self.read_string(oid::THROWABLE)?)
        } else {
            None
        };
        let frame_count = self.read_len(oid::THROWABLE)?;
        let mut frames = Vec::with_capacity(cmp::min(frame_count, MAX_PREALLOC));
        for _ in 0..frame_count {
            frames.push(self.read_frame()?);
        }
        let cause = if self.read_bool(oid::THROWABLE)? {
            Some(Box::new(self.read_nested_throwable()?))
        } else {
            None
        };
        let suppressed_count = self.read_len(oid::THROWABLE)?;
        let mut suppressed = Vec::with_capacity(cmp::min(suppressed_count, MAX_PREALLOC));
        for _ in 0..suppressed_count {
            suppressed.push(self.read_nested_throwable()?);
        }
        Ok(Throwable {
            message,
            frames,
            cause,
            suppressed,
            data,
        })
    }

    fn decode_extension(&mut self, oid: u16) -> Result<Value> {
        let dispatch = Arc::clone(&self.dispatch);
        let dec = match dispatch.decoder(oid) {
            Some(dec) => dec,
            None => return Err(DeedError::UnknownOid { oid }),
        };
        let outer = std::mem::replace(&mut self.extension, oid);
        let out = dec(self);
        self.extension = outer;
        out
    }

    fn decode_oid(&mut self, oid: u16) -> Result<Value> {
        let v = match oid {
            oid::NULL => Value::Null,
            oid::META => {
                let meta = self.read_map_value(oid::META)?;
                let value = self.read_element(oid::META)?;
                Value::WithMeta(Box::new(value), meta)
            }
            oid::UNSUPPORTED => {
                let class_name = self.read_string(oid)?;
                let content = self.read_string(oid)?;
                Value::Unsupported(Unsupported::new(class_name, content))
            }

            oid::BYTE => Value::Byte(self.read_i8()?),
            oid::BYTE_ZERO => Value::Byte(0),
            oid::BYTE_ONE => Value::Byte(1),
            oid::BYTE_MINUS_ONE => Value::Byte(-1),
            oid::SHORT => Value::Short(self.read_i16()?),
            oid::SHORT_ZERO => Value::Short(0),
            oid::SHORT_ONE => Value::Short(1),
            oid::SHORT_MINUS_ONE => Value::Short(-1),
            oid::INT => Value::Int(self.read_i32()?),
            oid::INT_ZERO => Value::Int(0),
            oid::INT_ONE => Value::Int(1),
            oid::INT_MINUS_ONE => Value::Int(-1),
            oid::LONG => Value::Long(self.read_i64()?),
            oid::LONG_ZERO => Value::Long(0),
            oid::LONG_ONE => Value::Long(1),
            oid::LONG_MINUS_ONE => Value::Long(-1),
            oid::HALF => Value::Half(self.read_f16()?),
            oid::HALF_ZERO => Value::Half(f16::ZERO),
            oid::HALF_ONE => Value::Half(f16::ONE),
            oid::HALF_MINUS_ONE => Value::Half(f16::NEG_ONE),
            oid::FLOAT => Value::Float(self.read_f32()?),
            oid::FLOAT_ZERO => Value::Float(0.0),
            oid::FLOAT_ONE => Value::Float(1.0),
            oid::FLOAT_MINUS_ONE => Value::Float(-1.0),
            oid::DOUBLE => Value::Double(self.read_f64()?),
            oid::DOUBLE_ZERO => Value::Double(0.0),
            oid::DOUBLE_ONE => Value::Double(1.0),
            oid::DOUBLE_MINUS_ONE => Value::Double(-1.0),

            oid::BOOL_TRUE => Value::Bool(true),
            oid::BOOL_FALSE => Value::Bool(false),
            oid::CHAR => Value::Char(self.read_char(oid)?),

            oid::BIG_INT => Value::BigInt(self.read_bigint(oid)?),
            oid::BIG_INT_ZERO => Value::BigInt(BigInt::from(0)),
            oid::BIG_INT_ONE => Value::BigInt(BigInt::from(1)),
            oid::BIG_INT_MINUS_ONE => Value::BigInt(BigInt::from(-1)),
            oid::DECIMAL => {
                let scale = self.read_i32()?;
                let unscaled = self.read_bigint(oid)?;
                Value::Decimal(BigDecimal::new(unscaled, scale))
            }
            oid::RATIO => {
                let numer = self.read_bigint(oid)?;
                let denom = self.read_bigint(oid)?;
                match Ratio::new(numer, denom) {
                    Some(r) => Value::Ratio(r),
                    None => malformed!(oid, "zero denominator"),
                }
            }

            oid::STRING => Value::String(self.read_string(oid)?),
            oid::STRING_EMPTY => Value::String(String::new()),
            oid::BYTES => Value::Bytes(self.read_bytes(oid)?),
            oid::BYTES_EMPTY => Value::Bytes(Bytes::new()),
            oid::BYTE_STREAM => Value::Bytes(self.read_byte_stream()?),
            oid::REGEX => {
                let src = self.read_string(oid)?;
                match Pattern::new(&src) {
                    Ok(p) => Value::Regex(p),
                    Err(e) => malformed!(oid, "invalid pattern: {}", e),
                }
            }
            oid::UUID => {
                let msb = self.read_u64()?;
                let lsb = self.read_u64()?;
                Value::Uuid(Uuid::from_u64_pair(msb, lsb))
            }

            oid::VECTOR => Value::Vector(self.read_countable(oid)?),
            oid::VECTOR_EMPTY => Value::Vector(Vec::new()),
            oid::SET => Value::Set(self.read_countable(oid)?),
            oid::SET_EMPTY => Value::Set(Vec::new()),
            oid::MAP => Value::Map(self.read_map(oid)?),
            oid::MAP_EMPTY => Value::Map(VecMap::new()),
            oid::INT_ARRAY => Value::IntArray(self.read_array(oid, |s| s.read_i32())?),
            oid::LONG_ARRAY => Value::LongArray(self.read_array(oid, |s| s.read_i64())?),
            oid::DOUBLE_ARRAY => Value::DoubleArray(self.read_array(oid, |s| s.read_f64())?),
            oid::BOOL_ARRAY => Value::BoolArray(self.read_array(oid, |s| s.read_bool(oid::BOOL_ARRAY))?),
            oid::SHORT_ARRAY => Value::ShortArray(self.read_array(oid, |s| s.read_i16())?),
            oid::FLOAT_ARRAY => Value::FloatArray(self.read_array(oid, |s| s.read_f32())?),
            oid::CHAR_ARRAY => Value::CharArray(self.read_array(oid, |s| s.read_char(oid::CHAR_ARRAY))?),
            oid::SEQ => Value::Seq(self.read_uncountable(oid)?),

            oid::INSTANT => Value::Instant(self.read_timestamp(oid)?),
            oid::DATE => {
                let days = self.read_i64()?;
                let date = days
                    .checked_add(UNIX_EPOCH_DAY_CE)
                    .and_then(|d| i32::try_from(d).ok())
                    .and_then(NaiveDate::from_num_days_from_ce_opt);
                match date {
                    Some(d) => Value::Date(d),
                    None => malformed!(oid, "epoch day {} out of range", days),
                }
            }
            oid::TIME => Value::Time(self.read_nano_of_day(oid)?),
            oid::DATE_TIME => Value::DateTime(self.read_timestamp(oid)?.naive_utc()),
            oid::OFFSET_DATE_TIME => {
                let local = self.read_timestamp(oid)?.naive_utc();
                let offset = self.read_offset(oid)?;
                match local.and_local_timezone(offset).single() {
                    Some(dt) => Value::OffsetDateTime(dt),
                    None => malformed!(oid, "{} at {} out of range", local, offset),
                }
            }
            oid::DURATION => {
                let secs = self.read_i64()?;
                let nanos = self.read_i32()?;
                let d = if nanos < 0 {
                    None
                } else {
                    TimeDelta::new(secs, nanos as u32)
                };
                match d {
                    Some(d) => Value::Duration(d),
                    None => malformed!(oid, "duration {}s {}ns out of range", secs, nanos),
                }
            }
            oid::PERIOD => {
                let years = self.read_i32()?;
                let months = self.read_i32()?;
                let days = self.read_i32()?;
                Value::Period(Period::new(years, months, days))
            }
            oid::OFFSET_TIME => {
                let time = self.read_nano_of_day(oid)?;
                let offset = self.read_offset(oid)?;
                Value::OffsetTime(OffsetTime::new(time, offset))
            }
            oid::ZONED_DATE_TIME => {
                let local = self.read_timestamp(oid)?.naive_utc();
                let zone = self.read_string(oid)?;
                Value::ZonedDateTime(ZonedDateTime::new(local, ZoneId(zone)))
            }
            oid::ZONE_ID => Value::ZoneId(ZoneId(self.read_string(oid)?)),

            oid::THROWABLE => Value::Throwable(Box::new(self.read_throwable(None)?)),
            oid::EX_INFO => {
                let data = self.read_map_value(oid)?;
                Value::Throwable(Box::new(self.read_throwable(Some(data))?))
            }
            oid::FUTURE => Value::Future(Deferred::resolved(self.read_element(oid)?)),

            _ => self.decode_extension(oid)?,
        };
        Ok(v)
    }
}

impl<R: BufRead> Reader for Decoder<R> {
    fn take_exact(&mut self, op: &'static str, buf: &mut [u8]) -> Result<()> {
        self.source
            .read_exact(buf)
            .map_err(|e| DeedError::io(op, buf.len(), e))?;
        self.position += buf.len() as u64;
        Ok(())
    }
}

impl<R: BufRead> ValueReader for Decoder<R> {
    fn read_value(&mut self) -> Result<Value> {
        let parent = self.extension;
        self.read_element(parent)
    }

    fn options(&self) -> &Options { &self.options }
}

/// Yields values until the end of the stream or the first error.
impl<R: BufRead> Iterator for Decoder<R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Result<Value>> {
        if self.done {
            return None;
        }
        match self.decode() {
            Ok(Some(v)) => Some(Ok(v)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for Decoder<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder(body: &[u8]) -> Decoder<&[u8]> {
        let mut bytes = vec![0, 1];
        bytes.extend(vec![0; HEADER_GAP]);
        bytes.extend_from_slice(body);
        let leaked: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        Decoder::create(Arc::new(Dispatch::standard()), leaked, Options::default()).unwrap()
    }

    #[test]
    fn eof_is_idempotent() {
        let mut dec = decoder(&[]);
        assert_eq!(dec.version(), 1);
        assert!(dec.decode().unwrap().is_none());
        assert!(dec.decode().unwrap().is_none());
        assert!(dec.next().is_none());
    }

    #[test]
    fn folds_decode_without_payload() {
        let dec = decoder(&[0x00, 0x1F, 0x00, 0x29, 0x00, 0x51, 0x00, 0x30]);
        let vals: Vec<Value> = dec.map(|r| r.unwrap()).collect();
        assert_eq!(
            vals,
            vec![
                Value::Long(-1),
                Value::Double(0.0),
                Value::String(String::new()),
                Value::Bool(true)
            ]
        );
    }

    #[test]
    fn unknown_oid() {
        let mut dec = decoder(&[0x7F, 0x00]);
        match dec.decode() {
            Err(DeedError::UnknownOid { oid }) => assert_eq!(oid, 0x7F00),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn truncated_vector_is_malformed() {
        // a vector of two with only one element present
        let mut dec = decoder(&[0x00, 0x60, 0, 0, 0, 2, 0x00, 0x00]);
        match dec.decode() {
            Err(DeedError::MalformedPayload { oid: tag, .. }) => assert_eq!(tag, oid::VECTOR),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn iterator_stops_after_error() {
        let mut dec = decoder(&[0x00, 0x00, 0x7F, 0x00, 0x00, 0x00]);
        assert_eq!(dec.next().map(|r| r.is_ok()), Some(true));
        assert_eq!(dec.next().map(|r| r.is_err()), Some(true));
        assert!(dec.next().is_none());
    }

    #[test]
    fn meta_requires_a_map() {
        let mut dec = decoder(&[0x00, 0x01, 0x00, 0x18, 0, 0, 0, 1, 0x00, 0x00]);
        match dec.decode() {
            Err(DeedError::MalformedPayload { oid: tag, .. }) => assert_eq!(tag, oid::META),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn zero_denominator_is_malformed() {
        let mut dec = decoder(&[0x00, 0x45, 0, 0, 0, 1, 1, 0, 0, 0, 1, 0]);
        assert!(dec.decode().is_err());
    }

    #[test]
    fn short_header_is_io_failure() {
        let src: &[u8] = &[0, 1, 0];
        match Decoder::create(Arc::new(Dispatch::new()), src, Options::default()) {
            Err(e) => assert!(e.is_eof()),
            Ok(_) => panic!("header should not parse"),
        }
    }
}
