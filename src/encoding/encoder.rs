use super::*;
use crate::{
    deferred::Deferred,
    inum::Fold,
    rentable::Rentable,
    throwable::Throwable,
    types::Unsupported,
};
use chrono::{Datelike, NaiveTime, Timelike};
use std::{
    borrow::Borrow,
    io::{self, BufWriter, Read, Write},
    sync::Arc,
};
use tracing::{debug, trace, warn};

/// Days from 0001-01-01 to 1970-01-01.
pub(crate) const UNIX_EPOCH_DAY_CE: i64 = 719_163;
pub(crate) const NANOS_PER_SEC: i64 = 1_000_000_000;

/// Writes values to a sink.
///
/// The encoder adds no buffering of its own; see [`Encoder::buffered`].
pub struct Encoder<W: Write> {
    sink: W,
    dispatch: Arc<Dispatch>,
    options: Options,
    chunk: Rentable<Value>,
    position: u64,
}

impl<W: Write> Encoder<BufWriter<W>> {
    /// Creates an encoder over `sink` wrapped in a buffer of `output_buffer_size`.
    pub fn buffered(dispatch: Arc<Dispatch>, sink: W, options: Options) -> Result<Self> {
        let sink = BufWriter::with_capacity(options.output_buffer_size(), sink);
        Encoder::create(dispatch, sink, options)
    }
}

impl<W: Write> Encoder<W> {
    /// Creates an encoder and writes the header, unless `options.append()` is set.
    pub fn create(dispatch: Arc<Dispatch>, sink: W, options: Options) -> Result<Self> {
        let mut enc = Encoder {
            sink,
            dispatch,
            chunk: Rentable::new(Vec::with_capacity(options.object_chunk_size())),
            options,
            position: 0,
        };
        if !enc.options.append() {
            Header::default().write(&mut enc)?;
        }
        debug!(append = enc.options.append(), "encoder created");
        Ok(enc)
    }

    pub fn options(&self) -> &Options { &self.options }

    /// Bytes written so far, header included.
    pub fn position(&self) -> u64 { self.position }

    /// Encodes one value.
    ///
    /// Deferred values are resolved and the encoder for an [`Object`] is chosen before
    /// anything is written, so a failure there leaves the sink untouched.
    pub fn encode(&mut self, v: &Value) -> Result<()> {
        match self.settle(v)? {
            Some(settled) => self.encode_value(&settled),
            None => self.encode_value(v),
        }
    }

    /// Encodes each value in turn as a top level value, stopping after
    /// `uncountable_max_items` of them.
    ///
    /// Returns how many values were written.
    pub fn encode_all<I>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: Borrow<Value>,
    {
        let limit = self.options.uncountable_max_items();
        let mut values = values.into_iter();
        let mut written = 0;
        while limit.map_or(true, |m| written < m) {
            match values.next() {
                Some(v) => self.encode(v.borrow())?,
                None => return Ok(written),
            }
            written += 1;
        }
        warn!(limit = written, "item limit reached, remaining values dropped");
        Ok(written)
    }

    /// Writes `{oid, len, items}`.
    pub fn encode_countable<I>(&mut self, oid: u16, items: I) -> Result<()>
    where
        I: IntoIterator,
        I::IntoIter: ExactSizeIterator,
        I::Item: Borrow<Value>,
    {
        let items = items.into_iter();
        self.write_oid(oid)?;
        self.write_len(oid, items.len())?;
        for item in items {
            self.encode(item.borrow())?;
        }
        Ok(())
    }

    /// Writes `items` as chunks of at most `object_chunk_size` followed by a zero
    /// terminator. At most `uncountable_max_items` items are pulled from the source.
    ///
    /// Returns how many items were written.
    pub fn encode_uncountable<I>(&mut self, oid: u16, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = Value>,
    {
        self.write_oid(oid)?;
        let mut chunk = self.chunk.rent();
        let written = self.write_chunks(oid, &mut chunk, items.into_iter());
        chunk.clear();
        self.chunk.replace(chunk);
        let written = written?;
        self.write_u32(END_OF_CHUNKS)?;
        Ok(written)
    }

    fn write_chunks<I>(&mut self, oid: u16, chunk: &mut Vec<Value>, mut items: I) -> Result<usize>
    where
        I: Iterator<Item = Value>,
    {
        let size = self.options.object_chunk_size();
        let limit = self.options.uncountable_max_items();
        let mut written = 0;
        while limit.map_or(true, |m| written < m) {
            match items.next() {
                Some(v) => chunk.push(v),
                None => break,
            }
            written += 1;
            if chunk.len() == size {
                self.flush_chunk(oid, chunk)?;
            }
        }
        if !chunk.is_empty() {
            self.flush_chunk(oid, chunk)?;
        }
        if limit == Some(written) {
            warn!(limit = written, "uncountable item limit reached, remaining items dropped");
        }
        Ok(written)
    }

    fn flush_chunk(&mut self, oid: u16, chunk: &mut Vec<Value>) -> Result<()> {
        trace!(items = chunk.len(), "flushing chunk");
        self.write_len(oid, chunk.len())?;
        for v in chunk.drain(..) {
            self.encode(&v)?;
        }
        Ok(())
    }

    /// Chunked encoding of a sequence already in memory.
    fn encode_seq(&mut self, items: &[Value]) -> Result<()> {
        let size = self.options.object_chunk_size();
        let take = match self.options.uncountable_max_items() {
            Some(m) if m < items.len() => {
                warn!(limit = m, len = items.len(), "uncountable item limit reached, remaining items dropped");
                m
            }
            _ => items.len(),
        };
        self.write_oid(oid::SEQ)?;
        for chunk in items[..take].chunks(size) {
            trace!(items = chunk.len(), "flushing chunk");
            self.write_len(oid::SEQ, chunk.len())?;
            for v in chunk {
                self.encode(v)?;
            }
        }
        self.write_u32(END_OF_CHUNKS)
    }

    /// Copies `source` to the stream in chunks of `byte_chunk_size`.
    ///
    /// Returns how many bytes were copied.
    pub fn encode_byte_stream<R: Read>(&mut self, mut source: R) -> Result<u64> {
        let size = self.options.byte_chunk_size();
        let mut buf = vec![0u8; size];
        let mut copied = 0u64;
        self.write_oid(oid::BYTE_STREAM)?;
        loop {
            let n = fill(&mut source, &mut buf)?;
            if n == 0 {
                break;
            }
            trace!(bytes = n, "flushing byte chunk");
            self.write_bytes(oid::BYTE_STREAM, &buf[..n])?;
            copied += n as u64;
            if n < size {
                break;
            }
        }
        self.write_u32(END_OF_CHUNKS)?;
        Ok(copied)
    }

    /// Writes `{MAP, len, (key, value)*}`, or `MAP_EMPTY`.
    pub fn encode_map(&mut self, m: &VecMap<Value, Value>) -> Result<()> {
        if m.is_empty() {
            return self.write_oid(oid::MAP_EMPTY);
        }
        self.write_oid(oid::MAP)?;
        self.write_len(oid::MAP, m.len())?;
        for (k, v) in m.iter() {
            self.encode(k)?;
            self.encode(v)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(|e| DeedError::io("flush", 0, e))
    }

    /// Flushes and hands back the sink.
    pub fn close(mut self) -> Result<W> {
        self.flush()?;
        debug!(position = self.position, "encoder closed");
        Ok(self.sink)
    }

    /// Replaces the parts of `v` that must be decided before writing.
    ///
    /// `None` means `v` can be written as is.
    fn settle(&self, v: &Value) -> Result<Option<Value>> {
        match v {
            Value::Object(o) if !self.dispatch.has_encoder(o.type_id()) => {
                Ok(Some(Value::Unsupported(self.placeholder(o)?)))
            }
            Value::Future(d) => {
                let resolved = d.resolve(self.options.deref_timeout())?;
                let resolved = match self.settle(&resolved)? {
                    Some(s) => s,
                    None => resolved,
                };
                Ok(Some(Value::Future(Deferred::resolved(resolved))))
            }
            Value::WithMeta(inner, meta) if self.options.save_meta() => Ok(self
                .settle(inner)?
                .map(|s| Value::WithMeta(Box::new(s), meta.clone()))),
            Value::Time(t) => no_leap_second(oid::TIME, t).map(|_| None),
            Value::OffsetTime(t) => no_leap_second(oid::OFFSET_TIME, &t.time).map(|_| None),
            _ => Ok(None),
        }
    }

    fn placeholder(&self, o: &Object) -> Result<Unsupported> {
        if self.options.encode_unsupported() {
            warn!(type_name = o.type_name(), "no encoder registered, writing placeholder");
            Ok(Unsupported::of(o))
        } else {
            Err(DeedError::unsupported(o.type_name()))
        }
    }

    fn write_folded<T: Fold>(
        &mut self,
        base: u16,
        n: &T,
        payload: impl FnOnce(&mut Self) -> Result<()>,
    ) -> Result<()> {
        match n.folded() {
            Some(f) => self.write_oid(f.oid(base)),
            None => {
                self.write_oid(base)?;
                payload(self)
            }
        }
    }

    fn write_instant(&mut self, secs: i64, nanos: u32) -> Result<()> {
        self.write_i64(secs)?;
        self.write_i32(nanos as i32)
    }

    fn write_throwable(&mut self, t: &Throwable) -> Result<()> {
        match &t.data {
            Some(data) => {
                self.write_oid(oid::EX_INFO)?;
                self.encode_map(data)?;
            }
            None => self.write_oid(oid::THROWABLE)?,
        }
        self.write_bool(t.message.is_some())?;
        if let Some(msg) = &t.message {
            self.write_str(oid::THROWABLE, msg)?;
        }
        self.write_len(oid::THROWABLE, t.frames.len())?;
        for f in &t.frames {
            self.write_str(oid::THROWABLE, &f.class)?;
            self.write_str(oid::THROWABLE, &f.method)?;
            self.write_bool(f.file.is_some())?;
            if let Some(file) = &f.file {
                self.write_str(oid::THROWABLE, file)?;
            }
            self.write_i32(f.line)?;
        }
        self.write_bool(t.cause.is_some())?;
        if let Some(cause) = &t.cause {
            self.write_throwable(cause)?;
        }
        self.write_len(oid::THROWABLE, t.suppressed.len())?;
        for s in &t.suppressed {
            self.write_throwable(s)?;
        }
        Ok(())
    }

    fn encode_object(&mut self, o: &Object) -> Result<()> {
        let dispatch = Arc::clone(&self.dispatch);
        match dispatch.encoder(o.type_id()) {
            Some(enc) => enc(o, self),
            None => {
                let u = self.placeholder(o)?;
                self.encode_value(&Value::Unsupported(u))
            }
        }
    }

    fn encode_value(&mut self, v: &Value) -> Result<()> {
        match v {
            Value::Null => self.write_oid(oid::NULL),
            Value::Bool(true) => self.write_oid(oid::BOOL_TRUE),
            Value::Bool(false) => self.write_oid(oid::BOOL_FALSE),
            Value::Byte(i) => self.write_folded(oid::BYTE, i, |s| s.write_i8(*i)),
            Value::Short(i) => self.write_folded(oid::SHORT, i, |s| s.write_i16(*i)),
            Value::Int(i) => self.write_folded(oid::INT, i, |s| s.write_i32(*i)),
            Value::Long(i) => self.write_folded(oid::LONG, i, |s| s.write_i64(*i)),
            Value::Half(f) => self.write_folded(oid::HALF, f, |s| s.write_f16(*f)),
            Value::Float(f) => self.write_folded(oid::FLOAT, f, |s| s.write_f32(*f)),
            Value::Double(f) => self.write_folded(oid::DOUBLE, f, |s| s.write_f64(*f)),
            Value::Char(c) => {
                self.write_oid(oid::CHAR)?;
                self.write_char(*c)
            }
            Value::BigInt(i) => self.write_folded(oid::BIG_INT, i, |s| s.write_bigint(oid::BIG_INT, i)),
            Value::Decimal(d) => {
                self.write_oid(oid::DECIMAL)?;
                self.write_i32(d.scale())?;
                self.write_bigint(oid::DECIMAL, d.unscaled())
            }
            Value::Ratio(r) => {
                self.write_oid(oid::RATIO)?;
                self.write_bigint(oid::RATIO, r.numer())?;
                self.write_bigint(oid::RATIO, r.denom())
            }
            Value::String(s) if s.is_empty() => self.write_oid(oid::STRING_EMPTY),
            Value::String(s) => {
                self.write_oid(oid::STRING)?;
                self.write_str(oid::STRING, s)
            }
            Value::Bytes(b) if b.is_empty() => self.write_oid(oid::BYTES_EMPTY),
            Value::Bytes(b) => {
                self.write_oid(oid::BYTES)?;
                self.write_bytes(oid::BYTES, b)
            }
            Value::Uuid(u) => {
                let (msb, lsb) = u.as_u64_pair();
                self.write_oid(oid::UUID)?;
                self.write_u64(msb)?;
                self.write_u64(lsb)
            }
            Value::Regex(p) => {
                self.write_oid(oid::REGEX)?;
                self.write_str(oid::REGEX, p.as_str())
            }
            Value::Instant(t) => {
                self.write_oid(oid::INSTANT)?;
                self.write_instant(t.timestamp(), t.timestamp_subsec_nanos())
            }
            Value::Date(d) => {
                self.write_oid(oid::DATE)?;
                self.write_i64(i64::from(d.num_days_from_ce()) - UNIX_EPOCH_DAY_CE)
            }
            Value::Time(t) => {
                self.write_oid(oid::TIME)?;
                self.write_i64(nano_of_day(t))
            }
            Value::OffsetTime(t) => {
                self.write_oid(oid::OFFSET_TIME)?;
                self.write_i64(nano_of_day(&t.time))?;
                self.write_i32(t.offset.local_minus_utc())
            }
            Value::DateTime(dt) => {
                let utc = dt.and_utc();
                self.write_oid(oid::DATE_TIME)?;
                self.write_instant(utc.timestamp(), utc.timestamp_subsec_nanos())
            }
            Value::OffsetDateTime(dt) => {
                let local = dt.naive_local().and_utc();
                self.write_oid(oid::OFFSET_DATE_TIME)?;
                self.write_instant(local.timestamp(), local.timestamp_subsec_nanos())?;
                self.write_i32(dt.offset().local_minus_utc())
            }
            Value::Duration(d) => {
                let (mut secs, mut nanos) = (d.num_seconds(), d.subsec_nanos());
                if nanos < 0 {
                    secs -= 1;
                    nanos += NANOS_PER_SEC as i32;
                }
                self.write_oid(oid::DURATION)?;
                self.write_i64(secs)?;
                self.write_i32(nanos)
            }
            Value::Period(p) => {
                self.write_oid(oid::PERIOD)?;
                self.write_i32(p.years)?;
                self.write_i32(p.months)?;
                self.write_i32(p.days)
            }
            Value::ZonedDateTime(z) => {
                let local = z.local.and_utc();
                self.write_oid(oid::ZONED_DATE_TIME)?;
                self.write_instant(local.timestamp(), local.timestamp_subsec_nanos())?;
                self.write_str(oid::ZONED_DATE_TIME, z.zone.as_str())
            }
            Value::ZoneId(z) => {
                self.write_oid(oid::ZONE_ID)?;
                self.write_str(oid::ZONE_ID, z.as_str())
            }
            Value::Vector(v) if v.is_empty() => self.write_oid(oid::VECTOR_EMPTY),
            Value::Vector(v) => self.encode_countable(oid::VECTOR, v),
            Value::Set(v) if v.is_empty() => self.write_oid(oid::SET_EMPTY),
            Value::Set(v) => self.encode_countable(oid::SET, v),
            Value::Map(m) => self.encode_map(m),
            Value::IntArray(a) => {
                self.write_oid(oid::INT_ARRAY)?;
                self.write_len(oid::INT_ARRAY, a.len())?;
                a.iter().try_for_each(|i| self.write_i32(*i))
            }
            Value::LongArray(a) => {
                self.write_oid(oid::LONG_ARRAY)?;
                self.write_len(oid::LONG_ARRAY, a.len())?;
                a.iter().try_for_each(|i| self.write_i64(*i))
            }
            Value::DoubleArray(a) => {
                self.write_oid(oid::DOUBLE_ARRAY)?;
                self.write_len(oid::DOUBLE_ARRAY, a.len())?;
                a.iter().try_for_each(|f| self.write_f64(*f))
            }
            Value::BoolArray(a) => {
                self.write_oid(oid::BOOL_ARRAY)?;
                self.write_len(oid::BOOL_ARRAY, a.len())?;
                a.iter().try_for_each(|b| self.write_bool(*b))
            }
            Value::ShortArray(a) => {
                self.write_oid(oid::SHORT_ARRAY)?;
                self.write_len(oid::SHORT_ARRAY, a.len())?;
                a.iter().try_for_each(|i| self.write_i16(*i))
            }
            Value::FloatArray(a) => {
                self.write_oid(oid::FLOAT_ARRAY)?;
                self.write_len(oid::FLOAT_ARRAY, a.len())?;
                a.iter().try_for_each(|f| self.write_f32(*f))
            }
            Value::CharArray(a) => {
                self.write_oid(oid::CHAR_ARRAY)?;
                self.write_len(oid::CHAR_ARRAY, a.len())?;
                a.iter().try_for_each(|c| self.write_char(*c))
            }
            Value::Seq(items) => self.encode_seq(items),
            Value::Lazy(seq) => {
                let mut items = seq.lock();
                self.encode_uncountable(oid::SEQ, &mut *items).map(drop)
            }
            Value::Stream(stream) => {
                let mut source = stream.lock();
                self.encode_byte_stream(&mut *source).map(drop)
            }
            Value::Future(d) => {
                let resolved = d.resolve(self.options.deref_timeout())?;
                self.write_oid(oid::FUTURE)?;
                self.encode_value(&resolved)
            }
            Value::Throwable(t) => self.write_throwable(t),
            Value::Unsupported(u) => {
                self.write_oid(oid::UNSUPPORTED)?;
                self.write_str(oid::UNSUPPORTED, &u.class_name)?;
                self.write_str(oid::UNSUPPORTED, &u.content)
            }
            Value::Object(o) => self.encode_object(o),
            Value::WithMeta(inner, meta) if self.options.save_meta() => {
                self.write_oid(oid::META)?;
                self.encode_map(meta)?;
                self.encode_value(inner)
            }
            Value::WithMeta(inner, _) => self.encode(inner),
        }
    }
}

fn nano_of_day(t: &NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight()) * NANOS_PER_SEC + i64::from(t.nanosecond())
}

/// A nano-of-day cannot tell 23:59:60 from the next midnight.
fn no_leap_second(oid: u16, t: &NaiveTime) -> Result<()> {
    if i64::from(t.nanosecond()) >= NANOS_PER_SEC {
        return Err(DeedError::malformed(oid, format!("leap second {} has no nano-of-day", t)));
    }
    Ok(())
}

/// Reads until `buf` is full or the source is exhausted.
fn fill<R: Read>(source: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(DeedError::io("read byte stream", buf.len() - filled, e)),
        }
    }
    Ok(filled)
}

impl<W: Write> Writer for Encoder<W> {
    fn put_slice(&mut self, op: &'static str, slice: &[u8]) -> Result<()> {
        self.sink
            .write_all(slice)
            .map_err(|e| DeedError::io(op, slice.len(), e))?;
        self.position += slice.len() as u64;
        Ok(())
    }
}

impl<W: Write> ValueWriter for Encoder<W> {
    fn write_value(&mut self, v: &Value) -> Result<()> { self.encode(v) }

    fn options(&self) -> &Options { &self.options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lazy::{ByteStream, LazySeq};

    fn encoder_with(options: Options) -> Encoder<Vec<u8>> {
        Encoder::create(Arc::new(Dispatch::standard()), Vec::new(), options).unwrap()
    }

    fn body(enc: Encoder<Vec<u8>>) -> Vec<u8> { enc.close().unwrap()[HEADER_LEN..].to_vec() }

    fn u32s(bytes: &[u8]) -> Vec<u32> {
        bytes.chunks(4).map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]])).collect()
    }

    #[test]
    fn header_written_unless_appending() {
        let enc = encoder_with(Options::default());
        assert_eq!(enc.position(), HEADER_LEN as u64);
        let enc = encoder_with(Options::builder().append(true).build());
        assert_eq!(enc.close().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn chunk_layout() {
        let mut enc = encoder_with(Options::builder().object_chunk_size(2).build());
        let n = enc
            .encode_uncountable(oid::SEQ, (0..5).map(|_| Value::Null))
            .unwrap();
        assert_eq!(n, 5);
        let out = body(enc);
        assert_eq!(
            out,
            vec![
                0x00, 0x70, // SEQ
                0, 0, 0, 2, 0, 0, 0, 0, // chunk of two NULLs
                0, 0, 0, 2, 0, 0, 0, 0, // and another
                0, 0, 0, 1, 0, 0, // a trailing partial chunk
                0, 0, 0, 0, // terminator
            ]
        );
    }

    #[test]
    fn exact_multiple_has_no_empty_chunk() {
        let mut enc = encoder_with(Options::builder().object_chunk_size(3).build());
        enc.encode_uncountable(oid::SEQ, vec![Value::Null; 3]).unwrap();
        let out = body(enc);
        assert_eq!(out.len(), 2 + 4 + 3 * 2 + 4);
    }

    #[test]
    fn limit_stops_pulling_items() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static PULLED: AtomicUsize = AtomicUsize::new(0);
        let source = (0..).map(|i| {
            PULLED.fetch_add(1, Ordering::SeqCst);
            Value::Long(i)
        });
        let mut enc = encoder_with(Options::builder().uncountable_max_items(Some(7)).build());
        assert_eq!(enc.encode_uncountable(oid::SEQ, source).unwrap(), 7);
        assert_eq!(PULLED.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn empty_uncountable_is_just_terminated() {
        let mut enc = encoder_with(Options::default());
        enc.encode(&Value::Lazy(LazySeq::new(Vec::new()))).unwrap();
        assert_eq!(body(enc), vec![0x00, 0x70, 0, 0, 0, 0]);
    }

    #[test]
    fn byte_stream_chunks() {
        let mut enc = encoder_with(Options::builder().byte_chunk_size(4).build());
        let data: Vec<u8> = (0..10).collect();
        enc.encode(&Value::Stream(ByteStream::new(std::io::Cursor::new(data))))
            .unwrap();
        let out = body(enc);
        assert_eq!(&out[..2], &[0x00, 0x54]);
        assert_eq!(u32s(&out[2..6]), vec![4]);
        assert_eq!(&out[6..10], &[0, 1, 2, 3]);
        assert_eq!(u32s(&out[out.len() - 10..out.len() - 6]), vec![2]);
        assert_eq!(&out[out.len() - 6..out.len() - 4], &[8, 9]);
        assert_eq!(&out[out.len() - 4..], &[0, 0, 0, 0]);
    }

    #[test]
    fn unsupported_without_placeholder_writes_nothing() {
        #[derive(Debug, PartialEq)]
        struct Opaque;

        let mut enc = encoder_with(Options::builder().encode_unsupported(false).build());
        let before = enc.position();
        let v = Value::object(Opaque).with_meta(vec![(Value::from("k"), Value::Int(1))].into());
        match enc.encode(&v) {
            Err(DeedError::UnsupportedType { type_name }) => assert!(type_name.ends_with("Opaque")),
            r => panic!("unexpected {:?}", r),
        }
        assert_eq!(enc.position(), before);
    }

    #[test]
    fn failed_deferred_writes_nothing() {
        let (_p, d) = Deferred::promise();
        let mut enc = encoder_with(
            Options::builder()
                .deref_timeout(std::time::Duration::from_millis(10))
                .build(),
        );
        let before = enc.position();
        assert!(enc.encode(&Value::Future(d)).is_err());
        assert_eq!(enc.position(), before);
    }

    #[test]
    fn extension_oid_frames_its_own_chunks() {
        let mut enc = encoder_with(Options::builder().object_chunk_size(2).build());
        enc.encode_uncountable(0x8002, vec![Value::Null; 3]).unwrap();
        assert_eq!(
            body(enc),
            vec![0x80, 0x02, 0, 0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn encode_all_counts_values() {
        let mut enc = encoder_with(Options::default());
        assert_eq!(enc.encode_all(&[Value::Null, Value::Int(1)]).unwrap(), 2);
        assert_eq!(enc.encode_all(Vec::<Value>::new()).unwrap(), 0);
        assert_eq!(body(enc), vec![0x00, 0x00, 0x00, 0x1A]);
    }

    #[test]
    fn encode_all_stops_at_item_limit() {
        let mut pulled = 0;
        let source = std::iter::repeat_with(|| {
            pulled += 1;
            Value::Bool(true)
        });
        let mut enc = encoder_with(Options::builder().uncountable_max_items(Some(3)).build());
        assert_eq!(enc.encode_all(source).unwrap(), 3);
        assert_eq!(body(enc), vec![0x00, 0x30, 0x00, 0x30, 0x00, 0x30]);
        assert_eq!(pulled, 3);
    }

    #[test]
    fn leap_second_time_is_refused_before_writing() {
        use chrono::FixedOffset;

        let leap = NaiveTime::from_hms_nano_opt(23, 59, 59, 1_500_000_000).unwrap();
        let offset = crate::types::OffsetTime::new(leap, FixedOffset::east_opt(3600).unwrap());
        let mut enc = encoder_with(Options::default());
        let before = enc.position();
        for (v, expected) in vec![(Value::Time(leap), oid::TIME), (Value::OffsetTime(offset), oid::OFFSET_TIME)] {
            match enc.encode(&v.with_meta(vec![(Value::from("k"), Value::Null)].into())) {
                Err(DeedError::MalformedPayload { oid: tag, .. }) => assert_eq!(tag, expected),
                r => panic!("unexpected {:?}", r),
            }
        }
        assert_eq!(enc.position(), before);
    }

    #[test]
    fn meta_dropped_when_disabled() {
        let v = Value::Int(5).with_meta(vec![(Value::from("k"), Value::Null)].into());
        let mut enc = encoder_with(Options::builder().save_meta(false).build());
        enc.encode(&v).unwrap();
        assert_eq!(body(enc), vec![0x00, 0x18, 0, 0, 0, 5]);
    }
}
