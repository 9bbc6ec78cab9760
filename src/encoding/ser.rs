use super::*;
use byteorder::{BigEndian, ByteOrder};
use half::f16;
use num_bigint::BigInt;

/// A sink for the primitive layer of the wire format.
///
/// Only [`Writer::put_slice`] is required; every other method is a big-endian
/// encoding on top of it.
pub trait Writer {
    /// Add raw bytes to the output. `op` names the operation for error reporting.
    fn put_slice(&mut self, op: &'static str, slice: &[u8]) -> Result<()>;

    /// Add a single byte.
    fn write_u8(&mut self, u: u8) -> Result<()> { self.put_slice("write u8", &[u]) }

    /// Add an [`i8`].
    fn write_i8(&mut self, i: i8) -> Result<()> { self.put_slice("write i8", &[i as u8]) }

    /// Add a [`bool`] as a single `0` or `1` byte.
    fn write_bool(&mut self, b: bool) -> Result<()> { self.put_slice("write bool", &[b as u8]) }

    /// Add a [`u16`].
    fn write_u16(&mut self, u: u16) -> Result<()> {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, u);
        self.put_slice("write u16", &buf)
    }

    /// Add an [`i16`].
    fn write_i16(&mut self, i: i16) -> Result<()> {
        let mut buf = [0u8; 2];
        BigEndian::write_i16(&mut buf, i);
        self.put_slice("write i16", &buf)
    }

    /// Add a [`u32`].
    fn write_u32(&mut self, u: u32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, u);
        self.put_slice("write u32", &buf)
    }

    /// Add an [`i32`].
    fn write_i32(&mut self, i: i32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_i32(&mut buf, i);
        self.put_slice("write i32", &buf)
    }

    /// Add a [`u64`].
    fn write_u64(&mut self, u: u64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_u64(&mut buf, u);
        self.put_slice("write u64", &buf)
    }

    /// Add an [`i64`].
    fn write_i64(&mut self, i: i64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_i64(&mut buf, i);
        self.put_slice("write i64", &buf)
    }

    /// Add an [`f16`] by its bit pattern.
    fn write_f16(&mut self, f: f16) -> Result<()> { self.write_u16(f.to_bits()) }

    /// Add an [`f32`].
    fn write_f32(&mut self, f: f32) -> Result<()> {
        let mut buf = [0u8; 4];
        BigEndian::write_f32(&mut buf, f);
        self.put_slice("write f32", &buf)
    }

    /// Add an [`f64`].
    fn write_f64(&mut self, f: f64) -> Result<()> {
        let mut buf = [0u8; 8];
        BigEndian::write_f64(&mut buf, f);
        self.put_slice("write f64", &buf)
    }

    /// Add a [`char`] as its `u32` scalar value.
    fn write_char(&mut self, c: char) -> Result<()> { self.write_u32(c as u32) }

    /// Add an object identifier.
    fn write_oid(&mut self, oid: u16) -> Result<()> { self.write_u16(oid) }

    /// Add a length prefix, refusing lengths that do not fit in an `i32`.
    fn write_len(&mut self, oid: u16, len: usize) -> Result<()> {
        match wire_len(len) {
            Some(l) => self.write_u32(l),
            None => Err(DeedError::malformed(
                oid,
                format!("length {} does not fit the wire format", len),
            )),
        }
    }

    /// Add a length-prefixed blob.
    fn write_bytes(&mut self, oid: u16, b: &[u8]) -> Result<()> {
        self.write_len(oid, b.len())?;
        self.put_slice("write bytes", b)
    }

    /// Add a length-prefixed UTF-8 string.
    fn write_str(&mut self, oid: u16, s: &str) -> Result<()> { self.write_bytes(oid, s.as_bytes()) }

    /// Add a [`BigInt`] as a big-endian two's complement blob.
    fn write_bigint(&mut self, oid: u16, i: &BigInt) -> Result<()> {
        self.write_bytes(oid, &i.to_signed_bytes_be())
    }

    /// Add `len` zero bytes.
    fn write_gap(&mut self, len: usize) -> Result<()> { self.put_slice("write gap", &vec![0; len]) }
}

/// A [`Writer`] that can also encode whole values, as seen by extension encoders.
pub trait ValueWriter: Writer {
    /// Encode `v`, including its OID.
    fn write_value(&mut self, v: &Value) -> Result<()>;

    /// The options the surrounding encoder was created with.
    fn options(&self) -> &Options;
}

impl Writer for Vec<u8> {
    fn put_slice(&mut self, _: &'static str, slice: &[u8]) -> Result<()> {
        self.extend_from_slice(slice);
        Ok(())
    }
}
