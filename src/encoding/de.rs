use super::*;
use byteorder::{BigEndian, ByteOrder};
use bytes::{Bytes, BytesMut};
use half::f16;
use num_bigint::BigInt;
use std::{cmp, io::Read};

/// A source for the primitive layer of the wire format.
///
/// Only [`Reader::take_exact`] is required. A source that ends before `buf` is filled
/// must report [`DeedError::IoFailure`].
pub trait Reader {
    /// Fill `buf` completely from the input. `op` names the operation for error reporting.
    fn take_exact(&mut self, op: &'static str, buf: &mut [u8]) -> Result<()>;

    /// Read a single byte.
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.take_exact("read u8", &mut buf)?;
        Ok(buf[0])
    }

    /// Read an [`i8`].
    fn read_i8(&mut self) -> Result<i8> { Ok(self.read_u8()? as i8) }

    /// Read a [`bool`], rejecting any byte other than `0` or `1`.
    fn read_bool(&mut self, oid: u16) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            b => malformed!(oid, "{} is not a boolean", b),
        }
    }

    /// Read a [`u16`].
    fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.take_exact("read u16", &mut buf)?;
        Ok(BigEndian::read_u16(&buf))
    }

    /// Read an [`i16`].
    fn read_i16(&mut self) -> Result<i16> { Ok(self.read_u16()? as i16) }

    /// Read a [`u32`].
    fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.take_exact("read u32", &mut buf)?;
        Ok(BigEndian::read_u32(&buf))
    }

    /// Read an [`i32`].
    fn read_i32(&mut self) -> Result<i32> { Ok(self.read_u32()? as i32) }

    /// Read a [`u64`].
    fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        self.take_exact("read u64", &mut buf)?;
        Ok(BigEndian::read_u64(&buf))
    }

    /// Read an [`i64`].
    fn read_i64(&mut self) -> Result<i64> { Ok(self.read_u64()? as i64) }

    /// Read an [`f16`] from its bit pattern.
    fn read_f16(&mut self) -> Result<f16> { Ok(f16::from_bits(self.read_u16()?)) }

    /// Read an [`f32`].
    fn read_f32(&mut self) -> Result<f32> { Ok(f32::from_bits(self.read_u32()?)) }

    /// Read an [`f64`].
    fn read_f64(&mut self) -> Result<f64> { Ok(f64::from_bits(self.read_u64()?)) }

    /// Read a [`char`] from its scalar value.
    fn read_char(&mut self, oid: u16) -> Result<char> {
        let u = self.read_u32()?;
        match std::char::from_u32(u) {
            Some(c) => Ok(c),
            None => malformed!(oid, "{:#x} is not a unicode scalar value", u),
        }
    }

    /// Read an object identifier.
    fn read_oid(&mut self) -> Result<u16> { self.read_u16() }

    /// Read a length prefix. Values with the sign bit set are malformed.
    fn read_len(&mut self, oid: u16) -> Result<usize> {
        let len = self.read_i32()?;
        if len < 0 {
            malformed!(oid, "negative length {}", len)
        }
        Ok(len as usize)
    }

    /// Read a length-prefixed blob.
    ///
    /// The blob is filled in bounded pieces, so a corrupt length fails on the short
    /// read instead of on allocation.
    fn read_bytes(&mut self, oid: u16) -> Result<Bytes> {
        let len = self.read_len(oid)?;
        self.read_raw(len)
    }

    /// Read exactly `len` bytes without a prefix.
    fn read_raw(&mut self, len: usize) -> Result<Bytes> {
        let mut out = BytesMut::with_capacity(cmp::min(len, READ_PIECE));
        while out.len() < len {
            let start = out.len();
            let piece = cmp::min(len - start, READ_PIECE);
            out.resize(start + piece, 0);
            self.take_exact("read bytes", &mut out[start..])?;
        }
        Ok(out.freeze())
    }

    /// Read a length-prefixed UTF-8 string.
    fn read_string(&mut self, oid: u16) -> Result<String> {
        let bytes = self.read_bytes(oid)?;
        match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            Err(e) => malformed!(oid, "invalid utf-8: {}", e),
        }
    }

    /// Read a big-endian two's complement [`BigInt`].
    fn read_bigint(&mut self, oid: u16) -> Result<BigInt> {
        let bytes = self.read_bytes(oid)?;
        if bytes.is_empty() {
            malformed!(oid, "empty integer payload")
        }
        Ok(BigInt::from_signed_bytes_be(&bytes))
    }

    /// Discard `len` bytes.
    fn skip(&mut self, len: usize) -> Result<()> { self.read_raw(len).map(drop) }
}

/// A [`Reader`] that can also decode whole values, as seen by extension decoders.
pub trait ValueReader: Reader {
    /// Decode the next value. End of input here is an error.
    fn read_value(&mut self) -> Result<Value>;

    /// The options the surrounding decoder was created with.
    fn options(&self) -> &Options;
}

impl<'a> Reader for &'a [u8] {
    fn take_exact(&mut self, op: &'static str, buf: &mut [u8]) -> Result<()> {
        self.read_exact(buf).map_err(|e| DeedError::io(op, buf.len(), e))
    }
}
