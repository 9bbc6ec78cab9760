//! # Binary encoder and decoder
//!
//! A stream is a [`Header`] followed by any number of values. Every value starts with a
//! big-endian `u16` [object identifier](oid) that fixes the shape of what follows.
//!
//! # Example
//!
//! ```
//! use deed::prelude::*;
//! use std::sync::Arc;
//!
//! let dispatch = Arc::new(Dispatch::standard());
//!
//! // write two values
//! let mut enc = Encoder::create(dispatch.clone(), Vec::new(), Options::default()).unwrap();
//! enc.encode(&Value::from("hello")).unwrap();
//! enc.encode(&Value::from(vec![1i64, 0, -1])).unwrap();
//! let bytes = enc.close().unwrap();
//!
//! // and read them back
//! let mut dec = Decoder::create(dispatch, &bytes[..], Options::default()).unwrap();
//! assert_eq!(dec.decode().unwrap(), Some(Value::from("hello")));
//! assert_eq!(
//!     dec.decode().unwrap(),
//!     Some(Value::Vector(vec![Value::Long(1), Value::Long(0), Value::Long(-1)]))
//! );
//!
//! // the end of the stream is not an error
//! assert_eq!(dec.decode().unwrap(), None);
//! ```

use crate::{
    dispatch::Dispatch,
    errors::{DeedError, Result},
    object::Object,
    options::Options,
    util::*,
    vecmap::VecMap,
    Value,
};
use std::sync::Arc;

pub mod constants;
use constants::*;
pub mod oid;
pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
pub mod header;
pub use header::Header;
pub mod encoder;
pub use encoder::Encoder;
pub mod decoder;
pub use decoder::Decoder;

/// Encodes `values` into a complete stream, header included.
///
/// # Arguments
///
/// * `dispatch` - Extension encoders to use.
/// * `options` - The `append` flag is honoured, so the header can be left out.
/// * `values` - Values to encode, in order.
pub fn encode_with(dispatch: &Arc<Dispatch>, options: &Options, values: &[Value]) -> Result<Vec<u8>> {
    let mut enc = Encoder::create(Arc::clone(dispatch), Vec::new(), options.clone())?;
    enc.encode_all(values)?;
    enc.close()
}

/// Decodes every value in `bytes`.
pub fn decode_with(dispatch: &Arc<Dispatch>, options: &Options, bytes: &[u8]) -> Result<Vec<Value>> {
    Decoder::create(Arc::clone(dispatch), bytes, options.clone())?.collect()
}

/// Encodes a single value with the standard adapters and default options.
///
/// # Example
///
/// ```
/// use deed::prelude::*;
///
/// let out = encode_full(&Value::Int(0)).unwrap();
///
/// // header: version 1 and a 30 byte gap
/// assert_eq!(&out[..2], &[0, 1]);
/// // zero folds into its own oid
/// assert_eq!(&out[32..], &[0x00, 0x19]);
/// ```
pub fn encode_full(v: &Value) -> Result<Vec<u8>> {
    encode_with(&Arc::new(Dispatch::standard()), &Options::default(), std::slice::from_ref(v))
}

/// Decodes a stream produced with the standard adapters and default options.
pub fn decode_full(bytes: &[u8]) -> Result<Vec<Value>> {
    decode_with(&Arc::new(Dispatch::standard()), &Options::default(), bytes)
}
