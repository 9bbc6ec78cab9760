//! The registry of extension encoders and decoders.
//!
//! Encoders are keyed by the concrete Rust type inside an [`Object`] and must write
//! their own OID followed by the payload. Decoders are keyed by OID and are called
//! with the OID already consumed.
//!
//! # Example
//!
//! ```
//! use deed::prelude::*;
//!
//! #[derive(Debug, PartialEq)]
//! struct Celsius(f64);
//!
//! const CELSIUS: u16 = 0x8001;
//!
//! let mut dispatch = Dispatch::new();
//! dispatch
//!     .register::<Celsius, _, _>(
//!         CELSIUS,
//!         |c, w| {
//!             w.write_oid(CELSIUS)?;
//!             w.write_f64(c.0)
//!         },
//!         |r| Ok(Value::object(Celsius(r.read_f64()?))),
//!     )
//!     .unwrap();
//!
//! let dispatch = std::sync::Arc::new(dispatch);
//! let bytes = encode_with(&dispatch, &Options::default(), &[Value::object(Celsius(21.5))]).unwrap();
//! let back = decode_with(&dispatch, &Options::default(), &bytes).unwrap();
//! assert_eq!(back, vec![Value::object(Celsius(21.5))]);
//! ```

use crate::{
    encoding::{oid, ValueReader, ValueWriter},
    errors::{DeedError, Result},
    object::{Extension, Object},
    Value,
};
use hashbrown::HashMap;
use std::{any::TypeId, fmt};
use tracing::warn;

/// Encodes an [`Object`] whose concrete type was registered.
pub type EncodeFn = Box<dyn Fn(&Object, &mut dyn ValueWriter) -> Result<()> + Send + Sync>;

/// Decodes the payload following a registered OID.
pub type DecodeFn = Box<dyn Fn(&mut dyn ValueReader) -> Result<Value> + Send + Sync>;

/// Extension handlers, looked up by type when encoding and by OID when decoding.
#[derive(Default)]
pub struct Dispatch {
    encoders: HashMap<TypeId, EncodeFn>,
    decoders: HashMap<u16, DecodeFn>,
}

impl Dispatch {
    /// An empty registry.
    pub fn new() -> Self { Self::default() }

    /// A registry holding the bundled std adapters.
    pub fn standard() -> Self {
        let mut d = Dispatch::new();
        if let Err(e) = crate::adapters::register_std(&mut d) {
            warn!(error = %e, "std adapters not registered");
        }
        d
    }

    /// Registers the encoder for `T`, replacing any previous one.
    pub fn register_encoder<T, F>(&mut self, f: F) -> &mut Self
    where
        T: Extension,
        F: Fn(&T, &mut dyn ValueWriter) -> Result<()> + Send + Sync + 'static,
    {
        let enc: EncodeFn = Box::new(move |obj, w| match obj.downcast_ref::<T>() {
            Some(t) => f(t, w),
            None => Err(DeedError::unsupported(obj.type_name())),
        });
        self.encoders.insert(TypeId::of::<T>(), enc);
        self
    }

    /// Registers the decoder for `oid`, replacing any previous one.
    ///
    /// OIDs of the built-in catalogue are refused with [`DeedError::OidConflict`].
    pub fn register_decoder<F>(&mut self, oid: u16, f: F) -> Result<&mut Self>
    where
        F: Fn(&mut dyn ValueReader) -> Result<Value> + Send + Sync + 'static,
    {
        if oid::is_builtin(oid) {
            return Err(DeedError::OidConflict { oid });
        }
        self.decoders.insert(oid, Box::new(f));
        Ok(self)
    }

    /// Registers both directions for `T` under `oid`.
    pub fn register<T, E, D>(&mut self, oid: u16, enc: E, dec: D) -> Result<&mut Self>
    where
        T: Extension,
        E: Fn(&T, &mut dyn ValueWriter) -> Result<()> + Send + Sync + 'static,
        D: Fn(&mut dyn ValueReader) -> Result<Value> + Send + Sync + 'static,
    {
        self.register_decoder(oid, dec)?;
        Ok(self.register_encoder::<T, E>(enc))
    }

    pub fn has_encoder(&self, id: TypeId) -> bool { self.encoders.contains_key(&id) }

    pub fn has_decoder(&self, oid: u16) -> bool { self.decoders.contains_key(&oid) }

    pub(crate) fn encoder(&self, id: TypeId) -> Option<&EncodeFn> { self.encoders.get(&id) }

    pub(crate) fn decoder(&self, oid: u16) -> Option<&DecodeFn> { self.decoders.get(&oid) }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut oids: Vec<_> = self.decoders.keys().collect();
        oids.sort();
        f.debug_struct("Dispatch")
            .field("encoders", &self.encoders.len())
            .field("decoders", &oids)
            .finish()
    }
}
