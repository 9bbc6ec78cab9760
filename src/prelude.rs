pub use crate::{
    deferred::{Deferred, Promise, Resolve},
    dispatch::Dispatch,
    encoding::{
        decode_full, decode_with, encode_full, encode_with, oid, Decoder, Encoder, Header, Reader,
        ValueReader, ValueWriter, Writer,
    },
    errors::{ConversionError, DeedError, DeferredFailure},
    inum::{BigDecimal, Ratio},
    lazy::{ByteStream, LazySeq},
    object::Object,
    options::{Options, OptionsBuilder},
    throwable::{Frame, Throwable},
    types::{OffsetTime, Pattern, Period, Unsupported, ZoneId, ZonedDateTime},
    vecmap::VecMap,
    Value,
};
pub use bytes::Bytes;
pub use half::f16;
pub use num_bigint::BigInt;
pub use std::convert::TryFrom;
