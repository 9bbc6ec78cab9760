/// Converts a collection length to the `u32` used on the wire.
///
/// Lengths above `i32::MAX` are not representable (readers treat them as negative).
///
/// # Example
///
/// ```
/// use deed::util::wire_len;
///
/// assert_eq!(wire_len(3), Some(3u32));
/// assert_eq!(wire_len(1usize << 31), None);
/// ```
pub fn wire_len(len: usize) -> Option<u32> {
    if len <= i32::max_value() as usize {
        Some(len as u32)
    } else {
        None
    }
}

#[macro_export]
/// Helper macro to compose `From` implementations.
macro_rules! compose_from {
    ($to:tt, $mid:tt, $from:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self { Self::from($mid::from(f)) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_fn {
    ($to:ty, $from:ty, $fn:expr) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $fn(f) }
        }
    };
}

#[macro_export]
/// Helper macro to make implementing `From` easier.
macro_rules! from_as {
    ($to:tt, $from:ty, $as:ty) => {
        impl From<$from> for $to {
            fn from(f: $from) -> $to { $to::from(f as $as) }
        }
    };
}

#[macro_export]
/// Returns early with a [`DeedError::MalformedPayload`](crate::DeedError).
macro_rules! malformed {
    ($oid:expr, $($arg:tt)*) => {
        return Err($crate::errors::DeedError::MalformedPayload {
            oid: $oid,
            reason: format!($($arg)*),
        })
    };
}
