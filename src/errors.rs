use crate::Value;
use failure::Fail;
use std::io;

/// Failures produced while encoding to or decoding from a stream.
#[derive(Debug, Fail)]
pub enum DeedError {
    /// The underlying sink or source failed, or ended early.
    #[fail(display = "i/o failure during {} ({} bytes): {}", op, size, cause)]
    IoFailure {
        /// What was being written or read.
        op: &'static str,
        /// How many bytes the operation needed.
        size: usize,
        /// The original error.
        #[fail(cause)]
        cause: io::Error,
    },

    /// A value had no registered encoder and placeholders were disabled.
    #[fail(display = "no encoder registered for type `{}`", type_name)]
    UnsupportedType {
        /// Rust type name of the rejected value.
        type_name: String,
    },

    /// An OID was read that neither the built-in table nor the registry knows.
    #[fail(display = "unknown oid {:#06x}", oid)]
    UnknownOid {
        /// The offending tag.
        oid: u16,
    },

    /// A deferred value could not be resolved.
    #[fail(display = "deferred value failed to resolve: {}", _0)]
    DeferredResolutionFailure(#[fail(cause)] DeferredFailure),

    /// A payload's contents contradict its tag.
    #[fail(display = "malformed payload for oid {:#06x}: {}", oid, reason)]
    MalformedPayload {
        /// Tag of the value being decoded.
        oid: u16,
        /// What was wrong with it.
        reason: String,
    },

    /// A decoder was registered for an OID owned by the built-in table.
    #[fail(display = "oid {:#06x} is reserved for a built-in type", oid)]
    OidConflict {
        /// The rejected tag.
        oid: u16,
    },
}

/// Reasons a deferred value did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Fail)]
pub enum DeferredFailure {
    /// The producing side went away without completing.
    #[fail(display = "interrupted")]
    Interrupted,
    /// The producer reported a failure.
    #[fail(display = "execution failed: {}", cause)]
    Failed {
        /// Message reported by the producer.
        cause: String,
    },
    /// No result arrived within the configured timeout.
    #[fail(display = "timed out after {}ms", timeout_ms)]
    TimedOut {
        /// The timeout that expired.
        timeout_ms: u64,
    },
}

/// A [`Value`] did not hold the variant a conversion asked for.
///
/// The original value is kept and can be taken back with [`ConversionError::into_value`].
#[derive(Debug, Fail)]
#[fail(display = "expected {}, found {:?}", expected, found)]
pub struct ConversionError {
    expected: &'static str,
    found: Value,
}

impl ConversionError {
    pub(crate) fn new(expected: &'static str, found: Value) -> Self { ConversionError { expected, found } }

    pub fn expected(&self) -> &'static str { self.expected }

    pub fn into_value(self) -> Value { self.found }
}

impl DeedError {
    pub(crate) fn io(op: &'static str, size: usize, cause: io::Error) -> Self {
        DeedError::IoFailure { op, size, cause }
    }

    pub(crate) fn malformed<S: Into<String>>(oid: u16, reason: S) -> Self {
        DeedError::MalformedPayload {
            oid,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported<S: Into<String>>(type_name: S) -> Self {
        DeedError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Is this the read side hitting end of input?
    pub fn is_eof(&self) -> bool {
        match self {
            DeedError::IoFailure { cause, .. } => cause.kind() == io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

impl From<DeferredFailure> for DeedError {
    fn from(f: DeferredFailure) -> Self { DeedError::DeferredResolutionFailure(f) }
}

/// Result specialised to [`DeedError`].
pub type Result<T> = std::result::Result<T, DeedError>;
