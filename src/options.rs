//! Encoder and decoder configuration.
//!
//! # Example
//!
//! ```
//! use deed::prelude::*;
//! use std::time::Duration;
//!
//! let opts = Options::builder()
//!     .object_chunk_size(16)
//!     .uncountable_max_items(Some(1000))
//!     .deref_timeout(Duration::from_millis(250))
//!     .save_meta(false)
//!     .build();
//!
//! assert_eq!(opts.object_chunk_size(), 16);
//! assert!(!opts.save_meta());
//! assert!(opts.encode_unsupported());
//! ```

use crate::encoding::constants::*;
use std::time::Duration;

/// Immutable settings shared by an [`Encoder`](crate::Encoder) or
/// [`Decoder`](crate::Decoder).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    deref_timeout: Duration,
    object_chunk_size: usize,
    byte_chunk_size: usize,
    uncountable_max_items: Option<usize>,
    encode_unsupported: bool,
    save_meta: bool,
    append: bool,
    input_buffer_size: usize,
    output_buffer_size: usize,
    max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            deref_timeout: Duration::from_millis(DEFAULT_DEREF_TIMEOUT_MS),
            object_chunk_size: DEFAULT_OBJECT_CHUNK_SIZE,
            byte_chunk_size: DEFAULT_BYTE_CHUNK_SIZE,
            uncountable_max_items: None,
            encode_unsupported: true,
            save_meta: true,
            append: false,
            input_buffer_size: DEFAULT_BUFFER_SIZE,
            output_buffer_size: DEFAULT_BUFFER_SIZE,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder { OptionsBuilder::default() }

    /// How long encoding waits for a deferred value.
    pub fn deref_timeout(&self) -> Duration { self.deref_timeout }

    /// Elements per chunk of an uncountable aggregate.
    pub fn object_chunk_size(&self) -> usize { self.object_chunk_size }

    /// Bytes per chunk of a byte stream.
    pub fn byte_chunk_size(&self) -> usize { self.byte_chunk_size }

    /// Most elements pulled from one uncountable source; `None` is unbounded.
    pub fn uncountable_max_items(&self) -> Option<usize> { self.uncountable_max_items }

    /// Write a placeholder instead of failing on values without an encoder.
    pub fn encode_unsupported(&self) -> bool { self.encode_unsupported }

    /// Write metadata attached to values.
    pub fn save_meta(&self) -> bool { self.save_meta }

    /// Skip the header because the sink already holds a stream.
    pub fn append(&self) -> bool { self.append }

    pub fn input_buffer_size(&self) -> usize { self.input_buffer_size }

    pub fn output_buffer_size(&self) -> usize { self.output_buffer_size }

    /// How deeply decoded values may nest. The outermost value counts as one level.
    pub fn max_depth(&self) -> usize { self.max_depth }
}

/// Builder for [`Options`]. Chunk sizes below one are raised to one.
#[derive(Clone, Debug, Default)]
pub struct OptionsBuilder {
    opts: Options,
}

impl OptionsBuilder {
    pub fn deref_timeout(mut self, t: Duration) -> Self {
        self.opts.deref_timeout = t;
        self
    }

    pub fn object_chunk_size(mut self, n: usize) -> Self {
        self.opts.object_chunk_size = n.max(1);
        self
    }

    pub fn byte_chunk_size(mut self, n: usize) -> Self {
        self.opts.byte_chunk_size = n.max(1);
        self
    }

    pub fn uncountable_max_items(mut self, n: Option<usize>) -> Self {
        self.opts.uncountable_max_items = n;
        self
    }

    pub fn encode_unsupported(mut self, b: bool) -> Self {
        self.opts.encode_unsupported = b;
        self
    }

    pub fn save_meta(mut self, b: bool) -> Self {
        self.opts.save_meta = b;
        self
    }

    pub fn append(mut self, b: bool) -> Self {
        self.opts.append = b;
        self
    }

    pub fn input_buffer_size(mut self, n: usize) -> Self {
        self.opts.input_buffer_size = n;
        self
    }

    pub fn output_buffer_size(mut self, n: usize) -> Self {
        self.opts.output_buffer_size = n;
        self
    }

    pub fn max_depth(mut self, n: usize) -> Self {
        self.opts.max_depth = n.max(1);
        self
    }

    pub fn build(self) -> Options { self.opts }
}
