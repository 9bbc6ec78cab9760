// header
/// Version written at the start of every stream.
pub const HEADER_VERSION: u16 = 1;
/// Reserved bytes following the version.
pub const HEADER_GAP: usize = 30;
/// Total size of the header record.
pub const HEADER_LEN: usize = 2 + HEADER_GAP;

// options defaults
/// Default number of elements per uncountable chunk.
pub const DEFAULT_OBJECT_CHUNK_SIZE: usize = 0xFF;
/// Default number of bytes per byte-stream chunk.
pub const DEFAULT_BYTE_CHUNK_SIZE: usize = 0xFFFF;
/// Default buffer sizes for buffered encoders and decoders.
pub const DEFAULT_BUFFER_SIZE: usize = 0xFFFF;
/// Default deferred-value timeout, in milliseconds.
pub const DEFAULT_DEREF_TIMEOUT_MS: u64 = 5000;
/// Default bound on how deeply decoded values may nest, the outermost value included.
pub const DEFAULT_MAX_DEPTH: usize = 128;

// payload
/// Chunk terminator for uncountable aggregates and byte streams.
pub const END_OF_CHUNKS: u32 = 0;
/// Largest piece a length-prefixed region is read in.
pub(crate) const READ_PIECE: usize = 0x1_0000;
