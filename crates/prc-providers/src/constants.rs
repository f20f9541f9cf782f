//! Provider-level constants

/// Dimensions of the null embedding provider's vectors
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// Dimensions of the default FastEmbed model (AllMiniLML6V2)
pub const EMBEDDING_DIMENSION_FASTEMBED_DEFAULT: usize = 384;

/// Bytes per f32 vector component in the filesystem store's data files
pub const FILESYSTEM_BYTES_PER_DIMENSION: usize = 4;

/// Number of leading page lines scanned for a section heading
pub const SECTION_SCAN_MAX_LINES: usize = 10;

/// Lines longer than this are never section headings
pub const SECTION_LINE_MAX_CHARS: usize = 100;

/// Base delay for language model retry backoff, in milliseconds
pub const LLM_RETRY_BASE_DELAY_MS: u64 = 500;

/// Cap on the backoff exponent (delay doubles per attempt up to this)
pub const LLM_RETRY_MAX_EXPONENT: u32 = 5;
