//! Domain layer constants
//!
//! Constants that are part of the domain logic and are used by the
//! application layer. Provider-specific constants live in the provider
//! crates.

// ============================================================================
// CHUNKING DOMAIN CONSTANTS
// ============================================================================

/// Default maximum chunk size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default number of overlapping characters between adjacent chunks
pub const DEFAULT_CHUNK_OVERLAP: usize = 150;

// ============================================================================
// RETRIEVAL DOMAIN CONSTANTS
// ============================================================================

/// Default number of nearest neighbors returned by retrieval
pub const DEFAULT_TOP_K: usize = 5;

/// Maximum characters of chunk content displayed in a citation context entry
pub const CONTEXT_SNIPPET_MAX_CHARS: usize = 500;

/// Default vector store collection name
pub const DEFAULT_COLLECTION_NAME: &str = "product_knowledge";

/// Section label used before any heading has been detected in a document
pub const DEFAULT_SECTION: &str = "Introduction";

/// Default sentence-embedding model identifier
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-MiniLM-L6-v2";

// ============================================================================
// RESEARCH ORCHESTRATION CONSTANTS
// ============================================================================

/// Sentinel value reported for a skill whose analysis failed
pub const ANALYSIS_FAILED: &str = "Analysis unavailable due to error";

/// Sentinel value reported for every skill when the research deadline expires
pub const ANALYSIS_TIMED_OUT: &str = "Analysis timed out";

/// Default deadline for a full parallel research run, in seconds
pub const DEFAULT_RESEARCH_TIMEOUT_SECS: u64 = 120;
