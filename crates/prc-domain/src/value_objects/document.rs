//! Document, Page, and Chunk Value Objects
//!
//! Value objects representing source documents at the three granularities
//! the ingestion pipeline works with: whole files, extracted pages, and
//! embedded chunks.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Provenance metadata attached to one extracted page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMetadata {
    /// Source document filename (not the full path)
    pub source: String,
    /// 1-based page number within the source document
    pub page: u32,
    /// Section heading in effect for this page
    pub section: String,
}

/// Value Object: Extracted Document Page
///
/// One page of text extracted from a source PDF, together with its
/// provenance. Pages are immutable once loaded; re-ingestion replaces
/// them wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentPage {
    /// Extracted page text, trimmed
    pub content: String,
    /// Provenance metadata
    pub metadata: PageMetadata,
}

/// Provenance metadata attached to one chunk
///
/// Extends the parent page's metadata with the chunk's position so the
/// originating page is always recoverable from a retrieval result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Source document filename
    pub source: String,
    /// 1-based page number within the source document
    pub page: u32,
    /// Section heading in effect for the parent page
    pub section: String,
    /// 0-based position of this chunk among the page's chunks
    pub chunk_index: usize,
    /// Total number of chunks produced from the parent page
    pub total_chunks: usize,
}

/// Value Object: Document Chunk
///
/// A bounded text segment derived from one document page. The unit of
/// embedding and retrieval.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentChunk {
    /// Chunk text, including any prepended overlap from the previous chunk
    pub content: String,
    /// Provenance and position metadata
    pub metadata: ChunkMetadata,
}

/// Value Object: Document File Metadata
///
/// Pure filesystem metadata for a document in the knowledge base
/// directory. Produced without parsing the file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentFileInfo {
    /// File name including extension
    pub filename: String,
    /// File size in bytes
    pub size_bytes: u64,
    /// File size in megabytes, rounded to two decimals
    pub size_mb: f64,
    /// Last modification time
    pub modified: SystemTime,
}
