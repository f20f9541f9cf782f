//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity. Value objects are defined by their attributes
//! and can be compared for equality.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`DocumentPage`] | One extracted page of a source document |
//! | [`DocumentChunk`] | Bounded text segment, the unit of embedding/retrieval |
//! | [`Embedding`] | Vector representation of text for semantic search |
//! | [`ScoredChunk`] | Ranked result from a similarity query |
//! | [`Citation`] | Numbered provenance reference assigned at format time |
//! | [`IngestReport`] | Structured outcome of an ingestion run |
//! | [`KnowledgeBaseStatus`] | Snapshot of the knowledge base state |

/// Document, page, and chunk value objects
pub mod document;
/// Semantic embedding value objects
pub mod embedding;
/// Ingestion and status report value objects
pub mod report;
/// Retrieval result and citation value objects
pub mod retrieval;

// Re-export commonly used value objects
pub use document::{ChunkMetadata, DocumentChunk, DocumentFileInfo, DocumentPage, PageMetadata};
pub use embedding::Embedding;
pub use report::{IngestReport, IngestStatus, KnowledgeBaseStatus, StoreStats};
pub use retrieval::{Citation, ScoredChunk};
