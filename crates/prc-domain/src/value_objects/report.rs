//! Ingestion and Status Report Value Objects

use serde::{Deserialize, Serialize};

use crate::value_objects::document::DocumentFileInfo;

/// Outcome classification of an ingestion run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    /// Documents were ingested
    Success,
    /// Nothing to ingest (an empty knowledge base is valid)
    Warning,
    /// Non-empty input produced no chunks
    Error,
}

/// Value Object: Ingestion Report
///
/// Structured result of `ingest_documents` / `add_document` /
/// `rebuild_index`. A `Warning` status means zero documents were found;
/// `Error` is reserved for chunking producing nothing from non-empty input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IngestReport {
    /// Outcome classification
    pub status: IngestStatus,
    /// Human-readable summary
    pub message: String,
    /// Number of distinct source documents processed
    pub documents_processed: usize,
    /// Number of pages extracted across all documents
    pub pages_processed: usize,
    /// Number of chunks created and stored
    pub chunks_created: usize,
    /// Distinct source document filenames, in load order
    pub document_names: Vec<String>,
}

impl IngestReport {
    /// Report for an ingestion run that found nothing to ingest
    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self {
            status: IngestStatus::Warning,
            message: message.into(),
            documents_processed: 0,
            pages_processed: 0,
            chunks_created: 0,
            document_names: Vec::new(),
        }
    }
}

/// Value Object: Vector Store Statistics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreStats {
    /// Collection this store is bound to
    pub collection_name: String,
    /// Number of chunks currently stored
    pub chunk_count: usize,
    /// Directory backing the collection (empty for non-persistent stores)
    pub persist_directory: String,
}

/// Value Object: Knowledge Base Status
///
/// Snapshot combining filesystem-level document info with vector store
/// statistics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KnowledgeBaseStatus {
    /// Whether retrieval is available
    pub enabled: bool,
    /// Number of document files in the knowledge base directory
    pub documents_in_knowledge_base: usize,
    /// Number of chunks in the vector store
    pub chunks_in_vector_store: usize,
    /// Directory backing the vector store
    pub persist_directory: String,
    /// Per-document filesystem metadata, sorted by filename
    pub documents: Vec<DocumentFileInfo>,
}
