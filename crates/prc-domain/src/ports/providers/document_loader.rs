use crate::error::Result;
use crate::value_objects::{DocumentFileInfo, DocumentPage};
use async_trait::async_trait;
use std::path::Path;

/// Document Loading Interface
///
/// Defines the contract for extracting per-page text and section headings
/// from source files in a configured documents directory.
///
/// Failure policy: a corrupt or unreadable file makes `load_file` fail;
/// `load_all` logs such files and continues the batch. A single page that
/// fails extraction is skipped with a warning, never fatal. Pages yielding
/// only whitespace are silently dropped.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load every document in the configured directory (non-recursive)
    async fn load_all(&self) -> Result<Vec<DocumentPage>>;

    /// Load a single document file
    async fn load_file(&self, path: &Path) -> Result<Vec<DocumentPage>>;

    /// List document files with filesystem metadata, sorted by filename
    ///
    /// Pure filesystem operation; must not parse the documents.
    fn document_list(&self) -> Result<Vec<DocumentFileInfo>>;
}
