//! RAG retriever facade
//!
//! Composes the document loader, text chunker, embedding provider, and
//! vector store into the ingest / retrieve / format-with-citations
//! operations consumed by the research flow.

use prc_domain::constants::DEFAULT_TOP_K;
use prc_domain::error::Result;
use prc_domain::ports::providers::{DocumentLoader, EmbeddingProvider, VectorStoreProvider};
use prc_domain::value_objects::{
    Citation, DocumentChunk, DocumentPage, IngestReport, IngestStatus, KnowledgeBaseStatus,
    ScoredChunk,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use crate::chunking::TextChunker;
use crate::citations;

/// Main RAG interface for document retrieval with citation support
pub struct RagRetriever {
    loader: Arc<dyn DocumentLoader>,
    chunker: TextChunker,
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStoreProvider>,
    top_k: usize,
}

impl RagRetriever {
    /// Compose a retriever from its collaborators
    pub fn new(
        loader: Arc<dyn DocumentLoader>,
        chunker: TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        store: Arc<dyn VectorStoreProvider>,
    ) -> Self {
        Self {
            loader,
            chunker,
            embedder,
            store,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Override the default number of retrieval results
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Load, chunk, embed, and store all documents
    ///
    /// A `Warning` report means zero documents were found, which is a valid
    /// empty knowledge base. An `Error` report is reserved for chunking
    /// producing nothing from non-empty input.
    pub async fn ingest_documents(&self, clear_existing: bool) -> Result<IngestReport> {
        info!("Starting document ingestion");

        if clear_existing {
            if let Err(e) = self.store.clear().await {
                warn!(error = %e, "Could not clear collection");
            }
        }

        let pages = self.loader.load_all().await?;
        if pages.is_empty() {
            return Ok(IngestReport::warning("No documents found to ingest"));
        }

        self.ingest_pages(&pages).await
    }

    /// Shared chunk/embed/store path for full and single-document ingestion
    async fn ingest_pages(&self, pages: &[DocumentPage]) -> Result<IngestReport> {
        let document_names = unique_sources(pages);

        let chunks = self.chunker.chunk_pages(pages);
        if chunks.is_empty() {
            return Ok(IngestReport {
                status: IngestStatus::Error,
                message: "Failed to chunk documents".to_string(),
                documents_processed: document_names.len(),
                pages_processed: pages.len(),
                chunks_created: 0,
                document_names,
            });
        }

        info!(chunks = chunks.len(), "Generating embeddings");
        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        let stored = self.store.add_chunks(&chunks, &embeddings, None).await?;

        let report = IngestReport {
            status: IngestStatus::Success,
            message: "Documents ingested successfully".to_string(),
            documents_processed: document_names.len(),
            pages_processed: pages.len(),
            chunks_created: stored,
            document_names,
        };
        info!(?report, "Ingestion complete");
        Ok(report)
    }

    /// Retrieve relevant chunks for a query
    ///
    /// An empty or whitespace-only query short-circuits to an empty result
    /// without touching the embedder. `top_k` of `None` uses the configured
    /// default.
    pub async fn retrieve(&self, query: &str, top_k: Option<usize>) -> Result<Vec<ScoredChunk>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(query).await?;
        let results = self
            .store
            .query(&embedding.vector, top_k.unwrap_or(self.top_k), None)
            .await?;

        info!(
            results = results.len(),
            query = %query.chars().take(50).collect::<String>(),
            "Retrieved documents for query"
        );
        Ok(results)
    }

    /// Format retrieval results as a citation-annotated context block
    pub fn format_context_with_citations(
        &self,
        results: &[ScoredChunk],
    ) -> (String, Vec<Citation>) {
        citations::format_context_with_citations(results)
    }

    /// Snapshot the knowledge base state
    pub async fn get_status(&self) -> Result<KnowledgeBaseStatus> {
        let stats = self.store.stats().await?;
        let documents = self.loader.document_list()?;

        Ok(KnowledgeBaseStatus {
            enabled: true,
            documents_in_knowledge_base: documents.len(),
            chunks_in_vector_store: stats.chunk_count,
            persist_directory: stats.persist_directory,
            documents,
        })
    }

    /// Add a single document without clearing the collection
    pub async fn add_document(&self, path: &Path) -> Result<IngestReport> {
        let pages = self.loader.load_file(path).await?;
        if pages.is_empty() {
            return Ok(IngestReport::warning(format!(
                "No pages extracted from {}",
                path.display()
            )));
        }
        self.ingest_pages(&pages).await
    }

    /// Rebuild the entire vector index from the documents directory
    pub async fn rebuild_index(&self) -> Result<IngestReport> {
        self.ingest_documents(true).await
    }
}

/// Distinct source filenames in first-seen order
fn unique_sources(pages: &[DocumentPage]) -> Vec<String> {
    let mut names = Vec::new();
    for page in pages {
        if !names.contains(&page.metadata.source) {
            names.push(page.metadata.source.clone());
        }
    }
    names
}
