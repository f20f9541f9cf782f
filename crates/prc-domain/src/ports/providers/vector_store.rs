use crate::error::Result;
use crate::value_objects::{DocumentChunk, Embedding, ScoredChunk, StoreStats};
use async_trait::async_trait;
use std::collections::HashMap;

/// Vector Storage Interface
///
/// Defines the contract for stores that persist `(id, embedding, text,
/// metadata)` tuples and answer nearest-neighbor queries by cosine
/// similarity. A store instance is bound to one collection at construction.
///
/// Contract notes:
/// - When ids are not supplied, implementations generate them as a counter
///   offset from the current collection size (`doc_{n}`), which guarantees
///   uniqueness within the collection without global coordination.
/// - All metadata values are coerced to strings before storage.
/// - `query` returns similarity (`1 - cosine_distance`), not distance.
/// - `add_chunks` and `query` are each atomic with respect to the
///   collection; writes are serialized internally.
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert chunks with their embeddings into the collection
    ///
    /// # Arguments
    /// * `chunks` - chunks to store; content and metadata are persisted
    /// * `embeddings` - one embedding per chunk, same order
    /// * `ids` - optional explicit ids; auto-generated when `None`
    ///
    /// # Returns
    /// Number of chunks stored
    async fn add_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Embedding],
        ids: Option<Vec<String>>,
    ) -> Result<usize>;

    /// Query the collection for the nearest neighbors of `query_vector`
    ///
    /// `top_k` is clamped to the collection size. An empty collection yields
    /// an empty result, not an error. The optional `filter` restricts
    /// results to chunks whose metadata matches every given key/value pair.
    async fn query(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filter: Option<&HashMap<String, String>>,
    ) -> Result<Vec<ScoredChunk>>;

    /// Delete and recreate the collection, resetting auto-generated ids
    async fn clear(&self) -> Result<()>;

    /// Get statistics about the collection
    async fn stats(&self) -> Result<StoreStats>;

    /// Identifier of this provider (e.g. "filesystem", "in_memory")
    fn provider_name(&self) -> &str;
}
