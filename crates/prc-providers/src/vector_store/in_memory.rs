//! In-memory vector store implementation
//!
//! Non-persistent backend for development and testing. Data is lost on
//! restart.

use async_trait::async_trait;
use dashmap::DashMap;
use prc_domain::error::{Error, Result};
use prc_domain::ports::providers::VectorStoreProvider;
use prc_domain::value_objects::{DocumentChunk, Embedding, ScoredChunk, StoreStats};
use std::collections::HashMap;
use tracing::warn;

use super::{coerce_metadata, compute_norm, cosine_similarity_with_norm, matches_filter, top_k_indices};

/// One stored chunk with its embedding
struct StoredEntry {
    id: String,
    vector: Vec<f32>,
    content: String,
    metadata: HashMap<String, String>,
}

/// In-memory vector store bound to one collection
///
/// Entries live in a concurrent map keyed by collection name; `clear`
/// drops the key entirely so auto-generated ids restart at 0, mirroring
/// the delete-and-recreate semantics of the persistent store.
pub struct InMemoryVectorStore {
    collection: String,
    collections: DashMap<String, Vec<StoredEntry>>,
}

impl InMemoryVectorStore {
    /// Create a store for the named collection
    pub fn new<S: Into<String>>(collection: S) -> Self {
        Self {
            collection: collection.into(),
            collections: DashMap::new(),
        }
    }
}

#[async_trait]
impl VectorStoreProvider for InMemoryVectorStore {
    async fn add_chunks(
        &self,
        chunks: &[DocumentChunk],
        embeddings: &[Embedding],
        ids: Option<Vec<String>>,
    ) -> Result<usize> {
        if chunks.len() != embeddings.len() {
            return Err(Error::invalid_argument(format!(
                "Chunk count {} does not match embedding count {}",
                chunks.len(),
                embeddings.len()
            )));
        }
        if chunks.is_empty() {
            return Ok(0);
        }

        let mut entries = self.collections.entry(self.collection.clone()).or_default();

        if let Some(first) = entries.first() {
            for embedding in embeddings {
                if embedding.vector.len() != first.vector.len() {
                    return Err(Error::vector_db(format!(
                        "Embedding dimension {} does not match collection dimension {}",
                        embedding.vector.len(),
                        first.vector.len()
                    )));
                }
            }
        }

        let ids = match ids {
            Some(ids) if ids.len() != chunks.len() => {
                return Err(Error::invalid_argument(format!(
                    "Id count {} does not match chunk count {}",
                    ids.len(),
                    chunks.len()
                )));
            }
            Some(ids) => ids,
            None => {
                let existing = entries.len();
                (0..chunks.len())
                    .map(|i| format!("doc_{}", existing + i))
                    .collect()
            }
        };

        for ((chunk, embedding), id) in chunks.iter().zip(embeddings).zip(ids) {
            entries.push(StoredEntry {
                id,
                vector: embedding.vector.clone(),
                content: chunk.content.clone(),
                metadata: coerce_metadata(&chunk.metadata),
            });
        }

        Ok(chunks.len())
    }

    async fn query(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filter: Option<&HashMap<String, String>>,
    ) -> Result<Vec<ScoredChunk>> {
        let Some(entries) = self.collections.get(&self.collection) else {
            warn!(collection = %self.collection, "Vector store is empty");
            return Ok(Vec::new());
        };
        if entries.is_empty() {
            warn!(collection = %self.collection, "Vector store is empty");
            return Ok(Vec::new());
        }
        if let Some(first) = entries.first() {
            if query_vector.len() != first.vector.len() {
                return Err(Error::vector_db(format!(
                    "Query dimension {} does not match collection dimension {}",
                    query_vector.len(),
                    first.vector.len()
                )));
            }
        }

        let limit = top_k.min(entries.len());
        let query_norm = compute_norm(query_vector);
        let scored = top_k_indices(
            entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| matches_filter(&entry.metadata, filter))
                .map(|(i, entry)| {
                    (i, cosine_similarity_with_norm(query_vector, &entry.vector, query_norm))
                }),
            limit,
        );

        Ok(scored
            .into_iter()
            .map(|(i, score)| {
                let entry = &entries[i];
                ScoredChunk {
                    id: entry.id.clone(),
                    content: entry.content.clone(),
                    metadata: entry.metadata.clone(),
                    score: f64::from(score),
                }
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        self.collections.remove(&self.collection);
        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let chunk_count = self
            .collections
            .get(&self.collection)
            .map_or(0, |entries| entries.len());

        Ok(StoreStats {
            collection_name: self.collection.clone(),
            chunk_count,
            persist_directory: String::new(),
        })
    }

    fn provider_name(&self) -> &str {
        "in_memory"
    }
}
