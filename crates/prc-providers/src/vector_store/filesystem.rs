//! Filesystem vector store implementation
//!
//! Durable directory-based persistence for one collection: a JSON index
//! mapping chunk ids to offsets in a binary data file holding the vectors
//! and string-coerced metadata. State survives process restarts and is
//! loaded lazily on first touch.

use crate::constants::FILESYSTEM_BYTES_PER_DIMENSION;
use async_trait::async_trait;
use prc_domain::error::{Error, Result};
use prc_domain::ports::providers::VectorStoreProvider;
use prc_domain::value_objects::{DocumentChunk, Embedding, ScoredChunk, StoreStats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{Read, Seek, Write};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::{coerce_metadata, compute_norm, cosine_similarity_with_norm, matches_filter, top_k_indices};

/// Index entry: chunk id and its offset in the data file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    id: String,
    offset: u64,
}

/// On-disk index file contents
#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionIndex {
    /// Vector dimensionality, fixed by the first insert
    dimensions: Option<usize>,
    /// Entries in insertion order; the length is the auto-id counter
    entries: Vec<IndexEntry>,
}

/// Payload stored alongside each vector in the data file
#[derive(Debug, Serialize, Deserialize)]
struct StoredChunk {
    content: String,
    metadata: HashMap<String, String>,
}

/// Filesystem vector store bound to one collection
///
/// Files under the base directory:
/// - `{collection}_index.json` - dimensions + id/offset entries
/// - `{collection}.dat` - per record: vector length (u32 LE), the f32 LE
///   vector, payload length (u32 LE), payload JSON
///
/// The mutex serializes writes; `add_chunks` and `query` are each atomic
/// with respect to the collection.
pub struct FilesystemVectorStore {
    base_path: PathBuf,
    collection: String,
    state: Mutex<Option<CollectionIndex>>,
}

impl FilesystemVectorStore {
    /// Open or create a store for `collection` under `base_path`
    pub async fn new<P: Into<PathBuf>, S: Into<String>>(base_path: P, collection: S) -> Result<Self> {
        let base_path = base_path.into();
        tokio::fs::create_dir_all(&base_path)
            .await
            .map_err(|e| Error::io(format!("Failed to create store directory: {e}")))?;

        Ok(Self {
            base_path,
            collection: collection.into(),
            state: Mutex::new(None),
        })
    }

    fn index_path(&self) -> PathBuf {
        self.base_path
            .join(format!("{}_index.json", self.collection))
    }

    fn data_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.dat", self.collection))
    }

    /// Load the index from disk, once per process
    async fn ensure_loaded(&self, state: &mut Option<CollectionIndex>) -> Result<()> {
        if state.is_some() {
            return Ok(());
        }
        let index_path = self.index_path();
        let index = if tokio::fs::metadata(&index_path).await.is_ok() {
            let content = tokio::fs::read_to_string(&index_path)
                .await
                .map_err(|e| Error::io(format!("Failed to read collection index: {e}")))?;
            let index: CollectionIndex = serde_json::from_str(&content)
                .map_err(|e| Error::internal(format!("Failed to parse collection index: {e}")))?;
            debug!(
                collection = %self.collection,
                chunks = index.entries.len(),
                "Loaded collection index"
            );
            index
        } else {
            CollectionIndex::default()
        };
        *state = Some(index);
        Ok(())
    }

    /// Persist the index to disk
    async fn save_index(&self, index: &CollectionIndex) -> Result<()> {
        let content = serde_json::to_string_pretty(index)
            .map_err(|e| Error::internal(format!("Failed to serialize collection index: {e}")))?;
        tokio::fs::write(self.index_path(), content)
            .await
            .map_err(|e| Error::io(format!("Failed to write collection index: {e}")))
    }

    /// Encode one record as written to the data file
    fn encode_record(vector: &[f32], payload: &StoredChunk) -> Result<Vec<u8>> {
        let payload_bytes = serde_json::to_vec(payload)
            .map_err(|e| Error::internal(format!("Failed to serialize chunk payload: {e}")))?;
        let mut bytes = Vec::with_capacity(
            8 + vector.len() * FILESYSTEM_BYTES_PER_DIMENSION + payload_bytes.len(),
        );
        bytes.extend_from_slice(&u32::try_from(vector.len()).unwrap_or(u32::MAX).to_le_bytes());
        for &value in vector {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes.extend_from_slice(
            &u32::try_from(payload_bytes.len())
                .unwrap_or(u32::MAX)
                .to_le_bytes(),
        );
        bytes.extend_from_slice(&payload_bytes);
        Ok(bytes)
    }

    /// Append encoded records, returning the offset of each
    async fn append_records(&self, records: Vec<Vec<u8>>) -> Result<Vec<u64>> {
        let data_path = self.data_path();
        tokio::task::spawn_blocking(move || {
            let mut file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&data_path)?;
            let mut offset = file.metadata()?.len();
            let mut offsets = Vec::with_capacity(records.len());
            for record in records {
                offsets.push(offset);
                file.write_all(&record)?;
                offset += record.len() as u64;
            }
            Ok::<_, std::io::Error>(offsets)
        })
        .await
        .map_err(|e| Error::internal(format!("Blocking task failed: {e}")))?
        .map_err(|e| Error::io_with_source("Failed to append to data file", e))
    }

    /// Read the records at the given offsets
    async fn read_records(&self, offsets: Vec<u64>) -> Result<Vec<(Vec<f32>, StoredChunk)>> {
        let data_path = self.data_path();
        tokio::task::spawn_blocking(move || {
            let mut file = std::fs::File::open(&data_path)?;
            let mut records = Vec::with_capacity(offsets.len());
            for offset in offsets {
                file.seek(std::io::SeekFrom::Start(offset))?;

                let mut len_bytes = [0u8; 4];
                file.read_exact(&mut len_bytes)?;
                let vector_len = u32::from_le_bytes(len_bytes) as usize;

                let mut vector_bytes = vec![0u8; vector_len * FILESYSTEM_BYTES_PER_DIMENSION];
                file.read_exact(&mut vector_bytes)?;
                let vector: Vec<f32> = vector_bytes
                    .chunks_exact(FILESYSTEM_BYTES_PER_DIMENSION)
                    .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                    .collect();

                file.read_exact(&mut len_bytes)?;
                let payload_len = u32::from_le_bytes(len_bytes) as usize;
                let mut payload_bytes = vec![0u8; payload_len];
                file.read_exact(&mut payload_bytes)?;
                let payload: StoredChunk = serde_json::from_slice(&payload_bytes)
                    .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

                records.push((vector, payload));
            }
            Ok::<_, std::io::Error>(records)
        })
        .await
        .map_err(|e| Error::internal(format!("Blocking task failed: {e}")))?
        .map_err(|e| Error::io_with_source("Failed to read data file", e))
    }
}

#[async_trait]
impl VectorStoreProvider for FilesystemVectorStore {
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

        let mut guard = self.state.lock().await;
        self.ensure_loaded(&mut guard).await?;
        let index = guard
            .as_mut()
            .ok_or_else(|| Error::internal("Collection state missing after load"))?;

        // Dimensions are fixed by the first insert
        let dimensions = *index
            .dimensions
            .get_or_insert(embeddings[0].vector.len());
        for embedding in embeddings {
            if embedding.vector.len() != dimensions {
                return Err(Error::vector_db(format!(
                    "Embedding dimension {} does not match collection dimension {dimensions}",
                    embedding.vector.len()
                )));
            }
        }

        // Counter-offset ids guarantee uniqueness within the collection
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
                let existing = index.entries.len();
                (0..chunks.len())
                    .map(|i| format!("doc_{}", existing + i))
                    .collect()
            }
        };

        let records = chunks
            .iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| {
                let payload = StoredChunk {
                    content: chunk.content.clone(),
                    metadata: coerce_metadata(&chunk.metadata),
                };
                Self::encode_record(&embedding.vector, &payload)
            })
            .collect::<Result<Vec<_>>>()?;

        let offsets = self.append_records(records).await?;
        for (id, offset) in ids.into_iter().zip(offsets) {
            index.entries.push(IndexEntry { id, offset });
        }
        self.save_index(index).await?;

        info!(
            collection = %self.collection,
            added = chunks.len(),
            total = index.entries.len(),
            "Added chunks to vector store"
        );
        Ok(chunks.len())
    }

    async fn query(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filter: Option<&HashMap<String, String>>,
    ) -> Result<Vec<ScoredChunk>> {
        let mut guard = self.state.lock().await;
        self.ensure_loaded(&mut guard).await?;
        let index = guard
            .as_ref()
            .ok_or_else(|| Error::internal("Collection state missing after load"))?;

        if index.entries.is_empty() {
            warn!(collection = %self.collection, "Vector store is empty");
            return Ok(Vec::new());
        }
        if let Some(dimensions) = index.dimensions {
            if query_vector.len() != dimensions {
                return Err(Error::vector_db(format!(
                    "Query dimension {} does not match collection dimension {dimensions}",
                    query_vector.len()
                )));
            }
        }

        let limit = top_k.min(index.entries.len());
        let offsets: Vec<u64> = index.entries.iter().map(|e| e.offset).collect();
        let records = self.read_records(offsets).await?;

        let query_norm = compute_norm(query_vector);
        let scored = top_k_indices(
            records
                .iter()
                .enumerate()
                .filter(|(_, (_, payload))| matches_filter(&payload.metadata, filter))
                .map(|(i, (vector, _))| {
                    (i, cosine_similarity_with_norm(query_vector, vector, query_norm))
                }),
            limit,
        );

        Ok(scored
            .into_iter()
            .map(|(i, score)| {
                let (_, payload) = &records[i];
                ScoredChunk {
                    id: index.entries[i].id.clone(),
                    content: payload.content.clone(),
                    metadata: payload.metadata.clone(),
                    score: f64::from(score),
                }
            })
            .collect())
    }

    async fn clear(&self) -> Result<()> {
        let mut guard = self.state.lock().await;

        for path in [self.index_path(), self.data_path()] {
            if tokio::fs::metadata(&path).await.is_ok() {
                tokio::fs::remove_file(&path)
                    .await
                    .map_err(|e| Error::io(format!("Failed to delete collection file: {e}")))?;
            }
        }

        // Recreate empty state; auto-generated ids restart at 0
        *guard = Some(CollectionIndex::default());
        info!(collection = %self.collection, "Cleared collection");
        Ok(())
    }

    async fn stats(&self) -> Result<StoreStats> {
        let mut guard = self.state.lock().await;
        self.ensure_loaded(&mut guard).await?;
        let index = guard
            .as_ref()
            .ok_or_else(|| Error::internal("Collection state missing after load"))?;

        Ok(StoreStats {
            collection_name: self.collection.clone(),
            chunk_count: index.entries.len(),
            persist_directory: self.base_path.display().to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "filesystem"
    }
}
