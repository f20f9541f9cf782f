//! Retrieval Result and Citation Value Objects

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Value Object: Scored Retrieval Result
///
/// One chunk returned by a similarity query, ranked descending by score.
/// The score is cosine similarity in `[-1, 1]`, derived from the store's
/// cosine distance as `1 - distance`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredChunk {
    /// Stable id of the stored chunk
    pub id: String,
    /// Chunk text as stored
    pub content: String,
    /// String-coerced chunk metadata (source, page, section, ...)
    pub metadata: HashMap<String, String>,
    /// Cosine similarity to the query
    pub score: f64,
}

/// Value Object: Citation
///
/// A numbered provenance reference assigned at context-formatting time.
/// Ephemeral: recomputed per retrieval call, never stored. The `id` is
/// 1-based and matches the bracketed marker order in the composed context
/// string, since downstream consumers reference citations by that number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Citation {
    /// 1-based sequence number matching the `[i]` marker in the context
    pub id: usize,
    /// Source document filename
    pub document: String,
    /// Section heading of the cited chunk
    pub section: String,
    /// Page number as stored (string-coerced metadata)
    pub page: String,
    /// Similarity score rounded to three decimals
    pub relevance_score: f64,
}
