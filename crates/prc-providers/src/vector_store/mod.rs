//! Vector store adapters
//!
//! Implementations of the `VectorStoreProvider` port. The filesystem store
//! is durable across process restarts; the in-memory store backs tests and
//! ephemeral runs.

pub mod filesystem;
pub mod in_memory;

pub use filesystem::FilesystemVectorStore;
pub use in_memory::InMemoryVectorStore;

use prc_domain::value_objects::ChunkMetadata;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Coerce chunk metadata to the string-only schema the stores persist
pub(crate) fn coerce_metadata(metadata: &ChunkMetadata) -> HashMap<String, String> {
    HashMap::from([
        ("source".to_string(), metadata.source.clone()),
        ("page".to_string(), metadata.page.to_string()),
        ("section".to_string(), metadata.section.clone()),
        ("chunk_index".to_string(), metadata.chunk_index.to_string()),
        ("total_chunks".to_string(), metadata.total_chunks.to_string()),
    ])
}

/// True when every filter pair matches the stored metadata exactly
pub(crate) fn matches_filter(
    metadata: &HashMap<String, String>,
    filter: Option<&HashMap<String, String>>,
) -> bool {
    filter.is_none_or(|filter| {
        filter
            .iter()
            .all(|(key, value)| metadata.get(key) == Some(value))
    })
}

/// Scored item for heap-based top-k selection
///
/// Uses reverse ordering so `BinaryHeap` acts as a min-heap (smallest
/// scores at top).
#[derive(PartialEq)]
pub(crate) struct ScoredItem {
    pub score: f32,
    pub index: usize,
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior: smallest at top
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the L2 norm of a vector
pub(crate) fn compute_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity with precomputed query norm
pub(crate) fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b = compute_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Select the `limit` highest-scoring entries, descending
///
/// `O(n log k)` via a min-heap instead of sorting the whole candidate set.
pub(crate) fn top_k_indices(scores: impl Iterator<Item = (usize, f32)>, limit: usize) -> Vec<(usize, f32)> {
    let mut heap: std::collections::BinaryHeap<ScoredItem> =
        std::collections::BinaryHeap::with_capacity(limit + 1);

    for (index, score) in scores {
        if heap.len() < limit {
            heap.push(ScoredItem { score, index });
        } else if let Some(min) = heap.peek() {
            if score > min.score {
                heap.pop();
                heap.push(ScoredItem { score, index });
            }
        }
    }

    let mut items: Vec<_> = heap.into_iter().map(|i| (i.index, i.score)).collect();
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    items
}
