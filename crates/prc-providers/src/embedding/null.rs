//! Null embedding provider for testing and development
//!
//! Provides deterministic, hash-based embeddings. No external dependencies,
//! no model download - always works offline.

use async_trait::async_trait;

use prc_domain::error::Result;
use prc_domain::ports::providers::EmbeddingProvider;
use prc_domain::value_objects::Embedding;

use crate::constants::EMBEDDING_DIMENSION_NULL;

/// Null embedding provider for testing
///
/// Produces a bag-of-words style vector: dimension 0 is a constant bias
/// shared by every non-empty text, and each whitespace-separated token is
/// hashed into one of the remaining dimensions and counted. Any two
/// non-empty texts therefore have cosine similarity greater than zero, and
/// texts sharing words score higher than texts that share none.
///
/// # Example
///
/// ```rust
/// use prc_providers::embedding::NullEmbeddingProvider;
/// use prc_domain::ports::providers::EmbeddingProvider;
///
/// let provider = NullEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 384);
/// assert_eq!(provider.provider_name(), "null");
/// ```
pub struct NullEmbeddingProvider;

impl NullEmbeddingProvider {
    /// Create a new null embedding provider
    pub fn new() -> Self {
        Self
    }

    fn embed_one(text: &str) -> Embedding {
        let mut vector = vec![0.0f32; EMBEDDING_DIMENSION_NULL];
        if !text.trim().is_empty() {
            // Shared bias dimension keeps all non-empty texts correlated
            vector[0] = 1.0;
        }
        for token in text.split_whitespace() {
            let bucket = 1 + token_bucket(&token.to_lowercase(), EMBEDDING_DIMENSION_NULL - 1);
            vector[bucket] += 1.0;
        }
        Embedding {
            vector,
            model: "null-test".to_string(),
            dimensions: EMBEDDING_DIMENSION_NULL,
        }
    }
}

impl Default for NullEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|text| Self::embed_one(text)).collect())
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSION_NULL
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

/// FNV-1a hash of a token, reduced to a bucket index
///
/// Deliberately not the std hasher: buckets must be stable across
/// processes so persisted vectors stay queryable.
fn token_bucket(token: &str, buckets: usize) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    usize::try_from(hash % buckets as u64).unwrap_or(0)
}
