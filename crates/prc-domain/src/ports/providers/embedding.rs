use crate::error::{Error, Result};
use crate::value_objects::Embedding;
use async_trait::async_trait;

/// Text Embedding Generation Interface
///
/// Defines the contract for services that convert text into fixed-dimension
/// semantic vectors. Implementations must lazy-load the underlying model on
/// first use rather than at construction, and batch multi-text calls for
/// throughput. A model load or encode failure is fatal and must propagate;
/// embeddings must never silently be wrong-dimension or empty.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embeddings for a batch of texts
    ///
    /// # Returns
    /// One embedding per input text, in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Generate an embedding for a single text (e.g. a query)
    ///
    /// Default implementation delegates to [`Self::embed_batch`].
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let mut embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| Error::embedding("Provider returned no embedding for input text"))
    }

    /// Output dimensionality of this provider's model
    fn dimensions(&self) -> usize;

    /// Identifier of this provider (e.g. "fastembed", "null")
    fn provider_name(&self) -> &str;
}
