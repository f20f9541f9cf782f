//! Semantic Embedding Value Objects

use serde::{Deserialize, Serialize};

/// Value Object: Semantic Text Embedding
///
/// Represents a vector embedding of text content that captures semantic
/// meaning. Embeddings enable similarity search over the knowledge base.
///
/// ## Business Rules
///
/// - Vector must contain at least one element
/// - Dimensions must equal the vector length and stay constant across a store
/// - Model name identifies the embedding generation method
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
}
