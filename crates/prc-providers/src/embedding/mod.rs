//! Embedding provider adapters
//!
//! Implementations of the `EmbeddingProvider` port. The FastEmbed adapter
//! runs local ONNX inference and is feature-gated behind
//! `embedding-fastembed`; the null adapter is always available and fully
//! offline.

#[cfg(feature = "embedding-fastembed")]
pub mod fastembed;
pub mod null;

#[cfg(feature = "embedding-fastembed")]
pub use fastembed::FastEmbedProvider;
pub use null::NullEmbeddingProvider;
