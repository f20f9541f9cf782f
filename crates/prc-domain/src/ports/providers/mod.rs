//! External Provider Ports
//!
//! Ports for the external services the domain depends on.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`DocumentLoader`] | Per-page text and section extraction from source files |
//! | [`EmbeddingProvider`] | Text embedding generation services |
//! | [`VectorStoreProvider`] | Vector storage and similarity search |
//! | [`LanguageModel`] | Black-box `invoke(prompt) -> text` capability |

/// Document loader port
pub mod document_loader;
/// Embedding provider port
pub mod embedding;
/// Language model port
pub mod language_model;
/// Vector store provider port
pub mod vector_store;

// Re-export provider ports for convenience
pub use document_loader::DocumentLoader;
pub use embedding::EmbeddingProvider;
pub use language_model::LanguageModel;
pub use vector_store::VectorStoreProvider;
