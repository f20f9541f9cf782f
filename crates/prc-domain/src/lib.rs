//! Domain layer for Product Research Core
//!
//! Core business types for the RAG pipeline (documents, chunks, embeddings,
//! retrieval results, citations) and the research orchestration layer, plus
//! the port traits that provider adapters implement.

/// Domain constants shared across layers
pub mod constants;
/// Error types and the crate-wide `Result` alias
pub mod error;
/// Boundary contracts implemented by provider adapters
pub mod ports;
/// Immutable domain value objects
pub mod value_objects;

pub use error::{Error, Result};
