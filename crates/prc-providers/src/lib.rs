//! Provider adapters for Product Research Core
//!
//! Concrete implementations of the domain ports: embedding providers,
//! vector stores, the PDF document loader, and language models. Each
//! adapter lives in its own module and is selected at construction time
//! by the composition layer.

/// Provider-level constants
pub mod constants;
/// Embedding provider adapters
pub mod embedding;
/// Language model adapters
pub mod llm;
/// Document loader adapters
pub mod loader;
/// Vector store adapters
pub mod vector_store;
