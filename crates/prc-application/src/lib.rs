//! Application layer for Product Research Core
//!
//! Use cases and domain services built on the domain ports: text chunking,
//! the RAG retriever facade, citation formatting and filtering, research
//! skills with their parallel orchestrator, and structured field extraction
//! from free-text model responses.

/// Text chunking domain service
pub mod chunking;
/// Citation-annotated context formatting and usage filtering
pub mod citations;
/// Structured field extraction from model responses
pub mod extract;
/// Parallel skill orchestration
pub mod orchestrator;
/// RAG retriever facade
pub mod retriever;
/// Research skills and prompt templates
pub mod skills;

pub use chunking::TextChunker;
pub use extract::{Extraction, extract_fields};
pub use orchestrator::ParallelSkillOrchestrator;
pub use retriever::RagRetriever;
pub use skills::{PromptTemplate, ResearchSkill};
