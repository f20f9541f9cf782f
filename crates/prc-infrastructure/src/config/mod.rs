//! Application configuration
//!
//! Typed configuration sections with serde defaults, merged from TOML
//! files and environment variables by the [`ConfigLoader`].

mod loader;

pub use loader::ConfigLoader;

use prc_domain::constants::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_COLLECTION_NAME, DEFAULT_EMBEDDING_MODEL,
    DEFAULT_RESEARCH_TIMEOUT_SECS, DEFAULT_TOP_K,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Retrieval pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagConfig {
    /// Directory scanned for source PDF documents
    pub documents_dir: PathBuf,
    /// Directory where the vector store persists its data
    pub persist_directory: PathBuf,
    /// Vector store collection name
    pub collection_name: String,
    /// Embedding model identifier
    pub embedding_model: String,
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap carried between consecutive chunks, in characters
    pub chunk_overlap: usize,
    /// Default number of chunks returned per query
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("documents"),
            persist_directory: PathBuf::from("vector_store"),
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Language model client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat-completions endpoint base URL
    pub base_url: String,
    /// API key sent as a bearer token
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens per completion
    pub max_tokens: u32,
    /// Attempts per request before giving up
    pub max_retries: u32,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
            max_retries: 3,
            request_timeout_secs: 300,
        }
    }
}

/// Research orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Directory holding skill prompt templates
    pub prompts_dir: PathBuf,
    /// Deadline for a full parallel research run, in seconds
    pub timeout_secs: u64,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            prompts_dir: PathBuf::from("prompts"),
            timeout_secs: DEFAULT_RESEARCH_TIMEOUT_SECS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON-formatted log lines instead of plain text
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Retrieval pipeline configuration
    #[serde(default)]
    pub rag: RagConfig,
    /// Language model client configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Research orchestration configuration
    #[serde(default)]
    pub research: ResearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
