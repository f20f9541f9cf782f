//! Infrastructure layer
//!
//! Cross-cutting concerns that sit outside the domain: configuration
//! loading and validation, and structured logging setup.

pub mod config;
pub mod logging;

pub use config::{AppConfig, ConfigLoader, LlmConfig, LoggingConfig, RagConfig, ResearchConfig};
pub use logging::{init_logging, parse_log_level};
