//! Language model adapters
//!
//! Implementations of the `LanguageModel` port: an OpenAI-compatible
//! chat-completions HTTP client with retry/backoff, and a canned-response
//! null model for tests and offline development.

pub mod chat_completions;
pub mod null;

pub use chat_completions::{ChatCompletionsConfig, ChatCompletionsModel};
pub use null::NullLanguageModel;
