use crate::error::Result;
use async_trait::async_trait;

/// Language Model Invocation Interface
///
/// The core treats the LLM call as a black-box `invoke(prompt) -> text`
/// capability. Implementations own the retry contract: transient failures
/// (timeouts, 5xx, 429) are retried with exponential backoff up to a
/// configured attempt count; non-retryable 4xx client errors fail fast.
/// Consumers above this port never retry.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a prompt and return the model's text response
    async fn invoke(&self, prompt: &str) -> Result<String>;

    /// Identifier of the backing model
    fn model_name(&self) -> &str;
}
