//! OpenAI-compatible chat-completions language model
//!
//! HTTP adapter for any `POST {base_url}/chat/completions` endpoint with
//! bearer authentication. Owns the retry contract: transient failures
//! (timeouts, connection errors, 429, 5xx) are retried with exponential
//! backoff; other client errors fail fast.

use async_trait::async_trait;
use prc_domain::error::{Error, Result};
use prc_domain::ports::providers::LanguageModel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{LLM_RETRY_BASE_DELAY_MS, LLM_RETRY_MAX_EXPONENT};

/// Chat-completions endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionsConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Model identifier sent in the request body
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Response token cap
    pub max_tokens: u32,
    /// Retry attempts for transient failures
    pub max_retries: u32,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ChatCompletionsConfig {
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

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Language model over an OpenAI-compatible chat-completions endpoint
pub struct ChatCompletionsModel {
    client: reqwest::Client,
    config: ChatCompletionsConfig,
}

impl ChatCompletionsModel {
    /// Create a model client from configuration
    pub fn new(config: ChatCompletionsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| Error::network_with_source("Failed to build HTTP client", e))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// Backoff delay for the given attempt: base delay doubling, capped
    fn backoff_delay(attempt: u32) -> Duration {
        Duration::from_millis(LLM_RETRY_BASE_DELAY_MS * (1_u64 << attempt.min(LLM_RETRY_MAX_EXPONENT)))
    }

    async fn send_once(&self, prompt: &str) -> std::result::Result<reqwest::Response, reqwest::Error> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        self.client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsModel {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        let mut last_error = String::new();

        for attempt in 0..self.config.max_retries {
            if attempt > 0 {
                tokio::time::sleep(Self::backoff_delay(attempt - 1)).await;
            }
            debug!(
                model = %self.config.model,
                attempt = attempt + 1,
                max = self.config.max_retries,
                "Language model API call"
            );

            let response = match self.send_once(prompt).await {
                Ok(response) => response,
                Err(e) if e.is_timeout() || e.is_connect() => {
                    warn!(attempt = attempt + 1, error = %e, "Transient request failure, will retry");
                    last_error = e.to_string();
                    continue;
                }
                Err(e) => return Err(Error::network_with_source("Language model request failed", e)),
            };

            let status = response.status();
            if status.is_success() {
                let body: ChatResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::llm_with_source("Malformed chat-completions response", e))?;
                return body
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
                    .ok_or_else(|| Error::llm("Chat-completions response contained no choices"));
            }

            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 || status.is_server_error() {
                warn!(status = %status, attempt = attempt + 1, "Server error or rate limit, will retry");
                last_error = format!("HTTP {status}: {body}");
                continue;
            }

            // Non-retryable client error: broken request, not a transient condition
            return Err(Error::llm(format!(
                "Language model call failed (HTTP {status}): {body}"
            )));
        }

        Err(Error::llm(format!(
            "Language model call failed after {} attempts: {last_error}",
            self.config.max_retries
        )))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
