//! Null language model for testing and offline development

use async_trait::async_trait;
use prc_domain::error::Result;
use prc_domain::ports::providers::LanguageModel;

/// Canned-response language model
///
/// Returns the configured response for every prompt. No network access.
pub struct NullLanguageModel {
    response: String,
}

impl NullLanguageModel {
    /// Create a model that always answers with `response`
    pub fn new<S: Into<String>>(response: S) -> Self {
        Self {
            response: response.into(),
        }
    }
}

impl Default for NullLanguageModel {
    fn default() -> Self {
        Self::new("null response")
    }
}

#[async_trait]
impl LanguageModel for NullLanguageModel {
    async fn invoke(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "null"
    }
}
