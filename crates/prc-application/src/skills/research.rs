//! The research skill unit
//!
//! Each skill focuses on a single dimension of product research. Concrete
//! skills differ only in which template they load and which output field
//! they produce.

use prc_domain::error::Result;
use prc_domain::ports::providers::LanguageModel;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::prompt::PromptTemplate;

/// One named analysis unit: a prompt template plus a language model
///
/// `analyze` performs exactly one model call. Retries belong to the
/// `LanguageModel` implementation, never to this layer.
pub struct ResearchSkill {
    name: String,
    output_key: String,
    template: PromptTemplate,
    llm: Arc<dyn LanguageModel>,
}

impl ResearchSkill {
    /// Create a skill from its parts
    pub fn new<S: Into<String>>(
        name: S,
        output_key: S,
        template: PromptTemplate,
        llm: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            name: name.into(),
            output_key: output_key.into(),
            template,
            llm,
        }
    }

    /// Explicit and implicit requirements analysis
    pub fn core_requirements(prompts_dir: &Path, llm: Arc<dyn LanguageModel>) -> Result<Self> {
        let template = PromptTemplate::load(prompts_dir, "core_requirements.md")?;
        Ok(Self::new("CoreRequirements", "core_requirements", template, llm))
    }

    /// Target user group analysis
    pub fn target_users(prompts_dir: &Path, llm: Arc<dyn LanguageModel>) -> Result<Self> {
        let template = PromptTemplate::load(prompts_dir, "target_users.md")?;
        Ok(Self::new("TargetUsers", "target_users", template, llm))
    }

    /// Competitive landscape analysis
    pub fn market_analysis(prompts_dir: &Path, llm: Arc<dyn LanguageModel>) -> Result<Self> {
        let template = PromptTemplate::load(prompts_dir, "market_analysis.md")?;
        Ok(Self::new("MarketAnalysis", "market_analysis", template, llm))
    }

    /// Market opportunity analysis
    pub fn market_insights(prompts_dir: &Path, llm: Arc<dyn LanguageModel>) -> Result<Self> {
        let template = PromptTemplate::load(prompts_dir, "market_insights.md")?;
        Ok(Self::new("MarketInsights", "market_insights", template, llm))
    }

    /// Skill display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output field this skill produces
    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    /// Run the analysis: render the prompt, make one model call
    ///
    /// # Returns
    /// The skill's output key paired with the model's response text
    pub async fn analyze(&self, user_input: &str) -> Result<(String, String)> {
        info!(skill = %self.name, "Skill starting analysis");

        let prompt = self.template.render(user_input);
        let response = self.llm.invoke(&prompt).await?;

        info!(skill = %self.name, "Skill completed analysis");
        Ok((self.output_key.clone(), response))
    }
}
