//! Prompt template and skill tests

use async_trait::async_trait;
use prc_application::skills::{PromptTemplate, available_prompts};
use prc_application::ResearchSkill;
use prc_domain::ports::providers::LanguageModel;
use prc_domain::{Error, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

struct CountingModel {
    calls: AtomicUsize,
}

#[async_trait]
impl LanguageModel for CountingModel {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("echo: {prompt}"))
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}

#[test]
fn load_and_render_substitutes_user_input() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("core_requirements.md"),
        "Analyze:\n\n{user_input}\n\nBe thorough.",
    )
    .unwrap();

    let template = PromptTemplate::load(dir.path(), "core_requirements.md").unwrap();
    assert_eq!(template.name(), "core_requirements.md");
    let rendered = template.render("a notes app");
    assert_eq!(rendered, "Analyze:\n\na notes app\n\nBe thorough.");
}

#[test]
fn load_fails_for_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = PromptTemplate::load(dir.path(), "absent.md").unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn load_rejects_template_without_placeholder() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.md"), "No placeholder here.").unwrap();
    let err = PromptTemplate::load(dir.path(), "broken.md").unwrap_err();
    assert!(matches!(err, Error::Config { .. } | Error::Configuration { .. }));
}

#[test]
fn available_prompts_lists_markdown_sorted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("b.md"), "{user_input}").unwrap();
    std::fs::write(dir.path().join("a.md"), "{user_input}").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let prompts = available_prompts(dir.path()).unwrap();
    assert_eq!(prompts, vec!["a.md".to_string(), "b.md".to_string()]);
}

#[test]
fn available_prompts_empty_for_missing_dir() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    assert!(available_prompts(&missing).unwrap().is_empty());
}

#[tokio::test]
async fn analyze_invokes_the_model_exactly_once() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("market_analysis.md"),
        "Market question: {user_input}",
    )
    .unwrap();

    let model = Arc::new(CountingModel {
        calls: AtomicUsize::new(0),
    });
    let skill = ResearchSkill::market_analysis(dir.path(), Arc::clone(&model) as Arc<dyn LanguageModel>).unwrap();
    assert_eq!(skill.name(), "MarketAnalysis");
    assert_eq!(skill.output_key(), "market_analysis");

    let (key, text) = skill.analyze("an idea").await.unwrap();
    assert_eq!(key, "market_analysis");
    assert_eq!(text, "echo: Market question: an idea");
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
}
