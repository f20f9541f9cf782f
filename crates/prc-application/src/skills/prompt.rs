//! Prompt template loading and rendering
//!
//! Templates are Markdown files with a `{user_input}` placeholder,
//! separating prompt content from execution logic. A template missing its
//! placeholder is a broken deployment and fails at load time.

use prc_domain::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Placeholder substituted with the user's product idea at render time
const USER_INPUT_PLACEHOLDER: &str = "{user_input}";

/// A loaded prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    name: String,
    content: String,
}

impl PromptTemplate {
    /// Load a template from `dir/filename`, validating the placeholder
    pub fn load(dir: &Path, filename: &str) -> Result<Self> {
        let path = dir.join(filename);
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::configuration_with_source(
                format!("Prompt template not found: {}", path.display()),
                e,
            )
        })?;

        if !content.contains(USER_INPUT_PLACEHOLDER) {
            return Err(Error::config(format!(
                "Prompt template {filename} is missing the {USER_INPUT_PLACEHOLDER} placeholder"
            )));
        }

        debug!(template = filename, chars = content.len(), "Loaded prompt template");
        Ok(Self {
            name: filename.to_string(),
            content,
        })
    }

    /// Substitute the user input into the template
    pub fn render(&self, user_input: &str) -> String {
        self.content.replace(USER_INPUT_PLACEHOLDER, user_input)
    }

    /// Template file name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// List the available `*.md` template filenames in `dir`, sorted
pub fn available_prompts(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompts = Vec::new();
    let entries = std::fs::read_dir(dir)
        .map_err(|e| Error::io(format!("Failed to read prompts directory: {e}")))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(format!("Failed to read directory entry: {e}")))?;
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "md") {
            if let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) {
                prompts.push(name);
            }
        }
    }
    prompts.sort();
    Ok(prompts)
}
