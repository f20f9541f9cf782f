//! Research skills and prompt templates
//!
//! A skill wraps one prompt template and one language model call into a
//! named analysis unit producing a single research dimension.

/// Prompt template loading and rendering
pub mod prompt;
/// The research skill unit
pub mod research;

pub use prompt::{PromptTemplate, available_prompts};
pub use research::ResearchSkill;
