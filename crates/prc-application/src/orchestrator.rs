//! Parallel skill orchestration
//!
//! Fans out all configured skills as concurrent tasks, fans in after every
//! task settles, and tolerates individual failures: a failed skill becomes
//! a sentinel value under its output key, never a propagated error.

use prc_domain::constants::{ANALYSIS_FAILED, ANALYSIS_TIMED_OUT};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::skills::ResearchSkill;

/// Runs all research skills in parallel and aggregates their results
///
/// Skills have no ordering dependency on each other and share no mutable
/// state; each owns its own prompt/response lifecycle.
pub struct ParallelSkillOrchestrator {
    skills: Vec<ResearchSkill>,
}

impl ParallelSkillOrchestrator {
    /// Create an orchestrator over the given skills
    pub fn new(skills: Vec<ResearchSkill>) -> Self {
        Self { skills }
    }

    /// Output keys of the configured skills, in configuration order
    pub fn output_keys(&self) -> Vec<String> {
        self.skills
            .iter()
            .map(|skill| skill.output_key().to_string())
            .collect()
    }

    /// Execute all skills concurrently and aggregate their results
    ///
    /// Per-skill failures are logged and converted to the failure sentinel
    /// under that skill's output key. Successful outputs pass through
    /// newline normalization.
    pub async fn research(&self, user_input: &str) -> HashMap<String, String> {
        info!(skills = self.skills.len(), "Starting parallel research");

        let tasks = self.skills.iter().map(|skill| async move {
            match skill.analyze(user_input).await {
                Ok((key, text)) => {
                    info!(skill = skill.name(), "Skill completed successfully");
                    (key, normalize_line_breaks(&text))
                }
                Err(e) => {
                    warn!(skill = skill.name(), error = %e, "Skill failed");
                    (skill.output_key().to_string(), ANALYSIS_FAILED.to_string())
                }
            }
        });

        let results: HashMap<String, String> =
            futures::future::join_all(tasks).await.into_iter().collect();

        let failed = results
            .values()
            .filter(|value| value.as_str() == ANALYSIS_FAILED)
            .count();
        info!(
            successful = results.len() - failed,
            total = self.skills.len(),
            "Parallel research completed"
        );
        results
    }

    /// Execute all skills under a single deadline
    ///
    /// All or nothing: either the full result map (including any failure
    /// sentinels) is returned, or - on expiry - a map with every expected
    /// output key set to the timeout sentinel. In-flight skill tasks are
    /// dropped on expiry; callers never see a partial map or an error.
    pub async fn research_with_timeout(
        &self,
        user_input: &str,
        timeout: Duration,
    ) -> HashMap<String, String> {
        match tokio::time::timeout(timeout, self.research(user_input)).await {
            Ok(results) => results,
            Err(_) => {
                error!(
                    timeout_secs = timeout.as_secs_f64(),
                    "Parallel research timed out"
                );
                self.skills
                    .iter()
                    .map(|skill| (skill.output_key().to_string(), ANALYSIS_TIMED_OUT.to_string()))
                    .collect()
            }
        }
    }
}

/// Convert literal `\n` two-character sequences into real newlines
///
/// Models sometimes emit escaped newlines inside a value that must render
/// as multi-line text.
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace("\\n", "\n")
}

#[cfg(test)]
mod tests {
    use super::normalize_line_breaks;

    #[test]
    fn normalizes_escaped_newlines() {
        assert_eq!(normalize_line_breaks("a\\nb"), "a\nb");
        assert_eq!(normalize_line_breaks("no escapes"), "no escapes");
    }
}
