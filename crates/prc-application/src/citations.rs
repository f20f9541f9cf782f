//! Citation-annotated context formatting and usage filtering

use prc_domain::constants::CONTEXT_SNIPPET_MAX_CHARS;
use prc_domain::value_objects::{Citation, ScoredChunk};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Bracketed single-integer citation markers. Compound brackets like
/// `[1, 2]` deliberately do not match.
static CITATION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\d+)\]").expect("citation marker pattern is valid"));

/// Format retrieval results as a citation-annotated context block
///
/// Assigns 1-based ids in input order; the bracketed number in each context
/// entry matches the citation's `id`. Displayed content is truncated to 500
/// characters with an ellipsis; the citation itself always references full
/// metadata. Scores are rounded to three decimals.
pub fn format_context_with_citations(results: &[ScoredChunk]) -> (String, Vec<Citation>) {
    if results.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut context_parts = Vec::with_capacity(results.len());
    let mut citations = Vec::with_capacity(results.len());

    for (i, result) in results.iter().enumerate() {
        let id = i + 1;
        let source = metadata_or(result, "source", "Unknown Document");
        let section = metadata_or(result, "section", "Unknown Section");
        let page = metadata_or(result, "page", "?");

        citations.push(Citation {
            id,
            document: source.clone(),
            section: section.clone(),
            page: page.clone(),
            relevance_score: round3(result.score),
        });

        let snippet = truncate_chars(&result.content, CONTEXT_SNIPPET_MAX_CHARS);
        context_parts.push(format!(
            "[{id}] From \"{source}\", {section} (Page {page}):\n\"{snippet}\""
        ));
    }

    (context_parts.join("\n\n"), citations)
}

/// Keep only citations whose bracketed number appears in `response_text`
///
/// Pure text scan; original citation order is preserved.
pub fn filter_used_citations(response_text: &str, citations: &[Citation]) -> Vec<Citation> {
    let used: HashSet<usize> = CITATION_MARKER
        .captures_iter(response_text)
        .filter_map(|captures| captures[1].parse().ok())
        .collect();

    citations
        .iter()
        .filter(|citation| used.contains(&citation.id))
        .cloned()
        .collect()
}

fn metadata_or(result: &ScoredChunk, key: &str, default: &str) -> String {
    result
        .metadata
        .get(key)
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// First `max_chars` characters plus an ellipsis when truncated
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}
