//! Structured field extraction from model responses
//!
//! Models asked for JSON reply with anything from a clean object to prose
//! with an embedded fenced block to loosely labelled lines. Extraction
//! tries progressively weaker strategies and tags the raw text as a
//! fallback when none applies, so callers can always distinguish parsed
//! output from unparsed output.

use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fenced JSON pattern is valid")
});

/// Result of extracting expected fields from a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Fields recovered by one of the parsing strategies
    Structured(HashMap<String, String>),
    /// No strategy applied; the raw response is preserved for the caller
    Fallback {
        /// The unparsed response text
        raw: String,
    },
}

/// Extract the expected keys from a model response
///
/// Strategies, in order:
/// 1. JSON object inside a fenced code block
/// 2. The whole response as a JSON object
/// 3. The first `{...}` span in the response as a JSON object
/// 4. Labelled lines (`key: value`), matching the key verbatim or with
///    underscores replaced by spaces or hyphens, case-insensitively
///
/// Only expected keys are retained; non-string JSON values are
/// stringified. A strategy counts only when it yields at least one
/// expected key.
pub fn extract_fields(response: &str, expected_keys: &[&str]) -> Extraction {
    let cleaned = response.trim();

    if let Some(caps) = FENCED_JSON.captures(cleaned)
        && let Some(fields) = parse_json_object(caps[1].trim(), expected_keys)
    {
        debug!(strategy = "fenced_block", "Extracted structured fields");
        return Extraction::Structured(fields);
    }

    if let Some(fields) = parse_json_object(cleaned, expected_keys) {
        debug!(strategy = "whole_text", "Extracted structured fields");
        return Extraction::Structured(fields);
    }

    if let Some(span) = braced_span(cleaned)
        && let Some(fields) = parse_json_object(span, expected_keys)
    {
        debug!(strategy = "braced_span", "Extracted structured fields");
        return Extraction::Structured(fields);
    }

    let labelled = parse_labelled_lines(cleaned, expected_keys);
    if !labelled.is_empty() {
        debug!(strategy = "labelled_lines", "Extracted structured fields");
        return Extraction::Structured(labelled);
    }

    debug!("No extraction strategy applied, falling back to raw response");
    Extraction::Fallback {
        raw: response.to_string(),
    }
}

/// Parse `text` as a JSON object and retain the expected keys
fn parse_json_object(text: &str, expected_keys: &[&str]) -> Option<HashMap<String, String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;
    let fields: HashMap<String, String> = expected_keys
        .iter()
        .filter_map(|key| object.get(*key).map(|v| ((*key).to_string(), stringify(v))))
        .collect();
    if fields.is_empty() { None } else { Some(fields) }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The span from the first `{` to the last `}`, if both are present in order
fn braced_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start { Some(&text[start..=end]) } else { None }
}

/// Scan for `label: value` lines matching any naming variant of each key
fn parse_labelled_lines(text: &str, expected_keys: &[&str]) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for key in expected_keys {
        let variants = [
            (*key).to_string(),
            key.replace('_', " "),
            key.replace('_', "-"),
        ];
        for line in text.lines() {
            let trimmed = line.trim().trim_start_matches(['-', '*', ' ']);
            for variant in &variants {
                if let Some(rest) = strip_label(trimmed, variant) {
                    let value = rest.trim();
                    if !value.is_empty() {
                        fields.entry((*key).to_string()).or_insert_with(|| value.to_string());
                    }
                }
            }
        }
    }
    fields
}

/// Strip a case-insensitive `label:` prefix, allowing `**label**:` emphasis
///
/// Responses are arbitrary model output and may be multi-byte text; the
/// prefix slice is boundary-checked, never a blind byte split.
fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let stripped = line.trim_start_matches('*');
    let prefix = stripped.get(..label.len())?;
    if !prefix.eq_ignore_ascii_case(label) {
        return None;
    }
    stripped[label.len()..]
        .trim_start_matches('*')
        .trim_start()
        .strip_prefix(':')
}

#[cfg(test)]
mod tests {
    use super::{Extraction, extract_fields};

    #[test]
    fn parses_fenced_json_block() {
        let response = "Here is the analysis:\n```json\n{\"summary\": \"ok\", \"extra\": 1}\n```\nDone.";
        let Extraction::Structured(fields) = extract_fields(response, &["summary"]) else {
            panic!("expected structured extraction");
        };
        assert_eq!(fields.get("summary").map(String::as_str), Some("ok"));
        assert!(!fields.contains_key("extra"));
    }

    #[test]
    fn stringifies_non_string_values() {
        let Extraction::Structured(fields) =
            extract_fields("{\"count\": 3, \"tags\": [\"a\"]}", &["count", "tags"])
        else {
            panic!("expected structured extraction");
        };
        assert_eq!(fields.get("count").map(String::as_str), Some("3"));
        assert_eq!(fields.get("tags").map(String::as_str), Some("[\"a\"]"));
    }

    #[test]
    fn multibyte_prose_falls_back_without_panicking() {
        let result = extract_fields("市场规模很大而且增长迅速", &["market_size"]);
        assert_eq!(
            result,
            Extraction::Fallback {
                raw: "市场规模很大而且增长迅速".to_string()
            }
        );
    }

    #[test]
    fn multibyte_labelled_line_still_extracts() {
        let response = "market_size: 规模很大";
        let Extraction::Structured(fields) = extract_fields(response, &["market_size"]) else {
            panic!("expected structured extraction");
        };
        assert_eq!(fields.get("market_size").map(String::as_str), Some("规模很大"));
    }

    #[test]
    fn falls_back_on_prose() {
        let result = extract_fields("Nothing structured here.", &["summary"]);
        assert_eq!(
            result,
            Extraction::Fallback {
                raw: "Nothing structured here.".to_string()
            }
        );
    }

    #[test]
    fn scans_labelled_lines() {
        let response = "Target Users: small teams\nMarket size: large";
        let Extraction::Structured(fields) =
            extract_fields(response, &["target_users", "market_size"])
        else {
            panic!("expected structured extraction");
        };
        assert_eq!(
            fields.get("target_users").map(String::as_str),
            Some("small teams")
        );
        assert_eq!(fields.get("market_size").map(String::as_str), Some("large"));
    }
}
