//! Citation formatting and usage filtering tests

use prc_application::citations::{filter_used_citations, format_context_with_citations};
use prc_domain::value_objects::ScoredChunk;
use std::collections::HashMap;

fn chunk(id: &str, content: &str, source: &str, section: &str, page: &str, score: f64) -> ScoredChunk {
    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), source.to_string());
    metadata.insert("section".to_string(), section.to_string());
    metadata.insert("page".to_string(), page.to_string());
    ScoredChunk {
        id: id.to_string(),
        content: content.to_string(),
        metadata,
        score,
    }
}

#[test]
fn numbers_citations_in_result_order() {
    let results = vec![
        chunk("doc_0", "First passage.", "a.pdf", "Chapter 1: Intro", "1", 0.91),
        chunk("doc_1", "Second passage.", "b.pdf", "Chapter 2: Scope", "3", 0.84),
        chunk("doc_2", "Third passage.", "a.pdf", "Chapter 1: Intro", "2", 0.52),
    ];
    let (context, citations) = format_context_with_citations(&results);

    assert_eq!(citations.len(), 3);
    for (i, citation) in citations.iter().enumerate() {
        assert_eq!(citation.id, i + 1);
    }
    assert_eq!(citations[0].document, "a.pdf");
    assert_eq!(citations[1].section, "Chapter 2: Scope");
    assert_eq!(citations[1].page, "3");
    assert!((citations[0].relevance_score - 0.91).abs() < 1e-9);

    assert!(context.contains("[1] From \"a.pdf\", Chapter 1: Intro (Page 1):"));
    assert!(context.contains("[2] From \"b.pdf\", Chapter 2: Scope (Page 3):"));
    assert!(context.contains("\"First passage.\""));
    let entries: Vec<&str> = context.split("\n\n").collect();
    assert_eq!(entries.len(), 3);
}

#[test]
fn missing_metadata_falls_back_to_placeholders() {
    let results = vec![ScoredChunk {
        id: "doc_0".to_string(),
        content: "Orphan passage.".to_string(),
        metadata: HashMap::new(),
        score: 0.5,
    }];
    let (context, citations) = format_context_with_citations(&results);
    assert_eq!(citations[0].document, "Unknown Document");
    assert_eq!(citations[0].section, "Unknown Section");
    assert_eq!(citations[0].page, "?");
    assert!(context.contains("From \"Unknown Document\", Unknown Section (Page ?):"));
}

#[test]
fn long_content_is_truncated_with_ellipsis() {
    let content = "y".repeat(800);
    let results = vec![chunk("doc_0", &content, "a.pdf", "S", "1", 0.5)];
    let (context, _) = format_context_with_citations(&results);
    let expected = format!("\"{}...\"", "y".repeat(500));
    assert!(context.ends_with(&expected));
    assert!(!context.contains(&"y".repeat(501)));
}

#[test]
fn scores_are_rounded_to_three_decimals() {
    let results = vec![chunk("doc_0", "P.", "a.pdf", "S", "1", 0.123_456_789)];
    let (_, citations) = format_context_with_citations(&results);
    assert!((citations[0].relevance_score - 0.123).abs() < 1e-9);
}

#[test]
fn empty_results_produce_empty_context() {
    let (context, citations) = format_context_with_citations(&[]);
    assert!(context.is_empty());
    assert!(citations.is_empty());
}

#[test]
fn filter_keeps_only_referenced_citations_in_order() {
    let results = vec![
        chunk("doc_0", "A.", "a.pdf", "S", "1", 0.9),
        chunk("doc_1", "B.", "b.pdf", "S", "1", 0.8),
        chunk("doc_2", "C.", "c.pdf", "S", "1", 0.7),
    ];
    let (_, citations) = format_context_with_citations(&results);

    let used = filter_used_citations("See [1] for scope and [3] for risks.", &citations);
    let ids: Vec<usize> = used.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[test]
fn compound_markers_are_not_recognized() {
    let results = vec![
        chunk("doc_0", "A.", "a.pdf", "S", "1", 0.9),
        chunk("doc_1", "B.", "b.pdf", "S", "1", 0.8),
    ];
    let (_, citations) = format_context_with_citations(&results);

    // "[1, 2]" is not a single-number marker; nothing matches.
    let used = filter_used_citations("Sources: [1, 2].", &citations);
    assert!(used.is_empty());
}
