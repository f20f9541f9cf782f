//! PDF document loader with section detection
//!
//! Extracts per-page text from PDF files and tracks section/chapter
//! headings across pages.

use async_trait::async_trait;
use lopdf::Document;
use prc_domain::constants::DEFAULT_SECTION;
use prc_domain::error::{Error, Result};
use prc_domain::ports::providers::DocumentLoader;
use prc_domain::value_objects::{DocumentFileInfo, DocumentPage, PageMetadata};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{error, info, warn};

use crate::constants::{SECTION_LINE_MAX_CHARS, SECTION_SCAN_MAX_LINES};

/// Ordered heading patterns; the first match on a page wins
static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Chapter patterns
        r"(?i)^(Chapter\s+\d+[:\.\s]+.+)$",
        r"(?i)^(第\s*[一二三四五六七八九十\d]+\s*章[:\.\s]*.*)$",
        // Numbered section patterns
        r"(?i)^(\d+\.\s+.+)$",
        r"(?i)^(\d+\.\d+\s+.+)$",
        r"(?i)^(\d+\.\d+\.\d+\s+.+)$",
        // Keyword heading patterns
        r"(?i)^(SECTION\s+\d+[:\.\s]+.+)$",
        r"(?i)^(Part\s+\d+[:\.\s]+.+)$",
        r"(?i)^(Appendix\s+[A-Z\d]+[:\.\s]*.*)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("section pattern is valid"))
    .collect()
});

/// Scan the first lines of a page for a section heading
///
/// Returns the captured heading when found, otherwise the carried-forward
/// current section. Long lines are body text, never headings.
fn detect_section(text: &str, current_section: &str) -> String {
    for line in text.lines().take(SECTION_SCAN_MAX_LINES) {
        let line = line.trim();
        if line.is_empty() || line.chars().count() > SECTION_LINE_MAX_CHARS {
            continue;
        }
        for pattern in SECTION_PATTERNS.iter() {
            if let Some(captures) = pattern.captures(line) {
                return captures[1].trim().to_string();
            }
        }
    }
    current_section.to_string()
}

/// PDF loader rooted at a documents directory
///
/// Iterates `*.pdf` files non-recursively. Section state carries forward
/// across pages within one document and resets per document, defaulting to
/// "Introduction" until a heading is detected.
pub struct PdfLoader {
    documents_dir: PathBuf,
}

impl PdfLoader {
    /// Create a loader for the given documents directory
    pub fn new<P: Into<PathBuf>>(documents_dir: P) -> Self {
        Self {
            documents_dir: documents_dir.into(),
        }
    }

    /// Extract pages from one already-parsed document
    fn extract_pages(doc: &Document, filename: &str) -> Vec<DocumentPage> {
        let mut pages = Vec::new();
        let mut current_section = DEFAULT_SECTION.to_string();

        for &page_number in doc.get_pages().keys() {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!(
                        source = filename,
                        page = page_number,
                        error = %e,
                        "Failed to extract page text, skipping page"
                    );
                    continue;
                }
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            current_section = detect_section(text, &current_section);
            pages.push(DocumentPage {
                content: text.to_string(),
                metadata: PageMetadata {
                    source: filename.to_string(),
                    page: page_number,
                    section: current_section.clone(),
                },
            });
        }

        pages
    }
}

#[async_trait]
impl DocumentLoader for PdfLoader {
    async fn load_all(&self) -> Result<Vec<DocumentPage>> {
        let mut pdf_files = Vec::new();
        if tokio::fs::metadata(&self.documents_dir).await.is_err() {
            warn!(
                dir = %self.documents_dir.display(),
                "Documents directory not found"
            );
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&self.documents_dir)
            .await
            .map_err(|e| Error::io(format!("Failed to read documents directory: {e}")))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io(format!("Failed to read directory entry: {e}")))?
        {
            let path = entry.path();
            if path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            {
                pdf_files.push(path);
            }
        }
        pdf_files.sort();

        if pdf_files.is_empty() {
            warn!(
                dir = %self.documents_dir.display(),
                "No PDF files found"
            );
            return Ok(Vec::new());
        }

        info!(count = pdf_files.len(), "Found PDF files to process");

        let mut all_pages = Vec::new();
        for path in pdf_files {
            // One corrupt file never aborts the batch
            match self.load_file(&path).await {
                Ok(pages) => all_pages.extend(pages),
                Err(e) => error!(file = %path.display(), error = %e, "Failed to load PDF"),
            }
        }

        info!(pages = all_pages.len(), "Total pages loaded");
        Ok(all_pages)
    }

    async fn load_file(&self, path: &Path) -> Result<Vec<DocumentPage>> {
        let path = path.to_path_buf();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::invalid_argument("Document path has no file name"))?;

        let pages = tokio::task::spawn_blocking(move || -> Result<Vec<DocumentPage>> {
            let doc = Document::load(&path).map_err(|e| {
                Error::document_with_source(
                    format!("Failed to load PDF {}", path.display()),
                    e,
                )
            })?;
            Ok(Self::extract_pages(&doc, &filename))
        })
        .await
        .map_err(|e| Error::internal(format!("Blocking task failed: {e}")))??;

        info!(pages = pages.len(), "Loaded PDF pages");
        Ok(pages)
    }

    fn document_list(&self) -> Result<Vec<DocumentFileInfo>> {
        if !self.documents_dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let entries = std::fs::read_dir(&self.documents_dir)
            .map_err(|e| Error::io(format!("Failed to read documents directory: {e}")))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(format!("Failed to read directory entry: {e}")))?;
            let path = entry.path();
            if !path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
            {
                continue;
            }
            let Some(filename) = path.file_name().map(|n| n.to_string_lossy().into_owned())
            else {
                continue;
            };
            let metadata = entry
                .metadata()
                .map_err(|e| Error::io(format!("Failed to read file metadata: {e}")))?;
            let size_bytes = metadata.len();
            #[allow(clippy::cast_precision_loss)]
            let size_mb = (size_bytes as f64 / (1024.0 * 1024.0) * 100.0).round() / 100.0;
            files.push(DocumentFileInfo {
                filename,
                size_bytes,
                size_mb,
                modified: metadata.modified().unwrap_or(std::time::UNIX_EPOCH),
            });
        }

        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::detect_section;

    #[test]
    fn detects_chapter_heading() {
        let text = "Chapter 2: Architecture\nBody text follows.";
        assert_eq!(detect_section(text, "Introduction"), "Chapter 2: Architecture");
    }

    #[test]
    fn detects_cjk_chapter_heading() {
        let text = "第一章 概述\n正文内容";
        assert_eq!(detect_section(text, "Introduction"), "第一章 概述");
    }

    #[test]
    fn carries_forward_when_no_heading() {
        let text = "just some ordinary paragraph text\nwith no heading at all";
        assert_eq!(detect_section(text, "Chapter 1: Intro"), "Chapter 1: Intro");
    }

    #[test]
    fn skips_overlong_lines() {
        let long = format!("Chapter 1: {}", "x".repeat(120));
        assert_eq!(detect_section(&long, "Introduction"), "Introduction");
    }
}
