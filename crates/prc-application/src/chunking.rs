//! Text chunking domain service
//!
//! Splits document text into overlapping size-bounded segments using
//! priority-ordered splitting: paragraphs first, sentences when a paragraph
//! is too long, fixed-size slices as a last resort. All lengths are Unicode
//! scalar counts, never bytes, so CJK documents chunk correctly.

use prc_domain::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
use prc_domain::value_objects::{ChunkMetadata, DocumentChunk, DocumentPage};
use tracing::info;

/// A produced chunk before the overlap pass
///
/// Hard-split slices after the first already start with the previous
/// slice's tail, so the overlap pass must not prepend to them again.
struct RawChunk {
    text: String,
    pre_overlapped: bool,
}

/// Splits text into chunks of at most `chunk_size` characters with
/// `chunk_overlap` characters of shared context between adjacent chunks.
///
/// Precondition: `chunk_overlap < chunk_size`. Not validated here; the
/// configuration layer rejects violating values before a chunker is built.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for TextChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP)
    }
}

impl TextChunker {
    /// Create a chunker with the given size and overlap, in characters
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    /// Split `text` into chunks of approximately `chunk_size` characters
    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        if char_len(text) <= self.chunk_size {
            return vec![text.to_string()];
        }

        let mut chunks: Vec<RawChunk> = Vec::new();
        let mut current = String::new();

        for paragraph in split_paragraphs(text) {
            if char_len(paragraph) > self.chunk_size {
                // Paragraph too long: fall back to sentence packing
                for sentence in split_sentences(paragraph) {
                    let sentence_len = char_len(&sentence);
                    if char_len(&current) + sentence_len + 1 <= self.chunk_size {
                        if !current.is_empty() {
                            current.push(' ');
                        }
                        current.push_str(&sentence);
                    } else {
                        if !current.is_empty() {
                            chunks.push(packed(std::mem::take(&mut current)));
                        }
                        if sentence_len > self.chunk_size {
                            self.hard_split(&sentence, &mut chunks);
                        } else {
                            current = sentence;
                        }
                    }
                }
            } else if char_len(&current) + char_len(paragraph) + 2 <= self.chunk_size {
                if !current.is_empty() {
                    current.push_str("\n\n");
                }
                current.push_str(paragraph);
            } else {
                if !current.is_empty() {
                    chunks.push(packed(std::mem::take(&mut current)));
                }
                current = paragraph.to_string();
            }
        }

        if !current.is_empty() {
            chunks.push(packed(current));
        }

        self.apply_overlap(chunks)
    }

    /// Slice an oversized sentence into fixed-width pieces
    ///
    /// Slices advance by `chunk_size - chunk_overlap` characters, so each
    /// slice after the first already carries the overlap with its
    /// predecessor.
    fn hard_split(&self, sentence: &str, chunks: &mut Vec<RawChunk>) {
        let step = (self.chunk_size - self.chunk_overlap.min(self.chunk_size)).max(1);
        let sentence_chars: Vec<char> = sentence.chars().collect();
        let mut start = 0;
        let mut first = true;
        while start < sentence_chars.len() {
            let end = (start + self.chunk_size).min(sentence_chars.len());
            chunks.push(RawChunk {
                text: sentence_chars[start..end].iter().collect(),
                pre_overlapped: !first,
            });
            first = false;
            start += step;
        }
    }

    /// Second pass: prepend each chunk with the trailing `chunk_overlap`
    /// characters of the *previous original* chunk plus a separating space.
    /// Hard-split slices already carry their overlap and are left alone.
    fn apply_overlap(&self, chunks: Vec<RawChunk>) -> Vec<String> {
        if self.chunk_overlap == 0 || chunks.len() < 2 {
            return chunks.into_iter().map(|chunk| chunk.text).collect();
        }

        let mut overlapped = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 || chunk.pre_overlapped {
                overlapped.push(chunk.text.clone());
            } else {
                let tail = char_tail(&chunks[i - 1].text, self.chunk_overlap);
                overlapped.push(format!("{tail} {}", chunk.text));
            }
        }
        overlapped
    }

    /// Split pages into chunks, preserving and extending their metadata
    pub fn chunk_pages(&self, pages: &[DocumentPage]) -> Vec<DocumentChunk> {
        let mut chunked = Vec::new();

        for page in pages {
            if page.content.is_empty() {
                continue;
            }
            let chunks = self.chunk_text(&page.content);
            let total_chunks = chunks.len();
            for (chunk_index, content) in chunks.into_iter().enumerate() {
                chunked.push(DocumentChunk {
                    content,
                    metadata: ChunkMetadata {
                        source: page.metadata.source.clone(),
                        page: page.metadata.page,
                        section: page.metadata.section.clone(),
                        chunk_index,
                        total_chunks,
                    },
                });
            }
        }

        info!(
            chunks = chunked.len(),
            pages = pages.len(),
            "Created chunks from document pages"
        );
        chunked
    }
}

fn packed(text: String) -> RawChunk {
    RawChunk {
        text,
        pre_overlapped: false,
    }
}

/// Character count, not byte count
fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Last `n` characters of `text`, or all of it when shorter
fn char_tail(text: &str, n: usize) -> String {
    let len = char_len(text);
    text.chars().skip(len.saturating_sub(n)).collect()
}

/// Blank-line-delimited paragraphs, trimmed, empties dropped
fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

/// Terminator-delimited sentences: `.`, `!`, `?` followed by whitespace
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') && chars.peek().is_some_and(|next| next.is_whitespace()) {
            while chars.peek().is_some_and(|next| next.is_whitespace()) {
                chars.next();
            }
            let trimmed = current.trim();
            if !trimmed.is_empty() {
                sentences.push(trimmed.to_string());
            }
            current.clear();
        }
    }

    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}
