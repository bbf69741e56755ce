//! Chapter Splitter
//!
//! Partitions the cleaned text of one book into chapter-sized segments.
//!
//! ## Algorithm
//! 1. **Scan**: The text is walked line by line (split on `'\n'`).
//! 2. **Detect**: A line containing a chapter marker (`CHAPTER IV`, `Chapter 12`,
//!    `chapter twelve`, ...) closes the segment being accumulated and opens a new one
//!    that starts with the marker line itself.
//! 3. **Fallback**: When the scan yields at most one segment, the book is instead cut
//!    into fixed sections of [`SECTION_WORDS`] words labelled `Section N: ...`.
//!
//! Detection is line-oriented, so it only fires on text that kept its line breaks
//! (see `Normalization::PreserveLines` in the fetcher).

use once_cell::sync::Lazy;
use regex::Regex;

/// Number of words per section when no chapter markers are found.
pub const SECTION_WORDS: usize = 1000;

/// Marker patterns, tried in order. All are case-insensitive substring matches.
static CHAPTER_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)CHAPTER\s+[IVX\d]+",
        r"(?i)Chapter\s+[IVX\d]+",
        r"(?i)CHAPTER\s+[A-Z]+",
        r"(?i)Chapter\s+[A-Z]+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// One chapter (or fallback section) of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// 1-based position in the sequence.
    pub index: usize,
    pub text: String,
    /// Number of whitespace-delimited tokens in `text`.
    pub word_count: usize,
}

impl Chapter {
    pub fn new(index: usize, text: String) -> Self {
        let word_count = count_words(&text);
        Self {
            index,
            text,
            word_count,
        }
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Ordered chapters produced from a single book.
pub type ChapterSequence = Vec<Chapter>;

/// Counts tokens separated by runs of whitespace.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Returns `true` if the line contains any chapter marker.
pub fn is_chapter_boundary(line: &str) -> bool {
    CHAPTER_PATTERNS.iter().any(|pattern| pattern.is_match(line))
}

/// Splits a book into chapters, falling back to fixed word sections.
///
/// Empty (or whitespace-only) input yields an empty sequence; any other input
/// yields at least one chapter.
pub fn split_into_chapters(text: &str) -> ChapterSequence {
    let mut segments = detect_chapters(text);

    if segments.len() <= 1 {
        tracing::debug!(
            "Found {} chapter segment(s), falling back to {}-word sections",
            segments.len(),
            SECTION_WORDS
        );
        segments = chunk_words(text, SECTION_WORDS);
    } else {
        tracing::debug!("Detected {} chapters", segments.len());
    }

    segments
        .into_iter()
        .enumerate()
        .map(|(i, segment)| Chapter::new(i + 1, segment))
        .collect()
}

/// Line scan: every boundary line starts a new segment.
fn detect_chapters(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for line in text.split('\n') {
        if is_chapter_boundary(line) {
            flush(&mut segments, &current);
            current.clear();
        }
        current.push_str(line);
        current.push(' ');
    }
    flush(&mut segments, &current);

    segments
}

fn flush(segments: &mut Vec<String>, current: &str) {
    let finished = current.trim();
    if !finished.is_empty() {
        segments.push(finished.to_string());
    }
}

/// Cuts the word list into chunks of `size` words labelled `Section N: `.
pub fn chunk_words(text: &str, size: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(size.max(1))
        .enumerate()
        .map(|(k, chunk)| format!("Section {}: {}", k + 1, chunk.join(" ")))
        .collect()
}
