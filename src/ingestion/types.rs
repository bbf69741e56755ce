//! Ingestion Data Types
//!
//! Defines the book catalog entries and the documents produced from them.
//! `ChapterDocument` is exactly what gets stored in the search index, so its field
//! names double as the index schema (see `search::mapping`).

use serde::{Deserialize, Serialize};

/// A book to download from Project Gutenberg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSource {
    /// Gutenberg ebook number.
    pub id: u32,
    pub title: String,
    pub author: String,
    pub genre: String,
}

impl BookSource {
    pub fn new(id: u32, title: &str, author: &str, genre: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            author: author.to_string(),
            genre: genre.to_string(),
        }
    }
}

/// One chapter (or section) of a book, as stored in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterDocument {
    pub title: String,
    pub author: String,
    pub content: String,
    pub genre: String,
    pub book_id: String,
    /// `"Chapter N"`, where N is the position before short segments were dropped.
    pub chapter: String,
    pub publication_year: u32,
    pub word_count: usize,
}

/// A document paired with the id it will be indexed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    pub id: u64,
    pub document: ChapterDocument,
}
