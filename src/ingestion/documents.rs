//! Turns split books into index documents.

use super::fetcher::GutenbergFetcher;
use super::splitter::{Chapter, count_words, split_into_chapters};
use super::types::{BookSource, ChapterDocument, IndexedDocument};

/// Segments at or below this many characters never become documents.
pub const MIN_CHAPTER_CHARS: usize = 100;

/// Derived year stored alongside each chapter.
pub fn publication_year(book_id: u32) -> u32 {
    1800 + (book_id % 200)
}

/// Builds documents for one book, dropping short segments.
///
/// The `chapter` label reflects the position in `chapters`, so labels can skip
/// numbers where a segment was dropped.
pub fn build_documents(book: &BookSource, chapters: &[Chapter]) -> Vec<ChapterDocument> {
    chapters
        .iter()
        .filter(|chapter| chapter.char_len() > MIN_CHAPTER_CHARS)
        .map(|chapter| ChapterDocument {
            title: book.title.clone(),
            author: book.author.clone(),
            content: chapter.text.clone(),
            genre: book.genre.clone(),
            book_id: book.id.to_string(),
            chapter: format!("Chapter {}", chapter.index),
            publication_year: publication_year(book.id),
            word_count: chapter.word_count,
        })
        .collect()
}

/// Hands out sequential document ids starting at 1.
#[derive(Debug)]
pub struct DocumentSequencer {
    next_id: u64,
}

impl DocumentSequencer {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    pub fn assign(&mut self, documents: Vec<ChapterDocument>) -> Vec<IndexedDocument> {
        documents
            .into_iter()
            .map(|document| {
                let id = self.next_id;
                self.next_id += 1;
                IndexedDocument { id, document }
            })
            .collect()
    }
}

impl Default for DocumentSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits one cleaned book and numbers its documents.
pub fn prepare_book(
    book: &BookSource,
    text: &str,
    sequencer: &mut DocumentSequencer,
) -> Vec<IndexedDocument> {
    let chapters = split_into_chapters(text);
    tracing::info!(
        "{}: {} chapters, {} words",
        book.title,
        chapters.len(),
        count_words(text)
    );
    sequencer.assign(build_documents(book, &chapters))
}

/// Downloads every book in `catalog` in order and collects their documents.
///
/// Books that fail to download are skipped.
pub async fn ingest_catalog(
    fetcher: &GutenbergFetcher,
    catalog: &[BookSource],
) -> Vec<IndexedDocument> {
    let mut sequencer = DocumentSequencer::new();
    let mut documents = Vec::new();

    for book in catalog {
        match fetcher.download(book).await {
            Some(text) => documents.extend(prepare_book(book, &text, &mut sequencer)),
            None => tracing::warn!("Skipping {} - download failed", book.title),
        }
    }

    tracing::info!("Prepared {} documents", documents.len());
    documents
}
