//! Renders query results as the plain-text report printed by the CLI.

use super::queries::CannedQuery;
use super::types::{SearchHit, SearchResponse, TermsBucket};

const PREVIEW_CHARS: usize = 200;

/// First `max_chars` characters of `text`.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

fn score(hit: &SearchHit) -> f64 {
    hit.score.unwrap_or_default()
}

pub fn header(query: &CannedQuery) -> String {
    match query {
        CannedQuery::Genre(genre) => format!("Searching for {}", genre),
        CannedQuery::Quote(phrase) => format!("Searching for quotes containing: '{}'", phrase),
        CannedQuery::Author(author) => format!("Searching for books by: {}", author),
        CannedQuery::Themes(words) => format!("Searching for books about: {}", words.join(", ")),
        CannedQuery::LongChapters(min) => {
            format!("Searching for longer chapters (min {} words)...", min)
        }
    }
}

pub fn render(query: &CannedQuery, response: &SearchResponse) -> String {
    let mut out = header(query);
    out.push('\n');
    let hits = &response.hits.hits;
    let total = response.total();

    if hits.is_empty() {
        let line = match query {
            CannedQuery::Genre(genre) => format!("No {} books found!", genre),
            CannedQuery::Quote(_) => "No quotes found!".to_string(),
            CannedQuery::Author(author) => format!("No books found by {}!", author),
            CannedQuery::Themes(_) => "No books found discussing these themes!".to_string(),
            CannedQuery::LongChapters(min) => format!("No chapters found with {}+ words!", min),
        };
        out.push_str(&line);
        return out;
    }

    let found = match query {
        CannedQuery::Genre(genre) => format!("Found {} {} books!", total, genre),
        CannedQuery::Quote(_) => format!("Found {} quotes!", total),
        CannedQuery::Author(author) => format!("Found {} books by {}!", total, author),
        CannedQuery::Themes(_) => format!("Found {} books discussing these themes!", total),
        CannedQuery::LongChapters(_) => format!("Found {} long chapters!", total),
    };
    out.push_str(&found);

    for (i, hit) in hits.iter().enumerate() {
        let doc = &hit.source;
        let n = i + 1;
        let entry = match query {
            CannedQuery::Genre(_) => format!(
                "\n\n{}. {} by {}\n   Chapter: {}\n   Word Count: {}\n   Content Preview: {}...",
                n,
                doc.title,
                doc.author,
                doc.chapter,
                doc.word_count,
                preview(&doc.content, PREVIEW_CHARS)
            ),
            CannedQuery::Quote(_) => {
                let mut entry = format!(
                    "\n\n{}. From '{}' by {}\n   Chapter: {}\n   Score: {:.2}",
                    n,
                    doc.title,
                    doc.author,
                    doc.chapter,
                    score(hit)
                );
                if let Some(fragment) = hit.first_highlight("content") {
                    entry.push_str(&format!("\n   Quote: ...{}...", fragment));
                }
                entry
            }
            CannedQuery::Author(_) => format!(
                "\n\n{}. {}\n   Genre: {}\n   Chapter: {}\n   Word Count: {}",
                n, doc.title, doc.genre, doc.chapter, doc.word_count
            ),
            CannedQuery::Themes(_) => {
                let mut entry = format!(
                    "\n\n{}. {} by {}\n   Genre: {}\n   Score: {:.2}",
                    n,
                    doc.title,
                    doc.author,
                    doc.genre,
                    score(hit)
                );
                if let Some(fragment) = hit.first_highlight("content") {
                    entry.push_str(&format!("\n   Relevant passage: ...{}...", fragment));
                }
                entry
            }
            CannedQuery::LongChapters(_) => format!(
                "\n\n{}. {} by {}\n   Chapter: {}\n   Word Count: {}\n   Genre: {}",
                n, doc.title, doc.author, doc.chapter, doc.word_count, doc.genre
            ),
        };
        out.push_str(&entry);
    }

    out
}

pub fn render_failure(query: &CannedQuery, error: &dyn std::fmt::Display) -> String {
    format!(
        "{}\nOops! {} search failed: {}",
        header(query),
        query.kind(),
        error
    )
}

pub fn render_stats(total_chapters: u64, total_books: usize, genres: &[TermsBucket]) -> String {
    let mut out = format!(
        "Library Statistics\nTotal Chapters: {}\nTotal Books: {}\n\nGenre Breakdown:",
        total_chapters, total_books
    );
    for bucket in genres {
        out.push_str(&format!("\n  {}: {} chapters", bucket.key, bucket.doc_count));
    }
    out
}
