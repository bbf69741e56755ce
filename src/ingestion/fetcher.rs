//! Gutenberg Fetcher
//!
//! Downloads plain-text ebooks and turns them into the cleaned text the splitter expects:
//! archive boilerplate outside the START/END markers is dropped and whitespace is
//! normalized according to [`Normalization`].

use super::types::BookSource;
use crate::error::FetchError;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::StatusCode;
use std::time::Duration;

const START_MARKER: &str = "*** START OF THE PROJECT GUTENBERG EBOOK";
const END_MARKER: &str = "*** END OF THE PROJECT GUTENBERG EBOOK";

pub const DEFAULT_BASE_URL: &str = "https://www.gutenberg.org/files";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// How whitespace is cleaned after download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Collapse whitespace inside each line, drop blank lines, keep line breaks.
    #[default]
    PreserveLines,
    /// Collapse all whitespace, newlines included, into single spaces.
    Collapse,
}

pub struct GutenbergFetcher {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    normalization: Normalization,
}

impl GutenbergFetcher {
    pub fn new(base_url: &str, timeout: Duration, normalization: Normalization) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            normalization,
        }
    }

    /// `{base}/{id}/{id}-0.txt`
    pub fn book_url(&self, book_id: u32) -> String {
        format!("{}/{}/{}-0.txt", self.base_url, book_id, book_id)
    }

    /// Downloads and cleans a book. Failures, including a book with no text left after
    /// cleaning, are logged and reported as `None`.
    pub async fn download(&self, book: &BookSource) -> Option<String> {
        let url = self.book_url(book.id);
        tracing::info!("Downloading {} by {}...", book.title, book.author);

        match self.fetch_text(&url).await {
            Ok(text) => {
                let cleaned = clean_text(&text, self.normalization);
                if cleaned.is_empty() {
                    tracing::warn!("Downloaded {} but no text was left after cleaning", book.title);
                    return None;
                }
                Some(cleaned)
            }
            Err(FetchError::Status(status)) => {
                tracing::warn!("Failed to download {} (Status: {})", book.title, status);
                None
            }
            Err(err) => {
                tracing::error!("Error downloading {}: {}", book.title, err);
                None
            }
        }
    }

    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http_client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Strips boilerplate, then normalizes whitespace.
pub fn clean_text(raw: &str, normalization: Normalization) -> String {
    normalize_whitespace(strip_boilerplate(raw), normalization)
}

/// Keeps the text from the start marker up to (not including) the end marker.
///
/// If either marker is missing the whole text is returned unchanged.
pub fn strip_boilerplate(text: &str) -> &str {
    match (text.find(START_MARKER), text.find(END_MARKER)) {
        (Some(start), Some(end)) if start <= end => &text[start..end],
        (Some(_), Some(_)) => "",
        _ => text,
    }
}

pub fn normalize_whitespace(text: &str, normalization: Normalization) -> String {
    match normalization {
        Normalization::Collapse => WHITESPACE.replace_all(text, " ").trim().to_string(),
        Normalization::PreserveLines => text
            .lines()
            .map(|line| WHITESPACE.replace_all(line, " ").trim().to_string())
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
