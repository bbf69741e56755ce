//! Error types shared by the ingestion and search layers.

use thiserror::Error;

/// Failures talking to the full-text search service.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request to search service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("bulk upload rejected document {id}: {reason}")]
    BulkItem { id: String, reason: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not decode search service response: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Failures downloading a book.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),
}

/// Returned by `wait_for_ready` when the probe never succeeds.
#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("service not ready after {attempts} attempt(s): {last_error}")]
    TimedOut { attempts: usize, last_error: String },
}
