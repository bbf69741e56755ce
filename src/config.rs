use crate::ingestion::fetcher::{DEFAULT_BASE_URL, Normalization};
use crate::search::mapping::DEFAULT_INDEX;
use crate::search::readiness::RetryPolicy;

use clap::Parser;
use std::time::Duration;

/// Command-line and environment configuration.
///
/// Every flag falls back to an environment variable; a `.env` file is loaded first.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "book-search",
    about = "Index Project Gutenberg books by chapter and run sample searches"
)]
pub struct Config {
    /// Base URL of the search service.
    #[arg(long, env = "ELASTIC_HOST", default_value = "http://localhost:9200")]
    pub elastic_host: String,

    #[arg(long, env = "INDEX_NAME", default_value = DEFAULT_INDEX)]
    pub index: String,

    /// Base URL books are downloaded from (`{base}/{id}/{id}-0.txt`).
    #[arg(long, env = "GUTENBERG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub gutenberg_base: String,

    #[arg(long, env = "DOWNLOAD_TIMEOUT_SECS", default_value_t = 30)]
    pub download_timeout_secs: u64,

    /// Readiness probes before giving up on the search service.
    #[arg(long, env = "READY_MAX_ATTEMPTS", default_value_t = 30)]
    pub max_attempts: usize,

    #[arg(long, env = "READY_RETRY_DELAY_MS", default_value_t = 2000)]
    pub retry_delay_ms: u64,

    /// Multiply the retry delay by this after every failed probe.
    #[arg(long, env = "READY_BACKOFF", default_value_t = 1.0)]
    pub backoff: f64,

    /// Random extra delay, up to this many milliseconds, added to every retry.
    #[arg(long, env = "READY_RETRY_JITTER_MS", default_value_t = 0)]
    pub retry_jitter_ms: u64,

    /// Collapse newlines too, so chapter detection only sees one line per book.
    #[arg(long, env = "COLLAPSE_NEWLINES")]
    pub collapse_newlines: bool,

    #[arg(long, env = "BULK_BATCH_SIZE", default_value_t = 100)]
    pub batch_size: usize,

    /// Stop after indexing.
    #[arg(long)]
    pub skip_queries: bool,
}

impl Config {
    pub fn retry_policy(&self) -> RetryPolicy {
        let delay = Duration::from_millis(self.retry_delay_ms);
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: delay,
            multiplier: self.backoff,
            max_delay: delay.max(Duration::from_secs(30)),
            jitter: Duration::from_millis(self.retry_jitter_ms),
        }
    }

    pub fn normalization(&self) -> Normalization {
        if self.collapse_newlines {
            Normalization::Collapse
        } else {
            Normalization::PreserveLines
        }
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
