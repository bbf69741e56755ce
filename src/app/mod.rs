//! Pipeline Orchestration
//!
//! Wires the search client, fetcher and splitter together:
//! wait for the service, recreate the index, ingest the catalog, upload, refresh,
//! then run the canned queries.

use crate::config::Config;
use crate::ingestion::catalog::default_catalog;
use crate::ingestion::documents::ingest_catalog;
use crate::ingestion::fetcher::GutenbergFetcher;
use crate::search::client::SearchClient;
use crate::search::mapping::index_mapping;
use crate::search::queries::{default_plan, genre_breakdown_body};
use crate::search::report::{render, render_failure, render_stats};

use anyhow::{Context, Result};

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub books: usize,
    pub documents: usize,
    /// One rendered block per query, in execution order.
    pub reports: Vec<String>,
}

pub async fn run(config: &Config) -> Result<RunSummary> {
    tracing::info!("Looking for search service at: {}", config.elastic_host);

    let (client, _info) = SearchClient::connect(&config.elastic_host, &config.retry_policy())
        .await
        .context("search service never became ready")?;

    client
        .recreate_index(&config.index, &index_mapping())
        .await
        .with_context(|| format!("failed to set up index '{}'", config.index))?;

    let catalog = default_catalog();
    let fetcher = GutenbergFetcher::new(
        &config.gutenberg_base,
        config.download_timeout(),
        config.normalization(),
    );
    let documents = ingest_catalog(&fetcher, &catalog).await;

    let uploaded = client
        .bulk_index(&config.index, &documents, config.batch_size)
        .await
        .context("failed to upload documents")?;
    client
        .refresh(&config.index)
        .await
        .context("failed to refresh index")?;

    let reports = if config.skip_queries {
        Vec::new()
    } else {
        run_queries(&client, &config.index, catalog.len()).await
    };

    client.close();

    Ok(RunSummary {
        books: catalog.len(),
        documents: uploaded,
        reports,
    })
}

/// Library statistics followed by every query in the default plan.
///
/// Failed queries are reported in place and never abort the run.
pub async fn run_queries(client: &SearchClient, index: &str, total_books: usize) -> Vec<String> {
    let mut reports = vec![library_stats(client, index, total_books).await];

    for query in default_plan() {
        let report = match client.search(index, &query.body()).await {
            Ok(response) => render(&query, &response),
            Err(err) => {
                tracing::warn!("{} search failed: {}", query.kind(), err);
                render_failure(&query, &err)
            }
        };
        reports.push(report);
    }

    reports
}

async fn library_stats(client: &SearchClient, index: &str, total_books: usize) -> String {
    let total_chapters = match client.count(index).await {
        Ok(count) => count,
        Err(err) => return format!("Library Statistics\nCouldn't count chapters: {}", err),
    };

    match client.search(index, &genre_breakdown_body()).await {
        Ok(response) => {
            let genres = response
                .aggregations
                .get("genres")
                .map(|agg| agg.buckets.as_slice())
                .unwrap_or_default();
            render_stats(total_chapters, total_books, genres)
        }
        Err(err) => format!("Library Statistics\nCouldn't get genre stats: {}", err),
    }
}
