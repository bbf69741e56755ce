//! Search Service Client
//!
//! A thin handle over the document API of an Elasticsearch-compatible service.
//! The client is constructed explicitly (usually through [`SearchClient::connect`],
//! which also waits for the service to come up) and passed by reference to whatever
//! needs it; [`SearchClient::close`] ends its lifecycle.

use super::queries::count_body;
use super::readiness::{RetryPolicy, wait_for_ready};
use super::types::{BulkResponse, ClusterInfo, SearchResponse};
use crate::error::{ReadinessError, SearchError};
use crate::ingestion::types::IndexedDocument;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SearchClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl SearchClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a client and blocks until `GET /` answers.
    pub async fn connect(
        base_url: &str,
        policy: &RetryPolicy,
    ) -> Result<(Self, ClusterInfo), ReadinessError> {
        let client = Self::new(base_url);
        let info = wait_for_ready(policy, || client.info()).await?;

        tracing::info!(
            "Search service is responding (version {}, cluster {})",
            info.version.number,
            info.cluster_name
        );

        Ok((client, info))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn info(&self) -> Result<ClusterInfo, SearchError> {
        let response = self
            .http_client
            .get(self.url("/"))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .http_client
            .head(self.url(index))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            status => Err(SearchError::Status {
                status: status.as_u16(),
                body: String::new(),
            }),
        }
    }

    pub async fn delete_index(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .http_client
            .delete(self.url(index))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let response = self
            .http_client
            .put(self.url(index))
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Deletes `index` if present, then creates it with `body`.
    pub async fn recreate_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        if self.index_exists(index).await? {
            tracing::info!("Found existing index '{}', deleting it", index);
            self.delete_index(index).await?;
        }
        self.create_index(index, body).await?;
        tracing::info!("Created index '{}'", index);
        Ok(())
    }

    /// Uploads documents through `_bulk` in batches of `batch_size`.
    ///
    /// Returns the number of documents uploaded. The first rejected item aborts the upload.
    pub async fn bulk_index(
        &self,
        index: &str,
        documents: &[IndexedDocument],
        batch_size: usize,
    ) -> Result<usize, SearchError> {
        let mut uploaded = 0usize;

        for batch in documents.chunks(batch_size.max(1)) {
            let payload = bulk_payload(index, batch)?;
            let response = self
                .http_client
                .post(self.url("_bulk"))
                .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
                .body(payload)
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await?;
            let result: BulkResponse = decode(response).await?;

            if result.errors {
                return Err(first_bulk_error(&result));
            }

            uploaded += batch.len();
            tracing::info!("Uploaded {} chapters...", uploaded);
        }

        Ok(uploaded)
    }

    /// Makes everything uploaded so far visible to search.
    pub async fn refresh(&self, index: &str) -> Result<(), SearchError> {
        let response = self
            .http_client
            .post(self.url(&format!("{}/_refresh", index)))
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    pub async fn search(&self, index: &str, body: &Value) -> Result<SearchResponse, SearchError> {
        tracing::debug!("Searching '{}' with {}", index, body);
        let response = self
            .http_client
            .post(self.url(&format!("{}/_search", index)))
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;
        decode(response).await
    }

    /// Total number of documents in `index`.
    pub async fn count(&self, index: &str) -> Result<u64, SearchError> {
        Ok(self.search(index, &count_body()).await?.total())
    }

    pub fn close(self) {
        tracing::info!("Closing search client for {}", self.base_url);
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, SearchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SearchError::Status {
        status: status.as_u16(),
        body,
    })
}

/// Reads a successful response body as `T`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SearchError> {
    let body = ensure_success(response).await?.text().await?;
    serde_json::from_str(&body).map_err(SearchError::Decode)
}

/// NDJSON body: one `index` action line plus one source line per document.
pub fn bulk_payload(index: &str, documents: &[IndexedDocument]) -> Result<String, SearchError> {
    let mut payload = String::new();
    for doc in documents {
        let action = json!({ "index": { "_index": index, "_id": doc.id.to_string() } });
        payload.push_str(&action.to_string());
        payload.push('\n');
        payload.push_str(&serde_json::to_string(&doc.document)?);
        payload.push('\n');
    }
    Ok(payload)
}

fn first_bulk_error(result: &BulkResponse) -> SearchError {
    result
        .items
        .iter()
        .flat_map(|item| item.values())
        .find_map(|item| {
            item.error.as_ref().map(|error| SearchError::BulkItem {
                id: item.id.clone().unwrap_or_default(),
                reason: error
                    .reason
                    .clone()
                    .unwrap_or_else(|| error.kind.clone()),
            })
        })
        .unwrap_or_else(|| SearchError::BulkItem {
            id: String::new(),
            reason: "bulk request reported errors".to_string(),
        })
}
