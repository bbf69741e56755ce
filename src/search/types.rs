use crate::ingestion::types::ChapterDocument;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub cluster_name: String,
    pub version: VersionInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub hits: Hits,
    #[serde(default)]
    pub aggregations: HashMap<String, TermsAggregation>,
}

impl SearchResponse {
    pub fn total(&self) -> u64 {
        self.hits.total.value
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hits {
    pub total: TotalHits,
    #[serde(default)]
    pub hits: Vec<SearchHit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalHits {
    pub value: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    #[serde(rename = "_id")]
    pub id: String,
    /// Null when the query sorts on a field.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: ChapterDocument,
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
}

impl SearchHit {
    /// First highlighted fragment of `field`, if any.
    pub fn first_highlight(&self, field: &str) -> Option<&str> {
        self.highlight
            .get(field)
            .and_then(|fragments| fragments.first())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsAggregation {
    #[serde(default)]
    pub buckets: Vec<TermsBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermsBucket {
    pub key: String,
    pub doc_count: u64,
}

/// Response of `POST /_bulk`.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkResponse {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkItem {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub error: Option<BulkItemError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkItemError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
}
