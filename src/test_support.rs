//! In-process stand-in for the search service and the Gutenberg file server.
//!
//! Serves just enough of the document API for the client and pipeline tests:
//! `GET /`, index HEAD/PUT/DELETE, `_bulk`, `_refresh`, `_search`, plus
//! `GET /files/{id}/{file}` for book downloads.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, head, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub(crate) struct StubState {
    pub index_exists: bool,
    pub created_mapping: Option<Value>,
    pub deletions: usize,
    pub refreshes: usize,
    /// `GET /` answers 503 this many times before succeeding.
    pub info_failures: usize,
    pub info_calls: usize,
    pub reject_bulk: bool,
    pub bulk_requests: usize,
    /// Indexed `(_id, _source)` pairs in upload order.
    pub documents: Vec<(String, Value)>,
    pub searches: Vec<Value>,
    /// `_search` answers 200 with a body that is not a search response.
    pub malformed_search: bool,
    /// `"{id}/{file}"` -> body.
    pub books: HashMap<String, String>,
}

pub(crate) type SharedStub = Arc<Mutex<StubState>>;

/// Starts the stub on an ephemeral port and returns its base URL.
pub(crate) async fn spawn_stub(state: StubState) -> (String, SharedStub) {
    let shared = Arc::new(Mutex::new(state));

    let app = Router::new()
        .route("/", get(info))
        .route("/_bulk", post(bulk))
        .route("/files/:id/:file", get(book))
        .route(
            "/:index",
            head(index_head).put(index_create).delete(index_delete),
        )
        .route("/:index/_refresh", post(refresh))
        .route("/:index/_search", post(search))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), shared)
}

async fn info(State(state): State<SharedStub>) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.info_calls += 1;
    if state.info_failures > 0 {
        state.info_failures -= 1;
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "node is starting" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({
            "cluster_name": "stub-cluster",
            "version": { "number": "8.11.0" }
        })),
    )
}

async fn index_head(State(state): State<SharedStub>, Path(_index): Path<String>) -> StatusCode {
    if state.lock().unwrap().index_exists {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn index_create(
    State(state): State<SharedStub>,
    Path(index): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    if state.index_exists {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "type": "resource_already_exists_exception" } })),
        );
    }
    state.index_exists = true;
    state.created_mapping = Some(body);
    (
        StatusCode::OK,
        Json(json!({ "acknowledged": true, "index": index })),
    )
}

async fn index_delete(
    State(state): State<SharedStub>,
    Path(_index): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.index_exists = false;
    state.deletions += 1;
    state.documents.clear();
    (StatusCode::OK, Json(json!({ "acknowledged": true })))
}

async fn bulk(State(state): State<SharedStub>, body: String) -> (StatusCode, Json<Value>) {
    let mut state = state.lock().unwrap();
    state.bulk_requests += 1;

    let lines: Vec<Value> = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let mut items = Vec::new();
    for pair in lines.chunks(2) {
        let id = pair[0]["index"]["_id"].as_str().unwrap_or_default().to_string();
        if state.reject_bulk {
            items.push(json!({ "index": {
                "_id": id,
                "status": 400,
                "error": { "type": "mapper_parsing_exception", "reason": "failed to parse field [word_count]" }
            }}));
        } else {
            state.documents.push((id.clone(), pair[1].clone()));
            items.push(json!({ "index": { "_id": id, "status": 201 } }));
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "took": 1, "errors": state.reject_bulk, "items": items })),
    )
}

async fn refresh(State(state): State<SharedStub>, Path(_index): Path<String>) -> Json<Value> {
    state.lock().unwrap().refreshes += 1;
    Json(json!({ "_shards": { "total": 1, "successful": 1, "failed": 0 } }))
}

async fn search(
    State(state): State<SharedStub>,
    Path(_index): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let mut state = state.lock().unwrap();
    state.searches.push(body.clone());
    if state.malformed_search {
        return Json(json!({ "hits": "unavailable" }));
    }

    let size = body["size"].as_u64().unwrap_or(10) as usize;
    let hits: Vec<Value> = state
        .documents
        .iter()
        .take(size)
        .map(|(id, source)| {
            let content = source["content"].as_str().unwrap_or_default();
            let fragment: String = content.chars().take(40).collect();
            json!({
                "_id": id,
                "_score": 1.5,
                "_source": source,
                "highlight": { "content": [fragment] }
            })
        })
        .collect();

    let mut response = json!({
        "took": 1,
        "hits": {
            "total": { "value": state.documents.len(), "relation": "eq" },
            "max_score": 1.5,
            "hits": hits
        }
    });

    if body.get("aggs").is_some() {
        let mut counts: BTreeMap<String, u64> = BTreeMap::new();
        for (_, source) in &state.documents {
            let genre = source["genre"].as_str().unwrap_or_default().to_string();
            *counts.entry(genre).or_insert(0) += 1;
        }
        let mut buckets: Vec<(String, u64)> = counts.into_iter().collect();
        buckets.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let buckets: Vec<Value> = buckets
            .into_iter()
            .map(|(key, doc_count)| json!({ "key": key, "doc_count": doc_count }))
            .collect();
        response["aggregations"] = json!({ "genres": { "buckets": buckets } });
    }

    Json(response)
}

async fn book(
    State(state): State<SharedStub>,
    Path((id, file)): Path<(String, String)>,
) -> (StatusCode, String) {
    match state.lock().unwrap().books.get(&format!("{}/{}", id, file)) {
        Some(text) => (StatusCode::OK, text.clone()),
        None => (StatusCode::NOT_FOUND, "Not Found".to_string()),
    }
}

/// A small book with boilerplate, three chapters and a short preamble.
pub(crate) fn sample_book(title: &str) -> String {
    let paragraph = "It was a bright cold day and the clocks were striking thirteen while the wind \
                     swept along the quiet street past the old stone houses.";
    let mut text = format!(
        "The Project Gutenberg eBook of {title}\r\n\r\nThis eBook is for the use of anyone anywhere.\r\n\r\n\
         *** START OF THE PROJECT GUTENBERG EBOOK {upper} ***\r\n\r\n",
        title = title,
        upper = title.to_uppercase()
    );
    for numeral in ["I", "II", "III"] {
        text.push_str(&format!("CHAPTER {}\r\n\r\n", numeral));
        for _ in 0..2 {
            text.push_str(paragraph);
            text.push_str("\r\n");
        }
        text.push_str("\r\n");
    }
    text.push_str("*** END OF THE PROJECT GUTENBERG EBOOK ***\r\n\r\nLicense terms follow.\r\n");
    text
}
