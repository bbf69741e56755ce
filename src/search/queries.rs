//! Canned Queries
//!
//! Query bodies for the fixed set of searches run against the library.
//! Each body carries its own `size` so the client only needs the index name.

use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub enum CannedQuery {
    /// Exact match on the `genre` keyword.
    Genre(String),
    /// Phrase match on chapter content, with highlighted fragments.
    Quote(String),
    /// Full-text match on the author name.
    Author(String),
    /// Any of the words in title or content, with a highlighted passage.
    Themes(Vec<String>),
    /// Chapters with at least this many words, longest first.
    LongChapters(u64),
}

impl CannedQuery {
    pub fn size(&self) -> usize {
        match self {
            CannedQuery::Quote(_) => 3,
            _ => 5,
        }
    }

    pub fn body(&self) -> Value {
        let mut body = match self {
            CannedQuery::Genre(genre) => json!({
                "query": { "term": { "genre": genre } }
            }),
            CannedQuery::Quote(phrase) => json!({
                "query": { "match_phrase": { "content": phrase } },
                "highlight": {
                    "fields": {
                        "content": { "fragment_size": 150, "number_of_fragments": 2 }
                    }
                }
            }),
            CannedQuery::Author(author) => json!({
                "query": { "match": { "author": author } }
            }),
            CannedQuery::Themes(words) => json!({
                "query": {
                    "bool": {
                        "must": [
                            {
                                "multi_match": {
                                    "query": words.join(" "),
                                    "fields": ["title", "content"]
                                }
                            }
                        ]
                    }
                },
                "highlight": {
                    "fields": {
                        "content": { "fragment_size": 200, "number_of_fragments": 1 }
                    }
                }
            }),
            CannedQuery::LongChapters(min_words) => json!({
                "query": { "range": { "word_count": { "gte": min_words } } },
                "sort": [ { "word_count": { "order": "desc" } } ]
            }),
        };
        body["size"] = json!(self.size());
        body
    }

    /// Short name used in failure messages.
    pub fn kind(&self) -> &'static str {
        match self {
            CannedQuery::Genre(_) => "Genre",
            CannedQuery::Quote(_) => "Quote",
            CannedQuery::Author(_) => "Author",
            CannedQuery::Themes(_) => "Theme",
            CannedQuery::LongChapters(_) => "Long book",
        }
    }
}

/// Counts every document in the index.
pub fn count_body() -> Value {
    json!({ "query": { "match_all": {} }, "size": 0 })
}

/// Per-genre document counts, top 10 genres.
pub fn genre_breakdown_body() -> Value {
    json!({
        "aggs": {
            "genres": { "terms": { "field": "genre", "size": 10 } }
        },
        "size": 0
    })
}

/// The searches run after ingestion, in order.
pub fn default_plan() -> Vec<CannedQuery> {
    let themes = |words: &[&str]| CannedQuery::Themes(words.iter().map(|w| w.to_string()).collect());

    vec![
        CannedQuery::Genre("Adventure".to_string()),
        CannedQuery::Genre("Gothic".to_string()),
        CannedQuery::Quote("Call me Ishmael".to_string()),
        CannedQuery::Quote("It was the best of times".to_string()),
        CannedQuery::Quote("To be or not to be".to_string()),
        CannedQuery::Author("Mark Twain".to_string()),
        CannedQuery::Author("Charles Dickens".to_string()),
        themes(&["love", "death"]),
        themes(&["adventure", "sea"]),
        themes(&["monster", "fear"]),
        CannedQuery::LongChapters(1500),
    ]
}
