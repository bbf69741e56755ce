use serde_json::{Value, json};

pub const DEFAULT_INDEX: &str = "gutenberg_books";

/// Index schema for `ChapterDocument`.
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "title": { "type": "text", "analyzer": "standard" },
                "author": { "type": "text", "analyzer": "standard" },
                "content": { "type": "text", "analyzer": "standard" },
                "genre": { "type": "keyword" },
                "book_id": { "type": "keyword" },
                "chapter": { "type": "text" },
                "publication_year": { "type": "integer" },
                "word_count": { "type": "integer" }
            }
        }
    })
}
