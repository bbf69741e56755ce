//! Search Service Module
//!
//! Everything that talks to the external full-text search service.
//! Tokenization, scoring, aggregation and highlighting all happen inside the service;
//! this module only builds requests and interprets responses.
//!
//! ## Submodules
//! - **`client`**: HTTP handle for index lifecycle, bulk upload, refresh and search.
//! - **`readiness`**: Generic wait-for-ready polling with configurable backoff.
//! - **`mapping`**: Index schema for chapter documents.
//! - **`queries`**: Canned query bodies.
//! - **`report`**: Plain-text rendering of results.
//! - **`types`**: Typed responses (hits, aggregations, bulk results).

pub mod client;
pub mod mapping;
pub mod queries;
pub mod readiness;
pub mod report;
pub mod types;
