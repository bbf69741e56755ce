//! Gutenberg Book Search Library
//!
//! Builds a small full-text library out of public-domain books and queries it through an
//! external search service. The binary (`main.rs`) is a thin wrapper around [`app::run`].
//!
//! ## Architecture Modules
//! - **`ingestion`**: Downloads books from Project Gutenberg, cleans the text and splits it
//!   into chapter documents. The chapter splitter is the only text logic of our own.
//! - **`search`**: Client for the search service (index lifecycle, bulk upload, queries),
//!   the wait-for-ready utility, canned query bodies and report rendering.
//! - **`app`**: Runs the whole pipeline end to end.
//! - **`config`**: CLI flags and environment variables.
//! - **`error`**: Typed errors for the HTTP-facing layers.

pub mod app;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod search;

#[cfg(test)]
mod test_support;
