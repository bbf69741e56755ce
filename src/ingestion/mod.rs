//! Ingestion Module
//!
//! Acquires books from Project Gutenberg and turns them into index documents.
//!
//! ## Workflow
//! 1. **Download**: `fetcher` fetches the plain-text ebook for each catalog entry.
//! 2. **Clean**: Boilerplate outside the START/END markers is dropped and whitespace normalized.
//! 3. **Split**: `splitter` cuts the book into chapters (or fixed-size sections).
//! 4. **Build**: `documents` attaches metadata, drops short segments and assigns sequential ids.

pub mod catalog;
pub mod documents;
pub mod fetcher;
pub mod splitter;
pub mod types;
