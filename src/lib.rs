//! docfeed - Markdown docs ingestion for search indexes
//!
//! Walks a tree of Markdown pages, splits each page into
//! byte-bounded records carrying its title, section and public URL,
//! and uploads them to a search index in fixed-size batches.
//!
//! # Architecture
//!
//! - **core**: Domain logic
//!   - config, error, types
//!   - indexer (walker, metadata, chunker, records, batcher, pipeline)
//!   - index (Algolia and local Tantivy backends)
//!   - services (backend selection)
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (byte budget, never splits a character)
//! - Stable record ids, so re-runs overwrite instead of duplicating
//! - Fail-fast batch uploads without retries

// Core domain logic
pub mod core;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use crate::core::config::Config;
pub use crate::core::error::{DocfeedError, Result};
pub use crate::core::services::Services;
pub use crate::core::types::*;
