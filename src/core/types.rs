//! Core data types for docfeed.
//!
//! Documents are read from the store, split into chunks, and turned
//! into records that are uploaded in batches. Search hits come back
//! from whichever index service is configured.

use serde::{Deserialize, Serialize};

/// A single Markdown document read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Path relative to the store root, `/`-separated
    pub relative_path: String,

    /// Parent directory of `relative_path` (empty at top level)
    pub section: String,

    /// First top-level heading, or empty
    pub title: String,

    /// Canonical URL of the published page
    pub source: String,

    /// Raw text content
    pub content: String,
}

/// A contiguous piece of a document's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Chunk text (a slice of the document content)
    pub text: &'a str,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

/// The unit submitted to the index service.
///
/// Serializes to the flat wire shape
/// `{ objectID, content, source, section, title }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Stable identifier, unique within a run
    #[serde(rename = "objectID")]
    pub id: String,

    /// Chunk text
    pub content: String,

    /// Source URL of the page
    pub source: String,

    /// Section (parent directory)
    pub section: String,

    /// Page title
    pub title: String,
}

/// Statistics from an ingestion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents read and turned into records
    pub files_indexed: usize,

    /// Documents that could not be read
    pub files_skipped: usize,

    /// Records committed to the index
    pub records_indexed: usize,

    /// Batches submitted successfully
    pub batches_submitted: usize,

    /// Run duration in milliseconds
    pub duration_ms: u64,

    /// Target index name
    pub index_name: String,
}

/// A single search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// Record identifier
    pub id: String,

    /// Page title
    pub title: String,

    /// Source URL
    pub source: String,

    /// Section
    pub section: String,

    /// Record content
    pub content: String,

    /// Relevance score, when the service reports one
    pub score: Option<f32>,
}

/// Response from a search operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Original query string
    pub query: String,

    /// Index that was searched
    pub index_name: String,

    /// Search results
    pub hits: Vec<SearchHit>,

    /// Number of results returned
    pub count: usize,

    /// Query duration in milliseconds
    pub duration_ms: u64,
}
