//! Search index service backends.
//!
//! The ingestion pipeline only needs batch upserts; the `search`
//! command also uses queries. Both go through [`SearchIndexService`]
//! so the pipeline never knows which backend it is talking to.
//!
//! # Backends
//!
//! - **AlgoliaClient**: hosted index over the Algolia REST API
//! - **LocalIndex**: on-disk BM25 index backed by Tantivy

mod algolia;
mod local;

pub use algolia::AlgoliaClient;
pub use local::LocalIndex;

use crate::core::error::Result;
use crate::core::types::{Record, SearchHit};

/// A remote or local full-text index that accepts record upserts.
///
/// Calls are blocking. Implementations must not retry: a failed
/// upload is reported to the caller as is.
pub trait SearchIndexService {
    /// Insert or replace `records` in `index_name` as one request.
    ///
    /// Records are keyed by [`Record::id`]; uploading an existing id
    /// overwrites the previous record.
    fn upsert_batch(&self, index_name: &str, records: &[Record]) -> Result<()>;

    /// Run a free-text query and return at most `limit` ranked hits.
    fn search(&self, index_name: &str, query: &str, limit: usize) -> Result<Vec<SearchHit>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

impl<T: SearchIndexService + ?Sized> SearchIndexService for Box<T> {
    fn upsert_batch(&self, index_name: &str, records: &[Record]) -> Result<()> {
        (**self).upsert_batch(index_name, records)
    }

    fn search(&self, index_name: &str, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        (**self).search(index_name, query, limit)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
