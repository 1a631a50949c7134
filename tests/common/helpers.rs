// Test helper functions

use docfeed::core::config::{BackendKind, Config};
use docfeed::core::error::{DocfeedError, Result};
use docfeed::core::index::SearchIndexService;
use docfeed::core::services::Services;
use docfeed::core::types::{Record, SearchHit};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// In-memory index service that records every batch.
///
/// Fails the `fail_on`-th upload (1-based) when set.
#[derive(Default)]
pub struct FakeIndex {
    batches: Mutex<Vec<Vec<Record>>>,
    attempts: Mutex<usize>,
    fail_on: Option<usize>,
}

#[allow(dead_code)] // Used in integration tests
impl FakeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the `batch`-th upload
    pub fn failing_on(batch: usize) -> Self {
        Self {
            fail_on: Some(batch),
            ..Self::default()
        }
    }

    /// Sizes of the accepted batches, in order
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().iter().map(Vec::len).collect()
    }

    /// Every accepted record, in upload order
    pub fn records(&self) -> Vec<Record> {
        self.batches.lock().unwrap().concat()
    }

    /// Identifiers of every accepted record, in upload order
    pub fn ids(&self) -> Vec<String> {
        self.records().into_iter().map(|r| r.id).collect()
    }

    /// Upload attempts, including the failed one
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl SearchIndexService for FakeIndex {
    fn upsert_batch(&self, _index_name: &str, records: &[Record]) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            *attempts += 1;
            *attempts
        };

        if self.fail_on == Some(attempt) {
            return Err(DocfeedError::IndexService(
                "503 Service Unavailable".to_string(),
            ));
        }

        self.batches.lock().unwrap().push(records.to_vec());
        Ok(())
    }

    fn search(&self, _index_name: &str, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        Ok(self
            .records()
            .into_iter()
            .filter(|r| r.content.contains(query) || r.title.contains(query))
            .take(limit)
            .map(|r| SearchHit {
                id: r.id,
                title: r.title,
                source: r.source,
                section: r.section,
                content: r.content,
                score: None,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Services backed by a local Tantivy index in a temporary directory
///
/// Returns the TempDir to keep it alive for the test duration.
#[allow(dead_code)] // Used in integration tests
pub fn create_local_services() -> (Services, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.backend.kind = BackendKind::Local;
    config.backend.index_dir = temp_dir.path().to_path_buf();

    let services = Services::new(config).unwrap();
    (services, temp_dir)
}

/// Services whose index service is `index`
#[allow(dead_code)] // Used in integration tests
pub fn create_fake_services(config: Config, index: Arc<FakeIndex>) -> Services {
    Services::with_index(config, index)
}
