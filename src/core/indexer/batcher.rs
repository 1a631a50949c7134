//! Fixed-capacity record batching.
//!
//! Records are buffered in arrival order and uploaded as one request
//! whenever the buffer fills up, plus once more for the remainder at
//! the end of a run. The first failed upload stops everything; the
//! batches already sent stay in the index.

use crate::core::error::{DocfeedError, Result};
use crate::core::index::SearchIndexService;
use crate::core::types::Record;

/// Default number of records per upload
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Totals reported when a run's uploads complete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Records committed to the index
    pub records_indexed: usize,

    /// Successful upload requests
    pub batches_submitted: usize,
}

/// Buffers records and submits them to an index in fixed-size batches.
pub struct BatchUploader<'a, S: SearchIndexService + ?Sized> {
    service: &'a S,
    index_name: &'a str,
    capacity: usize,
    buffer: Vec<Record>,
    summary: UploadSummary,
}

impl<'a, S: SearchIndexService + ?Sized> BatchUploader<'a, S> {
    /// Create an uploader for `index_name`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    pub fn new(service: &'a S, index_name: &'a str, capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be > 0");

        Self {
            service,
            index_name,
            capacity,
            buffer: Vec::with_capacity(capacity),
            summary: UploadSummary::default(),
        }
    }

    /// Number of records waiting for the next upload
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Totals so far
    pub fn summary(&self) -> UploadSummary {
        self.summary
    }

    /// Add a record, uploading the buffer if it is now full.
    pub fn push(&mut self, record: Record) -> Result<()> {
        self.buffer.push(record);
        if self.buffer.len() >= self.capacity {
            self.flush()?;
        }
        Ok(())
    }

    /// Add several records in order.
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) -> Result<()> {
        for record in records {
            self.push(record)?;
        }
        Ok(())
    }

    /// Upload whatever is left and return the run totals.
    pub fn finish(mut self) -> Result<UploadSummary> {
        if !self.buffer.is_empty() {
            self.flush()?;
        }

        tracing::info!(
            "Indexed {} records to index {:?} in {} batches",
            self.summary.records_indexed,
            self.index_name,
            self.summary.batches_submitted
        );

        Ok(self.summary)
    }

    fn flush(&mut self) -> Result<()> {
        let batch = self.summary.batches_submitted + 1;
        let pending = self.buffer.len();

        self.service
            .upsert_batch(self.index_name, &self.buffer)
            .map_err(|e| DocfeedError::BatchFailed {
                batch,
                pending,
                committed: self.summary.records_indexed,
                reason: e.to_string(),
            })?;

        self.summary.batches_submitted = batch;
        self.summary.records_indexed += pending;
        self.buffer.clear();

        tracing::info!("Batch {}: {} records ok", batch, pending);
        Ok(())
    }
}
