//! Ingestion pipeline orchestration.
//!
//! Coordinates the end-to-end ingestion workflow:
//! 1. Walk the document store
//! 2. Read each Markdown file
//! 3. Derive title, section and source URL
//! 4. Chunk content and build records
//! 5. Upload records in batches

use std::time::Instant;

use crate::core::config::Config;
use crate::core::error::{DocfeedError, Result};
use crate::core::index::SearchIndexService;
use crate::core::indexer::batcher::BatchUploader;
use crate::core::indexer::metadata::{
    derive_section, derive_source, extract_title, has_extension,
};
use crate::core::indexer::records::build_records;
use crate::core::indexer::walker::{DocumentStore, ReadOutcome, StoreEntry};
use crate::core::indexer::{Chunker, FileWalker};
use crate::core::types::{Document, IngestStats};

/// Orchestrates the ingestion pipeline
pub struct IngestPipeline {
    chunker: Chunker,
    base_url: String,
    extension: String,
    batch_size: usize,
    exclude_patterns: Vec<String>,
    max_file_size_mb: usize,
    include_hidden: bool,
}

impl IngestPipeline {
    /// Create a new ingestion pipeline
    ///
    /// # Arguments
    ///
    /// * `base_url` - URL prefix for source links
    /// * `max_record_bytes` - Maximum chunk size in bytes
    /// * `batch_size` - Records per upload request
    ///
    /// # Returns
    ///
    /// A new `IngestPipeline` instance
    pub fn new(base_url: &str, max_record_bytes: usize, batch_size: usize) -> Result<Self> {
        if max_record_bytes == 0 {
            return Err(DocfeedError::ConfigError(
                "Max record bytes must be non-zero".to_string(),
            ));
        }
        if batch_size == 0 {
            return Err(DocfeedError::ConfigError(
                "Batch size must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            chunker: Chunker::new(max_record_bytes),
            base_url: base_url.to_string(),
            extension: "md".to_string(),
            batch_size,
            exclude_patterns: Vec::new(),
            max_file_size_mb: 10,
            include_hidden: false,
        })
    }

    /// Build a pipeline from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            &config.source.base_url,
            config.indexing.max_record_bytes,
            config.indexing.batch_size,
        )?
        .with_extension(&config.source.extension)
        .with_exclude_patterns(config.source.exclude_patterns.clone())
        .with_max_file_size_mb(config.source.max_file_size_mb)
        .with_hidden(config.source.include_hidden))
    }

    /// Document extension to pick up (without the dot)
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Glob patterns for paths to leave out
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Skip files larger than this
    pub fn with_max_file_size_mb(mut self, max_file_size_mb: usize) -> Self {
        self.max_file_size_mb = max_file_size_mb;
        self
    }

    /// Also walk hidden directories
    pub fn with_hidden(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }

    /// Open the directory at `root` as a document store
    pub fn open_store(&self, root: &std::path::Path) -> Result<FileWalker> {
        Ok(FileWalker::new(
            root,
            self.exclude_patterns.clone(),
            self.max_file_size_mb,
        )?
        .with_hidden(self.include_hidden))
    }

    /// Ingest the directory at `root` into `index_name`
    ///
    /// Fails before doing any work if `root` is missing. Unreadable
    /// files are logged and skipped. The first failed upload aborts
    /// the run.
    pub fn run<S: SearchIndexService + ?Sized>(
        &self,
        root: &std::path::Path,
        index_name: &str,
        service: &S,
    ) -> Result<IngestStats> {
        let store = self.open_store(root)?;
        self.run_store(&store, index_name, service)
    }

    /// Ingest every document of `store` into `index_name`
    pub fn run_store<D, S>(&self, store: &D, index_name: &str, service: &S) -> Result<IngestStats>
    where
        D: DocumentStore + ?Sized,
        S: SearchIndexService + ?Sized,
    {
        let start = Instant::now();
        let root = store.root();

        if !store.exists() {
            return Err(DocfeedError::StoreNotFound(root.display().to_string()));
        }
        if !root.is_dir() {
            return Err(DocfeedError::ConfigError(format!(
                "Document root is not a directory: {}",
                root.display()
            )));
        }

        tracing::info!(
            "Ingesting {:?} into index {:?} via {}",
            root,
            index_name,
            service.name()
        );

        let mut uploader = BatchUploader::new(service, index_name, self.batch_size);
        let mut files_indexed = 0;
        let mut files_skipped = 0;

        for entry in store.entries() {
            // Records still buffered are dropped; earlier batches stay committed
            let entry = entry?;
            if entry.is_dir || !has_extension(&entry.relative, &self.extension) {
                continue;
            }

            let content = match store.read(&entry) {
                ReadOutcome::Loaded(content) => content,
                ReadOutcome::Skipped(reason) => {
                    tracing::warn!("skip {}: {}", entry.relative, reason);
                    files_skipped += 1;
                    continue;
                }
            };

            let document = self.document(&entry, content);
            let chunks = self.chunker.chunk_text(&document.content);
            let records = build_records(&document, &chunks);

            tracing::debug!("{} ({} records)", document.relative_path, records.len());

            uploader.extend(records)?;
            files_indexed += 1;

            if files_indexed % 100 == 0 {
                tracing::info!("Progress: {} files processed", files_indexed);
            }
        }

        let summary = uploader.finish()?;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            "Ingestion complete: {} files indexed, {} skipped, \
             {} records in {}ms",
            files_indexed,
            files_skipped,
            summary.records_indexed,
            duration_ms
        );

        Ok(IngestStats {
            files_indexed,
            files_skipped,
            records_indexed: summary.records_indexed,
            batches_submitted: summary.batches_submitted,
            duration_ms,
            index_name: index_name.to_string(),
        })
    }

    /// Attach derived metadata to file content
    fn document(&self, entry: &StoreEntry, content: String) -> Document {
        Document {
            section: derive_section(&entry.relative),
            title: extract_title(&content),
            source: derive_source(&self.base_url, &entry.relative, &self.extension),
            relative_path: entry.relative.clone(),
            content,
        }
    }
}
