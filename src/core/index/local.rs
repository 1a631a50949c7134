//! On-disk BM25 index backed by Tantivy.
//!
//! Each index name maps to its own directory under the configured
//! root. Records are keyed by `object_id`: an upsert deletes any
//! document with the same id before adding the new one, so re-runs
//! overwrite instead of duplicating.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{Field, Schema, Value, STORED, STRING, TEXT};
use tantivy::{doc, Index, IndexWriter, TantivyDocument, Term};

use crate::core::error::{DocfeedError, Result};
use crate::core::index::SearchIndexService;
use crate::core::types::{Record, SearchHit};

/// Writer heap size (50MB)
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Create the Tantivy schema for record indexing
///
/// Fields:
/// - object_id: Record identifier (STRING | STORED), the upsert key
/// - title: Page title (TEXT | STORED)
/// - content: Chunk text (TEXT | STORED)
/// - source: Source URL (STRING | STORED)
/// - section: Parent directory (STRING | STORED)
/// - indexed_at: Timestamp (Date | STORED)
pub fn create_schema() -> Schema {
    let mut builder = Schema::builder();

    builder.add_text_field("object_id", STRING | STORED);

    // Searchable text
    builder.add_text_field("title", TEXT | STORED);
    builder.add_text_field("content", TEXT | STORED);

    // Metadata (stored for retrieval)
    builder.add_text_field("source", STRING | STORED);
    builder.add_text_field("section", STRING | STORED);

    builder.add_date_field("indexed_at", STORED);

    builder.build()
}

/// Resolved schema fields
struct Fields {
    object_id: Field,
    title: Field,
    content: Field,
    source: Field,
    section: Field,
    indexed_at: Field,
}

impl Fields {
    fn resolve(schema: &Schema) -> Result<Self> {
        let field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|e| DocfeedError::StorageError(format!("Missing {name} field: {e}")))
        };

        Ok(Self {
            object_id: field("object_id")?,
            title: field("title")?,
            content: field("content")?,
            source: field("source")?,
            section: field("section")?,
            indexed_at: field("indexed_at")?,
        })
    }
}

/// Local Tantivy-backed index service
#[derive(Debug, Clone)]
pub struct LocalIndex {
    /// Directory holding one sub-directory per index name
    root: PathBuf,
}

impl LocalIndex {
    /// Create a local index service rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory of the named index
    pub fn index_path(&self, index_name: &str) -> Result<PathBuf> {
        validate_index_name(index_name)?;
        Ok(self.root.join(index_name))
    }

    /// Whether the named index has been created
    pub fn index_exists(&self, index_name: &str) -> bool {
        self.index_path(index_name)
            .map(|p| p.join("meta.json").exists())
            .unwrap_or(false)
    }

    /// Number of live records in the named index
    pub fn document_count(&self, index_name: &str) -> Result<u64> {
        let index = self.open(index_name)?;
        let reader = index
            .reader()
            .map_err(|e| DocfeedError::StorageError(format!("Failed to create reader: {e}")))?;
        Ok(reader.searcher().num_docs())
    }

    fn open(&self, index_name: &str) -> Result<Index> {
        if !self.index_exists(index_name) {
            return Err(DocfeedError::SearchFailed(format!(
                "Index not found: {index_name}"
            )));
        }
        let path = self.index_path(index_name)?;
        Index::open_in_dir(&path)
            .map_err(|e| DocfeedError::StorageError(format!("Failed to open index: {e}")))
    }

    fn open_or_create(&self, index_name: &str) -> Result<Index> {
        if self.index_exists(index_name) {
            return self.open(index_name);
        }

        let path = self.index_path(index_name)?;
        fs::create_dir_all(&path)?;
        tracing::info!("Creating local index at {:?}", path);

        Index::create_in_dir(&path, create_schema())
            .map_err(|e| DocfeedError::StorageError(format!("Failed to create index: {e}")))
    }

    /// Extract text field from document
    fn extract_text(doc: &TantivyDocument, field: Field) -> String {
        doc.get_first(field)
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string()
    }
}

impl SearchIndexService for LocalIndex {
    fn upsert_batch(&self, index_name: &str, records: &[Record]) -> Result<()> {
        let index = self.open_or_create(index_name)?;
        let fields = Fields::resolve(&index.schema())?;

        let mut writer: IndexWriter = index
            .writer(WRITER_HEAP_BYTES)
            .map_err(|e| DocfeedError::IndexService(format!("Failed to create writer: {e}")))?;

        let now = tantivy::DateTime::from_timestamp_secs(Utc::now().timestamp());

        for record in records {
            writer.delete_term(Term::from_field_text(fields.object_id, &record.id));
            writer
                .add_document(doc!(
                    fields.object_id => record.id.as_str(),
                    fields.title => record.title.as_str(),
                    fields.content => record.content.as_str(),
                    fields.source => record.source.as_str(),
                    fields.section => record.section.as_str(),
                    fields.indexed_at => now,
                ))
                .map_err(|e| DocfeedError::IndexService(format!("Failed to add document: {e}")))?;
        }

        writer
            .commit()
            .map_err(|e| DocfeedError::IndexService(format!("Failed to commit: {e}")))?;

        Ok(())
    }

    fn search(&self, index_name: &str, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(DocfeedError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let index = self.open(index_name)?;
        let fields = Fields::resolve(&index.schema())?;
        let reader = index
            .reader()
            .map_err(|e| DocfeedError::SearchFailed(format!("Failed to create reader: {e}")))?;
        let searcher = reader.searcher();

        let query_parser = QueryParser::for_index(&index, vec![fields.title, fields.content]);
        let parsed = query_parser
            .parse_query(query)
            .map_err(|e| DocfeedError::InvalidQuery(format!("Failed to parse query: {e}")))?;

        let top_docs = searcher
            .search(&parsed, &TopDocs::with_limit(limit.max(1)))
            .map_err(|e| DocfeedError::SearchFailed(format!("Search failed: {e}")))?;

        let mut hits = Vec::with_capacity(top_docs.len());
        for (score, doc_address) in top_docs {
            let doc: TantivyDocument = searcher.doc(doc_address).map_err(|e| {
                DocfeedError::SearchFailed(format!("Failed to retrieve document: {e}"))
            })?;

            hits.push(SearchHit {
                id: Self::extract_text(&doc, fields.object_id),
                title: Self::extract_text(&doc, fields.title),
                source: Self::extract_text(&doc, fields.source),
                section: Self::extract_text(&doc, fields.section),
                content: Self::extract_text(&doc, fields.content),
                score: Some(score),
            });
        }

        Ok(hits)
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Index names become directory names
fn validate_index_name(index_name: &str) -> Result<()> {
    if index_name.is_empty() || index_name.len() > 64 {
        return Err(DocfeedError::ConfigError(format!(
            "Index name must be 1-64 characters: {index_name:?}"
        )));
    }
    if index_name.starts_with('.')
        || !index_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(DocfeedError::ConfigError(format!(
            "Index name {index_name:?} may only contain letters, digits, '-', '_' and '.'"
        )));
    }
    Ok(())
}
