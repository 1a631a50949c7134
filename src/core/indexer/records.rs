//! Record construction with stable identifiers.
//!
//! A document that fits in one chunk is stored under its relative
//! path. Larger documents get one record per chunk, identified as
//! `<relative path>#<chunk index>`. Relative paths are unique in the
//! tree and never contain `#` for generated suffixes to collide with,
//! so identifiers are unique within a run and identical across runs
//! over the same tree. The index overwrites instead of duplicating.

use crate::core::types::{Chunk, Document, Record};

/// Separator between a relative path and the chunk ordinal
pub const CHUNK_ID_SEPARATOR: char = '#';

/// Identifier for chunk `chunk_index` of a document with `total` chunks.
pub fn record_id(relative_path: &str, chunk_index: usize, total: usize) -> String {
    if total <= 1 {
        relative_path.to_string()
    } else {
        format!("{relative_path}{CHUNK_ID_SEPARATOR}{chunk_index}")
    }
}

/// Build one record per chunk of `document`.
pub fn build_records(document: &Document, chunks: &[Chunk<'_>]) -> Vec<Record> {
    let total = chunks.len();

    chunks
        .iter()
        .map(|chunk| Record {
            id: record_id(&document.relative_path, chunk.chunk_index, total),
            content: chunk.text.to_string(),
            source: document.source.clone(),
            section: document.section.clone(),
            title: document.title.clone(),
        })
        .collect()
}
