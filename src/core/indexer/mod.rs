//! Document ingestion module.
//!
//! Turns a tree of Markdown files into batches of index records.
//! Key features:
//!
//! - Byte-bounded chunking that prefers line breaks
//! - Stable record identifiers (re-runs overwrite, never duplicate)
//! - Fixed-size batch uploads that stop at the first failure
//! - Best-effort file reading: unreadable files are skipped
//!
//! # Safety
//!
//! Chunk boundaries always fall on UTF-8 character boundaries, so
//! slicing never panics on multi-byte text.

pub mod batcher;
pub mod chunker;
pub mod metadata;
pub mod pipeline;
pub mod records;
pub mod walker;

pub use batcher::{BatchUploader, UploadSummary};
pub use chunker::{chunk_content, Chunker};
pub use metadata::extract_title;
pub use pipeline::IngestPipeline;
pub use records::build_records;
pub use walker::{DocumentStore, FileWalker, ReadOutcome, StoreEntry};
