// Local Tantivy backend driven by the ingestion pipeline

use crate::common::{long_line, TestRepo};
use docfeed::core::index::{LocalIndex, SearchIndexService};
use docfeed::core::indexer::IngestPipeline;
use tempfile::TempDir;

fn pipeline() -> IngestPipeline {
    IngestPipeline::new("https://docs.example.com/", 32, 2).unwrap()
}

#[test]
fn test_rerun_overwrites_instead_of_duplicating() {
    let repo = TestRepo::docs_site();
    let storage = TempDir::new().unwrap();
    let local = LocalIndex::new(storage.path());

    let first = pipeline().run(repo.path(), "docs", &local).unwrap();
    let count_after_first = local.document_count("docs").unwrap();
    let second = pipeline().run(repo.path(), "docs", &local).unwrap();

    assert_eq!(first.records_indexed, second.records_indexed);
    assert_eq!(count_after_first, first.records_indexed as u64);
    assert_eq!(local.document_count("docs").unwrap(), count_after_first);
}

#[test]
fn test_changed_document_replaces_its_record() {
    let repo = TestRepo::with_files(&[("player.md", "# Player\nold wording")]);
    let storage = TempDir::new().unwrap();
    let local = LocalIndex::new(storage.path());

    pipeline().run(repo.path(), "docs", &local).unwrap();
    std::fs::write(repo.path().join("player.md"), "# Player\nnew wording").unwrap();
    pipeline().run(repo.path(), "docs", &local).unwrap();

    assert_eq!(local.document_count("docs").unwrap(), 1);
    let hits = local.search("docs", "new", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "player.md");
    assert!(local.search("docs", "old", 10).unwrap().is_empty());
}

#[test]
fn test_search_returns_chunk_metadata() {
    let repo = TestRepo::with_files(&[(
        "api/upload.md",
        &format!("# Upload API\n{}\nresumable uploads", long_line(40)),
    )]);
    let storage = TempDir::new().unwrap();
    let local = LocalIndex::new(storage.path());

    pipeline().run(repo.path(), "docs", &local).unwrap();

    let hits = local.search("docs", "resumable", 5).unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].id.starts_with("api/upload.md#"));
    assert_eq!(hits[0].title, "Upload API");
    assert_eq!(hits[0].section, "api");
    assert_eq!(hits[0].source, "https://docs.example.com/api/upload");
}

#[test]
fn test_indexes_are_isolated_by_name() {
    let repo = TestRepo::with_files(&[("a.md", "# Alpha\nshared")]);
    let storage = TempDir::new().unwrap();
    let local = LocalIndex::new(storage.path());

    pipeline().run(repo.path(), "docs", &local).unwrap();

    assert!(local.index_exists("docs"));
    assert!(!local.index_exists("staging"));
    assert!(local.search("staging", "shared", 5).is_err());
}
