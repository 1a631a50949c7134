// Metadata derived over a real docs tree
//
// Titles, sections and source URLs as they reach the index service.

use crate::common::{FakeIndex, TestRepo};
use docfeed::core::indexer::IngestPipeline;
use docfeed::core::types::Record;

fn ingest_docs_site() -> Vec<Record> {
    let repo = TestRepo::docs_site();
    let index = FakeIndex::new();

    IngestPipeline::new("https://docs.kinescope.io/", 7000, 1000)
        .unwrap()
        .run(repo.path(), "docs", &index)
        .unwrap();

    index.records()
}

fn find<'a>(records: &'a [Record], id: &str) -> &'a Record {
    records
        .iter()
        .find(|r| r.id == id)
        .unwrap_or_else(|| panic!("no record {id}"))
}

#[test]
fn test_only_markdown_files_are_indexed() {
    let records = ingest_docs_site();

    let mut ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();

    assert_eq!(
        ids,
        vec![
            "api/v1/videos.md",
            "index.md",
            "player/events.md",
            "player/index.md",
            "quickstart.md",
        ]
    );
}

#[test]
fn test_sections_are_parent_directories() {
    let records = ingest_docs_site();

    assert_eq!(find(&records, "index.md").section, "");
    assert_eq!(find(&records, "player/events.md").section, "player");
    assert_eq!(find(&records, "api/v1/videos.md").section, "api/v1");
}

#[test]
fn test_sources_strip_extension_and_collapse_index_pages() {
    let records = ingest_docs_site();

    assert_eq!(
        find(&records, "quickstart.md").source,
        "https://docs.kinescope.io/quickstart"
    );
    assert_eq!(
        find(&records, "player/events.md").source,
        "https://docs.kinescope.io/player/events"
    );
    assert_eq!(
        find(&records, "player/index.md").source,
        "https://docs.kinescope.io/player"
    );
    assert_eq!(find(&records, "index.md").source, "https://docs.kinescope.io/");
}

#[test]
fn test_titles_skip_source_annotation() {
    let records = ingest_docs_site();

    assert_eq!(find(&records, "quickstart.md").title, "Quickstart");
    assert_eq!(find(&records, "player/index.md").title, "Player");
}

#[test]
fn test_metadata_shared_by_all_chunks() {
    let body = "line of documentation text\n".repeat(20);
    let repo = TestRepo::with_files(&[("guide/long.md", &format!("# Long page\n{body}"))]);
    let index = FakeIndex::new();

    IngestPipeline::new("https://docs.example.com/", 64, 1000)
        .unwrap()
        .run(repo.path(), "docs", &index)
        .unwrap();

    let records = index.records();
    assert!(records.len() > 1);
    for record in &records {
        assert_eq!(record.title, "Long page");
        assert_eq!(record.section, "guide");
        assert_eq!(record.source, "https://docs.example.com/guide/long");
    }
}
