//! Tests for the index CLI command
//!
//! - Overrides for docs dir, index name and base URL
//! - Human and JSON output
//! - Error cases (missing docs dir, failing upload)

use crate::common::{create_fake_services, create_local_services, FakeIndex, TestRepo};
use docfeed::cli::commands::index::{execute, ingest, IndexArgs};
use docfeed::cli::OutputFormat;
use docfeed::core::config::Config;
use std::sync::Arc;

fn args_for(repo: &TestRepo) -> IndexArgs {
    IndexArgs {
        docs_dir: Some(repo.path().to_path_buf()),
        quiet: true,
        ..IndexArgs::default()
    }
}

#[test]
fn test_index_uses_overrides() {
    let repo = TestRepo::docs_site();
    let index = Arc::new(FakeIndex::new());
    let services = create_fake_services(Config::default(), Arc::clone(&index));

    let args = IndexArgs {
        index: Some("kinescope_docs".to_string()),
        base_url: Some("https://docs.kinescope.io".to_string()),
        ..args_for(&repo)
    };
    let response = ingest(&args, &services).unwrap();

    assert_eq!(response.index, "kinescope_docs");
    assert_eq!(response.backend, "fake");
    assert_eq!(response.files_indexed, 5);
    assert_eq!(response.records_indexed, index.records().len());
    assert!(index
        .records()
        .iter()
        .all(|r| r.source.starts_with("https://docs.kinescope.io/")));
}

#[test]
fn test_index_defaults_from_config() {
    let repo = TestRepo::with_files(&[("a.md", "# A")]);
    let mut config = Config::default();
    config.source.docs_dir = repo.path().to_path_buf();
    config.indexing.index_name = "from_config".to_string();
    let index = Arc::new(FakeIndex::new());
    let services = create_fake_services(config, Arc::clone(&index));

    let response = ingest(&IndexArgs::default(), &services).unwrap();

    assert_eq!(response.index, "from_config");
    assert_eq!(response.records_indexed, 1);
}

#[test]
fn test_index_human_output() {
    let repo = TestRepo::docs_site();
    let (services, _storage) = create_local_services();

    let result = execute(args_for(&repo), &services, OutputFormat::Human);

    assert!(result.is_ok(), "index should succeed: {:?}", result.err());
}

#[test]
fn test_index_json_output() {
    let repo = TestRepo::docs_site();
    let (services, _storage) = create_local_services();

    let result = execute(args_for(&repo), &services, OutputFormat::Json);

    assert!(result.is_ok(), "index should succeed: {:?}", result.err());
}

#[test]
fn test_index_missing_docs_dir() {
    let repo = TestRepo::with_files(&[]);
    let (services, _storage) = create_local_services();

    let args = IndexArgs {
        docs_dir: Some(repo.path().join("docs_crawl")),
        quiet: true,
        ..IndexArgs::default()
    };
    let err = ingest(&args, &services).unwrap_err();

    assert!(err.is_config_error());
    assert!(err.to_string().contains("docs_crawl"));
}

#[test]
fn test_index_reports_failed_batch() {
    let repo = TestRepo::docs_site();
    let mut config = Config::default();
    config.indexing.batch_size = 2;
    let index = Arc::new(FakeIndex::failing_on(2));
    let services = create_fake_services(config, Arc::clone(&index));

    let result = execute(args_for(&repo), &services, OutputFormat::Human);

    let message = result.unwrap_err().to_string();
    assert!(message.contains("Batch 2"), "unexpected error: {message}");
    assert_eq!(index.batch_sizes(), vec![2]);
}

#[test]
fn test_index_rejects_empty_index_override() {
    let repo = TestRepo::with_files(&[("a.md", "# A")]);
    let (services, _storage) = create_local_services();

    let args = IndexArgs {
        index: Some(String::new()),
        ..args_for(&repo)
    };

    assert!(ingest(&args, &services).unwrap_err().is_config_error());
}
