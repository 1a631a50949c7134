//! Index command - ingest the docs tree

use crate::cli::output::{self, colors, format_duration};
use crate::cli::OutputFormat;
use crate::core::error::Result;
use crate::core::indexer::IngestPipeline;
use crate::core::services::Services;
use crate::core::types::IngestStats;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the index command
#[derive(Args, Debug, Default)]
pub struct IndexArgs {
    /// Root of the Markdown tree [default: from config]
    #[arg(long, value_name = "DIR")]
    pub docs_dir: Option<PathBuf>,

    /// Target index name [default: from config]
    #[arg(long, short = 'i')]
    pub index: Option<String>,

    /// URL prefix for source links [default: from config]
    #[arg(long)]
    pub base_url: Option<String>,

    /// Suppress progress output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Indexing result response
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub index: String,
    pub docs_dir: String,
    pub backend: String,
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub records_indexed: usize,
    pub batches: usize,
    pub duration_secs: f64,
}

impl IndexResponse {
    fn new(stats: IngestStats, docs_dir: &std::path::Path, backend: &str) -> Self {
        Self {
            index: stats.index_name,
            docs_dir: docs_dir.display().to_string(),
            backend: backend.to_string(),
            files_indexed: stats.files_indexed,
            files_skipped: stats.files_skipped,
            records_indexed: stats.records_indexed,
            batches: stats.batches_submitted,
            duration_secs: stats.duration_ms as f64 / 1000.0,
        }
    }
}

/// Run ingestion with command-line overrides applied
pub fn ingest(args: &IndexArgs, services: &Services) -> Result<IndexResponse> {
    let mut config = (*services.config).clone();
    if let Some(docs_dir) = &args.docs_dir {
        config.source.docs_dir = docs_dir.clone();
    }
    if let Some(index) = &args.index {
        config.indexing.index_name = index.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.source.base_url = base_url.clone();
    }
    config.validate()?;

    let pipeline = IngestPipeline::from_config(&config)?;
    let stats = pipeline.run(
        &config.source.docs_dir,
        &config.indexing.index_name,
        &*services.index,
    )?;

    Ok(IndexResponse::new(
        stats,
        &config.source.docs_dir,
        services.index.name(),
    ))
}

/// Execute the index command
pub fn execute(
    args: IndexArgs,
    services: &Services,
    format: OutputFormat,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    if output::show_progress(format, args.quiet) {
        let docs_dir = args
            .docs_dir
            .as_ref()
            .unwrap_or(&services.config.source.docs_dir);
        let index = args
            .index
            .as_deref()
            .unwrap_or(&services.config.indexing.index_name);
        eprintln!(
            "Indexing {} into '{}'...",
            colors::file_path(&docs_dir.display().to_string()),
            colors::index_name(index)
        );
    }

    let response = ingest(&args, services)?;

    match format {
        OutputFormat::Human => {
            println!(
                "{} {} records from {} files into '{}' ({} batches) in {}",
                colors::success("Indexed"),
                colors::number(&response.records_indexed.to_string()),
                colors::number(&response.files_indexed.to_string()),
                colors::index_name(&response.index),
                colors::number(&response.batches.to_string()),
                colors::number(&format_duration(response.duration_secs))
            );
            if response.files_skipped > 0 && !args.quiet {
                output::print_warning(&format!(
                    "{} files could not be read and were skipped",
                    response.files_skipped
                ));
            }
        }
        OutputFormat::Json => output::print_json(&response)?,
    }

    Ok(())
}
