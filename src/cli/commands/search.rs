//! Search command - query the index

use crate::cli::output::{self, colors, truncate_chars};
use crate::cli::OutputFormat;
use crate::core::error::Result;
use crate::core::services::Services;
use crate::core::types::SearchResponse;
use clap::Args;
use std::time::Instant;

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    pub query: String,

    /// Index to search [default: from config]
    #[arg(long, short = 'i')]
    pub index: Option<String>,

    /// Maximum number of results [default: search.default_k]
    #[arg(long, short = 'k')]
    pub limit: Option<usize>,
}

/// Run a query against the configured index service
pub fn query(args: &SearchArgs, services: &Services) -> Result<SearchResponse> {
    let search = &services.config.search;
    let limit = args.limit.unwrap_or(search.default_k).clamp(1, search.max_k);
    let index_name = args
        .index
        .clone()
        .unwrap_or_else(|| services.config.indexing.index_name.clone());

    let start = Instant::now();
    let hits = services.index.search(&index_name, &args.query, limit)?;

    Ok(SearchResponse {
        query: args.query.clone(),
        index_name,
        count: hits.len(),
        hits,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Execute the search command
pub fn execute(
    args: SearchArgs,
    services: &Services,
    format: OutputFormat,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let response = query(&args, services)?;

    match format {
        OutputFormat::Human => {
            if response.hits.is_empty() {
                println!(
                    "No results found for '{}' in '{}'",
                    colors::label(&response.query),
                    colors::index_name(&response.index_name)
                );
                return Ok(());
            }

            println!(
                "Found {} result(s) in '{}':\n",
                colors::number(&response.count.to_string()),
                colors::index_name(&response.index_name)
            );

            for (i, hit) in response.hits.iter().enumerate() {
                let score = hit
                    .score
                    .map(|s| format!(" (score: {s:.2})"))
                    .unwrap_or_default();
                let title = if hit.title.is_empty() {
                    &hit.id
                } else {
                    &hit.title
                };
                println!(
                    "[{}] {}{}",
                    colors::rank(&(i + 1).to_string()),
                    colors::label(title),
                    colors::dim(&score)
                );
                println!("    {}", colors::file_path(&hit.source));
                for line in hit.content.lines().filter(|l| !l.trim().is_empty()).take(3) {
                    println!("    {}", colors::dim(&truncate_chars(line, 100)));
                }
                println!();
            }
        }
        OutputFormat::Json => output::print_json(&response)?,
    }

    Ok(())
}
