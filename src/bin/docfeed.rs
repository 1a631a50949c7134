//! docfeed CLI - publish a Markdown docs tree to a search index
//!
//! # Examples
//!
//! ```bash
//! # Ingest ./docs_crawl into the configured Algolia index
//! ALGOLIA_APPLICATION_ID=... ALGOLIA_API_KEY=... docfeed index
//!
//! # Ingest into a local Tantivy index instead
//! DOCFEED_BACKEND=local docfeed index --docs-dir ./docs --index docs
//!
//! # Query it
//! DOCFEED_BACKEND=local docfeed search "player events"
//! ```
//!
//! Logs go to stderr. `DOCFEED_LOG` sets the filter (default
//! `docfeed=info`) and `DOCFEED_LOG_FORMAT=json` switches to JSON lines.

use clap::Parser;
use docfeed::cli::{run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_env("DOCFEED_LOG").unwrap_or_else(|_| "docfeed=info".into());
    let json = std::env::var("DOCFEED_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() {
    // A missing .env is fine
    let dotenv = dotenvy::dotenv();

    init_logging();
    if let Err(e) = &dotenv {
        if !e.not_found() {
            tracing::warn!("Failed to load .env: {}", e);
        }
    }

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
