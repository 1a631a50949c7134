//! CLI adapter for docfeed
//!
//! Provides the command-line interface for ingestion and search.
//! Commands depend on `core/` only through [`Services`].
//!
//! # Architecture
//!
//! ```text
//! +------------------+      +------------------+
//! |      cli/        | ---> |     core/        |
//! | (clap adapter)   |      |  (domain logic)  |
//! +------------------+      +------------------+
//! ```
//!
//! [`Services`]: crate::core::services::Services

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// docfeed - publish a Markdown docs tree to a search index
///
/// Walks a directory of Markdown pages, splits them into records with
/// title, section and source URL, and uploads them in batches.
#[derive(Parser, Debug)]
#[command(name = "docfeed")]
#[command(version)]
#[command(about = "Publish Markdown docs to a search index", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Configuration file (overrides DOCFEED_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest the docs tree into the search index
    Index(commands::IndexArgs),

    /// Query the search index
    Search(commands::SearchArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  docfeed completions bash > ~/.local/share/bash-completion/completions/docfeed
    ///   zsh:   docfeed completions zsh > ~/.zfunc/_docfeed
    ///   fish:  docfeed completions fish > ~/.config/fish/completions/docfeed.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::config::Config;
    use crate::core::services::Services;

    // Handle completions command early (doesn't need services)
    let command = match cli.command {
        Commands::Completions(args) => return commands::completions::execute(args),
        command => command,
    };

    let config = Config::load(cli.config.as_deref())?;

    // show-config works without backend credentials
    if let Commands::ShowConfig(args) = command {
        return commands::config::execute(args, &config, cli.format);
    }

    config.log_config();
    let services = Services::new(config)?;

    match command {
        Commands::Index(args) => commands::index::execute(args, &services, cli.format),
        Commands::Search(args) => commands::search::execute(args, &services, cli.format),
        Commands::ShowConfig(_) | Commands::Completions(_) => unreachable!(), // Handled above
    }
}
