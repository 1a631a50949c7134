//! Config command - show current configuration

use crate::cli::output;
use crate::cli::OutputFormat;
use crate::core::config::{BackendKind, Config};
use clap::Args;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Print the effective configuration as TOML
    #[arg(long)]
    pub toml: bool,
}

/// Execute the config command
///
/// Secrets are always redacted.
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.redacted();

    if args.toml {
        print!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    match format {
        OutputFormat::Human => {
            println!("Configuration:");
            println!("  source:");
            println!("    docs_dir: {}", config.source.docs_dir.display());
            println!("    base_url: {}", config.source.base_url);
            println!("    extension: {}", config.source.extension);
            println!("    exclude_patterns: {:?}", config.source.exclude_patterns);
            println!("    max_file_size_mb: {}", config.source.max_file_size_mb);
            println!("    include_hidden: {}", config.source.include_hidden);
            println!("  indexing:");
            println!("    index_name: {}", config.indexing.index_name);
            println!("    max_record_bytes: {}", config.indexing.max_record_bytes);
            println!("    batch_size: {}", config.indexing.batch_size);
            println!("  backend:");
            println!("    kind: {}", config.backend.kind);
            match config.backend.kind {
                BackendKind::Local => {
                    println!("    index_dir: {}", config.backend.index_dir.display());
                }
                BackendKind::Algolia => {
                    let unset = "<unset>";
                    println!(
                        "    algolia_app_id: {}",
                        config.backend.algolia_app_id.as_deref().unwrap_or(unset)
                    );
                    println!(
                        "    algolia_api_key: {}",
                        config.backend.algolia_api_key.as_deref().unwrap_or(unset)
                    );
                    if let Some(host) = &config.backend.algolia_host {
                        println!("    algolia_host: {host}");
                    }
                }
            }
            println!("    timeout_sec: {}", config.backend.timeout_sec);
            println!("  search:");
            println!("    default_k: {}", config.search.default_k);
            println!("    max_k: {}", config.search.max_k);
        }
        OutputFormat::Json => output::print_json(&config)?,
    }

    Ok(())
}
