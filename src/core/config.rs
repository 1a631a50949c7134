//! Configuration management for docfeed.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocfeedError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Config file name inside the user config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config file looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "docfeed.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub indexing: IndexingConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Document source configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Root of the Markdown tree
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// URL prefix of the published docs site
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Document extension (without the dot)
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Paths to leave out (glob syntax)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,

    /// Walk directories whose name starts with '.'
    #[serde(default)]
    pub include_hidden: bool,
}

/// Indexing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IndexingConfig {
    /// Target index name
    #[serde(default = "default_index_name")]
    pub index_name: String,

    /// Maximum bytes of content per record
    #[serde(default = "default_max_record_bytes")]
    pub max_record_bytes: usize,

    /// Records per upload request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

/// Which index service receives the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted Algolia index
    #[default]
    Algolia,
    /// On-disk Tantivy index
    Local,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Algolia => write!(f, "algolia"),
            BackendKind::Local => write!(f, "local"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = DocfeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "algolia" => Ok(BackendKind::Algolia),
            "local" => Ok(BackendKind::Local),
            other => Err(DocfeedError::ConfigError(format!(
                "Unknown backend '{other}' (expected 'algolia' or 'local')"
            ))),
        }
    }
}

/// Index service configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Selected backend
    #[serde(default)]
    pub kind: BackendKind,

    /// Root directory for local indexes
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Algolia application id
    #[serde(default)]
    pub algolia_app_id: Option<String>,

    /// Algolia API key (needs write access)
    #[serde(default)]
    pub algolia_api_key: Option<String>,

    /// Override for the Algolia hosts
    #[serde(default)]
    pub algolia_host: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub timeout_sec: u64,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("kind", &self.kind)
            .field("index_dir", &self.index_dir)
            .field("algolia_app_id", &self.algolia_app_id)
            .field("algolia_api_key", &self.algolia_api_key.as_ref().map(|_| "***"))
            .field("algolia_host", &self.algolia_host)
            .field("timeout_sec", &self.timeout_sec)
            .finish()
    }
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default number of results to return
    #[serde(default = "default_k")]
    pub default_k: usize,

    /// Maximum results per query
    #[serde(default = "default_max_k")]
    pub max_k: usize,
}

// Default value functions
fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs_crawl")
}

fn default_base_url() -> String {
    "https://docs.example.com/".to_string()
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_max_file_size() -> usize {
    10
}

fn default_index_name() -> String {
    "docs".to_string()
}

fn default_max_record_bytes() -> usize {
    7000
}

fn default_batch_size() -> usize {
    crate::core::indexer::batcher::DEFAULT_BATCH_SIZE
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data/indexes")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_k() -> usize {
    10
}

fn default_max_k() -> usize {
    100
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            base_url: default_base_url(),
            extension: default_extension(),
            exclude_patterns: Vec::new(),
            max_file_size_mb: default_max_file_size(),
            include_hidden: false,
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            index_name: default_index_name(),
            max_record_bytes: default_max_record_bytes(),
            batch_size: default_batch_size(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            index_dir: default_index_dir(),
            algolia_app_id: None,
            algolia_api_key: None,
            algolia_host: None,
            timeout_sec: default_request_timeout(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_k: default_k(),
            max_k: default_max_k(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            DocfeedError::ConfigError(format!("Failed to read config file {path:?}: {e}"))
        })?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// User-level config file (`~/.config/docfeed/config.toml` on Linux)
    pub fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("docfeed").join(CONFIG_FILE_NAME))
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// The TOML file is the first one found of:
    /// 1. `explicit` (the `--config` flag)
    /// 2. DOCFEED_CONFIG env var
    /// 3. User config file
    /// 4. ./docfeed.toml
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::locate(explicit) {
            Some(path) => {
                tracing::debug!("Loading config from {:?}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.merge_env()?;
        config.validate()?;

        Ok(config)
    }

    fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = env::var("DOCFEED_CONFIG") {
            return Some(PathBuf::from(path));
        }
        if let Some(path) = Self::user_config_file().filter(|p| p.exists()) {
            return Some(path);
        }
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Merge configuration with environment variables
    ///
    /// Unparseable numbers are ignored; an unknown backend name is an
    /// error.
    pub fn merge_env(&mut self) -> Result<()> {
        // Source configuration
        if let Ok(docs_dir) = env::var("DOCFEED_DOCS_DIR") {
            self.source.docs_dir = PathBuf::from(docs_dir);
        }
        if let Ok(base_url) = env::var("DOCFEED_BASE_URL") {
            self.source.base_url = base_url;
        }

        // Indexing configuration
        if let Ok(index_name) = env::var("DOCFEED_INDEX_NAME") {
            self.indexing.index_name = index_name;
        }
        if let Ok(max_bytes) = env::var("DOCFEED_MAX_RECORD_BYTES") {
            if let Ok(bytes) = max_bytes.parse() {
                self.indexing.max_record_bytes = bytes;
            }
        }
        if let Ok(batch_size) = env::var("DOCFEED_BATCH_SIZE") {
            if let Ok(size) = batch_size.parse() {
                self.indexing.batch_size = size;
            }
        }

        // Backend configuration
        if let Ok(kind) = env::var("DOCFEED_BACKEND") {
            self.backend.kind = kind.parse()?;
        }
        if let Ok(index_dir) = env::var("DOCFEED_INDEX_DIR") {
            self.backend.index_dir = PathBuf::from(index_dir);
        }
        if let Ok(app_id) = env::var("ALGOLIA_APPLICATION_ID") {
            self.backend.algolia_app_id = Some(app_id);
        }
        if let Ok(api_key) = env::var("ALGOLIA_API_KEY") {
            self.backend.algolia_api_key = Some(api_key);
        }
        if let Ok(host) = env::var("ALGOLIA_HOST") {
            self.backend.algolia_host = Some(host);
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.indexing.index_name.trim().is_empty() {
            return Err(DocfeedError::ConfigError(
                "Index name cannot be empty".to_string(),
            ));
        }

        if self.indexing.max_record_bytes == 0 {
            return Err(DocfeedError::ConfigError(
                "Max record bytes must be non-zero".to_string(),
            ));
        }

        if self.indexing.batch_size == 0 {
            return Err(DocfeedError::ConfigError(
                "Batch size must be non-zero".to_string(),
            ));
        }

        if self.source.extension.trim_start_matches('.').is_empty() {
            return Err(DocfeedError::ConfigError(
                "Document extension cannot be empty".to_string(),
            ));
        }

        if self.backend.timeout_sec == 0 {
            return Err(DocfeedError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        // Validate search config
        if self.search.default_k == 0 {
            return Err(DocfeedError::ConfigError(
                "Default k must be non-zero".to_string(),
            ));
        }

        if self.search.default_k > self.search.max_k {
            return Err(DocfeedError::ConfigError(
                "Default k cannot exceed max k".to_string(),
            ));
        }

        Ok(())
    }

    /// Copy with secrets masked, for display
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.backend.algolia_api_key.is_some() {
            config.backend.algolia_api_key = Some("***".to_string());
        }
        config
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Docs dir: {:?}", self.source.docs_dir);
        tracing::info!("  Base URL: {}", self.source.base_url);
        tracing::info!("  Extension: .{}", self.source.extension);
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.source.exclude_patterns.len()
        );
        tracing::info!("  Index name: {}", self.indexing.index_name);
        tracing::info!("  Max record size: {} bytes", self.indexing.max_record_bytes);
        tracing::info!("  Batch size: {}", self.indexing.batch_size);
        tracing::info!("  Backend: {}", self.backend.kind);
        match self.backend.kind {
            BackendKind::Local => {
                tracing::info!("  Index dir: {:?}", self.backend.index_dir);
            }
            BackendKind::Algolia => {
                tracing::info!(
                    "  Algolia app id: {}",
                    self.backend.algolia_app_id.as_deref().unwrap_or("<unset>")
                );
                tracing::info!(
                    "  Algolia API key: {}",
                    if self.backend.algolia_api_key.is_some() {
                        "***"
                    } else {
                        "<unset>"
                    }
                );
            }
        }
    }
}
