//! Service container for docfeed
//!
//! Builds the configured index backend once and hands out
//! pipelines that write to it.

use crate::core::config::{BackendKind, Config};
use crate::core::error::{DocfeedError, Result};
use crate::core::index::{AlgoliaClient, LocalIndex, SearchIndexService};
use crate::core::indexer::IngestPipeline;
use std::sync::Arc;
use std::time::Duration;

/// Shared services for CLI commands
#[derive(Clone)]
pub struct Services {
    /// Index service selected by `backend.kind`
    pub index: Arc<dyn SearchIndexService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration
    ///
    /// Fails with a configuration error if the Algolia backend is
    /// selected without credentials.
    pub fn new(config: Config) -> Result<Self> {
        let index = Self::build_index(&config)?;
        tracing::debug!("Using {} index service", index.name());

        Ok(Self {
            index,
            config: Arc::new(config),
        })
    }

    /// Create services around an existing index service
    pub fn with_index(config: Config, index: Arc<dyn SearchIndexService>) -> Self {
        Self {
            index,
            config: Arc::new(config),
        }
    }

    fn build_index(config: &Config) -> Result<Arc<dyn SearchIndexService>> {
        let backend = &config.backend;
        match backend.kind {
            BackendKind::Local => Ok(Arc::new(LocalIndex::new(backend.index_dir.clone()))),
            BackendKind::Algolia => {
                let (Some(app_id), Some(api_key)) =
                    (&backend.algolia_app_id, &backend.algolia_api_key)
                else {
                    return Err(DocfeedError::ConfigError(
                        "Algolia backend needs ALGOLIA_APPLICATION_ID and ALGOLIA_API_KEY"
                            .to_string(),
                    ));
                };
                let client = AlgoliaClient::new(
                    app_id,
                    api_key,
                    backend.algolia_host.as_deref(),
                    Duration::from_secs(backend.timeout_sec),
                )?;
                Ok(Arc::new(client))
            }
        }
    }

    /// Create an IngestPipeline from the configured source and
    /// indexing settings
    pub fn create_pipeline(&self) -> Result<IngestPipeline> {
        IngestPipeline::from_config(&self.config)
    }
}
