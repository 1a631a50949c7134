//! Algolia REST client.
//!
//! Uses the v1 REST API directly: `POST /1/indexes/{index}/batch`
//! for uploads and `POST /1/indexes/{index}/query` for search.
//! Uploads use the `updateObject` action, which adds a record or
//! replaces the one with the same `objectID`.
//!
//! Requests are never retried. A failed batch is returned to the
//! pipeline, which aborts the run.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::core::error::{DocfeedError, Result};
use crate::core::index::SearchIndexService;
use crate::core::types::{Record, SearchHit};

/// Batch action that inserts or replaces by `objectID`
const UPSERT_ACTION: &str = "updateObject";

/// Blocking client for an Algolia application.
#[derive(Clone)]
pub struct AlgoliaClient {
    client: Client,
    write_host: Url,
    read_host: Url,
}

impl std::fmt::Debug for AlgoliaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgoliaClient")
            .field("write_host", &self.write_host.as_str())
            .field("read_host", &self.read_host.as_str())
            .finish()
    }
}

#[derive(Serialize)]
struct BatchRequest<'a> {
    requests: Vec<BatchOperation<'a>>,
}

#[derive(Serialize)]
struct BatchOperation<'a> {
    action: &'static str,
    body: &'a Record,
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    #[serde(rename = "hitsPerPage")]
    hits_per_page: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    hits: Vec<AlgoliaHit>,
}

#[derive(Deserialize)]
struct AlgoliaHit {
    #[serde(rename = "objectID")]
    object_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    section: String,
    #[serde(default)]
    content: String,
}

impl From<AlgoliaHit> for SearchHit {
    fn from(hit: AlgoliaHit) -> Self {
        Self {
            id: hit.object_id,
            title: hit.title,
            source: hit.source,
            section: hit.section,
            content: hit.content,
            score: None,
        }
    }
}

impl AlgoliaClient {
    /// Build a client for `app_id`.
    ///
    /// # Arguments
    /// * `app_id` - Algolia application id
    /// * `api_key` - API key with `addObject` and `search` rights
    /// * `host` - Override for both hosts (e.g. a proxy); defaults to
    ///   `https://{app_id}.algolia.net` for writes and
    ///   `https://{app_id}-dsn.algolia.net` for reads
    /// * `timeout` - Per-request timeout
    pub fn new(app_id: &str, api_key: &str, host: Option<&str>, timeout: Duration) -> Result<Self> {
        let app_id = app_id.trim();
        let api_key = api_key.trim();
        if app_id.is_empty() || api_key.is_empty() {
            return Err(DocfeedError::ConfigError(
                "ALGOLIA_APPLICATION_ID and ALGOLIA_API_KEY are required".to_string(),
            ));
        }

        let (write_host, read_host) = match host {
            Some(host) => (parse_host(host)?, parse_host(host)?),
            None => (
                parse_host(&format!("https://{app_id}.algolia.net"))?,
                parse_host(&format!("https://{app_id}-dsn.algolia.net"))?,
            ),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-algolia-application-id",
            HeaderValue::from_str(app_id)
                .map_err(|e| DocfeedError::ConfigError(format!("Invalid application id: {e}")))?,
        );
        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| DocfeedError::ConfigError(format!("Invalid API key: {e}")))?;
        key.set_sensitive(true);
        headers.insert("x-algolia-api-key", key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| DocfeedError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            write_host,
            read_host,
        })
    }

    /// URL of an index operation, e.g. `/1/indexes/{index}/batch`
    fn endpoint(host: &Url, index_name: &str, operation: &str) -> Result<Url> {
        if index_name.is_empty() {
            return Err(DocfeedError::ConfigError(
                "Index name cannot be empty".to_string(),
            ));
        }
        let mut url = host.clone();
        url.path_segments_mut()
            .map_err(|_| DocfeedError::ConfigError(format!("Invalid Algolia host: {host}")))?
            .pop_if_empty()
            .extend(["1", "indexes", index_name, operation]);
        Ok(url)
    }

    fn post<T: Serialize + ?Sized>(&self, url: Url, body: &T) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| DocfeedError::IndexService(format!("Request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .unwrap_or_else(|_| "<body unavailable>".to_string());
        Err(DocfeedError::IndexService(format!(
            "Algolia responded {status}: {body}"
        )))
    }
}

impl SearchIndexService for AlgoliaClient {
    fn upsert_batch(&self, index_name: &str, records: &[Record]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }

        let url = Self::endpoint(&self.write_host, index_name, "batch")?;
        self.post(url, &batch_request(records))?;
        Ok(())
    }

    fn search(&self, index_name: &str, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(DocfeedError::InvalidQuery(
                "Query cannot be empty".to_string(),
            ));
        }

        let url = Self::endpoint(&self.read_host, index_name, "query")?;
        let request = QueryRequest {
            query,
            hits_per_page: limit.max(1),
        };
        let response: QueryResponse = self
            .post(url, &request)?
            .json()
            .map_err(|e| DocfeedError::SearchFailed(format!("Invalid search response: {e}")))?;

        Ok(response.hits.into_iter().map(SearchHit::from).collect())
    }

    fn name(&self) -> &str {
        "algolia"
    }
}

fn batch_request(records: &[Record]) -> BatchRequest<'_> {
    BatchRequest {
        requests: records
            .iter()
            .map(|body| BatchOperation {
                action: UPSERT_ACTION,
                body,
            })
            .collect(),
    }
}

fn parse_host(host: &str) -> Result<Url> {
    let url = Url::parse(host.trim())
        .map_err(|e| DocfeedError::ConfigError(format!("Invalid Algolia host '{host}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DocfeedError::ConfigError(format!(
            "Algolia host must be an http(s) URL: {host}"
        )));
    }
    Ok(url)
}
