//! Thin client for the vector search API.
//!
//! Three calls, each mapped onto one REST endpoint under the configured base URL:
//! - `GET  {base}/health` — server and Qdrant reachability
//! - `GET  {base}/models` — embedding preset catalog
//! - `POST {base}/search` — embed the query text and search a collection
//!
//! Every failure comes back as [`SearchApiError`]. There are no retries and
//! no caching; a failed call leaves the client usable for the next one.
//!
//! # Examples
//!
//! ```no_run
//! use search_api_client::config::client_config::ClientConfig;
//! use search_api_client::models::search_request::{QdrantConfig, SearchRequest};
//! use search_api_client::services::search_api_service::SearchApiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SearchApiClient::new(ClientConfig::new("http://localhost:5200"))?;
//!
//! let health = client.health().await?;
//! println!("ok={} qdrant={}", health.ok, health.qdrant_url);
//!
//! let req = SearchRequest::new("vector databases", QdrantConfig::new("http://localhost:6333", "docs"))
//!     .with_preset("bge-m3")
//!     .with_top_k(5);
//! let resp = client.search(&req).await?;
//! for hit in &resp.hits {
//!     println!("{} {:.3}", hit.id, hit.score);
//! }
//! # Ok(()) }
//! ```

use reqwest::{Response, header};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::{
    config::client_config::ClientConfig,
    error_handler::{Result, SearchApiError, SetupResult},
    models::{
        health_response::HealthResponse, model_spec::ModelsResponse,
        search_request::SearchRequest, search_response::SearchResponse,
    },
};

/// Client for the search API.
///
/// Holds its own [`ClientConfig`] and a reusable `reqwest::Client`. Cloning
/// is cheap and clones share the connection pool; each clone has its own
/// base URL from then on.
#[derive(Debug, Clone)]
pub struct SearchApiClient {
    client: reqwest::Client,
    cfg: ClientConfig,
}

impl SearchApiClient {
    /// Creates a client from the given config.
    ///
    /// A timeout is applied only when `cfg.timeout_secs` is set.
    ///
    /// # Errors
    /// [`crate::SetupError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(cfg: ClientConfig) -> SetupResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        info!(
            base_url = %cfg.base_url(),
            timeout_secs = ?cfg.timeout_secs,
            "SearchApiClient initialized"
        );

        Ok(Self { client, cfg })
    }

    /// Creates a client from `SEARCH_API_URL` / `SEARCH_API_TIMEOUT_SECS`.
    ///
    /// # Errors
    /// [`crate::SetupError::Config`] for bad env values, or
    /// [`crate::SetupError::ClientBuild`].
    pub fn from_env() -> SetupResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.cfg
    }

    /// Current base URL.
    pub fn base_url(&self) -> &str {
        self.cfg.base_url()
    }

    /// Points the client at another server. One trailing `/` is stripped.
    pub fn set_base_url(&mut self, url: impl AsRef<str>) {
        self.cfg.set_base_url(url);
        debug!(base_url = %self.cfg.base_url(), "base URL updated");
    }

    /// `GET /health`.
    ///
    /// # Errors
    /// - [`SearchApiError::NetworkUnavailable`] if the server cannot be reached
    /// - [`SearchApiError::RequestFailed`] for non-2xx responses
    /// - [`SearchApiError::MalformedResponse`] if the body is not a `HealthResponse`
    #[instrument(skip_all, fields(base_url = %self.cfg.base_url()))]
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health", "health check failed").await
    }

    /// `GET /models`.
    ///
    /// # Errors
    /// Same taxonomy as [`SearchApiClient::health`].
    #[instrument(skip_all, fields(base_url = %self.cfg.base_url()))]
    pub async fn list_models(&self) -> Result<ModelsResponse> {
        self.get_json("/models", "failed to fetch models").await
    }

    /// `POST /search` with `request` as the JSON body.
    ///
    /// The request is sent as given; see [`SearchRequest::validate`] for the
    /// local pre-submit checks.
    ///
    /// # Errors
    /// - [`SearchApiError::NetworkUnavailable`] if the server cannot be reached
    /// - [`SearchApiError::RequestFailed`] for non-2xx responses; the message
    ///   is the response body text, or `HTTP {status}` when it is empty or
    ///   unreadable
    /// - [`SearchApiError::MalformedResponse`] if the body is not a `SearchResponse`
    #[instrument(skip_all, fields(
        base_url = %self.cfg.base_url(),
        collection = %request.qdrant.collection,
        preset = request.preset_id.as_deref().unwrap_or("-")
    ))]
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = self.cfg.endpoint("/search");

        debug!("POST {}", url);
        let resp = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|source| network_error(&url, source))?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.text().await {
                Ok(text) if !text.is_empty() => text,
                _ => format!("HTTP {}", status.as_u16()),
            };
            warn!(%status, url = %url, "search rejected by server");
            return Err(SearchApiError::RequestFailed { status, message });
        }

        let out: SearchResponse = decode_body(&url, resp).await?;
        debug!(
            hits = out.hits.len(),
            took_ms = out.took_ms,
            total_candidates = out.total_candidates,
            "search completed"
        );
        Ok(out)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, failure: &str) -> Result<T> {
        let url = self.cfg.endpoint(path);

        debug!("GET {}", url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| network_error(&url, source))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%status, url = %url, "{failure}");
            return Err(SearchApiError::RequestFailed {
                status,
                message: failure.to_string(),
            });
        }

        decode_body(&url, resp).await
    }
}

fn network_error(url: &str, source: reqwest::Error) -> SearchApiError {
    warn!(url = %url, error = %source, "request did not reach the server");
    SearchApiError::NetworkUnavailable {
        url: url.to_string(),
        source,
    }
}

/// Reads the whole body, then decodes it. A read failure is a transport
/// problem; a decode failure is a malformed response.
async fn decode_body<T: DeserializeOwned>(url: &str, resp: Response) -> Result<T> {
    let bytes = resp
        .bytes()
        .await
        .map_err(|source| network_error(url, source))?;

    serde_json::from_slice(&bytes).map_err(|e| {
        warn!(url = %url, error = %e, "response body has unexpected shape");
        SearchApiError::MalformedResponse {
            url: url.to_string(),
            reason: format!("serde error: {e}"),
        }
    })
}
