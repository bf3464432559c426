//! Client for the remote candidates endpoint.
//!
//! This crate provides the collaborator the listing talks to:
//! - `CandidateApi`, the seam the loader depends on
//! - `HttpCandidateClient`, the reqwest implementation of
//!   `GET /api/candidates`
//! - Decoding the response body into a `CandidatePage`
//!
//! No retries are attempted; every failure is reported once as a
//! `ClientError` and the caller decides what to do with it.

use std::future::Future;
use std::time::Duration;

use candidate_model::CandidatePage;
use query::QueryParams;
use thiserror::Error;
use tracing::{debug, error};

/// Path of the listing endpoint, relative to the base URL
pub const CANDIDATES_PATH: &str = "/api/candidates";

/// Errors that can occur when querying the candidates endpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Setup(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Endpoint returned HTTP {0}")]
    Status(u16),

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request task ended without producing a response
    #[error("Request aborted before completion")]
    Aborted,
}

/// Anything that can answer a candidates query.
///
/// The listing only needs this one call, so tests can swap in a scripted
/// implementation without a network.
pub trait CandidateApi: Send + Sync {
    fn fetch_candidates(
        &self,
        params: &QueryParams,
    ) -> impl Future<Output = Result<CandidatePage, ClientError>> + Send;
}

/// Connection settings for `HttpCandidateClient`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host and port, e.g. `http://localhost:8000`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// HTTP client for the candidates endpoint.
///
/// Cheap to clone: the inner `reqwest::Client` shares its connection pool.
#[derive(Debug, Clone)]
pub struct HttpCandidateClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCandidateClient {
    /// Create a client for the endpoint under `config.base_url`.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.base_url.trim_end_matches('/'), CANDIDATES_PATH),
        })
    }

    /// Full endpoint URL without a query string
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the GET request for `params`.
    ///
    /// The query string is exactly `params.to_query_string()`, so the same
    /// parameters always produce the same URL.
    pub fn request(&self, params: &QueryParams) -> Result<reqwest::Request, ClientError> {
        let url = if params.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?{}", self.endpoint, params.to_query_string())
        };

        self.client
            .get(url)
            .build()
            .map_err(|e| ClientError::Setup(e.to_string()))
    }
}

impl CandidateApi for HttpCandidateClient {
    async fn fetch_candidates(&self, params: &QueryParams) -> Result<CandidatePage, ClientError> {
        let request = self.request(params)?;
        debug!("GET {}", request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            error!("Candidates request failed: {}", e);
            ClientError::Transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Candidates endpoint returned {}", status);
            return Err(ClientError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        decode_page(&body)
    }
}

/// Decode a `GET /api/candidates` response body.
pub fn decode_page(body: &[u8]) -> Result<CandidatePage, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}
