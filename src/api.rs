//! Run API client.
//!
//! Read-only access to the backend that drives the run:
//! `GET /api/run/state`, `GET /api/run/traces` and
//! `GET /api/run/narrative?limit=N`.

use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::adapters::ReqwestHttpClient;
use crate::config::DashConfig;
use crate::models::{RunSnapshot, RunState, TickTrace};
use crate::traits::{Headers, HttpClient, HttpError};

pub const STATE_PATH: &str = "/api/run/state";
pub const TRACES_PATH: &str = "/api/run/traces";
pub const NARRATIVE_PATH: &str = "/api/run/narrative";

/// Error type for run API operations
#[derive(Debug)]
pub enum ApiError {
    /// Request never produced a response
    Http(HttpError),
    /// Body was not the expected JSON
    Json(serde_json::Error),
    /// Server returned a non-2xx status
    ServerError { status: u16, message: String },
}

impl ApiError {
    /// Whether the next poll is likely to succeed without intervention.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Http(e) => e.is_transient(),
            ApiError::Json(_) => false,
            ApiError::ServerError { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
        }
    }

    /// Short text for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http(HttpError::ConnectionFailed(_)) => {
                "Backend unreachable. Is the run server up?".to_string()
            }
            ApiError::Http(HttpError::Timeout(_)) => "Backend timed out".to_string(),
            ApiError::Http(e) => e.to_string(),
            ApiError::Json(_) => "Backend sent malformed JSON".to_string(),
            ApiError::ServerError { status, .. } => match *status {
                404 => "Run endpoint not found (HTTP 404)".to_string(),
                500..=599 => format!("Backend error (HTTP {})", status),
                _ => format!("Backend returned HTTP {}", status),
            },
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {}", e),
            ApiError::Json(e) => write!(f, "JSON error: {}", e),
            ApiError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            ApiError::Json(e) => Some(e),
            ApiError::ServerError { .. } => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Http(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}

/// Client for the run API.
#[derive(Clone)]
pub struct RunApiClient {
    /// Base URL, no trailing slash
    pub base_url: String,
    http: Arc<dyn HttpClient>,
}

impl RunApiClient {
    /// Create a client backed by reqwest with default settings.
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(base_url, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a client over any [`HttpClient`].
    pub fn with_http_client(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Create a reqwest-backed client honoring the configured request timeout.
    pub fn from_config(config: &DashConfig) -> Result<Self, ApiError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
        Ok(Self::with_http_client(&config.base_url, Arc::new(http)))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        let response = self.http.get(&url, &headers).await?;

        if !response.is_success() {
            return Err(ApiError::ServerError {
                status: response.status,
                message: response.excerpt(),
            });
        }

        response.json().map_err(|e| {
            debug!(
                url = %url,
                content_type = response.header("content-type").unwrap_or("unknown"),
                "Body is not the expected JSON"
            );
            ApiError::Json(e)
        })
    }

    /// Fetch the current run state.
    pub async fn fetch_state(&self) -> Result<RunState, ApiError> {
        self.get_json(STATE_PATH).await
    }

    /// Fetch the full trace history, oldest tick first.
    pub async fn fetch_traces(&self) -> Result<Vec<TickTrace>, ApiError> {
        self.get_json(TRACES_PATH).await
    }

    /// Fetch the last `limit` narrative lines.
    pub async fn fetch_narrative(&self, limit: usize) -> Result<Vec<String>, ApiError> {
        self.get_json(&format!("{}?limit={}", NARRATIVE_PATH, limit))
            .await
    }

    /// Fetch state, then traces, then narrative.
    ///
    /// State and traces are required. The narrative is optional: older
    /// backends do not serve it, so a failure there only costs the panel.
    pub async fn fetch_snapshot(&self, narrative_limit: usize) -> Result<RunSnapshot, ApiError> {
        let state = self.fetch_state().await?;
        let traces = self.fetch_traces().await?;

        let narrative = match self.fetch_narrative(narrative_limit).await {
            Ok(lines) => lines,
            Err(e) => {
                warn!("Narrative unavailable: {}", e);
                Vec::new()
            }
        };

        debug!(
            tick = state.tick,
            traces = traces.len(),
            narrative = narrative.len(),
            "Fetched run snapshot"
        );

        Ok(RunSnapshot::new(state, traces, narrative))
    }
}
