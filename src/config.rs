//! Dashboard configuration.
//!
//! Defaults, then environment variables, then command-line flags. Use the
//! builder methods to override single values.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::models::DEFAULT_METRIC;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_NARRATIVE_LIMIT: usize = 10;

/// Polls closer together than this are clamped up to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub const ENV_URL: &str = "NOEMA_DASH_URL";
pub const ENV_INTERVAL_MS: &str = "NOEMA_DASH_INTERVAL_MS";
pub const ENV_METRIC: &str = "NOEMA_DASH_METRIC";
pub const ENV_LOG: &str = "NOEMA_DASH_LOG";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} must be a whole number of milliseconds, got '{value}'")]
    InvalidInterval { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

/// Configuration for one dashboard session.
///
/// # Example
///
/// ```ignore
/// use noema_dash::config::DashConfig;
///
/// let config = DashConfig::default()
///     .with_base_url("http://localhost:9000")
///     .with_metric("ece");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    /// Root of the run API, without trailing slash
    pub base_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    /// Number of narrative lines requested per poll
    pub narrative_limit: usize,
    /// Metric plotted in the chart
    pub metric: String,
    /// Log destination; `None` disables logging
    pub log_file: Option<PathBuf>,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            narrative_limit: DEFAULT_NARRATIVE_LIMIT,
            metric: DEFAULT_METRIC.to_string(),
            log_file: crate::logging::default_log_path(),
        }
    }
}

impl DashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the poll interval, clamped to [`MIN_POLL_INTERVAL`].
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_narrative_limit(mut self, limit: usize) -> Self {
        self.narrative_limit = limit;
        self
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = metric.into();
        self
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Defaults overridden by `NOEMA_DASH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`DashConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_URL) {
            if url.trim().is_empty() {
                return Err(ConfigError::Empty { var: ENV_URL });
            }
            config = config.with_base_url(url.trim());
        }

        if let Some(raw) = lookup(ENV_INTERVAL_MS) {
            let ms = parse_millis(&raw).ok_or_else(|| ConfigError::InvalidInterval {
                var: ENV_INTERVAL_MS,
                value: raw.clone(),
            })?;
            config = config.with_poll_interval(Duration::from_millis(ms));
        }

        if let Some(metric) = lookup(ENV_METRIC) {
            if metric.trim().is_empty() {
                return Err(ConfigError::Empty { var: ENV_METRIC });
            }
            config = config.with_metric(metric.trim());
        }

        if let Some(path) = lookup(ENV_LOG) {
            // An empty value turns logging off
            let path = path.trim();
            config.log_file = (!path.is_empty()).then(|| PathBuf::from(path));
        }

        Ok(config)
    }
}

/// Parse a millisecond count, rejecting zero.
pub fn parse_millis(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok().filter(|ms| *ms > 0)
}
