//! Client configuration shared by the listing and download clients.
//!
//! Both clients take an explicit [`ClientConfig`] so that the platform host
//! and network timeouts are chosen by the caller rather than by process-wide
//! defaults.

use thiserror::Error;
use url::Url;

use crate::user_agent;

/// Production host of the workbook platform.
pub const DEFAULT_BASE_URL: &str = "https://public.tableau.com";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large packaged workbooks).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Accepted range for timeout values, in seconds.
const TIMEOUT_RANGE_SECS: std::ops::RangeInclusive<u64> = 1..=3600;

/// Errors raised while validating a [`ClientConfig`] or building a client from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL is unparsable or cannot carry path segments.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timeout is outside the accepted range.
    #[error("invalid value for `{field}`: {value}. Expected range: 1..=3600")]
    InvalidTimeout {
        /// Name of the offending setting.
        field: &'static str,
        /// The rejected value in seconds.
        value: u64,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client construction failed: {reason}")]
    HttpClient {
        /// Builder failure description.
        reason: String,
    },
}

/// Connection settings for [`WorkbookLister`](crate::WorkbookLister) and
/// [`WorkbookDownloader`](crate::WorkbookDownloader).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and host of the platform, e.g. `https://public.tableau.com`.
    pub base_url: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds, including body streaming.
    pub read_timeout_secs: u64,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            read_timeout_secs: READ_TIMEOUT_SECS,
            user_agent: user_agent::default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Returns a copy pointed at another host (used by tests against a mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Returns a copy with explicit timeout values.
    #[must_use]
    pub fn with_timeouts(mut self, connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        self.connect_timeout_secs = connect_timeout_secs;
        self.read_timeout_secs = read_timeout_secs;
        self
    }

    /// Validates timeouts and the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for out-of-range timeouts or an unusable base URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        self.parsed_base_url().map(|_| ())
    }

    /// Parses the base URL, rejecting URLs that cannot take path segments.
    pub(crate) fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }
        Ok(url)
    }
}

fn validate_timeout_secs(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if TIMEOUT_RANGE_SECS.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTimeout { field, value })
    }
}
