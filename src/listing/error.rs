//! Error types for the listing module.
//!
//! A failed enumeration still carries every workbook received before the
//! failing page, so callers decide whether a partial listing is usable.

use thiserror::Error;

use crate::workbook::Workbook;

/// Why a page request failed.
#[derive(Debug, Error)]
pub enum ListErrorKind {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error listing workbooks from {url}: {source}")]
    Network {
        /// The page URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The page request timed out.
    #[error("timeout listing workbooks from {url}")]
    Timeout {
        /// The page URL that timed out.
        url: String,
    },

    /// The listing endpoint answered with a non-success status.
    #[error("HTTP {status} listing workbooks from {url}")]
    HttpStatus {
        /// The page URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The page body was not a JSON array of workbooks.
    #[error("malformed workbook page from {url}: {source}")]
    Decode {
        /// The page URL.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The page URL could not be built from the base URL and username.
    #[error("invalid listing URL for user '{username}'")]
    InvalidUrl {
        /// The username being listed.
        username: String,
    },
}

impl ListErrorKind {
    /// Classifies a `reqwest` error into a timeout or a network error.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: url.into() }
        } else {
            Self::Network {
                url: url.into(),
                source,
            }
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Returns true for connection, timeout and status failures.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}

/// Enumeration aborted; holds the failure and the records received before it.
#[derive(Debug, Error)]
#[error("listing aborted after {count} workbook(s)", count = .partial.len())]
pub struct ListError {
    #[source]
    kind: ListErrorKind,
    partial: Vec<Workbook>,
}

impl ListError {
    /// Wraps a page failure together with the records accumulated so far.
    #[must_use]
    pub fn new(kind: ListErrorKind, partial: Vec<Workbook>) -> Self {
        Self { kind, partial }
    }

    /// The page failure.
    #[must_use]
    pub fn kind(&self) -> &ListErrorKind {
        &self.kind
    }

    /// Workbooks from every page that succeeded before the failure, in server order.
    #[must_use]
    pub fn partial(&self) -> &[Workbook] {
        &self.partial
    }

    /// Consumes the error, returning the partial result.
    #[must_use]
    pub fn into_partial(self) -> Vec<Workbook> {
        self.partial
    }

    /// Consumes the error, returning both parts.
    #[must_use]
    pub fn into_parts(self) -> (ListErrorKind, Vec<Workbook>) {
        (self.kind, self.partial)
    }
}
