//! Error types for the download module.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a workbook.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The export endpoint did not answer with a workbook.
    ///
    /// Raised before any file is created.
    #[error("workbook '{repository_id}' not found (content type '{content_type}')")]
    NotFound {
        /// The requested repository identifier.
        repository_id: String,
        /// The content type the server declared, empty when absent.
        content_type: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// File system error while creating or writing the output file.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The identifier cannot be used as a file name inside the destination
    /// directory (empty, `.`/`..`, or containing a path separator).
    ///
    /// Raised before any request is sent.
    #[error("workbook identifier '{repository_id}' is not a plain file name")]
    UnsafeRepositoryId {
        /// The rejected repository identifier.
        repository_id: String,
    },

    /// The export URL could not be built for the repository identifier.
    #[error("invalid export URL for workbook '{repository_id}'")]
    InvalidUrl {
        /// The repository identifier.
        repository_id: String,
    },
}

impl DownloadError {
    /// Creates a not-found error.
    pub fn not_found(repository_id: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self::NotFound {
            repository_id: repository_id.into(),
            content_type: content_type.into(),
        }
    }

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

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true when the workbook does not exist, as opposed to a broken
    /// transfer.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// No `From<reqwest::Error>` or `From<std::io::Error>`: every variant needs the
// URL or path the source error lacks.
