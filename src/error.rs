//! Error types for fetching and caching
//!
//! Every failure is surfaced to the caller as a [`FetchError`]. Use
//! [`FetchError::kind`] to branch on the broad category without matching
//! individual variants.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Broad classification of a [`FetchError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid URI or unusable cache directory
    Configuration,
    /// Connection, DNS or non-success HTTP status
    Network,
    /// The download did not finish within the configured timeout
    Timeout,
    /// Local file read or write failure
    Io,
}

/// Errors that can occur while fetching a resource
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URI cannot be fetched or mapped to a cache file
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// The cache directory is missing or not writable
    #[error("Unusable cache directory {}: {source}", path.display())]
    CacheDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned {status} for {uri}")]
    Status { uri: String, status: StatusCode },

    /// Download exceeded the configured timeout
    #[error("Request to {uri} timed out after {}ms", timeout.as_millis())]
    Timeout { uri: String, timeout: Duration },

    /// Reading or writing the cache file failed
    #[error("Cache file error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Returns the category this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidUri { .. } | FetchError::CacheDirectory { .. } => {
                ErrorKind::Configuration
            }
            FetchError::Network(_) | FetchError::Status { .. } => ErrorKind::Network,
            FetchError::Timeout { .. } => ErrorKind::Timeout,
            FetchError::Io { .. } => ErrorKind::Io,
        }
    }

    pub(crate) fn invalid_uri(uri: &str, reason: impl Into<String>) -> Self {
        FetchError::InvalidUri {
            uri: uri.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }

    /// Classifies a reqwest error, separating timeouts from other failures
    pub(crate) fn from_request(uri: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                uri: uri.to_string(),
                timeout,
            }
        } else if let Some(status) = err.status() {
            FetchError::Status {
                uri: uri.to_string(),
                status,
            }
        } else {
            FetchError::Network(err)
        }
    }
}
