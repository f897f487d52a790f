//! Error types for the schedule subsystem.

use thiserror::Error;

/// Errors that abort a whole schedule fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network/HTTP request failed before a body was received
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// Body was not JSON, or the top-level value was not an array
    #[error("Bad response: {message}")]
    BadResponse { message: String },

    /// Could not allocate room for the lesson list
    #[error("Resource exhausted: {message}")]
    ResourceExhausted { message: String },
}

impl FetchError {
    /// Returns true if this error is potentially transient and a later query may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::Transport {
            message: format!("invalid request URL: {}", err),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::BadResponse {
            message: err.to_string(),
        }
    }
}

impl From<std::collections::TryReserveError> for FetchError {
    fn from(err: std::collections::TryReserveError) -> Self {
        FetchError::ResourceExhausted {
            message: err.to_string(),
        }
    }
}

/// Errors surfaced by the cache's explicit query path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// No room has been configured, so nothing can be fetched
    #[error("No room selected")]
    NoRoom,

    /// The upstream fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// A single upstream element that could not be read in full.
///
/// Never aborts a fetch; the element degrades to a blank record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MalformedElement {
    /// A field that must be a string was missing or of another JSON type
    #[error("field `{field}` is missing or not a string")]
    NotAString { field: &'static str },

    /// The `Period` field did not have the `HH:MM:SS-HH:MM:SS` shape
    #[error("unparseable period '{period}'")]
    BadPeriod { period: String },
}
