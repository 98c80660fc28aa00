//! Error types for the client library.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the NowCerts API.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Network or HTTP request failure.
    ///
    /// DNS resolution, connection refused, TLS and socket errors.
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0}s")]
    TimeoutError(u64),

    /// The API answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    StatusError {
        /// Status code returned by the API.
        status: StatusCode,
        /// Raw response body, possibly empty.
        body: String,
    },

    /// JSON serialization or deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The API returned JSON that does not have the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Invalid base URL or other client setup issue.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ClientError {
    /// Classifies a `reqwest` error, separating timeouts from other failures.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::TimeoutError(timeout_secs)
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::NetworkError(err)
        }
    }

    /// Check if this error came from the request deadline.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutError(_))
    }

    /// Status code, if the API answered at all.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::StatusError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigurationError(format!("invalid endpoint URL: {err}"))
    }
}
