//! Internal error types for the remote analysis client.
//!
//! These never cross the crate boundary: every variant collapses into
//! `AnalysisError::RemoteUnavailable` at the port.

use iodo_core::AnalysisError;
use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service answered with a non-2xx status.
    #[error("Analysis request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    /// Transport failure: connect, timeout, TLS, body read.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The origin could not be turned into an endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The response body is not an Analysis Result.
    #[error("Malformed analysis response: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl From<RemoteError> for AnalysisError {
    fn from(err: RemoteError) -> Self {
        Self::unavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let error = RemoteError::Status {
            status: 500,
            url: "http://127.0.0.1:8788/api/analyze".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("/api/analyze"));
    }

    #[test]
    fn test_every_error_is_remote_unavailable() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped: AnalysisError = RemoteError::JsonParse(parse).into();
        let AnalysisError::RemoteUnavailable { reason } = mapped;
        assert!(reason.starts_with("Malformed analysis response"));
    }
}
