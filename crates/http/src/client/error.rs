//! Client error types

use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("HTTP {status}: {text}")]
    Status { status: u16, text: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request rejected before dispatch (missing input)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Create error from an HTTP status code, carrying its canonical
    /// status text.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            text: status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        }
    }

    /// Whether the server rejected the credential itself.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}
