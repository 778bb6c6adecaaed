//! Error types for upstream adapter calls

use artemis_core::GatewayError;
use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures classified once, at the adapter boundary
#[derive(Error, Debug)]
pub enum ClientError {
    /// DNS failure, connection refused or timeout
    #[error("Upstream unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Invalid base URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error (test server only)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Upstream answered but rejected the call
    #[error("Upstream error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Upstream reported the resource missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Value rejected before calling out
    #[error("{0}")]
    OutOfRange(String),

    /// Failed to read or parse a 2xx response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl ClientError {
    /// Create an upstream error from status code and message
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }
}

impl From<ClientError> for GatewayError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unreachable(e) => GatewayError::Unreachable(e.to_string()),
            ClientError::Upstream { status, message } => GatewayError::Upstream { status, message },
            ClientError::NotFound(what) => GatewayError::NotFound(what),
            ClientError::OutOfRange(msg) => GatewayError::OutOfRange(msg),
            ClientError::Parse(msg) => GatewayError::Upstream {
                status: 502,
                message: format!("Unexpected upstream response: {}", msg),
            },
            ClientError::InvalidUrl(e) => GatewayError::Internal(format!("Invalid URL: {}", e)),
            ClientError::Io(e) => GatewayError::Internal(e.to_string()),
            ClientError::Setup(msg) => GatewayError::Internal(msg),
        }
    }
}
