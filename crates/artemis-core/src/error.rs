//! Common error types for the gateway and its upstream adapters

use thiserror::Error;

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors that can occur while serving a gateway request
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Malformed body, missing required field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Account index outside the configured range
    #[error("Invalid API key index: {index} (have {count} account(s))")]
    InvalidSelector { index: i64, count: usize },

    /// Command name not in the known set
    #[error("Unknown command: {0}")]
    UnsupportedCommand(String),

    /// Command value has the wrong shape for its command
    #[error("Invalid value for '{command}' command - expected {expected}")]
    InvalidValue {
        command: &'static str,
        expected: &'static str,
    },

    /// Numeric value outside its allowed range
    #[error("{0}")]
    OutOfRange(String),

    /// Camera or device absent upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream could not be reached (DNS, connection refused, timeout)
    #[error("Upstream unreachable: {0}")]
    Unreachable(String),

    /// Upstream was reached but rejected the call
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            GatewayError::InvalidInput(_) => 400,
            GatewayError::InvalidSelector { .. } => 400,
            GatewayError::UnsupportedCommand(_) => 400,
            GatewayError::InvalidValue { .. } => 400,
            GatewayError::OutOfRange(_) => 400,
            GatewayError::NotFound(_) => 404,
            GatewayError::Unreachable(_) => 502,
            GatewayError::Upstream { status, .. } if (400..500).contains(status) => 400,
            GatewayError::Upstream { .. } => 500,
            GatewayError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_split() {
        let rejected = GatewayError::Upstream {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert_eq!(rejected.status_code(), 400);

        let broken = GatewayError::Upstream {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(broken.status_code(), 500);
    }

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(GatewayError::InvalidInput("x".into()).status_code(), 400);
        assert_eq!(
            GatewayError::InvalidSelector { index: 3, count: 2 }.status_code(),
            400
        );
        assert_eq!(GatewayError::UnsupportedCommand("x".into()).status_code(), 400);
        assert_eq!(GatewayError::NotFound("cam".into()).status_code(), 404);
        assert_eq!(GatewayError::Unreachable("refused".into()).status_code(), 502);
    }

    #[test]
    fn test_selector_message() {
        let err = GatewayError::InvalidSelector { index: -1, count: 2 };
        assert_eq!(err.to_string(), "Invalid API key index: -1 (have 2 account(s))");
    }
}
