//! API error types and conversions

use artemis_core::GatewayError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request
    BadRequest(String),
    /// 404 Not Found
    NotFound(String),
    /// 405 Method Not Allowed
    MethodNotAllowed(String),
    /// 502 Bad Gateway (upstream unreachable)
    BadGateway(String),
    /// 500 Internal Server Error
    Internal(String),
}

/// Error envelope; same shape as every success response
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    message: String,
    error: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::NotFound(msg) => ("not_found", msg),
            ApiError::MethodNotAllowed(msg) => ("method_not_allowed", msg),
            ApiError::BadGateway(msg) => ("bad_gateway", msg),
            ApiError::Internal(msg) => ("internal_error", msg),
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, %message, "API client error");
        }

        let body = Json(ErrorResponse {
            success: false,
            message,
            error: error_type,
        });

        (status, body).into_response()
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let message = match &err {
            // Surface the upstream's own words
            GatewayError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        };
        match err.status_code() {
            400 => ApiError::BadRequest(message),
            404 => ApiError::NotFound(message),
            502 => ApiError::BadGateway(message),
            _ => ApiError::Internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_mapping() {
        let cases = [
            (GatewayError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (GatewayError::UnsupportedCommand("x".into()), StatusCode::BAD_REQUEST),
            (GatewayError::OutOfRange("x".into()), StatusCode::BAD_REQUEST),
            (GatewayError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (GatewayError::Unreachable("x".into()), StatusCode::BAD_GATEWAY),
            (
                GatewayError::Upstream { status: 401, message: "x".into() },
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::Upstream { status: 503, message: "x".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (GatewayError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_upstream_message_passthrough() {
        let err = ApiError::from(GatewayError::Upstream {
            status: 400,
            message: "Device not paired".into(),
        });
        assert!(matches!(err, ApiError::BadRequest(ref m) if m == "Device not paired"));
    }
}
