//! Artemis API handlers

pub mod cameras;
pub mod health;
pub mod lightbulb;
pub mod lights;
pub mod remote;

use axum::http::{Method, Uri};
use chrono::{SecondsFormat, Utc};

use crate::error::ApiError;

/// RFC 3339 timestamp for response bodies
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Fallback for a known path hit with the wrong method
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(format!("Method {} not allowed on {}", method, uri.path()))
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
