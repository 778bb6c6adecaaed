//! Health check

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: &'static str,
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health - never calls upstreams
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "Artemis gateway is running",
        status: "healthy",
        service: "artemis",
    })
}
