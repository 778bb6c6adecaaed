//! Demo lightbulb toggle used by the mobile client's first screen.
//! Echoes the requested state; no upstream is involved.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::timestamp;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub is_on: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleResponse {
    pub success: bool,
    pub message: String,
    pub is_on: bool,
    pub timestamp: String,
}

/// POST /lightbulb/toggle
pub async fn toggle(
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<ToggleResponse>, ApiError> {
    let Json(request) = payload?;
    info!(is_on = request.is_on, "Lightbulb toggled");

    Ok(Json(ToggleResponse {
        success: true,
        message: "Lightbulb state updated successfully".to_string(),
        is_on: request.is_on,
        timestamp: timestamp(),
    }))
}
