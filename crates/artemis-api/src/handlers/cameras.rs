//! Camera handlers

use artemis_core::{CameraEntry, CameraStatus, GatewayError, StreamUrls};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CamerasResponse {
    pub success: bool,
    pub message: String,
    pub cameras: Vec<CameraEntry>,
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub success: bool,
    pub message: String,
    pub name: String,
    pub name_uri: String,
    pub status: CameraStatus,
    pub stream_url: String,
    pub streams: StreamUrls,
}

fn count_message(count: usize) -> String {
    match count {
        0 => "No cameras found. Make sure the camera bridge is running and cameras are connected."
            .to_string(),
        1 => "Found 1 camera".to_string(),
        n => format!("Found {} cameras", n),
    }
}

/// GET /cameras
pub async fn list_cameras(State(state): State<AppState>) -> Result<Json<CamerasResponse>, ApiError> {
    let cameras = state.cameras().list_cameras().await?;
    info!(count = cameras.len(), "Returning cameras");

    Ok(Json(CamerasResponse {
        success: true,
        message: count_message(cameras.len()),
        cameras,
    }))
}

/// GET /cameras/stream?name=
///
/// Offline cameras still get their URLs, with a warning message.
pub async fn camera_stream(
    State(state): State<AppState>,
    query: Result<Query<StreamQuery>, QueryRejection>,
) -> Result<Json<StreamResponse>, ApiError> {
    let Query(query) = query?;
    let name = query
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| GatewayError::InvalidInput("name query parameter is required".to_string()))?;

    let camera = state.cameras().get_camera(&name).await?;
    let message = match camera.status {
        CameraStatus::Online => "Camera is online and streaming",
        CameraStatus::Offline => {
            warn!(camera = %name, "Camera is offline");
            "Camera is offline, stream may not be available"
        }
    };

    Ok(Json(StreamResponse {
        success: true,
        message: message.to_string(),
        name: camera.name,
        name_uri: camera.name_uri,
        status: camera.status,
        stream_url: camera.stream_url,
        streams: camera.streams,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_message() {
        assert!(count_message(0).starts_with("No cameras found"));
        assert_eq!(count_message(1), "Found 1 camera");
        assert_eq!(count_message(4), "Found 4 cameras");
    }
}
