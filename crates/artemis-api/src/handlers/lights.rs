//! Cloud light handlers

use artemis_core::AccountDevice;
use artemis_gateway::{describe, ControlRequest};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::timestamp;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DevicesResponse {
    pub success: bool,
    pub message: String,
    pub devices: Vec<AccountDevice>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlResponse {
    pub success: bool,
    pub message: String,
    pub device_id: String,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateQuery {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub model: String,
    /// Defaults to the primary account
    #[serde(default)]
    pub api_key_index: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub success: bool,
    pub message: String,
    pub device_id: String,
    pub is_on: bool,
}

/// GET /govee/devices
///
/// Devices from every configured account; accounts that fail are skipped.
pub async fn list_devices(State(state): State<AppState>) -> Json<DevicesResponse> {
    let devices = state.lights().list_all_devices().await;
    info!(
        count = devices.len(),
        accounts = state.lights().len(),
        "Returning aggregated devices"
    );

    Json(DevicesResponse {
        success: true,
        message: format!("Found {} device(s)", devices.len()),
        devices,
    })
}

/// POST /govee/devices/control
pub async fn control_device(
    State(state): State<AppState>,
    payload: Result<Json<ControlRequest>, JsonRejection>,
) -> Result<Json<ControlResponse>, ApiError> {
    let Json(request) = payload?;
    let command = state.router().dispatch(&request).await?;

    Ok(Json(ControlResponse {
        success: true,
        message: describe(&command),
        device_id: request.device_id,
        timestamp: timestamp(),
    }))
}

/// GET /govee/devices/state?deviceId=&model=&apiKeyIndex=
pub async fn device_state(
    State(state): State<AppState>,
    query: Result<Query<StateQuery>, QueryRejection>,
) -> Result<Json<StateResponse>, ApiError> {
    let Query(query) = query?;
    let power = state
        .router()
        .state(&query.device_id, &query.model, query.api_key_index)
        .await?;

    Ok(Json(StateResponse {
        success: true,
        message: format!("Device is {}", if power.is_on() { "on" } else { "off" }),
        device_id: query.device_id,
        is_on: power.is_on(),
    }))
}
