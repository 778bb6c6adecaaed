//! TV remote handlers: discovery, two-phase pairing, commands

use artemis_core::{DiscoveredRemoteDevice, GatewayError, PairingPhase, RemoteCommand};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::timestamp;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DiscoverResponse {
    pub success: bool,
    pub message: String,
    pub devices: Vec<DiscoveredRemoteDevice>,
}

#[derive(Debug, Deserialize)]
pub struct PairRequest {
    #[serde(default)]
    pub host: String,
    /// Absent or empty selects phase 1
    #[serde(default)]
    pub pin: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    pub awaiting_pin: bool,
    pub phase: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandRequest {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub command: String,
    pub text: Option<String>,
    pub app_package: Option<String>,
}

#[derive(Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    pub command: String,
    pub timestamp: String,
}

/// GET /firetv/discover
pub async fn discover(State(state): State<AppState>) -> Result<Json<DiscoverResponse>, ApiError> {
    let devices = state.remote().discover().await?;
    info!(count = devices.len(), "Returning discovered TVs");

    Ok(Json(DiscoverResponse {
        success: true,
        message: format!("Found {} device(s)", devices.len()),
        devices,
    }))
}

/// POST /firetv/pair
pub async fn pair(
    State(state): State<AppState>,
    payload: Result<Json<PairRequest>, JsonRejection>,
) -> Result<Json<PairResponse>, ApiError> {
    let Json(request) = payload?;
    if request.host.trim().is_empty() {
        return Err(GatewayError::InvalidInput("host is required".to_string()).into());
    }

    let phase = PairingPhase::from_pin(request.pin.as_deref());
    info!(host = %request.host, phase = phase.name(), pin = %phase.masked_pin(), "Pair request");

    let result = state.remote().pair(&request.host, &phase).await?;
    info!(
        success = result.success,
        awaiting_pin = result.awaiting_pin,
        "Pair result"
    );

    Ok(Json(PairResponse {
        success: result.success,
        message: result.message,
        device_name: result.device_name,
        awaiting_pin: result.awaiting_pin,
        phase: phase.name(),
        timestamp: timestamp(),
    }))
}

/// POST /firetv/command
pub async fn send_command(
    State(state): State<AppState>,
    payload: Result<Json<CommandRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(request) = payload?;
    let command = RemoteCommand {
        host: request.host,
        command: request.command,
        text: request.text,
        app_package: request.app_package,
    };
    command.validate()?;

    let result = state.remote().send_command(&command).await?;
    info!(host = %command.host, command = %command.command, success = result.success, "Remote command sent");

    Ok(Json(CommandResponse {
        success: result.success,
        message: result.message,
        command: result.command,
        timestamp: timestamp(),
    }))
}
