//! TV remote microservice adapter
//!
//! The microservice does the network scan and speaks the Android TV Remote
//! protocol; this client only forwards discovery, pairing and commands.

use std::time::Duration;

use artemis_core::normalize::normalize_discovered;
use artemis_core::{
    CommandResult, DiscoveredRemoteDevice, GatewayResult, PairResult, PairingPhase, RemoteBackend,
    RemoteCommand,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::http::{build_client, expect_success, handle_response, normalize_base_url};

pub const DEFAULT_FIRETV_URL: &str = "http://localhost:9090";
/// Discovery alone takes about 5 seconds upstream
pub const DEFAULT_FIRETV_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct PairRequest<'a> {
    host: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pin: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    host: &'a str,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    app_package: Option<&'a str>,
}

/// Client for the remote-control microservice
#[derive(Debug, Clone)]
pub struct FireTvClient {
    client: Client,
    base_url: String,
}

impl FireTvClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_FIRETV_TIMEOUT)
    }

    pub fn with_config(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to scan the LAN
    #[instrument(skip(self))]
    pub async fn discover(&self) -> Result<Vec<DiscoveredRemoteDevice>> {
        let response = self
            .client
            .get(format!("{}/discover", self.base_url))
            .send()
            .await?;
        let body: Value = handle_response(response).await?;

        let entries = body
            .get("devices")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let devices: Vec<DiscoveredRemoteDevice> = entries
            .iter()
            .filter_map(|entry| {
                let device = normalize_discovered(entry);
                if device.is_none() {
                    warn!(entry = %entry, "Dropping discovered device without host");
                }
                device
            })
            .collect();

        info!(count = devices.len(), "Discovery finished");
        Ok(devices)
    }

    /// Forward one pairing phase. Phase 1 omits the PIN from the body.
    #[instrument(skip(self, phase), fields(phase = phase.name(), pin = %phase.masked_pin()))]
    pub async fn pair(&self, host: &str, phase: &PairingPhase) -> Result<PairResult> {
        let request = PairRequest {
            host,
            pin: phase.pin(),
        };
        let response = self
            .client
            .post(format!("{}/pair", self.base_url))
            .json(&request)
            .send()
            .await?;

        let result: PairResult = handle_response(response).await?;
        debug!(
            success = result.success,
            awaiting_pin = result.awaiting_pin,
            "Pair response"
        );
        Ok(result)
    }

    #[instrument(skip(self, command), fields(host = %command.host, name = %command.command))]
    pub async fn send_command(&self, command: &RemoteCommand) -> Result<CommandResult> {
        let request = CommandRequest {
            host: &command.host,
            command: &command.command,
            text: command.text.as_deref(),
            app_package: command.app_package.as_deref(),
        };
        let response = self
            .client
            .post(format!("{}/command", self.base_url))
            .json(&request)
            .send()
            .await?;

        let mut result: CommandResult = handle_response(response).await?;
        if result.command.is_empty() {
            result.command = command.command.clone();
        }
        Ok(result)
    }

    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        expect_success(response).await
    }
}

#[async_trait]
impl RemoteBackend for FireTvClient {
    async fn discover(&self) -> GatewayResult<Vec<DiscoveredRemoteDevice>> {
        Ok(FireTvClient::discover(self).await?)
    }

    async fn pair(&self, host: &str, phase: &PairingPhase) -> GatewayResult<PairResult> {
        Ok(FireTvClient::pair(self, host, phase).await?)
    }

    async fn send_command(&self, command: &RemoteCommand) -> GatewayResult<CommandResult> {
        Ok(FireTvClient::send_command(self, command).await?)
    }

    async fn health_check(&self) -> GatewayResult<()> {
        Ok(FireTvClient::health_check(self).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_request_omits_pin_in_phase_one() {
        let body = serde_json::to_value(PairRequest {
            host: "10.0.0.5",
            pin: PairingPhase::AwaitingPin.pin(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"host": "10.0.0.5"}));
    }

    #[test]
    fn test_command_request_fields() {
        let body = serde_json::to_value(CommandRequest {
            host: "10.0.0.5",
            command: "launch_app",
            text: None,
            app_package: Some("com.netflix.ninja"),
        })
        .unwrap();
        assert_eq!(body["app_package"], "com.netflix.ninja");
        assert!(body.get("text").is_none());
    }
}
