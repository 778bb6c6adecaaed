//! Cloud light API adapter (Govee developer API v1)

use std::time::Duration;

use artemis_core::normalize::{normalize_light_device, power_state};
use artemis_core::{
    ColorValue, Device, GatewayResult, LightBackend, PowerState, BRIGHTNESS_RANGE,
    COLOR_CHANNEL_RANGE,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, instrument};

use crate::error::{ClientError, Result};
use crate::http::{build_client, handle_response, normalize_base_url};

/// Public endpoint of the cloud API
pub const DEFAULT_GOVEE_URL: &str = "https://developer-api.govee.com";
/// Default request timeout
pub const DEFAULT_GOVEE_TIMEOUT: Duration = Duration::from_secs(10);

const API_KEY_HEADER: &str = "Govee-API-Key";
const DEVICES_PATH: &str = "/v1/devices";
const CONTROL_PATH: &str = "/v1/devices/control";
const STATE_PATH: &str = "/v1/devices/state";

/// Body `code` the API uses for an accepted request
const CODE_OK: u64 = 200;

/// Client for one cloud account
#[derive(Debug, Clone)]
pub struct GoveeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GoveeClient {
    /// Create a client against the public API
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, DEFAULT_GOVEE_URL, DEFAULT_GOVEE_TIMEOUT)
    }

    /// Create a client with a custom base URL and timeout
    pub fn with_config(api_key: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: normalize_base_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// List every device on this account
    #[instrument(skip(self))]
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let url = format!("{}{}", self.base_url, DEVICES_PATH);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        let body: Value = handle_response(response).await?;
        check_code(&body)?;

        let devices: Vec<Device> = body
            .pointer("/data/devices")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .enumerate()
                    .map(|(i, entry)| normalize_light_device(entry, i))
                    .collect()
            })
            .unwrap_or_default();

        debug!(count = devices.len(), "Listed devices");
        Ok(devices)
    }

    #[instrument(skip(self))]
    pub async fn set_power(&self, device_id: &str, model: &str, on: bool) -> Result<()> {
        let value = if on { "on" } else { "off" };
        self.control(device_id, model, "turn", json!(value)).await
    }

    /// Fails with `OutOfRange` outside 0-100 without calling out
    #[instrument(skip(self))]
    pub async fn set_brightness(&self, device_id: &str, model: &str, level: i64) -> Result<()> {
        if !BRIGHTNESS_RANGE.contains(&level) {
            return Err(ClientError::OutOfRange(format!(
                "Brightness must be between {} and {}, got {}",
                BRIGHTNESS_RANGE.start(),
                BRIGHTNESS_RANGE.end(),
                level
            )));
        }
        self.control(device_id, model, "brightness", json!(level)).await
    }

    /// Fails with `OutOfRange` if any channel is outside 0-255 without calling out
    #[instrument(skip(self))]
    pub async fn set_color(&self, device_id: &str, model: &str, color: ColorValue) -> Result<()> {
        if !color.in_range() {
            return Err(ClientError::OutOfRange(format!(
                "Color values must be between {} and {}, got r={} g={} b={}",
                COLOR_CHANNEL_RANGE.start(),
                COLOR_CHANNEL_RANGE.end(),
                color.r,
                color.g,
                color.b
            )));
        }
        self.control(device_id, model, "color", json!(color)).await
    }

    /// Query on/off state; unrecognized properties read as off
    #[instrument(skip(self))]
    pub async fn get_state(&self, device_id: &str, model: &str) -> Result<PowerState> {
        let url = format!("{}{}", self.base_url, STATE_PATH);
        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&[("device", device_id), ("model", model)])
            .send()
            .await?;

        let body: Value = handle_response(response).await?;
        check_code(&body)?;

        let properties = body
            .pointer("/data/properties")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();

        Ok(power_state(properties))
    }

    async fn control(&self, device_id: &str, model: &str, name: &str, value: Value) -> Result<()> {
        let url = format!("{}{}", self.base_url, CONTROL_PATH);
        let body = json!({
            "device": device_id,
            "model": model,
            "cmd": { "name": name, "value": value },
        });

        let response = self
            .client
            .put(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let ack: Value = handle_response(response).await?;
        check_code(&ack)?;
        debug!(command = name, "Control accepted");
        Ok(())
    }
}

/// A 2xx body may still carry a failure `code`
fn check_code(body: &Value) -> Result<()> {
    match body.get("code").and_then(Value::as_u64) {
        Some(code) if code != CODE_OK => {
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("request rejected")
                .to_string();
            Err(ClientError::upstream(
                u16::try_from(code).unwrap_or(500),
                message,
            ))
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl LightBackend for GoveeClient {
    async fn list_devices(&self) -> GatewayResult<Vec<Device>> {
        Ok(GoveeClient::list_devices(self).await?)
    }

    async fn set_power(&self, device_id: &str, model: &str, on: bool) -> GatewayResult<()> {
        Ok(GoveeClient::set_power(self, device_id, model, on).await?)
    }

    async fn set_brightness(&self, device_id: &str, model: &str, level: i64) -> GatewayResult<()> {
        Ok(GoveeClient::set_brightness(self, device_id, model, level).await?)
    }

    async fn set_color(
        &self,
        device_id: &str,
        model: &str,
        color: ColorValue,
    ) -> GatewayResult<()> {
        Ok(GoveeClient::set_color(self, device_id, model, color).await?)
    }

    async fn get_state(&self, device_id: &str, model: &str) -> GatewayResult<PowerState> {
        Ok(GoveeClient::get_state(self, device_id, model).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GoveeClient::new("key").unwrap();
        assert_eq!(client.base_url(), DEFAULT_GOVEE_URL);
        assert!(GoveeClient::with_config("key", "nope", DEFAULT_GOVEE_TIMEOUT).is_err());
    }

    #[test]
    fn test_check_code() {
        assert!(check_code(&json!({"code": 200, "message": "Success"})).is_ok());
        assert!(check_code(&json!({"data": {}})).is_ok());
        assert!(matches!(
            check_code(&json!({"code": 400, "message": "Unsupported Cmd"})),
            Err(ClientError::Upstream { status: 400, .. })
        ));
    }
}
