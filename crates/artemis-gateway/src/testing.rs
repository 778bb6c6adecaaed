//! In-memory light backend for unit tests

use std::sync::Mutex;
use std::time::Duration;

use artemis_core::{ColorValue, Device, GatewayError, GatewayResult, LightBackend, PowerState};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Power(String, bool),
    Brightness(String, i64),
    Color(String, ColorValue),
}

pub fn device(id: &str) -> Device {
    Device {
        id: id.to_string(),
        name: format!("Light {}", id),
        model: "H6159".to_string(),
        device_type: "light".to_string(),
        capabilities: vec!["turn".to_string()],
        controllable: true,
        retrievable: true,
    }
}

#[derive(Default)]
pub struct MockLights {
    devices: Vec<Device>,
    fail: bool,
    delay_ms: u64,
    state: Option<PowerState>,
    calls: Mutex<Vec<Call>>,
}

impl MockLights {
    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self {
            devices,
            ..Default::default()
        }
    }

    /// Every operation fails as if the upstream were down
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn delayed(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }

    pub fn with_state(mut self, state: PowerState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn call(&self, call: Option<Call>) -> GatewayResult<()> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if self.fail {
            return Err(GatewayError::Unreachable("connection refused".to_string()));
        }
        if let Some(call) = call {
            self.calls.lock().unwrap().push(call);
        }
        Ok(())
    }
}

#[async_trait]
impl LightBackend for MockLights {
    async fn list_devices(&self) -> GatewayResult<Vec<Device>> {
        self.call(None).await?;
        Ok(self.devices.clone())
    }

    async fn set_power(&self, device_id: &str, _model: &str, on: bool) -> GatewayResult<()> {
        self.call(Some(Call::Power(device_id.to_string(), on))).await
    }

    async fn set_brightness(&self, device_id: &str, _model: &str, level: i64) -> GatewayResult<()> {
        self.call(Some(Call::Brightness(device_id.to_string(), level))).await
    }

    async fn set_color(&self, device_id: &str, _model: &str, color: ColorValue) -> GatewayResult<()> {
        self.call(Some(Call::Color(device_id.to_string(), color))).await
    }

    async fn get_state(&self, _device_id: &str, _model: &str) -> GatewayResult<PowerState> {
        self.call(None).await?;
        Ok(self.state.unwrap_or(PowerState::Off))
    }
}
