//! Command router for cloud light control

use std::sync::Arc;

use artemis_core::{CommandKind, GatewayError, GatewayResult, LightCommand, PowerState};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::accounts::LightAccounts;

/// A control request as received from the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlRequest {
    #[serde(default)]
    pub device_id: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub command: String,
    /// Opaque until the command name fixes its shape
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub api_key_index: i64,
}

/// Routes light commands to the account that owns the device
#[derive(Clone)]
pub struct CommandRouter {
    accounts: Arc<LightAccounts>,
}

impl CommandRouter {
    pub fn new(accounts: Arc<LightAccounts>) -> Self {
        Self { accounts }
    }

    pub fn accounts(&self) -> &LightAccounts {
        &self.accounts
    }

    /// Validate a request without side effects.
    ///
    /// Order: account index, command name, value shape, then the target
    /// fields the upstream needs to address the device.
    pub fn resolve(&self, request: &ControlRequest) -> GatewayResult<LightCommand> {
        self.accounts.account(request.api_key_index)?;

        let kind = CommandKind::from_name(&request.command)
            .ok_or_else(|| GatewayError::UnsupportedCommand(request.command.clone()))?;
        let command = kind.parse_value(&request.value)?;

        require_target(&request.device_id, &request.model)?;
        Ok(command)
    }

    /// Validate, then invoke the owning account. Adapter errors propagate
    /// unchanged.
    #[instrument(skip(self, request), fields(device_id = %request.device_id, command = %request.command, account = request.api_key_index))]
    pub async fn dispatch(&self, request: &ControlRequest) -> GatewayResult<LightCommand> {
        let command = self.resolve(request)?;
        let account = self.accounts.account(request.api_key_index)?;
        let (id, model) = (request.device_id.as_str(), request.model.as_str());

        match command {
            LightCommand::Power(on) => account.set_power(id, model, on).await?,
            LightCommand::Brightness(level) => account.set_brightness(id, model, level).await?,
            LightCommand::Color(color) => account.set_color(id, model, color).await?,
        }

        info!("Light command applied");
        Ok(command)
    }

    /// Read on/off state through the owning account
    #[instrument(skip(self))]
    pub async fn state(&self, device_id: &str, model: &str, api_key_index: i64) -> GatewayResult<PowerState> {
        require_target(device_id, model)?;
        let account = self.accounts.account(api_key_index)?;
        account.get_state(device_id, model).await
    }
}

fn require_target(device_id: &str, model: &str) -> GatewayResult<()> {
    if device_id.is_empty() || model.is_empty() {
        return Err(GatewayError::InvalidInput(
            "deviceId and model are required".to_string(),
        ));
    }
    Ok(())
}

/// Human-readable confirmation for an applied command
pub fn describe(command: &LightCommand) -> String {
    match command {
        LightCommand::Power(true) => "Light turned on".to_string(),
        LightCommand::Power(false) => "Light turned off".to_string(),
        LightCommand::Brightness(level) => format!("Brightness set to {}%", level),
        LightCommand::Color(c) => format!("Color set to RGB({}, {}, {})", c.r, c.g, c.b),
    }
}
