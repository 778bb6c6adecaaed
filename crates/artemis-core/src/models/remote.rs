//! TV remote (discovery, pairing, commands) models

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, GatewayResult};

/// Android TV Remote v2 service port, used when discovery omits one
pub const DEFAULT_REMOTE_PORT: u16 = 6466;

/// A TV found during a network scan. Lives for one discovery response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredRemoteDevice {
    pub name: String,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Phase of the PIN pairing handshake.
///
/// The gateway keeps no state between phases: the phase is selected per
/// call from whether the caller supplied a PIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingPhase {
    /// Phase 1: ask the TV to display a PIN
    AwaitingPin,
    /// Phase 2: submit the PIN the user read off the screen
    Verifying { pin: String },
}

impl PairingPhase {
    /// Absent or empty PIN selects phase 1, anything else phase 2.
    /// The PIN is forwarded as given; the TV decides whether it matches.
    pub fn from_pin(pin: Option<&str>) -> Self {
        match pin {
            Some(pin) if !pin.is_empty() => PairingPhase::Verifying {
                pin: pin.to_string(),
            },
            _ => PairingPhase::AwaitingPin,
        }
    }

    pub fn pin(&self) -> Option<&str> {
        match self {
            PairingPhase::AwaitingPin => None,
            PairingPhase::Verifying { pin } => Some(pin.as_str()),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PairingPhase::AwaitingPin => "awaiting_pin",
            PairingPhase::Verifying { .. } => "verifying",
        }
    }

    /// PIN safe for logs: first two digits only
    pub fn masked_pin(&self) -> String {
        match self.pin() {
            None => "(none)".to_string(),
            Some(pin) => {
                let shown: String = pin.chars().take(2).collect();
                format!("{}****", shown)
            }
        }
    }
}

/// Outcome of one pairing phase as reported by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    /// True while the TV is showing a PIN
    #[serde(default)]
    pub awaiting_pin: bool,
}

/// Command name for typing text on the TV
pub const TEXT_INPUT_COMMAND: &str = "text_input";
/// Command name for launching an app by package
pub const LAUNCH_APP_COMMAND: &str = "launch_app";

/// A remote-control command addressed to a paired TV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCommand {
    pub host: String,
    pub command: String,
    pub text: Option<String>,
    pub app_package: Option<String>,
}

impl RemoteCommand {
    /// Check required fields before anything is sent upstream
    pub fn validate(&self) -> GatewayResult<()> {
        if self.host.trim().is_empty() {
            return Err(GatewayError::InvalidInput("host is required".to_string()));
        }
        if self.command.trim().is_empty() {
            return Err(GatewayError::InvalidInput("command is required".to_string()));
        }
        let missing = |field: &Option<String>| field.as_deref().map_or(true, str::is_empty);
        match self.command.as_str() {
            TEXT_INPUT_COMMAND if missing(&self.text) => Err(GatewayError::InvalidInput(
                "text is required for the text_input command".to_string(),
            )),
            LAUNCH_APP_COMMAND if missing(&self.app_package) => Err(GatewayError::InvalidInput(
                "appPackage is required for the launch_app command".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Outcome of a remote-control command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub command: String,
}
