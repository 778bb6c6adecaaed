//! Cloud light models

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GatewayError, GatewayResult};

/// Allowed brightness levels
pub const BRIGHTNESS_RANGE: RangeInclusive<i64> = 0..=100;
/// Allowed value of a single color channel
pub const COLOR_CHANNEL_RANGE: RangeInclusive<i64> = 0..=255;

/// A light as reported by one cloud account.
///
/// Snapshot rebuilt from the upstream on every list call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Opaque device identifier (usually a MAC-like address)
    pub id: String,
    /// Name set by the user in the vendor app
    pub name: String,
    /// Model string, required by the upstream on every control call
    pub model: String,
    /// Device type (always "light" for this backend)
    #[serde(rename = "type")]
    pub device_type: String,
    /// Command names the device accepts
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub controllable: bool,
    #[serde(default)]
    pub retrievable: bool,
}

/// A device tagged with the index of the account that reported it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDevice {
    #[serde(flatten)]
    pub device: Device,
    /// Index into the configured account list (0 = primary)
    pub api_key_index: usize,
}

/// On/off state of a light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
}

impl PowerState {
    pub fn is_on(self) -> bool {
        self == PowerState::On
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on {
            PowerState::On
        } else {
            PowerState::Off
        }
    }
}

/// Requested RGB color. Channels are unchecked until the adapter validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorValue {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl ColorValue {
    /// True when every channel lies in 0-255
    pub fn in_range(&self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|c| COLOR_CHANNEL_RANGE.contains(c))
    }
}

/// A light command with a value of the matching shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCommand {
    Power(bool),
    Brightness(i64),
    Color(ColorValue),
}

impl LightCommand {
    pub fn kind(&self) -> CommandKind {
        match self {
            LightCommand::Power(_) => CommandKind::Turn,
            LightCommand::Brightness(_) => CommandKind::Brightness,
            LightCommand::Color(_) => CommandKind::Color,
        }
    }
}

/// The command names the light backend understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Turn,
    Brightness,
    Color,
}

impl CommandKind {
    pub const ALL: [CommandKind; 3] = [CommandKind::Turn, CommandKind::Brightness, CommandKind::Color];

    /// Exact, case-sensitive lookup of a command name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Wire name of this command
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Turn => "turn",
            CommandKind::Brightness => "brightness",
            CommandKind::Color => "color",
        }
    }

    /// Human-readable description of the value shape this command expects
    pub fn expected_shape(self) -> &'static str {
        match self {
            CommandKind::Turn => "boolean",
            CommandKind::Brightness => "number",
            CommandKind::Color => "object with r, g, b numeric fields",
        }
    }

    /// Check the shape of an opaque JSON value and build the typed command.
    ///
    /// Only the shape is checked here; numeric ranges are enforced by the
    /// adapter right before it calls out.
    pub fn parse_value(self, value: &Value) -> GatewayResult<LightCommand> {
        let invalid = || GatewayError::InvalidValue {
            command: self.name(),
            expected: self.expected_shape(),
        };

        match self {
            CommandKind::Turn => value.as_bool().map(LightCommand::Power).ok_or_else(invalid),
            CommandKind::Brightness => number(value).map(LightCommand::Brightness).ok_or_else(invalid),
            CommandKind::Color => {
                let obj = value.as_object().ok_or_else(invalid)?;
                let channel = |key: &str| obj.get(key).and_then(number);
                match (channel("r"), channel("g"), channel("b")) {
                    (Some(r), Some(g), Some(b)) => Ok(LightCommand::Color(ColorValue { r, g, b })),
                    _ => Err(invalid()),
                }
            }
        }
    }
}

/// JSON numbers arrive as integers or floats; floats are truncated.
fn number(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}
