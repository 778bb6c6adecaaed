//! Backend traits - the seams between the gateway and each upstream

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::models::{
    CameraEntry, ColorValue, CommandResult, DiscoveredRemoteDevice, Device, PairResult,
    PairingPhase, PowerState, RemoteCommand,
};

// =============================================================================
// Cloud Lights
// =============================================================================

/// One cloud light account.
///
/// Implementations hold a single credential; the gateway keeps one instance
/// per configured account and tags results with the account index.
#[async_trait]
pub trait LightBackend: Send + Sync {
    /// List every device visible to this account
    async fn list_devices(&self) -> GatewayResult<Vec<Device>>;

    /// Switch a light on or off
    async fn set_power(&self, device_id: &str, model: &str, on: bool) -> GatewayResult<()>;

    /// Set brightness. Fails with `OutOfRange` outside 0-100 without calling out.
    async fn set_brightness(&self, device_id: &str, model: &str, level: i64) -> GatewayResult<()>;

    /// Set color. Fails with `OutOfRange` if any channel is outside 0-255.
    async fn set_color(&self, device_id: &str, model: &str, color: ColorValue)
        -> GatewayResult<()>;

    /// Current on/off state; unknown state reads as off
    async fn get_state(&self, device_id: &str, model: &str) -> GatewayResult<PowerState>;
}

// =============================================================================
// TV Remote
// =============================================================================

/// Discovery, pairing and command service for network TVs
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Scan the local network for TVs
    async fn discover(&self) -> GatewayResult<Vec<DiscoveredRemoteDevice>>;

    /// Run one phase of the PIN handshake against `host`
    async fn pair(&self, host: &str, phase: &PairingPhase) -> GatewayResult<PairResult>;

    /// Send a key press, text or app launch to a paired TV
    async fn send_command(&self, command: &RemoteCommand) -> GatewayResult<CommandResult>;

    /// Check that the service is up
    async fn health_check(&self) -> GatewayResult<()>;
}

// =============================================================================
// Cameras
// =============================================================================

/// Local camera streaming bridge
#[async_trait]
pub trait CameraBackend: Send + Sync {
    async fn list_cameras(&self) -> GatewayResult<Vec<CameraEntry>>;

    /// Look up one camera by its URL-safe name; `NotFound` if the bridge has none
    async fn get_camera(&self, name_uri: &str) -> GatewayResult<CameraEntry>;

    async fn health_check(&self) -> GatewayResult<()>;
}
