//! Application state for the Artemis API

use std::sync::Arc;

use artemis_core::{CameraBackend, RemoteBackend};
use artemis_gateway::{CommandRouter, LightAccounts};

/// Application state shared across all handlers.
///
/// Read-only after startup; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    lights: Arc<LightAccounts>,
    router: CommandRouter,
    remote: Arc<dyn RemoteBackend>,
    cameras: Arc<dyn CameraBackend>,
}

impl AppState {
    pub fn new(
        lights: LightAccounts,
        remote: Arc<dyn RemoteBackend>,
        cameras: Arc<dyn CameraBackend>,
    ) -> Self {
        let lights = Arc::new(lights);
        Self {
            router: CommandRouter::new(lights.clone()),
            lights,
            remote,
            cameras,
        }
    }

    pub fn lights(&self) -> &LightAccounts {
        &self.lights
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    pub fn remote(&self) -> &dyn RemoteBackend {
        self.remote.as_ref()
    }

    pub fn cameras(&self) -> &dyn CameraBackend {
        self.cameras.as_ref()
    }
}
