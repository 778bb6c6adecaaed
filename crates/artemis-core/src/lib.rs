//! artemis-core - Core traits and types for the Artemis device gateway
//!
//! This crate holds the value objects shared by every backend, the error
//! taxonomy, the backend traits each upstream adapter implements, and the
//! normalizer that maps upstream JSON into those value objects.

pub mod backend;
pub mod error;
pub mod models;
pub mod normalize;

pub use backend::{CameraBackend, LightBackend, RemoteBackend};
pub use error::{GatewayError, GatewayResult};
pub use models::*;
