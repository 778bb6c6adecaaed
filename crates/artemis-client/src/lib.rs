//! Artemis upstream adapters
//!
//! One typed client per upstream. Each implements the matching backend
//! trait from `artemis-core`, classifying transport and upstream failures
//! once at this boundary.
//!
//! # Example
//!
//! ```rust,no_run
//! use artemis_client::{CameraClient, GoveeClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), artemis_client::ClientError> {
//!     let lights = GoveeClient::new("my-api-key")?;
//!     let devices = lights.list_devices().await?;
//!
//!     let cameras = CameraClient::new("http://localhost:5050", None)?;
//!     let front = cameras.get_camera("front-door").await?;
//!     println!("{} devices, front door at {}", devices.len(), front.stream_url);
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module serves an axum router in-process, so adapters can be
//! pointed at a fake upstream:
//!
//! ```rust,ignore
//! use artemis_client::testing::TestServer;
//!
//! let upstream = TestServer::start(fake_bridge()).await?;
//! let cameras = CameraClient::new(&upstream.base_url(), None)?;
//! ```

mod camera;
mod error;
mod firetv;
mod govee;
mod http;
pub mod testing;

pub use camera::{CameraClient, DEFAULT_CAMERA_TIMEOUT, DEFAULT_CAMERA_URL};
pub use error::{ClientError, Result};
pub use firetv::{FireTvClient, DEFAULT_FIRETV_TIMEOUT, DEFAULT_FIRETV_URL};
pub use govee::{GoveeClient, DEFAULT_GOVEE_TIMEOUT, DEFAULT_GOVEE_URL};
