//! artemis-gateway - Light account aggregation and command routing
//!
//! ```text
//!   GET  /govee/devices          POST /govee/devices/control
//!            │                               │
//!            ▼                               ▼
//!   ┌─────────────────┐  account(i)  ┌─────────────────┐
//!   │  LightAccounts  │◄─────────────│  CommandRouter  │
//!   │  fan-out, merge │              │  index → name → │
//!   │  skip failures  │              │  shape → invoke │
//!   └────────┬────────┘              └─────────────────┘
//!            │
//!     ┌──────┴──────┐
//!     ▼             ▼
//!  account 0     account 1     (one LightBackend per API key)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use artemis_gateway::{CommandRouter, LightAccounts};
//!
//! let accounts = Arc::new(LightAccounts::new(vec![Arc::new(primary), Arc::new(secondary)]));
//! let devices = accounts.list_all_devices().await;
//!
//! let router = CommandRouter::new(accounts);
//! router.dispatch(&request).await?;
//! ```

mod accounts;
mod router;
#[cfg(test)]
mod testing;

pub use accounts::LightAccounts;
pub use router::{describe, CommandRouter, ControlRequest};
