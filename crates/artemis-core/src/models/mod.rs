//! Domain models shared by adapters, router and API

pub mod camera;
pub mod light;
pub mod remote;

pub use camera::*;
pub use light::*;
pub use remote::*;
