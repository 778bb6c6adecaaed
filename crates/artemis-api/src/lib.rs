//! artemis-api - Artemis REST API layer
//!
//! One JSON surface over the light accounts, the TV remote service and the
//! camera bridge. Every response, success or failure, carries a `success`
//! flag and a `message`.
//!
//! # Usage
//!
//! ```ignore
//! use artemis_api::{create_router, AppState, RouterOptions};
//!
//! let state = AppState::new(accounts, Arc::new(firetv), Arc::new(cameras));
//! let router = create_router(state, &RouterOptions::default());
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post, MethodRouter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Mounting options for the API
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Prefix for every route, e.g. `/api`
    pub base_path: String,
    /// Log each request through `TraceLayer`
    pub request_logging: bool,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            base_path: "/api".to_string(),
            request_logging: true,
        }
    }
}

/// Wrong methods get the JSON 405 envelope instead of an empty body
fn only(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(handlers::method_not_allowed)
}

/// Create the Artemis REST API router with the given application state
pub fn create_router(state: AppState, options: &RouterOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Cloud lights
        .route("/govee/devices", only(get(handlers::lights::list_devices)))
        .route(
            "/govee/devices/control",
            only(post(handlers::lights::control_device)),
        )
        .route(
            "/govee/devices/state",
            only(get(handlers::lights::device_state)),
        )
        // TV remote
        .route("/firetv/discover", only(get(handlers::remote::discover)))
        .route("/firetv/pair", only(post(handlers::remote::pair)))
        .route("/firetv/command", only(post(handlers::remote::send_command)))
        // Cameras
        .route("/cameras", only(get(handlers::cameras::list_cameras)))
        .route(
            "/cameras/stream",
            only(get(handlers::cameras::camera_stream)),
        )
        // Demo + health
        .route("/lightbulb/toggle", only(post(handlers::lightbulb::toggle)))
        .route("/health", only(get(handlers::health::health)));

    let base_path = normalize_base_path(&options.base_path);
    let router = if base_path.is_empty() {
        api
    } else {
        Router::new().nest(&base_path, api)
    };

    let router = router
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(cors);

    if options.request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// `api/` and `/api` both mount at `/api`; `/` and `` mount at the root
fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_path() {
        assert_eq!(normalize_base_path("/api"), "/api");
        assert_eq!(normalize_base_path("api/"), "/api");
        assert_eq!(normalize_base_path("/v2/api/"), "/v2/api");
        assert_eq!(normalize_base_path("/"), "");
        assert_eq!(normalize_base_path(""), "");
    }
}
