//! artemisd - Artemis home-automation gateway daemon
//!
//! Serves one REST API over the cloud light accounts, the TV remote-control
//! service and the camera bridge.
//!
//! Usage:
//!   artemisd [config.toml]
//!
//! Settings come from the optional TOML file, then from environment
//! variables (`GOVEE_API_KEY`, `PORT`, ...).

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use artemis_api::{create_router, AppState, RouterOptions};
use artemis_client::{CameraClient, FireTvClient, GoveeClient};
use artemis_core::{CameraBackend, LightBackend, RemoteBackend};
use artemis_gateway::LightAccounts;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::GatewayConfig;

/// Parsed command-line arguments
struct Args {
    /// Gateway config file (TOML)
    config_path: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut result = Args { config_path: None };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                result.config_path = Some(PathBuf::from(arg));
            }
            _ => eprintln!("Ignoring unknown argument: {}", arg),
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"artemisd - Artemis home-automation gateway

Usage: artemisd [config.toml]

Options:
  -h, --help    Print this help message

Environment:
  GOVEE_API_KEY              Primary light account key (required)
  GOVEE_API_KEY_SECONDARY    Secondary light account key
  FIRETV_SERVICE_URL         TV remote-control service URL
  WYZE_BRIDGE_URL            Camera bridge URL
  WYZE_BRIDGE_API_KEY        Camera bridge API key
  HOST, PORT                 Listen address
  API_BASE_PATH              Route prefix (default /api)
  ENABLE_REQUEST_LOGGING     Log every request (default true)
  ENVIRONMENT                `production` switches logs to JSON
"#
    );
}

fn init_logging(production: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "artemisd=info,artemis_api=info,artemis_client=info,artemis_gateway=info".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    if production {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// One light client per configured key, in key order
fn build_light_accounts(config: &GatewayConfig) -> anyhow::Result<LightAccounts> {
    let mut accounts: Vec<Arc<dyn LightBackend>> = Vec::with_capacity(config.govee.api_keys.len());
    for (index, key) in config.govee.api_keys.iter().enumerate() {
        let client = GoveeClient::with_config(
            key.as_str(),
            &config.govee.base_url,
            config.govee_timeout(),
        )
        .with_context(|| format!("Failed to create light client for account {}", index))?;
        accounts.push(Arc::new(client));
    }
    Ok(LightAccounts::new(accounts))
}

/// Check the optional upstreams in the background. Failures only warn.
fn spawn_health_checks(remote: Arc<dyn RemoteBackend>, cameras: Arc<dyn CameraBackend>) {
    tokio::spawn(async move {
        match remote.health_check().await {
            Ok(()) => tracing::info!("TV remote service is reachable"),
            Err(e) => tracing::warn!(error = %e, "TV remote service health check failed"),
        }
    });
    tokio::spawn(async move {
        match cameras.health_check().await {
            Ok(()) => tracing::info!("Camera bridge is reachable"),
            Err(e) => tracing::warn!(error = %e, "Camera bridge health check failed"),
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args();

    let mut config = GatewayConfig::load(args.config_path.as_deref())?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    init_logging(config.server.is_production());

    tracing::info!(
        environment = %config.server.environment,
        config = ?args.config_path,
        "Starting artemisd"
    );

    let lights = build_light_accounts(&config)?;
    tracing::info!(accounts = lights.len(), "Light accounts configured");

    let remote: Arc<dyn RemoteBackend> = Arc::new(
        FireTvClient::with_config(&config.firetv.url, config.firetv_timeout())
            .context("Failed to create TV remote client")?,
    );
    let cameras: Arc<dyn CameraBackend> = Arc::new(
        CameraClient::with_config(
            &config.camera.url,
            config.camera.api_key.clone(),
            config.camera_timeout(),
        )
        .context("Failed to create camera bridge client")?
        .with_stream_ports(config.camera.stream_ports()),
    );
    tracing::info!(
        firetv = %config.firetv.url,
        camera_bridge = %config.camera.url,
        "Upstream services configured"
    );

    spawn_health_checks(remote.clone(), cameras.clone());

    let state = AppState::new(lights, remote, cameras);
    let options = RouterOptions {
        base_path: config.server.api_base_path.clone(),
        request_logging: config.server.request_logging,
    };
    let app = create_router(state, &options);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let base = options.base_path.trim().trim_end_matches('/');
    tracing::info!("Listening on http://{}{}", addr, base);
    tracing::info!("Health check: http://{}{}/health", addr, base);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
