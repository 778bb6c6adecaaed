//! Daemon configuration
//!
//! Loaded from an optional TOML file, then overridden from the environment.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! environment = "development"
//! api_base_path = "/api"
//! request_logging = true
//!
//! [govee]
//! api_keys = ["primary-key", "secondary-key"]
//!
//! [firetv]
//! url = "http://localhost:9090"
//!
//! [camera]
//! url = "http://localhost:5050"
//! hls_port = 8888
//! rtsp_port = 8554
//! webrtc_port = 8889
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use artemis_client::{DEFAULT_CAMERA_URL, DEFAULT_FIRETV_URL, DEFAULT_GOVEE_URL};
use artemis_core::StreamPorts;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub govee: GoveeConfig,
    pub firetv: FireTvConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `production` switches logs to JSON
    pub environment: String,
    pub api_base_path: String,
    pub request_logging: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
            api_base_path: "/api".to_string(),
            request_logging: true,
        }
    }
}

impl ServerConfig {
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// Cloud light accounts. The position of a key is its account index.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoveeConfig {
    pub api_keys: Vec<String>,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for GoveeConfig {
    fn default() -> Self {
        Self {
            api_keys: Vec::new(),
            base_url: DEFAULT_GOVEE_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FireTvConfig {
    pub url: String,
    pub timeout_secs: u64,
}

impl Default for FireTvConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FIRETV_URL.to_string(),
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    /// Ports the bridge publishes each stream protocol on
    pub hls_port: u16,
    pub rtsp_port: u16,
    pub webrtc_port: u16,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let ports = StreamPorts::default();
        Self {
            url: DEFAULT_CAMERA_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
            hls_port: ports.hls,
            rtsp_port: ports.rtsp,
            webrtc_port: ports.webrtc,
        }
    }
}

impl CameraConfig {
    pub fn stream_ports(&self) -> StreamPorts {
        StreamPorts {
            hls: self.hls_port,
            rtsp: self.rtsp_port,
            webrtc: self.webrtc_port,
        }
    }
}

impl GatewayConfig {
    /// Load from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    ///
    /// Empty values are ignored; unparseable numbers and booleans keep the
    /// previous value.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("PORT").and_then(|p| p.trim().parse().ok()) {
            self.server.port = port;
        }
        if let Some(environment) = var("ENVIRONMENT") {
            self.server.environment = environment;
        }
        if let Some(base) = var("API_BASE_PATH") {
            self.server.api_base_path = base;
        }
        if let Some(enabled) = var("ENABLE_REQUEST_LOGGING").and_then(|v| parse_bool(&v)) {
            self.server.request_logging = enabled;
        }
        if let Some(key) = var("GOVEE_API_KEY") {
            self.set_api_key(0, key);
        }
        if let Some(key) = var("GOVEE_API_KEY_SECONDARY") {
            self.set_api_key(1, key);
        }
        if let Some(url) = var("FIRETV_SERVICE_URL") {
            self.firetv.url = url;
        }
        if let Some(url) = var("WYZE_BRIDGE_URL") {
            self.camera.url = url;
        }
        if let Some(key) = var("WYZE_BRIDGE_API_KEY") {
            self.camera.api_key = Some(key);
        }
    }

    fn set_api_key(&mut self, index: usize, key: String) {
        if self.govee.api_keys.len() <= index {
            self.govee.api_keys.resize(index + 1, String::new());
        }
        self.govee.api_keys[index] = key;
    }

    /// Reject configurations the gateway cannot start with
    pub fn validate(&self) -> anyhow::Result<()> {
        match self.govee.api_keys.iter().position(|k| k.trim().is_empty()) {
            _ if self.govee.api_keys.is_empty() => {
                bail!("GOVEE_API_KEY is required: no light API key configured")
            }
            Some(0) => bail!("GOVEE_API_KEY is required: primary light API key is empty"),
            Some(index) => bail!("Light API key at index {} is empty", index),
            None => {}
        }

        let timeouts = [
            ("govee", self.govee.timeout_secs),
            ("firetv", self.firetv.timeout_secs),
            ("camera", self.camera.timeout_secs),
        ];
        if let Some((section, _)) = timeouts.iter().find(|(_, secs)| *secs == 0) {
            bail!("[{}] timeout_secs must be greater than zero", section);
        }
        Ok(())
    }

    /// `host:port` to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn govee_timeout(&self) -> Duration {
        Duration::from_secs(self.govee.timeout_secs)
    }

    pub fn firetv_timeout(&self) -> Duration {
        Duration::from_secs(self.firetv.timeout_secs)
    }

    pub fn camera_timeout(&self) -> Duration {
        Duration::from_secs(self.camera.timeout_secs)
    }
}

/// Accepts 1/t/true and 0/f/false in any case
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::load(None).unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.server.api_base_path, "/api");
        assert!(config.server.request_logging);
        assert_eq!(config.govee.base_url, "https://developer-api.govee.com");
        assert_eq!(config.firetv.url, "http://localhost:9090");
        assert_eq!(config.firetv_timeout(), Duration::from_secs(15));
        assert_eq!(config.camera.url, "http://localhost:5050");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000
environment = "production"

[govee]
api_keys = ["one", "two"]

[camera]
url = "http://192.168.1.10:5050"
api_key = "secret"
hls_port = 18888
"#
        )
        .unwrap();

        let config = GatewayConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(config.server.is_production());
        assert_eq!(config.govee.api_keys, vec!["one".to_string(), "two".to_string()]);
        assert_eq!(config.camera.api_key.as_deref(), Some("secret"));
        assert_eq!(config.camera_timeout(), Duration::from_secs(10));
        assert_eq!(
            config.camera.stream_ports(),
            StreamPorts {
                hls: 18888,
                rtsp: 8554,
                webrtc: 8889,
            }
        );
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = GatewayConfig::default();
        config.govee.api_keys = vec!["primary".to_string()];
        config.validate().unwrap();

        config.camera.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("[camera] timeout_secs"));

        config.camera.timeout_secs = 10;
        config.govee.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"not a number\"").unwrap();
        assert!(GatewayConfig::load(Some(file.path())).is_err());

        let missing = Path::new("/definitely/not/here.toml");
        assert!(GatewayConfig::load(Some(missing)).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = GatewayConfig::default();
        config.apply_env_overrides(env(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "3000"),
            ("API_BASE_PATH", "/v2"),
            ("ENABLE_REQUEST_LOGGING", "false"),
            ("GOVEE_API_KEY", "primary"),
            ("GOVEE_API_KEY_SECONDARY", "secondary"),
            ("FIRETV_SERVICE_URL", "http://tv-bridge:9090"),
            ("WYZE_BRIDGE_URL", "http://cams:5050"),
            ("WYZE_BRIDGE_API_KEY", "wb-key"),
        ]));

        assert_eq!(config.address(), "127.0.0.1:3000");
        assert_eq!(config.server.api_base_path, "/v2");
        assert!(!config.server.request_logging);
        assert_eq!(
            config.govee.api_keys,
            vec!["primary".to_string(), "secondary".to_string()]
        );
        assert_eq!(config.firetv.url, "http://tv-bridge:9090");
        assert_eq!(config.camera.url, "http://cams:5050");
        assert_eq!(config.camera.api_key.as_deref(), Some("wb-key"));
        config.validate().unwrap();
    }

    #[test]
    fn test_bad_or_empty_env_values_are_ignored() {
        let mut config = GatewayConfig::default();
        config.govee.api_keys = vec!["from-file".to_string()];
        config.apply_env_overrides(env(&[
            ("PORT", "eighty"),
            ("ENABLE_REQUEST_LOGGING", "maybe"),
            ("HOST", ""),
            ("GOVEE_API_KEY", "  "),
        ]));

        assert_eq!(config.server.port, 8080);
        assert!(config.server.request_logging);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.govee.api_keys, vec!["from-file".to_string()]);
    }

    #[test]
    fn test_validate_names_primary_key() {
        let config = GatewayConfig::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GOVEE_API_KEY"));

        let mut config = GatewayConfig::default();
        config.apply_env_overrides(env(&[("GOVEE_API_KEY_SECONDARY", "only-secondary")]));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GOVEE_API_KEY"));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("f"), Some(false));
        assert_eq!(parse_bool("yes"), None);
    }
}
