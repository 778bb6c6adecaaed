//! Camera streaming bridge adapter

use std::time::Duration;

use artemis_core::normalize::normalize_camera;
use artemis_core::{CameraBackend, CameraEntry, GatewayResult, StreamPorts};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, Result};
use crate::http::{build_client, expect_success, handle_response, normalize_base_url};

pub const DEFAULT_CAMERA_URL: &str = "http://localhost:5050";
pub const DEFAULT_CAMERA_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the camera bridge REST API
#[derive(Debug, Clone)]
pub struct CameraClient {
    client: Client,
    base_url: String,
    /// Bridge host as it appears in stream URLs (IPv6 keeps its brackets)
    host: String,
    api_key: Option<String>,
    ports: StreamPorts,
}

impl CameraClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_config(base_url, api_key, DEFAULT_CAMERA_TIMEOUT)
    }

    pub fn with_config(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let host = Url::parse(&base_url)?
            .host_str()
            .map(str::to_string)
            .ok_or(url::ParseError::EmptyHost)?;

        Ok(Self {
            client: build_client(timeout)?,
            base_url,
            host,
            api_key: api_key.filter(|key| !key.is_empty()),
            ports: StreamPorts::default(),
        })
    }

    /// Override the stream ports (bridges behind custom port mappings)
    pub fn with_stream_ports(mut self, ports: StreamPorts) -> Self {
        self.ports = ports;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Host that stream URLs point at
    pub fn stream_host(&self) -> &str {
        &self.host
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.api_key {
            Some(key) => request.query(&[("api", key)]),
            None => request,
        }
    }

    fn api_url(&self, name_uri: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::Parse(format!("{} cannot be a base URL", self.base_url)))?;
            segments.pop_if_empty().push("api");
            match name_uri {
                Some(name) => segments.push(name),
                // listing endpoint carries a trailing slash
                None => segments.push(""),
            };
        }
        Ok(url)
    }

    /// List every camera the bridge knows, ordered by URL-safe name
    #[instrument(skip(self))]
    pub async fn list_cameras(&self) -> Result<Vec<CameraEntry>> {
        let response = self.get(self.api_url(None)?).send().await?;
        let body: Map<String, Value> = handle_response(response).await?;

        let host = self.stream_host();
        let cameras: Vec<CameraEntry> = body
            .iter()
            .map(|(key, entry)| normalize_camera(key, entry, host, &self.ports))
            .collect();

        debug!(count = cameras.len(), "Listed cameras");
        Ok(cameras)
    }

    /// Look up one camera; bridge 404 becomes `NotFound`
    #[instrument(skip(self))]
    pub async fn get_camera(&self, name_uri: &str) -> Result<CameraEntry> {
        let response = self.get(self.api_url(Some(name_uri))?).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("Camera '{}' not found", name_uri)));
        }
        let body: Value = handle_response(response).await?;

        Ok(normalize_camera(name_uri, &body, self.stream_host(), &self.ports))
    }

    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<()> {
        let response = self.get(self.api_url(None)?).send().await?;
        expect_success(response).await
    }
}

#[async_trait]
impl CameraBackend for CameraClient {
    async fn list_cameras(&self) -> GatewayResult<Vec<CameraEntry>> {
        Ok(CameraClient::list_cameras(self).await?)
    }

    async fn get_camera(&self, name_uri: &str) -> GatewayResult<CameraEntry> {
        Ok(CameraClient::get_camera(self, name_uri).await?)
    }

    async fn health_check(&self) -> GatewayResult<()> {
        Ok(CameraClient::health_check(self).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artemis_core::StreamUrls;

    #[test]
    fn test_api_urls() {
        let client = CameraClient::new("http://192.168.1.10:5050/", None).unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.10:5050");
        assert_eq!(client.stream_host(), "192.168.1.10");

        let client = CameraClient::new("http://user:pw@cams.lan:5000", None).unwrap();
        assert_eq!(client.stream_host(), "cams.lan");
        assert_eq!(
            client.api_url(None).unwrap().as_str(),
            "http://192.168.1.10:5050/api/"
        );
        assert_eq!(
            client.api_url(Some("front-door")).unwrap().as_str(),
            "http://192.168.1.10:5050/api/front-door"
        );
    }

    #[test]
    fn test_ipv6_bridge_host_keeps_brackets() {
        let client = CameraClient::new("http://[fd00::10]:5050", None).unwrap();
        assert_eq!(client.stream_host(), "[fd00::10]");

        let urls = StreamUrls::derive(client.stream_host(), "front-door", &StreamPorts::default());
        assert_eq!(urls.hls, "http://[fd00::10]:8888/front-door/stream.m3u8");
        assert!(Url::parse(&urls.hls).is_ok());
        assert!(Url::parse(&urls.rtsp).is_ok());
    }

    #[test]
    fn test_custom_stream_ports() {
        let client = CameraClient::new("http://cams.lan:5050", None)
            .unwrap()
            .with_stream_ports(StreamPorts {
                hls: 18888,
                rtsp: 18554,
                webrtc: 18889,
            });
        let cam = normalize_camera(
            "garage",
            &serde_json::json!({"connected": true, "enabled": true}),
            client.stream_host(),
            &client.ports,
        );
        assert_eq!(cam.stream_url, "http://cams.lan:18888/garage/stream.m3u8");
    }

    #[test]
    fn test_empty_api_key_is_ignored() {
        let client = CameraClient::new("http://localhost:5050", Some(String::new())).unwrap();
        assert_eq!(client.api_key, None);
    }
}
