//! Camera bridge models

use serde::{Deserialize, Serialize};

/// Fixed ports the bridge exposes each stream protocol on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamPorts {
    pub hls: u16,
    pub rtsp: u16,
    pub webrtc: u16,
}

impl Default for StreamPorts {
    fn default() -> Self {
        Self {
            hls: 8888,
            rtsp: 8554,
            webrtc: 8889,
        }
    }
}

/// Stream endpoints for one camera, one per protocol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamUrls {
    pub hls: String,
    pub rtsp: String,
    pub webrtc: String,
}

impl StreamUrls {
    /// Build the endpoints from the bridge host and the camera's URL-safe name
    pub fn derive(host: &str, name_uri: &str, ports: &StreamPorts) -> Self {
        Self {
            hls: format!("http://{}:{}/{}/stream.m3u8", host, ports.hls, name_uri),
            rtsp: format!("rtsp://{}:{}/{}", host, ports.rtsp, name_uri),
            webrtc: format!("http://{}:{}/{}/", host, ports.webrtc, name_uri),
        }
    }
}

/// Derived connectivity of a camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraStatus {
    Online,
    Offline,
}

impl CameraStatus {
    /// Online only when the camera is both connected and enabled
    pub fn from_flags(connected: bool, enabled: bool) -> Self {
        if connected && enabled {
            CameraStatus::Online
        } else {
            CameraStatus::Offline
        }
    }
}

/// A camera as exposed by the gateway. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraEntry {
    /// Display name from the vendor app
    pub name: String,
    /// URL-safe name used in stream paths
    pub name_uri: String,
    pub model: String,
    pub status: CameraStatus,
    pub enabled: bool,
    /// Primary (HLS) stream
    pub stream_url: String,
    pub streams: StreamUrls,
}
