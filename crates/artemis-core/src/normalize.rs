//! Response normalizer
//!
//! Pure mappings from each upstream's loosely-typed JSON into the gateway's
//! stable models. Every logical field is read through an ordered list of
//! candidate keys, first match wins; missing optional data falls back to a
//! domain default and never fails.

use serde_json::{Map, Value};

use crate::models::{
    CameraEntry, CameraStatus, DiscoveredRemoteDevice, Device, PowerState, StreamPorts,
    StreamUrls, DEFAULT_REMOTE_PORT,
};

// =============================================================================
// Candidate keys
// =============================================================================

/// Light device id
pub const LIGHT_ID_KEYS: &[&str] = &["device", "deviceId"];
/// Light device name; falls back to the id
pub const LIGHT_NAME_KEYS: &[&str] = &["deviceName", "name"];
pub const LIGHT_MODEL_KEYS: &[&str] = &["model", "sku"];
pub const LIGHT_CAPABILITY_KEYS: &[&str] = &["supportCmds", "capabilities"];

/// Camera display name; falls back to the bridge key
pub const CAMERA_NAME_KEYS: &[&str] = &["nickname"];
/// Camera URL-safe name; falls back to the bridge key
pub const CAMERA_URI_KEYS: &[&str] = &["name_uri"];
/// Camera model; falls back to [`DEFAULT_CAMERA_MODEL`]
pub const CAMERA_MODEL_KEYS: &[&str] = &["model_name", "product_model", "model"];
pub const CAMERA_CONNECTED_KEYS: &[&str] = &["connected"];
pub const CAMERA_ENABLED_KEYS: &[&str] = &["enabled"];

pub const REMOTE_HOST_KEYS: &[&str] = &["host", "ip", "address"];
/// Discovered TV name; falls back to the host
pub const REMOTE_NAME_KEYS: &[&str] = &["name", "device_name"];
pub const REMOTE_PORT_KEYS: &[&str] = &["port"];
pub const REMOTE_MODEL_KEYS: &[&str] = &["model"];

/// Message field of a structured upstream error body
pub const ERROR_MESSAGE_KEYS: &[&str] = &["message", "detail", "error"];

pub const DEFAULT_CAMERA_MODEL: &str = "Wyze Camera";
pub const LIGHT_DEVICE_TYPE: &str = "light";

// =============================================================================
// Extractors
// =============================================================================

/// First non-empty string among `keys`
pub fn first_str(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// First boolean among `keys`
pub fn first_bool(map: &Map<String, Value>, keys: &[&str]) -> Option<bool> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_bool))
}

/// First unsigned integer among `keys`
pub fn first_u64(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter()
        .find_map(|key| map.get(*key).and_then(Value::as_u64))
}

/// First string array among `keys`; non-string elements are skipped
pub fn first_str_list(map: &Map<String, Value>, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|key| {
        map.get(*key).and_then(Value::as_array).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    })
}

// =============================================================================
// Light state
// =============================================================================

type PowerExtractor = fn(&Map<String, Value>) -> Option<bool>;

/// Checked in this order within each property map
const POWER_EXTRACTORS: &[PowerExtractor] = &[online_property, power_state_property];

fn online_property(prop: &Map<String, Value>) -> Option<bool> {
    prop.get("online").and_then(Value::as_bool)
}

/// Case-sensitive: only "on" counts
fn power_state_property(prop: &Map<String, Value>) -> Option<bool> {
    prop.get("powerState").and_then(Value::as_str).map(|s| s == "on")
}

/// Derive on/off from the upstream's list of property maps.
///
/// Maps are scanned in order and the first one carrying a boolean `online`
/// or a string `powerState` decides. Nothing recognized reads as off.
pub fn power_state(properties: &[Value]) -> PowerState {
    properties
        .iter()
        .filter_map(Value::as_object)
        .find_map(|prop| POWER_EXTRACTORS.iter().find_map(|extract| extract(prop)))
        .map(PowerState::from)
        .unwrap_or(PowerState::Off)
}

// =============================================================================
// Per-domain mappings
// =============================================================================

/// Map one entry of the cloud device list. `position` seeds the id when the
/// entry has none.
pub fn normalize_light_device(entry: &Value, position: usize) -> Device {
    let empty = Map::new();
    let map = entry.as_object().unwrap_or(&empty);

    let id = first_str(map, LIGHT_ID_KEYS).unwrap_or_else(|| format!("device-{}", position));
    let name = first_str(map, LIGHT_NAME_KEYS).unwrap_or_else(|| id.clone());

    Device {
        name,
        model: first_str(map, LIGHT_MODEL_KEYS).unwrap_or_default(),
        device_type: LIGHT_DEVICE_TYPE.to_string(),
        capabilities: first_str_list(map, LIGHT_CAPABILITY_KEYS).unwrap_or_default(),
        controllable: first_bool(map, &["controllable"]).unwrap_or(false),
        retrievable: first_bool(map, &["retrievable"]).unwrap_or(false),
        id,
    }
}

/// Map one bridge camera entry. `key` is the entry's key in the bridge
/// listing (or the requested name for single lookups).
pub fn normalize_camera(key: &str, entry: &Value, host: &str, ports: &StreamPorts) -> CameraEntry {
    let empty = Map::new();
    let map = entry.as_object().unwrap_or(&empty);

    let name_uri = first_str(map, CAMERA_URI_KEYS).unwrap_or_else(|| key.to_string());
    let connected = first_bool(map, CAMERA_CONNECTED_KEYS).unwrap_or(false);
    let enabled = first_bool(map, CAMERA_ENABLED_KEYS).unwrap_or(false);
    let streams = StreamUrls::derive(host, &name_uri, ports);

    CameraEntry {
        name: first_str(map, CAMERA_NAME_KEYS).unwrap_or_else(|| key.to_string()),
        model: first_str(map, CAMERA_MODEL_KEYS)
            .unwrap_or_else(|| DEFAULT_CAMERA_MODEL.to_string()),
        status: CameraStatus::from_flags(connected, enabled),
        enabled,
        stream_url: streams.hls.clone(),
        streams,
        name_uri,
    }
}

/// Map one discovery result. Entries without a host are unusable and
/// yield `None`.
pub fn normalize_discovered(entry: &Value) -> Option<DiscoveredRemoteDevice> {
    let map = entry.as_object()?;
    let host = first_str(map, REMOTE_HOST_KEYS)?;

    let port = first_u64(map, REMOTE_PORT_KEYS)
        .and_then(|p| u16::try_from(p).ok())
        .filter(|p| *p != 0)
        .unwrap_or(DEFAULT_REMOTE_PORT);

    Some(DiscoveredRemoteDevice {
        name: first_str(map, REMOTE_NAME_KEYS).unwrap_or_else(|| host.clone()),
        model: first_str(map, REMOTE_MODEL_KEYS),
        port,
        host,
    })
}

/// Message carried by a non-2xx upstream body: the structured message if the
/// body is a JSON object exposing one, else the raw text. `None` for a blank
/// body.
pub fn upstream_error_message(body: &str) -> Option<String> {
    let text = body.trim();
    if text.is_empty() {
        return None;
    }

    let structured = serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| value.as_object().and_then(|map| first_str(map, ERROR_MESSAGE_KEYS)));

    Some(structured.unwrap_or_else(|| text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_power_state_scans_in_order() {
        let props = vec![json!({"brightness": 50}), json!({"powerState": "on"})];
        assert_eq!(power_state(&props), PowerState::On);

        let props = vec![json!({"online": false}), json!({"powerState": "on"})];
        assert_eq!(power_state(&props), PowerState::Off);

        let props = vec![json!({"powerState": "ON"})];
        assert_eq!(power_state(&props), PowerState::Off);

        // online wins over powerState inside one map
        let props = vec![json!({"powerState": "off", "online": true})];
        assert_eq!(power_state(&props), PowerState::On);
    }

    #[test]
    fn test_power_state_defaults_off() {
        assert_eq!(power_state(&[]), PowerState::Off);
        let props = vec![json!({"brightness": 50}), json!({"online": "yes"}), json!(7)];
        assert_eq!(power_state(&props), PowerState::Off);
    }

    #[test]
    fn test_normalize_light_device() {
        let entry = json!({
            "device": "AA:BB:CC",
            "model": "H6159",
            "deviceName": "Desk Lamp",
            "controllable": true,
            "retrievable": true,
            "supportCmds": ["turn", "brightness", "color"]
        });
        assert_eq!(
            normalize_light_device(&entry, 0),
            Device {
                id: "AA:BB:CC".to_string(),
                name: "Desk Lamp".to_string(),
                model: "H6159".to_string(),
                device_type: "light".to_string(),
                capabilities: vec!["turn".into(), "brightness".into(), "color".into()],
                controllable: true,
                retrievable: true,
            }
        );
    }

    #[test]
    fn test_normalize_light_device_fallbacks() {
        let device = normalize_light_device(&json!({"sku": "H6008"}), 3);
        assert_eq!(device.id, "device-3");
        assert_eq!(device.name, "device-3");
        assert_eq!(device.model, "H6008");
        assert!(device.capabilities.is_empty());
        assert!(!device.controllable);
    }

    #[test]
    fn test_normalize_camera() {
        let entry = json!({
            "name_uri": "front-door",
            "nickname": "Front Door",
            "product_model": "WYZE_CAKP2JFUS",
            "connected": true,
            "enabled": false
        });
        let cam = normalize_camera("front-door", &entry, "192.168.1.10", &StreamPorts::default());
        assert_eq!(cam.name, "Front Door");
        assert_eq!(cam.model, "WYZE_CAKP2JFUS");
        assert_eq!(cam.status, CameraStatus::Offline);
        assert_eq!(cam.stream_url, "http://192.168.1.10:8888/front-door/stream.m3u8");
        assert_eq!(cam.stream_url, cam.streams.hls);
    }

    #[test]
    fn test_normalize_camera_fallbacks() {
        let cam = normalize_camera(
            "back-yard",
            &json!({"connected": true, "enabled": true}),
            "cams.local",
            &StreamPorts::default(),
        );
        assert_eq!(cam.name, "back-yard");
        assert_eq!(cam.name_uri, "back-yard");
        assert_eq!(cam.model, DEFAULT_CAMERA_MODEL);
        assert_eq!(cam.status, CameraStatus::Online);
        assert_eq!(cam.streams.rtsp, "rtsp://cams.local:8554/back-yard");

        // Non-object entries still produce a record
        let cam = normalize_camera("garage", &json!(null), "h", &StreamPorts::default());
        assert_eq!(cam.status, CameraStatus::Offline);
        assert!(!cam.enabled);
    }

    #[test]
    fn test_normalize_discovered() {
        let tv = normalize_discovered(&json!({"name": "Living Room", "host": "10.0.0.5", "port": 6466, "model": "AFTMM"}))
            .unwrap();
        assert_eq!(tv.name, "Living Room");
        assert_eq!(tv.model.as_deref(), Some("AFTMM"));

        let tv = normalize_discovered(&json!({"host": "10.0.0.6"})).unwrap();
        assert_eq!(tv.name, "10.0.0.6");
        assert_eq!(tv.port, DEFAULT_REMOTE_PORT);
        assert_eq!(tv.model, None);

        assert_eq!(normalize_discovered(&json!({"name": "No Host"})), None);
        assert_eq!(normalize_discovered(&json!({"host": "10.0.0.7", "port": 70000})).unwrap().port, 6466);
    }

    #[test]
    fn test_upstream_error_message() {
        assert_eq!(
            upstream_error_message(r#"{"code": 401, "message": "Invalid API Key"}"#).as_deref(),
            Some("Invalid API Key")
        );
        assert_eq!(
            upstream_error_message(r#"{"detail": "Device not paired"}"#).as_deref(),
            Some("Device not paired")
        );
        assert_eq!(
            upstream_error_message("Bad Gateway\n").as_deref(),
            Some("Bad Gateway")
        );
        assert_eq!(
            upstream_error_message(r#"{"code": 500}"#).as_deref(),
            Some(r#"{"code": 500}"#)
        );
        assert_eq!(upstream_error_message("  "), None);
    }
}
