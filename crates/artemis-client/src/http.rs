//! Transport helpers shared by every adapter

use std::time::Duration;

use artemis_core::normalize::upstream_error_message;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{ClientError, Result};

/// Connection timeout for all upstreams
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Build an HTTP client with a fixed request timeout
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT.min(timeout))
        .build()
        .map_err(|e| ClientError::Setup(e.to_string()))
}

/// Validate a base URL and strip trailing slashes so paths can be appended
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String> {
    Url::parse(base_url)?;
    Ok(base_url.trim_end_matches('/').to_string())
}

/// Decode a 2xx body as JSON, or classify the failure
pub(crate) async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Parse(format!("Failed to read response body: {}", e)))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
    } else {
        Err(extract_error(response).await)
    }
}

/// Accept any 2xx, discarding the body
pub(crate) async fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(extract_error(response).await)
    }
}

/// Turn a non-2xx response into `Upstream`, preferring a structured message
/// over the raw body
pub(crate) async fn extract_error(response: Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ClientError::upstream(status.as_u16(), error_message(status, &body))
}

pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    upstream_error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
    })
}
