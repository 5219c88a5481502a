//! Shared HTTP client construction
//!
//! One pooled client per collaborator with keep-alive; per-request timeouts and
//! headers are applied on top.

use lp_aum_types::{AdapterError, AdapterResult};
use reqwest::{
	header::{HeaderMap, HeaderName, HeaderValue},
	Client, ClientBuilder, Response,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

pub const USER_AGENT: &str = concat!("lp-aum/", env!("CARGO_PKG_VERSION"));

/// Build a pooled client sending `headers` on every request
pub fn build_client(timeout_ms: u64, headers: &[(String, String)]) -> AdapterResult<Client> {
	let mut header_map = HeaderMap::new();
	for (key, value) in headers {
		let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| AdapterError::ConfigError {
			reason: format!("Invalid header name '{}': {}", key, e),
		})?;
		let mut value = HeaderValue::from_str(value).map_err(|e| AdapterError::ConfigError {
			reason: format!("Invalid value for header '{}': {}", key, e),
		})?;
		value.set_sensitive(true);
		header_map.insert(name, value);
	}

	ClientBuilder::new()
		.user_agent(USER_AGENT)
		.timeout(Duration::from_millis(timeout_ms))
		.pool_max_idle_per_host(10)
		.pool_idle_timeout(Duration::from_secs(90))
		.tcp_keepalive(Duration::from_secs(60))
		.default_headers(header_map)
		.build()
		.map_err(AdapterError::HttpError)
}

/// Turn a response into `T`, mapping non-2xx and malformed bodies into adapter errors
pub async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> AdapterResult<T> {
	let status = response.status();
	if !status.is_success() {
		return Err(AdapterError::from_http_failure(status.as_u16()));
	}

	let body = response.text().await.map_err(AdapterError::HttpError)?;
	debug!("{} responded with {} bytes", what, body.len());

	serde_json::from_str(&body).map_err(|e| AdapterError::InvalidResponse {
		reason: format!("Failed to parse {} response: {}", what, e),
	})
}

/// Map a reqwest timeout into the adapter timeout variant
pub fn map_send_error(error: reqwest::Error, timeout_ms: u64) -> AdapterError {
	if error.is_timeout() {
		AdapterError::Timeout { timeout_ms }
	} else {
		AdapterError::HttpError(error)
	}
}
