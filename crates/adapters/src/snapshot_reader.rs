//! Chain snapshot readers
//!
//! Both readers consume the JSON document produced by the on-chain reader
//! exporter: `{ "assets": [...], "dexes": [...], "lpDeduct": "..." }`.

use async_trait::async_trait;
use lp_aum_types::{AdapterError, AdapterResult, Chain, ChainSnapshot, ChainStateReader};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::http_client::{build_client, map_send_error, read_json};

/// Fetches snapshots from an HTTP endpoint per chain
#[derive(Debug, Clone)]
pub struct HttpSnapshotReader {
	client: Client,
}

impl HttpSnapshotReader {
	pub const ID: &'static str = "http-json";

	pub fn new() -> AdapterResult<Self> {
		// Per-chain timeouts are applied on each request
		Ok(Self {
			client: build_client(60_000, &[])?,
		})
	}

	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl ChainStateReader for HttpSnapshotReader {
	fn id(&self) -> &str {
		Self::ID
	}

	async fn read_snapshot(&self, chain: &Chain) -> AdapterResult<ChainSnapshot> {
		let url = Url::parse(&chain.endpoint).map_err(|e| AdapterError::ConfigError {
			reason: format!("Invalid snapshot URL '{}' for {}: {}", chain.endpoint, chain, e),
		})?;
		debug!("Reading snapshot for {} from {}", chain, url);

		let mut request = self
			.client
			.get(url)
			.timeout(Duration::from_millis(chain.timeout_ms));
		if let Some(headers) = &chain.headers {
			for (key, value) in headers {
				request = request.header(key.as_str(), value.as_str());
			}
		}

		let response = request
			.send()
			.await
			.map_err(|e| map_send_error(e, chain.timeout_ms))?;
		read_json(response, "snapshot endpoint").await
	}
}

/// Reads snapshots from JSON files on disk
#[derive(Debug, Clone, Default)]
pub struct FileSnapshotReader;

impl FileSnapshotReader {
	pub const ID: &'static str = "file";

	pub fn new() -> Self {
		Self
	}
}

#[async_trait]
impl ChainStateReader for FileSnapshotReader {
	fn id(&self) -> &str {
		Self::ID
	}

	async fn read_snapshot(&self, chain: &Chain) -> AdapterResult<ChainSnapshot> {
		debug!("Reading snapshot for {} from file {}", chain, chain.endpoint);
		let read = tokio::fs::read_to_string(&chain.endpoint);
		let body = tokio::time::timeout(Duration::from_millis(chain.timeout_ms), read)
			.await
			.map_err(|_| AdapterError::Timeout {
				timeout_ms: chain.timeout_ms,
			})??;

		serde_json::from_str(&body).map_err(|e| AdapterError::InvalidResponse {
			reason: format!("Failed to parse snapshot file '{}': {}", chain.endpoint, e),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lp_aum_types::dec;

	fn temp_snapshot(name: &str, body: &str) -> std::path::PathBuf {
		let path = std::env::temp_dir().join(format!("lp-aum-{}-{}.json", name, std::process::id()));
		std::fs::write(&path, body).unwrap();
		path
	}

	#[tokio::test]
	async fn test_file_reader_parses_snapshot() {
		let path = temp_snapshot(
			"file-reader",
			r#"{
				"assets": [{
					"symbol": "USDC", "isEnabled": true, "isStable": true,
					"spotLiquidity": "100", "collectedFee": "1", "deduct": "0", "credit": "0",
					"totalLongPosition": "0", "totalShortPosition": "0",
					"averageLongPrice": "0", "averageShortPrice": "0"
				}],
				"dexes": [],
				"lpDeduct": "7"
			}"#,
		);
		let chain = Chain::new(10, "Optimism", FileSnapshotReader::ID, path.to_str().unwrap());

		let snapshot = FileSnapshotReader::new().read_snapshot(&chain).await.unwrap();
		assert_eq!(snapshot.assets[0].symbol, "USDC");
		assert_eq!(snapshot.assets[0].spot_liquidity, dec!(100));
		assert_eq!(snapshot.lp_deduct, dec!(7));

		std::fs::remove_file(path).ok();
	}

	#[tokio::test]
	async fn test_file_reader_errors() {
		let chain = Chain::new(10, "Optimism", FileSnapshotReader::ID, "/nonexistent/10.json");
		assert!(matches!(
			FileSnapshotReader::new().read_snapshot(&chain).await,
			Err(AdapterError::Io(_))
		));

		let path = temp_snapshot("file-reader-bad", "{ not json");
		let chain = Chain::new(10, "Optimism", FileSnapshotReader::ID, path.to_str().unwrap());
		assert!(matches!(
			FileSnapshotReader::new().read_snapshot(&chain).await,
			Err(AdapterError::InvalidResponse { .. })
		));
		std::fs::remove_file(path).ok();
	}

	#[tokio::test]
	async fn test_http_reader_rejects_invalid_url() {
		let reader = HttpSnapshotReader::new().unwrap();
		let chain = Chain::new(56, "BNB Chain", HttpSnapshotReader::ID, "not a url");
		assert!(matches!(
			reader.read_snapshot(&chain).await,
			Err(AdapterError::ConfigError { .. })
		));
	}
}
