//! Price sources
//!
//! `HttpPriceSource` talks to a liquidity-asset endpoint returning
//! `{ "assets": [{ "symbol": "ETH", "price": "1800.5", ... }] }`. Any extra
//! entries (such as the LP token's own published price) are kept in the map
//! but never consulted by the valuation.

use async_trait::async_trait;
use lp_aum_types::{
	AdapterError, AdapterResult, BigDecimal, PriceMap, PriceSource, SecretString,
};
use reqwest::Client;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::http_client::{build_client, map_send_error, read_json};

#[derive(Debug, Deserialize)]
struct LiquidityAssetsResponse {
	assets: Vec<LiquidityAssetPrice>,
}

#[derive(Debug, Deserialize)]
struct LiquidityAssetPrice {
	symbol: String,
	#[serde(deserialize_with = "price_from_json")]
	price: BigDecimal,
}

/// Parse a price given as a JSON string or number
///
/// Numbers are parsed from their JSON text rather than through `f64`, so
/// `1812.34` stays exactly `1812.34`.
fn price_from_json<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
	D: Deserializer<'de>,
{
	let text = match Value::deserialize(deserializer)? {
		Value::String(text) => text,
		Value::Number(number) => number.to_string(),
		other => {
			return Err(de::Error::custom(format!(
				"expected a decimal price, got {}",
				other
			)))
		},
	};
	text.trim().parse().map_err(de::Error::custom)
}

/// Price source backed by an HTTP liquidity-asset endpoint
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
	endpoint: Url,
	timeout_ms: u64,
	client: Client,
}

impl HttpPriceSource {
	pub fn new(endpoint: &str, timeout_ms: u64) -> AdapterResult<Self> {
		Self::with_api_key(endpoint, timeout_ms, None)
	}

	/// Price source sending `api_key` in `header` on every request
	pub fn with_api_key(
		endpoint: &str,
		timeout_ms: u64,
		api_key: Option<(&str, &SecretString)>,
	) -> AdapterResult<Self> {
		let endpoint = Url::parse(endpoint).map_err(|e| AdapterError::ConfigError {
			reason: format!("Invalid price feed URL '{}': {}", endpoint, e),
		})?;

		let headers: Vec<(String, String)> = api_key
			.map(|(header, key)| vec![(header.to_string(), key.expose_secret().to_string())])
			.unwrap_or_default();

		Ok(Self {
			endpoint,
			timeout_ms,
			client: build_client(timeout_ms, &headers)?,
		})
	}

	pub fn endpoint(&self) -> &str {
		self.endpoint.as_str()
	}
}

#[async_trait]
impl PriceSource for HttpPriceSource {
	fn name(&self) -> &str {
		"http"
	}

	async fn fetch_prices(&self) -> AdapterResult<PriceMap> {
		debug!("Fetching asset prices from {}", self.endpoint);

		let response = self
			.client
			.get(self.endpoint.clone())
			.send()
			.await
			.map_err(|e| map_send_error(e, self.timeout_ms))?;
		let body: LiquidityAssetsResponse = read_json(response, "price feed").await?;

		let prices: PriceMap = body
			.assets
			.into_iter()
			.map(|asset| (asset.symbol, asset.price))
			.collect();
		info!("Fetched {} asset prices", prices.len());
		Ok(prices)
	}
}

/// Price source returning a fixed table
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
	prices: PriceMap,
}

impl StaticPriceSource {
	pub fn new(prices: PriceMap) -> Self {
		Self { prices }
	}
}

#[async_trait]
impl PriceSource for StaticPriceSource {
	fn name(&self) -> &str {
		"static"
	}

	async fn fetch_prices(&self) -> AdapterResult<PriceMap> {
		Ok(self.prices.clone())
	}
}
