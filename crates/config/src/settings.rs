//! Configuration settings structures

use crate::configurable_value::{ConfigurableValue, ConfigurableValueError};
use lp_aum_types::bigdecimal::Zero;
use lp_aum_types::{BigDecimal, Chain, PriceMap, SecretString};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Settings {
	/// Chains folded into the ledger, in this order
	pub chains: Vec<ChainConfig>,
	pub price_feed: PriceFeedSettings,
	pub supply: SupplySettings,
	pub timeouts: TimeoutSettings,
	pub logging: LoggingSettings,
	pub report: ReportSettings,
}

/// Individual chain configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainConfig {
	pub chain_id: u64,
	pub name: String,
	/// Snapshot reader kind ("http-json" or "file")
	pub reader: String,
	pub endpoint: String,
	#[serde(default = "default_chain_timeout_ms")]
	pub timeout_ms: u64,
	#[serde(default = "default_true")]
	pub enabled: bool,
	#[serde(default)]
	pub max_retries: u32,
	pub headers: Option<HashMap<String, String>>,
}

fn default_chain_timeout_ms() -> u64 {
	10_000
}

fn default_true() -> bool {
	true
}

/// Convert from settings ChainConfig to domain Chain
impl From<ChainConfig> for Chain {
	fn from(config: ChainConfig) -> Self {
		Self {
			chain_id: config.chain_id,
			name: config.name,
			reader: config.reader,
			endpoint: config.endpoint,
			timeout_ms: config.timeout_ms,
			max_retries: config.max_retries,
			headers: config.headers,
		}
	}
}

/// Where asset prices come from
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PriceFeedKind {
	/// HTTP liquidity-asset endpoint
	Http,
	/// Fixed prices from the `prices` table
	Static,
}

/// Price feed configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct PriceFeedSettings {
	pub kind: PriceFeedKind,
	pub endpoint: String,
	pub timeout_ms: u64,
	/// Optional API key, e.g. `{"type": "env", "value": "PRICE_FEED_API_KEY"}`
	pub api_key: Option<ConfigurableValue>,
	pub api_key_header: String,
	/// Prices used when `kind` is `static`
	pub prices: Vec<StaticPrice>,
}

/// One entry of the static price table
///
/// A list rather than a map so symbols keep their case through config sources.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StaticPrice {
	pub symbol: String,
	#[serde(deserialize_with = "decimal_from_config")]
	pub price: BigDecimal,
}

/// Read a decimal given as a string or as a config number
///
/// Floats are re-parsed from their shortest text form, so `0.98` stays `0.98`.
fn decimal_from_config<'de, D>(deserializer: D) -> Result<BigDecimal, D::Error>
where
	D: Deserializer<'de>,
{
	struct DecimalVisitor;

	impl<'de> Visitor<'de> for DecimalVisitor {
		type Value = BigDecimal;

		fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
			formatter.write_str("a decimal number or string")
		}

		fn visit_str<E: de::Error>(self, value: &str) -> Result<BigDecimal, E> {
			value.trim().parse().map_err(E::custom)
		}

		fn visit_i64<E: de::Error>(self, value: i64) -> Result<BigDecimal, E> {
			Ok(BigDecimal::from(value))
		}

		fn visit_u64<E: de::Error>(self, value: u64) -> Result<BigDecimal, E> {
			Ok(BigDecimal::from(value))
		}

		fn visit_f64<E: de::Error>(self, value: f64) -> Result<BigDecimal, E> {
			value.to_string().parse().map_err(E::custom)
		}
	}

	deserializer.deserialize_any(DecimalVisitor)
}

/// LP supply configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SupplySettings {
	/// LP tokens pre-minted on every chain deployment at genesis
	#[serde(deserialize_with = "decimal_from_config")]
	pub pre_mined_token_total_supply: BigDecimal,
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Bound on fetching every chain snapshot (all chains concurrently)
	pub global_ms: u64,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Output of the final report
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ReportSettings {
	pub format: ReportFormat,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
	Text,
	Json,
}

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
	#[error("No enabled chains configured")]
	NoEnabledChains,

	#[error("Duplicate chain ID: {chain_id}")]
	DuplicateChain { chain_id: u64 },

	#[error("Chain {chain_id} has an empty {field}")]
	EmptyChainField { chain_id: u64, field: &'static str },

	#[error("Invalid timeout for {scope}: must be greater than zero")]
	ZeroTimeout { scope: String },

	#[error("Pre-mined token total supply must not be negative, got {value}")]
	NegativePreMinedSupply { value: BigDecimal },

	#[error("Price feed endpoint is required for the http price feed")]
	MissingPriceFeedEndpoint,
}

/// The five production deployments, each read from a local snapshot file
fn default_chains() -> Vec<ChainConfig> {
	[
		(42161, "Arbitrum"),
		(43114, "Avalanche"),
		(56, "BNB Chain"),
		(250, "Fantom"),
		(10, "Optimism"),
	]
	.into_iter()
	.map(|(chain_id, name)| ChainConfig {
		chain_id,
		name: name.to_string(),
		reader: "file".to_string(),
		endpoint: format!("snapshots/{}.json", chain_id),
		timeout_ms: default_chain_timeout_ms(),
		enabled: true,
		max_retries: 2,
		headers: None,
	})
	.collect()
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			chains: default_chains(),
			price_feed: PriceFeedSettings::default(),
			supply: SupplySettings::default(),
			timeouts: TimeoutSettings::default(),
			logging: LoggingSettings::default(),
			report: ReportSettings::default(),
		}
	}
}

impl Default for PriceFeedSettings {
	fn default() -> Self {
		Self {
			kind: PriceFeedKind::Http,
			endpoint: "https://app.mux.network/api/liquidityAsset".to_string(),
			timeout_ms: 10_000,
			api_key: None,
			api_key_header: "X-API-Key".to_string(),
			prices: Vec::new(),
		}
	}
}

impl Default for SupplySettings {
	fn default() -> Self {
		Self {
			pre_mined_token_total_supply: BigDecimal::from(1_000_000_000_000_000_000u64),
		}
	}
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self { global_ms: 30_000 }
	}
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

impl Default for ReportSettings {
	fn default() -> Self {
		Self {
			format: ReportFormat::Text,
		}
	}
}

impl Settings {
	/// Enabled chains as domain values, in configured order
	pub fn enabled_chains(&self) -> Vec<Chain> {
		self.chains
			.iter()
			.filter(|config| config.enabled)
			.cloned()
			.map(Chain::from)
			.collect()
	}

	pub fn pre_mined_supply(&self) -> &BigDecimal {
		&self.supply.pre_mined_token_total_supply
	}

	/// Prices configured for the static feed
	pub fn static_prices(&self) -> PriceMap {
		self.price_feed
			.prices
			.iter()
			.map(|entry| (entry.symbol.clone(), entry.price.clone()))
			.collect()
	}

	/// Resolve the price feed API key, if one is configured
	pub fn price_feed_api_key(&self) -> Result<Option<SecretString>, ConfigurableValueError> {
		self.price_feed
			.api_key
			.as_ref()
			.map(|value| value.resolve_for_secret())
			.transpose()
	}

	/// Check the settings for values the aggregator cannot run with
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		let mut seen = HashSet::new();
		for chain in self.chains.iter().filter(|c| c.enabled) {
			if !seen.insert(chain.chain_id) {
				return Err(ConfigValidationError::DuplicateChain {
					chain_id: chain.chain_id,
				});
			}
			if chain.reader.trim().is_empty() {
				return Err(ConfigValidationError::EmptyChainField {
					chain_id: chain.chain_id,
					field: "reader",
				});
			}
			if chain.endpoint.trim().is_empty() {
				return Err(ConfigValidationError::EmptyChainField {
					chain_id: chain.chain_id,
					field: "endpoint",
				});
			}
			if chain.timeout_ms == 0 {
				return Err(ConfigValidationError::ZeroTimeout {
					scope: format!("chain {}", chain.chain_id),
				});
			}
		}
		if seen.is_empty() {
			return Err(ConfigValidationError::NoEnabledChains);
		}

		if self.timeouts.global_ms == 0 {
			return Err(ConfigValidationError::ZeroTimeout {
				scope: "global".to_string(),
			});
		}

		if self.price_feed.kind == PriceFeedKind::Http {
			if self.price_feed.endpoint.trim().is_empty() {
				return Err(ConfigValidationError::MissingPriceFeedEndpoint);
			}
			if self.price_feed.timeout_ms == 0 {
				return Err(ConfigValidationError::ZeroTimeout {
					scope: "price feed".to_string(),
				});
			}
		}

		let pre_mined = self.pre_mined_supply();
		if *pre_mined < BigDecimal::zero() {
			return Err(ConfigValidationError::NegativePreMinedSupply {
				value: pre_mined.clone(),
			});
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use lp_aum_types::dec;

	#[test]
	fn test_default_settings_are_valid() {
		let settings = Settings::default();
		assert!(settings.validate().is_ok());

		let chain_ids: Vec<u64> = settings.enabled_chains().iter().map(|c| c.chain_id).collect();
		assert_eq!(chain_ids, vec![42161, 43114, 56, 250, 10]);
		assert_eq!(settings.pre_mined_supply(), &dec!(1000000000000000000));
	}

	#[test]
	fn test_disabled_chains_are_skipped() {
		let mut settings = Settings::default();
		settings.chains[1].enabled = false;

		let chains = settings.enabled_chains();
		assert_eq!(chains.len(), 4);
		assert!(chains.iter().all(|c| c.chain_id != 43114));
	}

	#[test]
	fn test_validation_rejects_bad_settings() {
		let mut settings = Settings::default();
		settings.chains.iter_mut().for_each(|c| c.enabled = false);
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::NoEnabledChains)
		);

		let mut settings = Settings::default();
		settings.chains[2].chain_id = 42161;
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::DuplicateChain { chain_id: 42161 })
		);

		let mut settings = Settings::default();
		settings.supply.pre_mined_token_total_supply = dec!(-1);
		assert_eq!(
			settings.validate(),
			Err(ConfigValidationError::NegativePreMinedSupply { value: dec!(-1) })
		);

		let mut settings = Settings::default();
		settings.timeouts.global_ms = 0;
		assert!(matches!(
			settings.validate(),
			Err(ConfigValidationError::ZeroTimeout { .. })
		));
	}

	#[test]
	fn test_static_prices_and_api_key() {
		let mut settings = Settings::default();
		settings.price_feed.kind = PriceFeedKind::Static;
		settings.price_feed.endpoint = String::new();
		settings.price_feed.prices.push(StaticPrice {
			symbol: "ETH".to_string(),
			price: dec!(2000),
		});
		assert!(settings.validate().is_ok());
		assert_eq!(settings.static_prices().get("ETH"), Some(&dec!(2000)));

		assert!(settings.price_feed_api_key().unwrap().is_none());
		settings.price_feed.api_key = Some(ConfigurableValue::from_plain("k-123"));
		let key = settings.price_feed_api_key().unwrap().unwrap();
		assert_eq!(key.expose_secret(), "k-123");
	}

	#[test]
	fn test_partial_settings_deserialize_with_defaults() {
		let json = r#"{
			"chains": [
				{ "chain_id": 10, "name": "Optimism", "reader": "http-json", "endpoint": "http://localhost:9000/10" }
			],
			"supply": { "pre_mined_token_total_supply": "5000" },
			"report": { "format": "json" }
		}"#;
		let settings: Settings = serde_json::from_str(json).unwrap();

		assert_eq!(settings.chains.len(), 1);
		assert!(settings.chains[0].enabled);
		assert_eq!(settings.chains[0].timeout_ms, 10_000);
		assert_eq!(settings.pre_mined_supply(), &dec!(5000));
		assert_eq!(settings.report.format, ReportFormat::Json);
		assert_eq!(settings.logging.format, LogFormat::Pretty);
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_decimals_from_numbers_and_strings() {
		let price: StaticPrice =
			serde_json::from_str(r#"{ "symbol": "MUXLP", "price": 0.98 }"#).unwrap();
		assert_eq!(price.price, dec!(0.98));

		let price: StaticPrice = serde_json::from_str(
			r#"{ "symbol": "ETH", "price": "1812.123456789012345678" }"#,
		)
		.unwrap();
		assert_eq!(price.price, dec!(1812.123456789012345678));

		let supply: SupplySettings = serde_json::from_str(
			r#"{ "pre_mined_token_total_supply": 1000000000000000000 }"#,
		)
		.unwrap();
		assert_eq!(supply.pre_mined_token_total_supply, dec!(1000000000000000000));

		assert!(serde_json::from_str::<StaticPrice>(r#"{ "symbol": "ETH", "price": true }"#).is_err());
	}
}
