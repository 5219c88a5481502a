//! LP AUM Aggregator Library
//!
//! Computes the assets under management, circulating supply and share price
//! of a liquidity pool token deployed across many chains.

use lp_aum_adapters::{HttpPriceSource, ReaderRegistry, StaticPriceSource};
use lp_aum_config::{
	load_config, log_configuration, log_run_complete, log_service_info, LogFormat,
	PriceFeedKind, ReportFormat,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

// Core domain types
pub use lp_aum_types::{
	bigdecimal, dec, AdapterError, AdapterResult, AggregatedAsset, AssetRecord, AssetValuation,
	BigDecimal, Chain, ChainSnapshot, ChainStateReader, DexRecord, Ledger, PriceMap, PriceSource,
	ValuationError, ValuationReport,
};

// Service layer
pub use lp_aum_service::{
	net_supply, price_per_share, valuate, AggregatorError, LiquidityAggregator,
	MultiChainLiquidity,
};

// Adapters
pub use lp_aum_adapters::{FileSnapshotReader, HttpSnapshotReader};

// Config
pub use lp_aum_config::Settings;

pub mod models {
	pub use lp_aum_types::*;
}

pub mod config {
	pub use lp_aum_config::*;
}

pub mod adapters {
	pub use lp_aum_adapters::*;
}

pub mod service {
	pub use lp_aum_service::*;
}

pub mod mocks;

/// Builder wiring settings, snapshot readers and the price source together
#[derive(Default)]
pub struct ValuationBuilder {
	settings: Option<Settings>,
	readers: Vec<Box<dyn ChainStateReader>>,
	price_source: Option<Arc<dyn PriceSource>>,
}

impl ValuationBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Register a custom snapshot reader, replacing a built-in one with the same ID
	pub fn with_reader(mut self, reader: Box<dyn ChainStateReader>) -> Self {
		self.readers.push(reader);
		self
	}

	/// Use this price source instead of the one described by the settings
	pub fn with_price_source(mut self, price_source: Arc<dyn PriceSource>) -> Self {
		self.price_source = Some(price_source);
		self
	}

	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	fn price_source_from_settings(
		settings: &Settings,
	) -> Result<Arc<dyn PriceSource>, Box<dyn std::error::Error>> {
		let feed = &settings.price_feed;
		match feed.kind {
			PriceFeedKind::Static => Ok(Arc::new(StaticPriceSource::new(settings.static_prices()))),
			PriceFeedKind::Http => {
				let api_key = settings
					.price_feed_api_key()
					.map_err(|e| format!("Failed to resolve price feed API key: {}", e))?;
				let source = HttpPriceSource::with_api_key(
					&feed.endpoint,
					feed.timeout_ms,
					api_key.as_ref().map(|key| (feed.api_key_header.as_str(), key)),
				)?;
				Ok(Arc::new(source))
			},
		}
	}

	/// Validate the settings and assemble the aggregator
	pub fn build(self) -> Result<LiquidityAggregator, Box<dyn std::error::Error>> {
		let settings = self.settings.unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		let mut readers = ReaderRegistry::with_defaults()?;
		for reader in self.readers {
			readers.replace(reader);
		}

		let price_source = match self.price_source {
			Some(source) => source,
			None => Self::price_source_from_settings(&settings)?,
		};

		let aggregator = LiquidityAggregator::new(
			settings.enabled_chains(),
			Arc::new(readers),
			price_source,
			settings.pre_mined_supply().clone(),
			settings.timeouts.global_ms,
		);
		aggregator
			.validate_chains()
			.map_err(|e| format!("Chain validation failed: {}", e))?;

		Ok(aggregator)
	}

	/// Build the aggregator and perform one valuation
	pub async fn run(self) -> Result<ValuationReport, Box<dyn std::error::Error>> {
		let aggregator = self.build()?;
		Ok(aggregator.run().await?)
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(settings: &Settings) {
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		// Logs go to stderr so stdout only carries the report
		let result = match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt()
					.json()
					.with_env_filter(env_filter)
					.with_writer(std::io::stderr);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter)
					.with_writer(std::io::stderr);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter)
					.with_writer(std::io::stderr);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()
				} else {
					subscriber.try_init()
				}
			},
		};

		if result.is_ok() {
			info!(
				"Logging configuration applied: level={}, format={:?}, structured={}",
				settings.logging.level, settings.logging.format, settings.logging.structured
			);
		}
	}

	/// Run the complete CLI flow
	///
	/// Loads `.env` and the configuration, initializes tracing, performs one
	/// valuation and prints the report to stdout.
	pub async fn start(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let using_provided_settings = self.settings.is_some();
		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		Self::init_tracing_from_settings(&settings);
		log_service_info();
		info!(
			"Using configuration: loaded from {}",
			if using_provided_settings {
				"provided settings"
			} else {
				"config file or defaults"
			}
		);
		log_configuration(&settings);

		let started = Instant::now();
		let report_format = settings.report.format.clone();
		let report = self.with_settings(settings).run().await?;

		println!("{}", render_report(&report, &report_format)?);
		log_run_complete(report.chains.len(), started.elapsed().as_millis());

		Ok(())
	}
}

/// Render the report for stdout
pub fn render_report(
	report: &ValuationReport,
	format: &ReportFormat,
) -> Result<String, serde_json::Error> {
	match format {
		ReportFormat::Json => serde_json::to_string_pretty(report),
		ReportFormat::Text => Ok(format!(
			"AUM: {}\nLP total supply: {}\nLP price: {}",
			report.aum.to_plain_string(),
			report.circulating_supply.to_plain_string(),
			report.price_per_share.to_plain_string()
		)),
	}
}
