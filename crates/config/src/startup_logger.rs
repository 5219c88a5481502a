//! Startup and completion logging for the aggregator
//!
//! Emits the service banner, the effective configuration and the run summary.

use crate::Settings;
use std::env;
use tracing::info;

/// Logs service information at startup
pub fn log_service_info() {
	let service_name = "lp-aum";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== LP AUM Aggregator Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {} / {}", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the chains, price feed and supply constant a run will use
pub fn log_configuration(settings: &Settings) {
	let chains = settings.enabled_chains();
	info!("⛓️ Enabled chains: {}", chains.len());
	for chain in &chains {
		info!(
			"  - {}: {} via {} ({}ms timeout, {} retries)",
			chain, chain.endpoint, chain.reader, chain.timeout_ms, chain.max_retries
		);
	}

	match settings.price_feed.kind {
		crate::settings::PriceFeedKind::Http => info!(
			"💱 Price feed: {} ({}ms timeout)",
			settings.price_feed.endpoint, settings.price_feed.timeout_ms
		),
		crate::settings::PriceFeedKind::Static => info!(
			"💱 Price feed: static table with {} prices",
			settings.price_feed.prices.len()
		),
	}
	if let Some(api_key) = &settings.price_feed.api_key {
		info!("🔑 Price feed API key from {}", api_key.description());
	}

	info!(
		"🪙 Pre-mined token total supply: {}",
		settings.pre_mined_supply()
	);
}

/// Logs the end of a successful run
pub fn log_run_complete(chain_count: usize, elapsed_ms: u128) {
	info!(
		"✅ Valuation completed across {} chain(s) in {}ms",
		chain_count, elapsed_ms
	);
}
