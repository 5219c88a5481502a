//! Per-chain vault state as handed over by a chain snapshot reader
//!
//! All monetary fields are already converted from on-chain fixed point into
//! decimal units. Field names follow the camelCase shape produced by the
//! on-chain reader contract so snapshots can be deserialized as-is.

use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A chain taking part in the cross-chain liquidity pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chain {
	/// EVM chain ID (e.g., 42161 for Arbitrum One)
	pub chain_id: u64,
	/// Human-readable name
	pub name: String,
	/// Reader kind used to obtain the snapshot (e.g., "http-json", "file")
	pub reader: String,
	/// Reader endpoint: URL for HTTP readers, path for file readers
	pub endpoint: String,
	pub timeout_ms: u64,
	pub max_retries: u32,
	pub headers: Option<HashMap<String, String>>,
}

impl Chain {
	pub fn new(
		chain_id: u64,
		name: impl Into<String>,
		reader: impl Into<String>,
		endpoint: impl Into<String>,
	) -> Self {
		Self {
			chain_id,
			name: name.into(),
			reader: reader.into(),
			endpoint: endpoint.into(),
			timeout_ms: 10_000,
			max_retries: 0,
			headers: None,
		}
	}

	pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
		self.timeout_ms = timeout_ms;
		self
	}

	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;
		self
	}
}

impl fmt::Display for Chain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.name, self.chain_id)
	}
}

/// One asset of one chain's liquidity pool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
	/// Shared across chains for the same underlying asset
	pub symbol: String,
	pub is_enabled: bool,
	pub is_stable: bool,
	pub spot_liquidity: BigDecimal,
	pub collected_fee: BigDecimal,
	pub deduct: BigDecimal,
	pub credit: BigDecimal,
	pub total_long_position: BigDecimal,
	pub total_short_position: BigDecimal,
	pub average_long_price: BigDecimal,
	pub average_short_price: BigDecimal,
}

impl AssetRecord {
	/// Enabled asset with every balance at zero
	pub fn new(symbol: impl Into<String>, is_stable: bool) -> Self {
		Self {
			symbol: symbol.into(),
			is_enabled: true,
			is_stable,
			spot_liquidity: BigDecimal::zero(),
			collected_fee: BigDecimal::zero(),
			deduct: BigDecimal::zero(),
			credit: BigDecimal::zero(),
			total_long_position: BigDecimal::zero(),
			total_short_position: BigDecimal::zero(),
			average_long_price: BigDecimal::zero(),
			average_short_price: BigDecimal::zero(),
		}
	}
}

/// Liquidity parked in an integrated external DEX
///
/// `asset_ids` index into the owning snapshot's `assets`; `liquidity_balance`
/// is parallel to it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DexRecord {
	pub asset_ids: Vec<usize>,
	pub liquidity_balance: Vec<BigDecimal>,
}

impl DexRecord {
	pub fn new(asset_ids: Vec<usize>, liquidity_balance: Vec<BigDecimal>) -> Self {
		Self {
			asset_ids,
			liquidity_balance,
		}
	}
}

/// Point-in-time state of one chain's liquidity pool
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
	pub assets: Vec<AssetRecord>,
	#[serde(default)]
	pub dexes: Vec<DexRecord>,
	/// Share of the pre-minted LP supply this chain keeps out of circulation
	pub lp_deduct: BigDecimal,
}

impl ChainSnapshot {
	pub fn new(assets: Vec<AssetRecord>, dexes: Vec<DexRecord>, lp_deduct: BigDecimal) -> Self {
		Self {
			assets,
			dexes,
			lp_deduct,
		}
	}

	/// Number of assets that will take part in aggregation
	pub fn enabled_asset_count(&self) -> usize {
		self.assets.iter().filter(|a| a.is_enabled).count()
	}
}
