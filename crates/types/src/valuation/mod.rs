//! Valuation inputs and outputs

pub mod errors;

pub use errors::ValuationError;

use chrono::{DateTime, Utc};
use bigdecimal::{BigDecimal, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result type for the aggregation/valuation core
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Current asset prices keyed by symbol
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PriceMap {
	prices: HashMap<String, BigDecimal>,
}

impl PriceMap {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&mut self, symbol: impl Into<String>, price: BigDecimal) -> Option<BigDecimal> {
		self.prices.insert(symbol.into(), price)
	}

	pub fn get(&self, symbol: &str) -> Option<&BigDecimal> {
		self.prices.get(symbol)
	}

	/// Price for `symbol`, or `MissingPrice` when the feed has none
	pub fn require(&self, symbol: &str) -> ValuationResult<&BigDecimal> {
		self.get(symbol).ok_or_else(|| ValuationError::MissingPrice {
			symbol: symbol.to_string(),
		})
	}

	pub fn len(&self) -> usize {
		self.prices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.prices.is_empty()
	}
}

impl<S: Into<String>> FromIterator<(S, BigDecimal)> for PriceMap {
	fn from_iter<I: IntoIterator<Item = (S, BigDecimal)>>(iter: I) -> Self {
		Self {
			prices: iter.into_iter().map(|(s, p)| (s.into(), p)).collect(),
		}
	}
}

/// How a single symbol contributed to the AUM
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssetValuation {
	pub symbol: String,
	pub is_stable: bool,
	/// Balance after the pre-minted supply offset
	pub lp_balance: BigDecimal,
	pub price: BigDecimal,
	/// Unrealized profit owed to long traders
	pub long_upnl: BigDecimal,
	/// Unrealized profit owed to short traders
	pub short_upnl: BigDecimal,
	pub contribution: BigDecimal,
}

/// AUM of a ledger together with its per-symbol breakdown
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Valuation {
	pub aum: BigDecimal,
	pub assets: Vec<AssetValuation>,
}

/// Final output of one aggregation run
#[derive(Debug, Clone, Serialize)]
pub struct ValuationReport {
	pub aum: BigDecimal,
	pub circulating_supply: BigDecimal,
	pub price_per_share: BigDecimal,
	pub assets: Vec<AssetValuation>,
	/// Chain IDs folded into the ledger, in fold order
	pub chains: Vec<u64>,
	pub computed_at: DateTime<Utc>,
}

impl ValuationReport {
	/// Negative AUM means trader liabilities exceed backing
	pub fn is_insolvent(&self) -> bool {
		self.aum < BigDecimal::zero()
	}
}
