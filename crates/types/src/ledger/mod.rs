//! Cross-chain liquidity ledger
//!
//! The ledger maps an asset symbol to the running total of that asset's
//! accounting across every chain folded so far. It only ever holds enabled
//! assets and is owned by exactly one aggregation pass.

use bigdecimal::BigDecimal;
use serde::Serialize;
use std::collections::btree_map::{self, BTreeMap};

/// Running cross-chain totals for one asset symbol
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AggregatedAsset {
	/// Copied from the last contributing chain
	pub is_stable: bool,
	pub lp_balance: BigDecimal,
	pub credit: BigDecimal,
	pub total_long_position: BigDecimal,
	pub total_short_position: BigDecimal,
	/// Sum of per-chain long cost bases (position x average entry price)
	pub long_entry_value: BigDecimal,
	/// Sum of per-chain short cost bases
	pub short_entry_value: BigDecimal,
}

/// Symbol-keyed ledger of aggregated assets
///
/// Backed by a `BTreeMap` so iteration (and therefore any per-symbol report)
/// is deterministic.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Ledger {
	assets: BTreeMap<String, AggregatedAsset>,
}

impl Ledger {
	pub fn new() -> Self {
		Self::default()
	}

	/// Entry for `symbol`, zero-initialized on first encounter
	pub fn entry(&mut self, symbol: &str) -> &mut AggregatedAsset {
		self.assets.entry(symbol.to_string()).or_default()
	}

	pub fn get(&self, symbol: &str) -> Option<&AggregatedAsset> {
		self.assets.get(symbol)
	}

	pub fn get_mut(&mut self, symbol: &str) -> Option<&mut AggregatedAsset> {
		self.assets.get_mut(symbol)
	}

	pub fn contains(&self, symbol: &str) -> bool {
		self.assets.contains_key(symbol)
	}

	pub fn len(&self) -> usize {
		self.assets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.assets.is_empty()
	}

	pub fn symbols(&self) -> impl Iterator<Item = &str> {
		self.assets.keys().map(String::as_str)
	}

	pub fn iter(&self) -> btree_map::Iter<'_, String, AggregatedAsset> {
		self.assets.iter()
	}
}

impl IntoIterator for Ledger {
	type Item = (String, AggregatedAsset);
	type IntoIter = btree_map::IntoIter<String, AggregatedAsset>;

	fn into_iter(self) -> Self::IntoIter {
		self.assets.into_iter()
	}
}

impl<'a> IntoIterator for &'a Ledger {
	type Item = (&'a String, &'a AggregatedAsset);
	type IntoIter = btree_map::Iter<'a, String, AggregatedAsset>;

	fn into_iter(self) -> Self::IntoIter {
		self.assets.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::dec;
	use bigdecimal::Zero;

	#[test]
	fn test_entry_is_zero_initialized_once() {
		let mut ledger = Ledger::new();
		assert!(ledger.is_empty());

		ledger.entry("ETH").lp_balance += dec!(5);
		ledger.entry("ETH").lp_balance += dec!(2);

		assert_eq!(ledger.len(), 1);
		let eth = ledger.get("ETH").unwrap();
		assert_eq!(eth.lp_balance, dec!(7));
		assert!(eth.credit.is_zero());
		assert!(!eth.is_stable);
	}

	#[test]
	fn test_symbols_are_sorted() {
		let mut ledger = Ledger::new();
		ledger.entry("USDC");
		ledger.entry("BTC");
		ledger.entry("ETH");

		let symbols: Vec<&str> = ledger.symbols().collect();
		assert_eq!(symbols, vec!["BTC", "ETH", "USDC"]);
	}
}
