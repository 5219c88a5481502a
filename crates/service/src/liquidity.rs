//! Single aggregation pass over many chains
//!
//! `MultiChainLiquidity` owns the ledger while chains are folded in one at a
//! time, then hands it to the valuator by value.

use chrono::Utc;
use lp_aum_types::bigdecimal::Zero;
use lp_aum_types::{
	BigDecimal, ChainSnapshot, Ledger, PriceMap, ValuationReport, ValuationResult,
};
use tracing::{debug, warn};

use crate::{chain, supply, valuation};

/// Cross-chain ledger plus the supply deductions collected so far
#[derive(Debug, Clone)]
pub struct MultiChainLiquidity {
	ledger: Ledger,
	pre_mined_supply: BigDecimal,
	deductions: Vec<BigDecimal>,
	chains: Vec<u64>,
}

impl MultiChainLiquidity {
	pub fn new(pre_mined_supply: BigDecimal) -> Self {
		Self {
			ledger: Ledger::new(),
			pre_mined_supply,
			deductions: Vec::new(),
			chains: Vec::new(),
		}
	}

	/// Fold every `(chain_id, snapshot)` in order
	pub fn from_snapshots<'a, I>(
		pre_mined_supply: BigDecimal,
		snapshots: I,
	) -> ValuationResult<Self>
	where
		I: IntoIterator<Item = (u64, &'a ChainSnapshot)>,
	{
		let mut liquidity = Self::new(pre_mined_supply);
		for (chain_id, snapshot) in snapshots {
			liquidity.absorb(chain_id, snapshot)?;
		}
		Ok(liquidity)
	}

	/// Fold one chain's snapshot into the ledger
	///
	/// A rejected snapshot leaves the ledger, supply and chain list untouched.
	pub fn absorb(&mut self, chain_id: u64, snapshot: &ChainSnapshot) -> ValuationResult<()> {
		let deduct = chain::apply(&mut self.ledger, snapshot)?;
		debug!(
			"Chain {} contributed {} assets, lp deduct {}",
			chain_id,
			snapshot.enabled_asset_count(),
			deduct
		);
		self.deductions.push(deduct);
		self.chains.push(chain_id);
		Ok(())
	}

	pub fn ledger(&self) -> &Ledger {
		&self.ledger
	}

	pub fn chains(&self) -> &[u64] {
		&self.chains
	}

	/// Pre-minted supply net of every absorbed chain's deduction
	pub fn circulating_supply(&self) -> BigDecimal {
		supply::net_supply(self.pre_mined_supply.clone(), self.deductions.iter().cloned())
	}

	/// Value the ledger and derive the LP share price, consuming the pass
	pub fn valuate(self, prices: &PriceMap) -> ValuationResult<ValuationReport> {
		let circulating_supply = self.circulating_supply();
		if circulating_supply < BigDecimal::zero() {
			warn!(
				"Circulating LP supply is negative ({}), deductions exceed the pre-mined supply",
				circulating_supply
			);
		}

		let valuation = valuation::valuate(self.ledger, prices, &self.pre_mined_supply)?;
		if valuation.aum < BigDecimal::zero() {
			warn!(
				"AUM is negative ({}), trader liabilities exceed pool backing",
				valuation.aum
			);
		}

		let price_per_share = valuation::price_per_share(&valuation.aum, &circulating_supply)?;

		Ok(ValuationReport {
			aum: valuation.aum,
			circulating_supply,
			price_per_share,
			assets: valuation.assets,
			chains: self.chains,
			computed_at: Utc::now(),
		})
	}
}
