//! Folds one chain's asset record into the cross-chain ledger

use lp_aum_types::{AssetRecord, Ledger};

/// Merge `asset` into the ledger entry for its symbol
///
/// Disabled assets are skipped entirely. `deduct` only counts towards the
/// balance of non-stable assets. Entry values are cost bases accumulated per
/// chain, never recomputed from the running position totals.
///
/// Inputs are taken as-is and every sum and product is exact.
pub fn merge(ledger: &mut Ledger, asset: &AssetRecord) {
	if !asset.is_enabled {
		return;
	}

	let entry = ledger.entry(&asset.symbol);
	entry.is_stable = asset.is_stable;

	entry.lp_balance += &asset.spot_liquidity - &asset.collected_fee;
	if !asset.is_stable {
		entry.lp_balance += &asset.deduct;
	}

	entry.credit += &asset.credit;
	entry.total_long_position += &asset.total_long_position;
	entry.total_short_position += &asset.total_short_position;
	entry.long_entry_value += &asset.total_long_position * &asset.average_long_price;
	entry.short_entry_value += &asset.total_short_position * &asset.average_short_price;
}
