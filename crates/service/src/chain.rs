//! Folds a whole chain snapshot into the cross-chain ledger

use lp_aum_types::{BigDecimal, ChainSnapshot, Ledger, ValuationError, ValuationResult};
use tracing::trace;

use crate::accumulator;

/// Merge every asset of `snapshot`, then its external DEX liquidity
///
/// DEX entries resolve `asset_ids` against `snapshot.assets` and must hit a
/// symbol that is in the ledger once the snapshot's assets are merged. All
/// entries are checked before the ledger is touched, so a rejected snapshot
/// leaves it unchanged. Returns the chain's LP supply deduction.
pub fn apply(ledger: &mut Ledger, snapshot: &ChainSnapshot) -> ValuationResult<BigDecimal> {
	let dex_liquidity = resolve_dex_liquidity(ledger, snapshot)?;

	for asset in &snapshot.assets {
		accumulator::merge(ledger, asset);
	}

	for (symbol, balance) in dex_liquidity {
		trace!("Adding {} dex liquidity to {}", balance, symbol);
		ledger.entry(symbol).lp_balance += balance;
	}

	Ok(snapshot.lp_deduct.clone())
}

/// Pair every DEX balance with the symbol it is credited to
fn resolve_dex_liquidity<'a>(
	ledger: &Ledger,
	snapshot: &'a ChainSnapshot,
) -> ValuationResult<Vec<(&'a str, &'a BigDecimal)>> {
	let mut resolved = Vec::new();

	for dex in &snapshot.dexes {
		if dex.asset_ids.len() != dex.liquidity_balance.len() {
			return Err(ValuationError::DexLengthMismatch {
				asset_ids: dex.asset_ids.len(),
				balances: dex.liquidity_balance.len(),
			});
		}

		for (&asset_id, balance) in dex.asset_ids.iter().zip(&dex.liquidity_balance) {
			let symbol = snapshot
				.assets
				.get(asset_id)
				.map(|asset| asset.symbol.as_str())
				.ok_or(ValuationError::DanglingDexReference {
					asset_id,
					symbol: None,
				})?;

			// Present after the merge: already in the ledger or enabled on this chain
			let merged = ledger.contains(symbol)
				|| snapshot
					.assets
					.iter()
					.any(|asset| asset.is_enabled && asset.symbol == symbol);
			if !merged {
				return Err(ValuationError::DanglingDexReference {
					asset_id,
					symbol: Some(symbol.to_string()),
				});
			}

			resolved.push((symbol, balance));
		}
	}

	Ok(resolved)
}
