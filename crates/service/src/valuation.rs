//! Converts the finished ledger into AUM and the LP share price

use lp_aum_types::bigdecimal::Zero;
use lp_aum_types::{
	AssetValuation, BigDecimal, Ledger, PriceMap, Valuation, ValuationError, ValuationResult,
};
use tracing::debug;

/// Significant digits kept in the LP share price
///
/// Sums and products in the core are exact; the share price is the only
/// quotient and is rounded here.
pub const PRICE_PER_SHARE_DIGITS: u64 = 50;

/// Value every ledger entry at current prices, net of trader PnL
///
/// Non-stable balances are offset once by `pre_mined_supply` here, independent
/// of how many chains contributed to the symbol. That offset is separate from
/// the per-chain `lp_deduct` netting of the supply.
///
/// Takes the ledger by value: a ledger is valued exactly once. A symbol
/// without a price aborts the whole valuation. The AUM is not clamped and may
/// be negative.
pub fn valuate(
	ledger: Ledger,
	prices: &PriceMap,
	pre_mined_supply: &BigDecimal,
) -> ValuationResult<Valuation> {
	let mut aum = BigDecimal::zero();
	let mut assets = Vec::with_capacity(ledger.len());

	for (symbol, asset) in ledger {
		let mut lp_balance = asset.lp_balance;
		if !asset.is_stable {
			lp_balance -= pre_mined_supply;
		}

		let price = prices.require(&symbol)?.clone();

		// Owed to longs when price is above their entry
		let long_upnl = &asset.total_long_position * &price - &asset.long_entry_value;
		// Owed to shorts when price is below their entry
		let short_upnl = &asset.short_entry_value - &asset.total_short_position * &price;

		let contribution = &lp_balance * &price - &long_upnl - &short_upnl;
		aum += &contribution;

		debug!(
			"{}: lp_balance={} price={} long_upnl={} short_upnl={} contribution={}",
			symbol, lp_balance, price, long_upnl, short_upnl, contribution
		);

		assets.push(AssetValuation {
			symbol,
			is_stable: asset.is_stable,
			lp_balance,
			price,
			long_upnl,
			short_upnl,
			contribution,
		});
	}

	Ok(Valuation { aum, assets })
}

/// AUM per circulating LP token, to `PRICE_PER_SHARE_DIGITS` significant digits
///
/// Only an exactly-zero supply is an error; negative AUM or supply pass
/// through as signals.
pub fn price_per_share(
	aum: &BigDecimal,
	circulating_supply: &BigDecimal,
) -> ValuationResult<BigDecimal> {
	if circulating_supply.is_zero() {
		return Err(ValuationError::DivisionByZero);
	}

	let quotient = aum / circulating_supply;
	if quotient.digits() > PRICE_PER_SHARE_DIGITS {
		Ok(quotient.with_prec(PRICE_PER_SHARE_DIGITS))
	} else {
		Ok(quotient)
	}
}
