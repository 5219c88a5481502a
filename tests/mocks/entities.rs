//! Mock chain snapshots and price tables

#![allow(dead_code)]

use lp_aum::bigdecimal::Zero;
use lp_aum::{dec, AssetRecord, BigDecimal, ChainSnapshot, DexRecord, PriceMap};

pub const ARBITRUM: u64 = 42161;
pub const AVALANCHE: u64 = 43114;
pub const BSC: u64 = 56;
pub const FANTOM: u64 = 250;
pub const OPTIMISM: u64 = 10;

/// Enabled stable asset with only spot liquidity
pub fn stable(symbol: &str, spot: BigDecimal) -> AssetRecord {
	AssetRecord {
		spot_liquidity: spot,
		..AssetRecord::new(symbol, true)
	}
}

/// Enabled volatile asset with a long and a short book
pub fn volatile(
	symbol: &str,
	spot: BigDecimal,
	deduct: BigDecimal,
	long: (BigDecimal, BigDecimal),
	short: (BigDecimal, BigDecimal),
) -> AssetRecord {
	AssetRecord {
		spot_liquidity: spot,
		deduct,
		total_long_position: long.0,
		average_long_price: long.1,
		total_short_position: short.0,
		average_short_price: short.1,
		..AssetRecord::new(symbol, false)
	}
}

/// Arbitrum: USDC plus ETH with open positions and a USDC dex balance
pub fn arbitrum_snapshot() -> ChainSnapshot {
	ChainSnapshot::new(
		vec![
			AssetRecord {
				collected_fee: dec!(2500),
				credit: dec!(1000),
				..stable("USDC", dec!(1_000_000))
			},
			volatile(
				"ETH",
				dec!(300),
				dec!(1_000_000),
				(dec!(20), dec!(1500)),
				(dec!(10), dec!(1700)),
			),
		],
		vec![DexRecord::new(vec![0], vec![dec!(25_000)])],
		dec!(100_000),
	)
}

/// BNB Chain: more USDC and ETH, plus a disabled BNB entry
pub fn bsc_snapshot() -> ChainSnapshot {
	ChainSnapshot::new(
		vec![
			stable("USDC", dec!(400_000)),
			volatile(
				"ETH",
				dec!(200),
				dec!(1_000_000),
				(dec!(5), dec!(1900)),
				(BigDecimal::zero(), BigDecimal::zero()),
			),
			AssetRecord {
				is_enabled: false,
				spot_liquidity: dec!(-999_999),
				..AssetRecord::new("BNB", false)
			},
		],
		vec![],
		dec!(50_000),
	)
}

/// Optimism: only stables
pub fn optimism_snapshot() -> ChainSnapshot {
	ChainSnapshot::new(
		vec![stable("USDC", dec!(250_000)), stable("USDT", dec!(75_000))],
		vec![DexRecord::new(vec![1], vec![dec!(5_000)])],
		dec!(25_000),
	)
}

pub fn prices() -> PriceMap {
	[
		("USDC", dec!(1)),
		("USDT", dec!(1)),
		("ETH", dec!(2000)),
		("BNB", dec!(300)),
	]
	.into_iter()
	.collect()
}

/// Pre-mined supply used by the scenarios; large enough to keep supply positive
pub fn pre_mined() -> BigDecimal {
	dec!(1_000_000)
}
