//! LP AUM Service
//!
//! Cross-chain liquidity aggregation and valuation: folding per-chain
//! snapshots into one ledger, netting the LP supply and pricing the share.

pub mod accumulator;
pub mod aggregator;
pub mod chain;
pub mod liquidity;
pub mod supply;
pub mod valuation;

pub use aggregator::{AggregatorError, LiquidityAggregator};
pub use liquidity::MultiChainLiquidity;
pub use supply::net_supply;
pub use valuation::{price_per_share, valuate};
