//! Error types for aggregation and valuation

use thiserror::Error;

/// Fatal conditions of the aggregation/valuation core
///
/// Any of these aborts the whole run; no partial AUM is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
	#[error("Price not found for {symbol}")]
	MissingPrice { symbol: String },

	#[error("Dex entry references asset #{} ({}) which is not in the ledger", .asset_id, .symbol.as_deref().unwrap_or("out of range"))]
	DanglingDexReference {
		asset_id: usize,
		symbol: Option<String>,
	},

	#[error("Dex entry has {asset_ids} asset ids but {balances} liquidity balances")]
	DexLengthMismatch { asset_ids: usize, balances: usize },

	#[error("Division by zero: circulating supply is zero")]
	DivisionByZero,
}

impl ValuationError {
	/// Machine-friendly error kind, used when reporting from the CLI
	pub fn kind(&self) -> &'static str {
		match self {
			ValuationError::MissingPrice { .. } => "missing_price",
			ValuationError::DanglingDexReference { .. } => "dangling_dex_reference",
			ValuationError::DexLengthMismatch { .. } => "dex_length_mismatch",
			ValuationError::DivisionByZero => "division_by_zero",
		}
	}
}
