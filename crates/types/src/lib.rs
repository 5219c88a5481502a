//! LP AUM Types
//!
//! Shared models and traits for the cross-chain LP AUM aggregator.
//! This crate contains the snapshot data model, the cross-chain ledger,
//! valuation inputs/outputs and the collaborator traits.

pub mod adapters;
pub mod chains;
pub mod ledger;
pub mod models;
pub mod test_utils;
pub mod valuation;

// Re-export chrono and bigdecimal for convenience
pub use bigdecimal::{self, BigDecimal};
pub use chrono;

pub use adapters::{AdapterError, AdapterResult, ChainStateReader, PriceSource};

pub use chains::{AssetRecord, Chain, ChainSnapshot, DexRecord};

pub use ledger::{AggregatedAsset, Ledger};

pub use models::SecretString;

pub use valuation::{
	AssetValuation, PriceMap, Valuation, ValuationError, ValuationReport, ValuationResult,
};
