//! Collaborator traits for user implementations

use super::AdapterResult;
use crate::{Chain, ChainSnapshot, PriceMap};
use async_trait::async_trait;
use std::fmt::Debug;

/// Reads one chain's point-in-time liquidity pool state
///
/// Implementations return already-decimal-converted records; the core never
/// talks to a chain directly.
#[async_trait]
pub trait ChainStateReader: Send + Sync + Debug {
	/// Reader kind this implementation serves (matched against `Chain::reader`)
	fn id(&self) -> &str;

	async fn read_snapshot(&self, chain: &Chain) -> AdapterResult<ChainSnapshot>;
}

/// Supplies current prices for every pooled asset
#[async_trait]
pub trait PriceSource: Send + Sync + Debug {
	fn name(&self) -> &str;

	async fn fetch_prices(&self) -> AdapterResult<PriceMap>;
}
