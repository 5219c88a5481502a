//! Mock readers and price sources for demos and testing
//!
//! This module provides in-memory implementations of the adapter traits so a
//! valuation can run without any network or filesystem access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lp_aum_types::{
	AdapterError, AdapterResult, Chain, ChainSnapshot, ChainStateReader, PriceMap, PriceSource,
};

/// Reader serving snapshots from memory, keyed by chain ID
#[derive(Debug, Default)]
pub struct MockSnapshotReader {
	id: String,
	snapshots: HashMap<u64, ChainSnapshot>,
	reads: Arc<AtomicUsize>,
}

impl MockSnapshotReader {
	pub const DEFAULT_ID: &'static str = "mock";

	pub fn new() -> Self {
		Self::with_id(Self::DEFAULT_ID)
	}

	pub fn with_id(id: &str) -> Self {
		Self {
			id: id.to_string(),
			..Self::default()
		}
	}

	pub fn with_snapshot(mut self, chain_id: u64, snapshot: ChainSnapshot) -> Self {
		self.snapshots.insert(chain_id, snapshot);
		self
	}

	/// Shared counter of completed `read_snapshot` calls
	pub fn read_counter(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.reads)
	}
}

#[async_trait]
impl ChainStateReader for MockSnapshotReader {
	fn id(&self) -> &str {
		&self.id
	}

	async fn read_snapshot(&self, chain: &Chain) -> AdapterResult<ChainSnapshot> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		self.snapshots
			.get(&chain.chain_id)
			.cloned()
			.ok_or_else(|| AdapterError::InvalidResponse {
				reason: format!("No mock snapshot for chain {}", chain.chain_id),
			})
	}
}

/// Reader that never answers, for exercising timeouts
#[derive(Debug, Default)]
pub struct HangingSnapshotReader;

impl HangingSnapshotReader {
	pub const ID: &'static str = "hanging";
}

#[async_trait]
impl ChainStateReader for HangingSnapshotReader {
	fn id(&self) -> &str {
		Self::ID
	}

	async fn read_snapshot(&self, _chain: &Chain) -> AdapterResult<ChainSnapshot> {
		std::future::pending().await
	}
}

/// Price source that always fails with the given HTTP status
#[derive(Debug, Clone)]
pub struct FailingPriceSource {
	pub status_code: u16,
}

impl Default for FailingPriceSource {
	fn default() -> Self {
		Self { status_code: 503 }
	}
}

#[async_trait]
impl PriceSource for FailingPriceSource {
	fn name(&self) -> &str {
		"failing"
	}

	async fn fetch_prices(&self) -> AdapterResult<PriceMap> {
		Err(AdapterError::from_http_failure(self.status_code))
	}
}

/// Chain pointing at a mock reader
pub fn mock_chain(chain_id: u64, reader_id: &str) -> Chain {
	Chain::new(
		chain_id,
		&format!("Mock chain {}", chain_id),
		reader_id,
		&format!("memory://{}", chain_id),
	)
}
