//! Run orchestration: fetch every chain snapshot and the prices, then value

use futures::future::join_all;
use lp_aum_adapters::ReaderRegistry;
use lp_aum_types::{
	AdapterError, BigDecimal, Chain, ChainSnapshot, ChainStateReader, PriceSource, ValuationError,
	ValuationReport,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::{sleep, timeout, Duration};
use tracing::{debug, info, warn};

use crate::liquidity::MultiChainLiquidity;

/// Base delay between retries of a chain read, multiplied by the attempt number
const RETRY_BACKOFF_MS: u64 = 250;

#[derive(Debug, Error)]
pub enum AggregatorError {
	#[error("No reader '{reader}' registered for chain {chain_id}")]
	UnknownReader { chain_id: u64, reader: String },

	#[error("Failed to fetch snapshot for chain {chain_id}: {reason}")]
	ChainFetch { chain_id: u64, reason: String },

	#[error("Failed to fetch prices from {source_name}: {source}")]
	PriceFetch {
		source_name: String,
		#[source]
		source: AdapterError,
	},

	#[error("Snapshot fetch timed out after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error(transparent)]
	Valuation(#[from] ValuationError),
}

impl AggregatorError {
	/// Machine-friendly error kind, used when reporting from the CLI
	pub fn kind(&self) -> &'static str {
		match self {
			AggregatorError::UnknownReader { .. } => "unknown_reader",
			AggregatorError::ChainFetch { .. } => "chain_fetch",
			AggregatorError::PriceFetch { .. } => "price_fetch",
			AggregatorError::Timeout { .. } => "timeout",
			AggregatorError::Valuation(e) => e.kind(),
		}
	}
}

/// Aggregates the LP pool across chains and values it
pub struct LiquidityAggregator {
	chains: Vec<Chain>,
	readers: Arc<ReaderRegistry>,
	price_source: Arc<dyn PriceSource>,
	pre_mined_supply: BigDecimal,
	global_timeout_ms: u64,
}

impl LiquidityAggregator {
	pub fn new(
		chains: Vec<Chain>,
		readers: Arc<ReaderRegistry>,
		price_source: Arc<dyn PriceSource>,
		pre_mined_supply: BigDecimal,
		global_timeout_ms: u64,
	) -> Self {
		Self {
			chains,
			readers,
			price_source,
			pre_mined_supply,
			global_timeout_ms,
		}
	}

	pub fn chains(&self) -> &[Chain] {
		&self.chains
	}

	/// Validate that every chain has a matching reader
	pub fn validate_chains(&self) -> Result<(), AggregatorError> {
		for chain in &self.chains {
			if self.readers.get(&chain.reader).is_none() {
				return Err(AggregatorError::UnknownReader {
					chain_id: chain.chain_id,
					reader: chain.reader.clone(),
				});
			}
		}
		Ok(())
	}

	/// Fetch every chain's snapshot concurrently
	///
	/// Results come back in configured chain order. A single chain failing
	/// after its retries fails the whole fetch.
	pub async fn fetch_snapshots(&self) -> Result<Vec<(Chain, ChainSnapshot)>, AggregatorError> {
		self.validate_chains()?;
		info!("Fetching snapshots from {} chains", self.chains.len());

		let tasks = self.chains.iter().map(|chain| {
			let chain = chain.clone();
			let readers = Arc::clone(&self.readers);

			tokio::spawn(async move {
				let reader = readers
					.require(&chain.reader)
					.map_err(|e| AggregatorError::ChainFetch {
						chain_id: chain.chain_id,
						reason: e.to_string(),
					})?;
				let snapshot = read_with_retries(reader.as_ref(), &chain).await?;
				Ok::<_, AggregatorError>((chain, snapshot))
			})
		});

		let global_timeout_duration = Duration::from_millis(self.global_timeout_ms);
		let results = timeout(global_timeout_duration, join_all(tasks))
			.await
			.map_err(|_| {
				warn!(
					"Global snapshot timeout reached after {}ms",
					self.global_timeout_ms
				);
				AggregatorError::Timeout {
					timeout_ms: self.global_timeout_ms,
				}
			})?;

		let mut snapshots = Vec::with_capacity(results.len());
		for (chain, result) in self.chains.iter().zip(results) {
			let fetched = result.map_err(|e| AggregatorError::ChainFetch {
				chain_id: chain.chain_id,
				reason: format!("snapshot task failed: {}", e),
			})??;
			snapshots.push(fetched);
		}

		Ok(snapshots)
	}

	async fn fetch_prices(&self) -> Result<lp_aum_types::PriceMap, AggregatorError> {
		self.price_source
			.fetch_prices()
			.await
			.map_err(|source| AggregatorError::PriceFetch {
				source_name: self.price_source.name().to_string(),
				source,
			})
	}

	/// Fetch everything, fold the chains in order and value the pool
	pub async fn run(&self) -> Result<ValuationReport, AggregatorError> {
		let (snapshots, prices) = tokio::try_join!(self.fetch_snapshots(), self.fetch_prices())?;
		info!(
			"Fetched {} snapshots and {} prices",
			snapshots.len(),
			prices.len()
		);

		let liquidity = MultiChainLiquidity::from_snapshots(
			self.pre_mined_supply.clone(),
			snapshots
				.iter()
				.map(|(chain, snapshot)| (chain.chain_id, snapshot)),
		)?;
		info!(
			"Aggregated {} assets across {} chains",
			liquidity.ledger().len(),
			liquidity.chains().len()
		);

		let report = liquidity.valuate(&prices)?;
		info!(
			"AUM {} over circulating supply {} gives price per share {}",
			report.aum, report.circulating_supply, report.price_per_share
		);
		Ok(report)
	}
}

/// Read one chain, retrying transient failures with a linear backoff
async fn read_with_retries(
	reader: &dyn ChainStateReader,
	chain: &Chain,
) -> Result<ChainSnapshot, AggregatorError> {
	let per_chain_timeout = Duration::from_millis(chain.timeout_ms);
	let mut attempt = 0u32;

	loop {
		attempt += 1;
		debug!("Reading snapshot for {} (attempt {})", chain, attempt);

		let result = match timeout(per_chain_timeout, reader.read_snapshot(chain)).await {
			Ok(result) => result,
			Err(_) => Err(AdapterError::Timeout {
				timeout_ms: chain.timeout_ms,
			}),
		};

		match result {
			Ok(snapshot) => {
				debug!(
					"Snapshot for {} has {} assets and {} dexes",
					chain,
					snapshot.assets.len(),
					snapshot.dexes.len()
				);
				return Ok(snapshot);
			},
			Err(e) if e.is_transient() && attempt <= chain.max_retries => {
				warn!(
					"Snapshot read for {} failed (attempt {}/{}): {}",
					chain,
					attempt,
					chain.max_retries + 1,
					e
				);
				sleep(Duration::from_millis(RETRY_BACKOFF_MS * u64::from(attempt))).await;
			},
			Err(e) => {
				return Err(AggregatorError::ChainFetch {
					chain_id: chain.chain_id,
					reason: e.to_string(),
				});
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use lp_aum_adapters::StaticPriceSource;
	use lp_aum_types::bigdecimal::Zero;
	use lp_aum_types::{dec, AdapterResult, AssetRecord};
	use std::sync::atomic::{AtomicU32, Ordering};

	/// Fails with a 503 a fixed number of times before answering
	#[derive(Debug)]
	struct FlakyReader {
		failures: u32,
		calls: AtomicU32,
	}

	#[async_trait]
	impl ChainStateReader for FlakyReader {
		fn id(&self) -> &str {
			"flaky"
		}

		async fn read_snapshot(&self, _chain: &Chain) -> AdapterResult<ChainSnapshot> {
			let call = self.calls.fetch_add(1, Ordering::SeqCst);
			if call < self.failures {
				return Err(AdapterError::from_http_failure(503));
			}
			Ok(ChainSnapshot::new(
				vec![AssetRecord {
					spot_liquidity: dec!(100),
					..AssetRecord::new("USDC", true)
				}],
				vec![],
				dec!(50),
			))
		}
	}

	fn aggregator(failures: u32, max_retries: u32) -> LiquidityAggregator {
		let mut readers = ReaderRegistry::new();
		readers
			.register(Box::new(FlakyReader {
				failures,
				calls: AtomicU32::new(0),
			}))
			.unwrap();
		let chain = Chain::new(10, "Optimism", "flaky", "memory://10").with_max_retries(max_retries);
		let prices = StaticPriceSource::new([("USDC", dec!(1))].into_iter().collect());

		LiquidityAggregator::new(
			vec![chain],
			Arc::new(readers),
			Arc::new(prices),
			dec!(150),
			5_000,
		)
	}

	#[tokio::test]
	async fn test_transient_failures_are_retried() {
		let report = aggregator(2, 2).run().await.unwrap();
		assert_eq!(report.aum, dec!(100));
		assert_eq!(report.circulating_supply, dec!(100));
		assert_eq!(report.price_per_share, dec!(1));
	}

	#[tokio::test]
	async fn test_retries_are_bounded() {
		let error = aggregator(3, 2).run().await.unwrap_err();
		assert!(matches!(
			error,
			AggregatorError::ChainFetch { chain_id: 10, .. }
		));
		assert_eq!(error.kind(), "chain_fetch");
	}

	#[test]
	fn test_unknown_reader_is_rejected() {
		let aggregator = LiquidityAggregator::new(
			vec![Chain::new(56, "BNB Chain", "evm-rpc", "http://localhost")],
			Arc::new(ReaderRegistry::new()),
			Arc::new(StaticPriceSource::default()),
			BigDecimal::zero(),
			1_000,
		);
		assert!(matches!(
			aggregator.validate_chains(),
			Err(AggregatorError::UnknownReader { chain_id: 56, .. })
		));
	}
}
