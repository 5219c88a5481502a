//! LP AUM Aggregator CLI
//!
//! Performs one valuation run and prints AUM, supply and price per share

use lp_aum::{AggregatorError, ValuationBuilder};

#[tokio::main]
async fn main() {
	if let Err(e) = ValuationBuilder::new().start().await {
		let kind = e
			.downcast_ref::<AggregatorError>()
			.map(AggregatorError::kind)
			.unwrap_or("startup");
		tracing::error!(kind, "Valuation run failed: {}", e);
		eprintln!("error [{}]: {}", kind, e);
		std::process::exit(1);
	}
}
