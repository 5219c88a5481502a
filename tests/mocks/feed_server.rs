//! Local HTTP server standing in for the chain readers and the price feed
//!
//! Serves `GET /snapshots/:chain_id` and `GET /api/liquidityAsset` on an
//! ephemeral port.

#![allow(dead_code)]

use axum::{
	extract::{Path, State},
	http::{HeaderMap, StatusCode},
	response::{IntoResponse, Response},
	routing::get,
	Json, Router,
};
use lp_aum::ChainSnapshot;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

pub const API_KEY_HEADER: &str = "X-API-Key";

#[derive(Default)]
struct FeedState {
	snapshots: HashMap<u64, ChainSnapshot>,
	prices: Vec<(String, String)>,
	api_key: Option<String>,
	/// Number of snapshot requests answered with 503 before serving
	snapshot_failures: usize,
	snapshot_requests: AtomicUsize,
}

/// Builder for a feed server instance
#[derive(Default)]
pub struct FeedServerBuilder {
	state: FeedState,
}

impl FeedServerBuilder {
	pub fn snapshot(mut self, chain_id: u64, snapshot: ChainSnapshot) -> Self {
		self.state.snapshots.insert(chain_id, snapshot);
		self
	}

	pub fn price(mut self, symbol: &str, price: &str) -> Self {
		self.state
			.prices
			.push((symbol.to_string(), price.to_string()));
		self
	}

	pub fn require_api_key(mut self, key: &str) -> Self {
		self.state.api_key = Some(key.to_string());
		self
	}

	pub fn fail_snapshots(mut self, times: usize) -> Self {
		self.state.snapshot_failures = times;
		self
	}

	pub async fn spawn(self) -> Result<FeedServer, Box<dyn std::error::Error>> {
		let state = Arc::new(self.state);
		let app = Router::new()
			.route("/snapshots/:chain_id", get(snapshot_handler))
			.route("/api/liquidityAsset", get(prices_handler))
			.route("/broken", get(|| async { "not json" }))
			.with_state(Arc::clone(&state));

		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;
		let handle = tokio::spawn(async move {
			axum::serve(listener, app).await.ok();
		});

		Ok(FeedServer {
			base_url: format!("http://{}", addr),
			handle,
			state,
		})
	}
}

/// Running feed server
pub struct FeedServer {
	pub base_url: String,
	handle: JoinHandle<()>,
	state: Arc<FeedState>,
}

impl FeedServer {
	pub fn builder() -> FeedServerBuilder {
		FeedServerBuilder::default()
	}

	pub fn snapshot_url(&self, chain_id: u64) -> String {
		format!("{}/snapshots/{}", self.base_url, chain_id)
	}

	pub fn prices_url(&self) -> String {
		format!("{}/api/liquidityAsset", self.base_url)
	}

	pub fn snapshot_requests(&self) -> usize {
		self.state.snapshot_requests.load(Ordering::SeqCst)
	}

	pub fn abort(&self) {
		self.handle.abort();
	}
}

impl Drop for FeedServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn snapshot_handler(
	State(state): State<Arc<FeedState>>,
	Path(chain_id): Path<u64>,
) -> Response {
	let request = state.snapshot_requests.fetch_add(1, Ordering::SeqCst);
	if request < state.snapshot_failures {
		return StatusCode::SERVICE_UNAVAILABLE.into_response();
	}

	match state.snapshots.get(&chain_id) {
		Some(snapshot) => Json(snapshot.clone()).into_response(),
		None => StatusCode::NOT_FOUND.into_response(),
	}
}

async fn prices_handler(State(state): State<Arc<FeedState>>, headers: HeaderMap) -> Response {
	if let Some(expected) = &state.api_key {
		let provided = headers
			.get(API_KEY_HEADER)
			.and_then(|value| value.to_str().ok());
		if provided != Some(expected.as_str()) {
			return StatusCode::UNAUTHORIZED.into_response();
		}
	}

	let assets: Vec<Value> = state
		.prices
		.iter()
		.map(|(symbol, price)| json!({ "symbol": symbol, "price": price }))
		.collect();
	Json(json!({ "assets": assets })).into_response()
}
