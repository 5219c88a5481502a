//! LP AUM Adapters
//!
//! Chain snapshot readers and price sources for the LP AUM aggregator.

pub mod http_client;
pub mod price_feed;
pub mod snapshot_reader;

pub use lp_aum_types::{AdapterError, AdapterResult, ChainStateReader, PriceSource};
pub use price_feed::{HttpPriceSource, StaticPriceSource};
pub use snapshot_reader::{FileSnapshotReader, HttpSnapshotReader};

use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping a reader kind (`Chain::reader`) to its implementation
#[derive(Debug, Default, Clone)]
pub struct ReaderRegistry {
	readers: HashMap<String, Arc<dyn ChainStateReader>>,
}

impl ReaderRegistry {
	/// Empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with the built-in HTTP/JSON and file readers
	pub fn with_defaults() -> AdapterResult<Self> {
		let mut registry = Self::new();
		registry.register(Box::new(HttpSnapshotReader::new()?))?;
		registry.register(Box::new(FileSnapshotReader::new()))?;
		Ok(registry)
	}

	/// Register a reader under its own ID; IDs must be unique
	pub fn register(&mut self, reader: Box<dyn ChainStateReader>) -> AdapterResult<()> {
		let id = reader.id().to_string();
		if self.readers.contains_key(&id) {
			return Err(AdapterError::DuplicateReader(id));
		}
		self.readers.insert(id, Arc::from(reader));
		Ok(())
	}

	/// Register a reader, replacing any existing one with the same ID
	pub fn replace(&mut self, reader: Box<dyn ChainStateReader>) {
		self.readers
			.insert(reader.id().to_string(), Arc::from(reader));
	}

	pub fn get(&self, id: &str) -> Option<Arc<dyn ChainStateReader>> {
		self.readers.get(id).cloned()
	}

	/// Reader for `id`, or `UnsupportedReader`
	pub fn require(&self, id: &str) -> AdapterResult<Arc<dyn ChainStateReader>> {
		self.get(id)
			.ok_or_else(|| AdapterError::UnsupportedReader(id.to_string()))
	}

	pub fn ids(&self) -> Vec<&str> {
		let mut ids: Vec<&str> = self.readers.keys().map(String::as_str).collect();
		ids.sort_unstable();
		ids
	}

	pub fn len(&self) -> usize {
		self.readers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.readers.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_registry_with_defaults() {
		let registry = ReaderRegistry::with_defaults().unwrap();
		assert_eq!(registry.ids(), vec!["file", "http-json"]);
		assert!(registry.require("file").is_ok());
		assert!(matches!(
			registry.require("evm-rpc"),
			Err(AdapterError::UnsupportedReader(_))
		));
	}

	#[test]
	fn test_registry_rejects_duplicates() {
		let mut registry = ReaderRegistry::new();
		assert!(registry.is_empty());
		registry.register(Box::new(FileSnapshotReader::new())).unwrap();
		assert!(matches!(
			registry.register(Box::new(FileSnapshotReader::new())),
			Err(AdapterError::DuplicateReader(_))
		));

		registry.replace(Box::new(FileSnapshotReader::new()));
		assert_eq!(registry.len(), 1);
	}
}
