//! Collaborator contracts: where chain snapshots and prices come from

pub mod errors;
pub mod traits;

pub use errors::AdapterError;
pub use traits::{ChainStateReader, PriceSource};

/// Result type for collaborator operations
pub type AdapterResult<T> = Result<T, AdapterError>;
