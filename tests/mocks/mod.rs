//! Centralized mocks and fixtures for integration tests
//!
//! Snapshot builders live in `entities`, the HTTP feed server used by the
//! adapter tests lives in `feed_server`.

pub mod entities;
pub mod feed_server;

#[allow(unused_imports)]
pub use feed_server::FeedServer;
