//! Services for querying and caching distance metrics

pub mod aggregator;
pub mod cache;

pub use aggregator::Aggregator;
pub use cache::SnapshotCache;
