//! Sensorium Storage - In-Process Persistence Provider
//!
//! Provides the persistence layer the API sits on:
//! - [`EntityStore`]: authoritative in-memory tables, one per entity type
//! - [`SecondLevelCache`]: process-wide entity and collection cache regions
//! - [`QueryCache`]: query key → result id list
//! - [`CacheStatisticsCollector`]: hit/miss/put and fetch counters
//!
//! [`PersistenceUnit`] ties these together and implements the
//! [`CacheProvider`] capability used for cache monitoring and eviction.

pub mod cache;
pub mod store;
pub mod unit;

pub use cache::{
    CacheProvider, CacheStatisticsCollector, CacheableEntity, QueryCache, QueryKey,
    SecondLevelCache, StatisticsReading,
};
pub use store::EntityStore;
pub use unit::{PersistenceUnit, StorageConfig};

use sensorium_core::StorageError;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
