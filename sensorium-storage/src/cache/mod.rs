//! Cache layer of the persistence provider.
//!
//! Two caches sit in front of the [`EntityStore`](crate::EntityStore):
//!
//! - the second-level cache keeps dehydrated entity rows and child
//!   collections, one region per [`EntityType`](sensorium_core::EntityType);
//! - the query cache keeps the id lists produced by list queries.
//!
//! Neither cache has a size bound or eviction policy. Entries leave the
//! cache only when a write invalidates them or when everything is evicted
//! through [`CacheProvider::evict_all`].
//!
//! Activity is counted by [`CacheStatisticsCollector`]. Counters are never
//! reset by eviction.

pub mod query;
pub mod region;
pub mod statistics;
pub mod traits;

pub use query::{QueryCache, QueryKey};
pub use region::SecondLevelCache;
pub use statistics::{CacheStatisticsCollector, StatisticsReading};
pub use traits::{CacheProvider, CacheableEntity};
