//! API Request and Response Types
//!
//! Wire types that do not belong to the domain crate: the cache statistics
//! snapshot, list wrappers and enum lookup responses. Create/update bodies
//! for each resource live next to their route module.

use sensorium_storage::StatisticsReading;
use serde::{Deserialize, Serialize};

// ============================================================================
// CACHE STATISTICS
// ============================================================================

/// Point-in-time snapshot of the second-level cache statistics.
///
/// Built fresh on every read and never mutated afterwards. When the
/// provider has statistics disabled every counter is zero and
/// `isStatisticsEnabled` is `false`; all nine keys are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatistics {
    pub second_level_cache_hit_count: u64,
    pub second_level_cache_miss_count: u64,
    pub second_level_cache_put_count: u64,
    pub query_cache_hit_count: u64,
    pub query_cache_miss_count: u64,
    pub query_cache_put_count: u64,
    /// Cumulative loads of persisted entities from the store
    pub entity_fetch_count: u64,
    /// Cumulative loads of persisted collections from the store
    pub collection_fetch_count: u64,
    #[serde(rename = "isStatisticsEnabled", alias = "statisticsEnabled")]
    pub statistics_enabled: bool,
}

impl CacheStatistics {
    /// Snapshot a provider reading.
    pub fn from_reading(reading: StatisticsReading) -> Self {
        if !reading.statistics_enabled {
            return Self::disabled();
        }
        Self {
            second_level_cache_hit_count: reading.second_level_cache_hit_count,
            second_level_cache_miss_count: reading.second_level_cache_miss_count,
            second_level_cache_put_count: reading.second_level_cache_put_count,
            query_cache_hit_count: reading.query_cache_hit_count,
            query_cache_miss_count: reading.query_cache_miss_count,
            query_cache_put_count: reading.query_cache_put_count,
            entity_fetch_count: reading.entity_fetch_count,
            collection_fetch_count: reading.collection_fetch_count,
            statistics_enabled: true,
        }
    }

    /// Snapshot reported when the provider is not recording statistics.
    pub fn disabled() -> Self {
        Self::default()
    }
}

impl From<StatisticsReading> for CacheStatistics {
    fn from(reading: StatisticsReading) -> Self {
        Self::from_reading(reading)
    }
}

// ============================================================================
// LOOKUPS AND LISTS
// ============================================================================

/// Variants of a lookup enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnumValuesResponse {
    pub name: String,
    pub values: Vec<String>,
}

/// Names of every lookup enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnumNamesResponse {
    pub names: Vec<String>,
}

/// Standard list response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}
