//! Cache statistics counters.
//!
//! Counters are cumulative for the lifetime of the collector. They are only
//! incremented while collection is enabled and are never reset by eviction.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Raw counter values read from a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsReading {
    pub second_level_cache_hit_count: u64,
    pub second_level_cache_miss_count: u64,
    pub second_level_cache_put_count: u64,
    pub query_cache_hit_count: u64,
    pub query_cache_miss_count: u64,
    pub query_cache_put_count: u64,
    pub entity_fetch_count: u64,
    pub collection_fetch_count: u64,
    pub statistics_enabled: bool,
}

/// Lock-free statistics collector shared by all cache paths.
#[derive(Debug)]
pub struct CacheStatisticsCollector {
    enabled: AtomicBool,
    second_level_hits: AtomicU64,
    second_level_misses: AtomicU64,
    second_level_puts: AtomicU64,
    query_hits: AtomicU64,
    query_misses: AtomicU64,
    query_puts: AtomicU64,
    entity_fetches: AtomicU64,
    collection_fetches: AtomicU64,
}

impl CacheStatisticsCollector {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            second_level_hits: AtomicU64::new(0),
            second_level_misses: AtomicU64::new(0),
            second_level_puts: AtomicU64::new(0),
            query_hits: AtomicU64::new(0),
            query_misses: AtomicU64::new(0),
            query_puts: AtomicU64::new(0),
            entity_fetches: AtomicU64::new(0),
            collection_fetches: AtomicU64::new(0),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Turn collection on or off. Existing counter values are kept.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    fn bump(&self, counter: &AtomicU64) {
        if self.is_enabled() {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_second_level_hit(&self) {
        self.bump(&self.second_level_hits);
    }

    pub fn record_second_level_miss(&self) {
        self.bump(&self.second_level_misses);
    }

    pub fn record_second_level_put(&self) {
        self.bump(&self.second_level_puts);
    }

    pub fn record_query_hit(&self) {
        self.bump(&self.query_hits);
    }

    pub fn record_query_miss(&self) {
        self.bump(&self.query_misses);
    }

    pub fn record_query_put(&self) {
        self.bump(&self.query_puts);
    }

    pub fn record_entity_fetch(&self) {
        self.bump(&self.entity_fetches);
    }

    pub fn record_collection_fetch(&self) {
        self.bump(&self.collection_fetches);
    }

    /// Read every counter. Fields are loaded one at a time; there is no
    /// cross-field consistency.
    pub fn reading(&self) -> StatisticsReading {
        StatisticsReading {
            second_level_cache_hit_count: self.second_level_hits.load(Ordering::Relaxed),
            second_level_cache_miss_count: self.second_level_misses.load(Ordering::Relaxed),
            second_level_cache_put_count: self.second_level_puts.load(Ordering::Relaxed),
            query_cache_hit_count: self.query_hits.load(Ordering::Relaxed),
            query_cache_miss_count: self.query_misses.load(Ordering::Relaxed),
            query_cache_put_count: self.query_puts.load(Ordering::Relaxed),
            entity_fetch_count: self.entity_fetches.load(Ordering::Relaxed),
            collection_fetch_count: self.collection_fetches.load(Ordering::Relaxed),
            statistics_enabled: self.is_enabled(),
        }
    }
}

impl Default for CacheStatisticsCollector {
    fn default() -> Self {
        Self::new(true)
    }
}
