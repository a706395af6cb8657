//! Persistence unit: store + caches + statistics behind one lifecycle.
//!
//! Reads go through the second-level cache first and fall back to the
//! store on a miss. A miss publishes the loaded row into the cache while
//! the store is still read-locked. Writes go straight to the store and
//! invalidate the affected cache entries once the write lock is released,
//! so a cached row is never older than the store once a write returns.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sensorium_core::{EntityId, EntityType, StorageError};
use serde::de::DeserializeOwned;

use crate::cache::{
    CacheProvider, CacheStatisticsCollector, CacheableEntity, QueryCache, QueryKey,
    SecondLevelCache, StatisticsReading,
};
use crate::store::EntityStore;
use crate::StorageResult;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration for the persistence unit.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Whether statistics counters are recorded.
    pub statistics_enabled: bool,
    /// Whether list queries go through the query cache.
    pub query_cache_enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            statistics_enabled: true,
            query_cache_enabled: true,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create StorageConfig from environment variables.
    ///
    /// - `SENSORIUM_CACHE_STATISTICS`: "true" or "false" (default: true)
    /// - `SENSORIUM_QUERY_CACHE`: "true" or "false" (default: true)
    pub fn from_env() -> Self {
        let statistics_enabled = std::env::var("SENSORIUM_CACHE_STATISTICS")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(true);

        let query_cache_enabled = std::env::var("SENSORIUM_QUERY_CACHE")
            .ok()
            .map(|s| s.to_lowercase() != "false")
            .unwrap_or(true);

        Self {
            statistics_enabled,
            query_cache_enabled,
        }
    }

    pub fn with_statistics(mut self, enabled: bool) -> Self {
        self.statistics_enabled = enabled;
        self
    }

    pub fn with_query_cache(mut self, enabled: bool) -> Self {
        self.query_cache_enabled = enabled;
        self
    }
}

// ============================================================================
// PERSISTENCE UNIT
// ============================================================================

/// The persistence provider used by the API.
///
/// Starts open when built with [`PersistenceUnit::new`]. After
/// [`close`](PersistenceUnit::close) every operation, including the
/// [`CacheProvider`] ones, fails with [`StorageError::Unavailable`].
#[derive(Debug)]
pub struct PersistenceUnit {
    store: EntityStore,
    second_level: SecondLevelCache,
    queries: QueryCache,
    statistics: CacheStatisticsCollector,
    config: StorageConfig,
    open: AtomicBool,
}

impl PersistenceUnit {
    /// Create an open persistence unit.
    pub fn new(config: StorageConfig) -> Self {
        let unit = Self::unstarted(config);
        unit.start();
        unit
    }

    /// Create a persistence unit that rejects every operation until
    /// [`start`](PersistenceUnit::start) is called.
    pub fn unstarted(config: StorageConfig) -> Self {
        Self {
            store: EntityStore::new(),
            second_level: SecondLevelCache::new(),
            queries: QueryCache::new(),
            statistics: CacheStatisticsCollector::new(config.statistics_enabled),
            config,
            open: AtomicBool::new(false),
        }
    }

    pub fn start(&self) {
        self.open.store(true, Ordering::SeqCst);
        tracing::info!(
            statistics_enabled = self.statistics.is_enabled(),
            query_cache_enabled = self.config.query_cache_enabled,
            "Persistence unit started"
        );
    }

    /// Close the unit. Cached data is kept but becomes unreachable.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
        tracing::info!("Persistence unit closed");
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn set_statistics_enabled(&self, enabled: bool) {
        self.statistics.set_enabled(enabled);
    }

    /// Cache inspection, used by health reporting and tests.
    pub fn second_level_cache(&self) -> &SecondLevelCache {
        &self.second_level
    }

    pub fn query_cache(&self) -> &QueryCache {
        &self.queries
    }

    fn ensure_open(&self) -> StorageResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(StorageError::unavailable("persistence unit is not open"))
        }
    }

    // ========================================================================
    // READS
    // ========================================================================

    /// Find an entity by id, through the second-level cache.
    pub async fn find<T: CacheableEntity>(&self, id: EntityId) -> StorageResult<Option<T>> {
        self.ensure_open()?;
        let entity_type = T::entity_type();

        if let Some(value) = self.second_level.get(entity_type, id) {
            self.statistics.record_second_level_hit();
            return decode::<T>(entity_type, value).map(Some);
        }
        self.statistics.record_second_level_miss();

        let loaded = self
            .store
            .load_and(entity_type, id, |value| {
                self.second_level.put(entity_type, id, value.clone());
            })
            .await;
        let Some(value) = loaded else {
            return Ok(None);
        };
        self.statistics.record_entity_fetch();
        self.statistics.record_second_level_put();

        decode::<T>(entity_type, value).map(Some)
    }

    /// List every entity of a type, through the query cache.
    pub async fn list<T: CacheableEntity>(&self) -> StorageResult<Vec<T>> {
        self.ensure_open()?;
        let entity_type = T::entity_type();

        let ids = if self.config.query_cache_enabled {
            let key = QueryKey::list_all(entity_type);
            match self.queries.get(&key) {
                Some(ids) => {
                    self.statistics.record_query_hit();
                    ids
                }
                None => {
                    self.statistics.record_query_miss();
                    let ids = self
                        .store
                        .load_ids_and(entity_type, |ids| self.queries.put(key, ids.to_vec()))
                        .await;
                    self.statistics.record_collection_fetch();
                    self.statistics.record_query_put();
                    ids
                }
            }
        } else {
            let ids = self.store.load_ids(entity_type).await;
            self.statistics.record_collection_fetch();
            ids
        };

        self.resolve(ids).await
    }

    /// List the children of type `T` owned by `parent_id`, through the
    /// second-level collection cache.
    pub async fn children<T: CacheableEntity>(&self, parent_id: EntityId) -> StorageResult<Vec<T>> {
        self.ensure_open()?;
        let entity_type = T::entity_type();

        let ids = match self.second_level.get_collection(entity_type, parent_id) {
            Some(ids) => {
                self.statistics.record_second_level_hit();
                ids
            }
            None => {
                self.statistics.record_second_level_miss();
                let ids = self
                    .store
                    .load_children_and(entity_type, parent_id, |ids| {
                        self.second_level
                            .put_collection(entity_type, parent_id, ids.to_vec());
                    })
                    .await;
                self.statistics.record_collection_fetch();
                self.statistics.record_second_level_put();
                ids
            }
        };

        self.resolve(ids).await
    }

    /// Whether a row exists in the store. Bypasses the caches and records
    /// no statistics.
    pub async fn exists(&self, entity_type: EntityType, id: EntityId) -> StorageResult<bool> {
        self.ensure_open()?;
        Ok(self.store.load(entity_type, id).await.is_some())
    }

    async fn resolve<T: CacheableEntity>(&self, ids: Vec<EntityId>) -> StorageResult<Vec<T>> {
        let mut entities = Vec::with_capacity(ids.len());
        for id in ids {
            // A row deleted between the id lookup and here is skipped
            if let Some(entity) = self.find::<T>(id).await? {
                entities.push(entity);
            }
        }
        Ok(entities)
    }

    // ========================================================================
    // WRITES
    // ========================================================================

    pub async fn insert<T: CacheableEntity>(&self, entity: &T) -> StorageResult<()> {
        self.ensure_open()?;
        let entity_type = T::entity_type();
        let value = encode(entity_type, entity)?;
        self.store
            .insert(entity_type, entity.entity_id(), entity.parent_id(), value)
            .await?;
        self.invalidate_queries(entity_type);
        Ok(())
    }

    pub async fn update<T: CacheableEntity>(&self, entity: &T) -> StorageResult<()> {
        self.ensure_open()?;
        let entity_type = T::entity_type();
        let id = entity.entity_id();
        let value = encode(entity_type, entity)?;
        self.store
            .replace(entity_type, id, entity.parent_id(), value)
            .await?;
        self.second_level.evict(entity_type, id);
        self.invalidate_queries(entity_type);
        Ok(())
    }

    pub async fn delete<T: CacheableEntity>(&self, id: EntityId) -> StorageResult<()> {
        self.ensure_open()?;
        let entity_type = T::entity_type();
        self.store.remove(entity_type, id).await?;
        self.second_level.evict(entity_type, id);
        self.invalidate_queries(entity_type);
        Ok(())
    }

    fn invalidate_queries(&self, entity_type: EntityType) {
        self.queries.invalidate(entity_type);
        self.second_level.evict_collections(entity_type);
    }
}

#[async_trait]
impl CacheProvider for PersistenceUnit {
    async fn statistics(&self) -> StorageResult<StatisticsReading> {
        self.ensure_open()?;
        Ok(self.statistics.reading())
    }

    async fn evict_all(&self) -> StorageResult<()> {
        self.ensure_open()?;
        let regions = self.second_level.evict_all();
        let queries = self.queries.clear();
        tracing::info!(
            evicted_entries = regions,
            evicted_queries = queries,
            "Evicted all second-level and query cache entries"
        );
        Ok(())
    }
}

fn encode<T: CacheableEntity>(entity_type: EntityType, entity: &T) -> StorageResult<serde_json::Value> {
    serde_json::to_value(entity).map_err(|e| StorageError::Serialization {
        entity_type,
        reason: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(entity_type: EntityType, value: serde_json::Value) -> StorageResult<T> {
    serde_json::from_value(value).map_err(|e| StorageError::Serialization {
        entity_type,
        reason: e.to_string(),
    })
}
