//! Cache provider capability and cacheable entity marker.

use async_trait::async_trait;
use sensorium_core::{
    Analysis, EntityId, EntityType, Sensor, ServiceRequest, ServiceResponse, Solution,
};
use serde::{de::DeserializeOwned, Serialize};

use super::statistics::StatisticsReading;
use crate::StorageResult;

/// Marker trait for types that can be persisted and cached.
///
/// - `entity_type()` selects the table and the cache region
/// - `entity_id()` is the primary key
/// - `parent_id()` names the owning entity, if any; children of one parent
///   form a cacheable collection
pub trait CacheableEntity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn entity_type() -> EntityType;

    fn entity_id(&self) -> EntityId;

    fn parent_id(&self) -> Option<EntityId> {
        None
    }
}

/// Capability exposed by a persistence provider for cache monitoring.
///
/// Implementations own the counters and the cached data; callers only read
/// the counters and command a full eviction. Both operations fail with
/// [`StorageError::Unavailable`](sensorium_core::StorageError::Unavailable)
/// when the provider cannot service them.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Read the current statistics counters.
    async fn statistics(&self) -> StorageResult<StatisticsReading>;

    /// Evict every entry from every cache region, including the query cache.
    ///
    /// Statistics counters are left untouched.
    async fn evict_all(&self) -> StorageResult<()>;
}

// ============================================================================
// IMPLEMENTATIONS FOR SENSORIUM ENTITIES
// ============================================================================

impl CacheableEntity for Sensor {
    fn entity_type() -> EntityType {
        EntityType::Sensor
    }

    fn entity_id(&self) -> EntityId {
        self.sensor_id
    }
}

impl CacheableEntity for Analysis {
    fn entity_type() -> EntityType {
        EntityType::Analysis
    }

    fn entity_id(&self) -> EntityId {
        self.analysis_id
    }

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.sensor_id)
    }
}

impl CacheableEntity for ServiceRequest {
    fn entity_type() -> EntityType {
        EntityType::Request
    }

    fn entity_id(&self) -> EntityId {
        self.request_id
    }

    fn parent_id(&self) -> Option<EntityId> {
        self.analysis_id
    }
}

impl CacheableEntity for ServiceResponse {
    fn entity_type() -> EntityType {
        EntityType::Response
    }

    fn entity_id(&self) -> EntityId {
        self.response_id
    }

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.request_id)
    }
}

impl CacheableEntity for Solution {
    fn entity_type() -> EntityType {
        EntityType::Solution
    }

    fn entity_id(&self) -> EntityId {
        self.solution_id
    }

    fn parent_id(&self) -> Option<EntityId> {
        Some(self.request_id)
    }
}
