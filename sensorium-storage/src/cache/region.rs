//! Second-level cache regions.
//!
//! Entities are cached in their dehydrated (JSON) form so a cache hit never
//! shares mutable state with the caller. Child collections are cached as
//! ordered id lists keyed by owner.

use dashmap::DashMap;
use sensorium_core::{EntityId, EntityType};

/// Process-wide cache of entity rows and child collections.
#[derive(Debug, Default)]
pub struct SecondLevelCache {
    entities: DashMap<(EntityType, EntityId), serde_json::Value>,
    collections: DashMap<(EntityType, EntityId), Vec<EntityId>>,
}

impl SecondLevelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, entity_type: EntityType, id: EntityId) -> Option<serde_json::Value> {
        self.entities
            .get(&(entity_type, id))
            .map(|entry| entry.value().clone())
    }

    pub fn put(&self, entity_type: EntityType, id: EntityId, value: serde_json::Value) {
        self.entities.insert((entity_type, id), value);
    }

    pub fn evict(&self, entity_type: EntityType, id: EntityId) {
        self.entities.remove(&(entity_type, id));
    }

    /// Cached children of type `child_type` owned by `owner_id`.
    pub fn get_collection(&self, child_type: EntityType, owner_id: EntityId) -> Option<Vec<EntityId>> {
        self.collections
            .get(&(child_type, owner_id))
            .map(|ids| ids.value().clone())
    }

    pub fn put_collection(&self, child_type: EntityType, owner_id: EntityId, ids: Vec<EntityId>) {
        self.collections.insert((child_type, owner_id), ids);
    }

    /// Drop every cached collection of `child_type`, for all owners.
    pub fn evict_collections(&self, child_type: EntityType) {
        self.collections.retain(|(ty, _), _| *ty != child_type);
    }

    /// Number of cached entities in one region.
    pub fn region_len(&self, entity_type: EntityType) -> usize {
        self.entities
            .iter()
            .filter(|entry| entry.key().0 == entity_type)
            .count()
    }

    /// Number of cached entities across all regions.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Evict every region. Returns the number of entries removed.
    pub fn evict_all(&self) -> usize {
        let removed = self.entities.len() + self.collections.len();
        self.entities.clear();
        self.collections.clear();
        removed
    }
}
