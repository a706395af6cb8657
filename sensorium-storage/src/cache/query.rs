//! Query result cache.
//!
//! Maps a query key to the ordered ids it produced. Results are resolved
//! back to entities through the second-level cache, so only ids are kept
//! here. Any write to an entity type invalidates every query over it.

use dashmap::DashMap;
use sensorium_core::{EntityId, EntityType};

/// Identifies a cached query: the entity type it reads plus a query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub entity_type: EntityType,
    pub query: String,
}

impl QueryKey {
    pub fn new(entity_type: EntityType, query: impl Into<String>) -> Self {
        Self {
            entity_type,
            query: query.into(),
        }
    }

    /// Key for the unfiltered listing of an entity type.
    pub fn list_all(entity_type: EntityType) -> Self {
        Self::new(entity_type, "all")
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    results: DashMap<QueryKey, Vec<EntityId>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Vec<EntityId>> {
        self.results.get(key).map(|ids| ids.value().clone())
    }

    pub fn put(&self, key: QueryKey, ids: Vec<EntityId>) {
        self.results.insert(key, ids);
    }

    /// Drop every cached query over `entity_type`.
    pub fn invalidate(&self, entity_type: EntityType) {
        self.results.retain(|key, _| key.entity_type != entity_type);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Remove every cached query. Returns the number removed.
    pub fn clear(&self) -> usize {
        let removed = self.results.len();
        self.results.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_invalidate_is_per_entity_type() {
        let cache = QueryCache::new();
        let ids = vec![Uuid::now_v7(), Uuid::now_v7()];
        cache.put(QueryKey::list_all(EntityType::Sensor), ids.clone());
        cache.put(QueryKey::list_all(EntityType::Solution), vec![]);

        assert_eq!(cache.get(&QueryKey::list_all(EntityType::Sensor)), Some(ids));

        cache.invalidate(EntityType::Sensor);
        assert!(cache.get(&QueryKey::list_all(EntityType::Sensor)).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let cache = QueryCache::new();
        cache.put(QueryKey::new(EntityType::Request, "status=OPEN"), vec![]);
        cache.put(QueryKey::list_all(EntityType::Request), vec![]);
        assert_eq!(cache.clear(), 2);
        assert!(cache.is_empty());
    }
}
