//! Authoritative in-memory entity tables.
//!
//! One table per [`EntityType`]; rows are stored dehydrated as JSON together
//! with the owning entity id so child collections can be loaded without
//! decoding every row. `BTreeMap` keyed by UUIDv7 keeps rows in creation
//! order.

use std::collections::{BTreeMap, HashMap};

use sensorium_core::{EntityId, EntityType, StorageError};
use tokio::sync::RwLock;

use crate::StorageResult;

#[derive(Debug, Clone)]
struct Row {
    parent_id: Option<EntityId>,
    value: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct EntityStore {
    tables: RwLock<HashMap<EntityType, BTreeMap<EntityId, Row>>>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(
        &self,
        entity_type: EntityType,
        id: EntityId,
        parent_id: Option<EntityId>,
        value: serde_json::Value,
    ) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        let table = tables.entry(entity_type).or_default();
        if table.contains_key(&id) {
            return Err(StorageError::AlreadyExists { entity_type, id });
        }
        table.insert(id, Row { parent_id, value });
        Ok(())
    }

    pub async fn replace(
        &self,
        entity_type: EntityType,
        id: EntityId,
        parent_id: Option<EntityId>,
        value: serde_json::Value,
    ) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        let row = tables
            .get_mut(&entity_type)
            .and_then(|table| table.get_mut(&id))
            .ok_or(StorageError::NotFound { entity_type, id })?;
        *row = Row { parent_id, value };
        Ok(())
    }

    pub async fn remove(&self, entity_type: EntityType, id: EntityId) -> StorageResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .get_mut(&entity_type)
            .and_then(|table| table.remove(&id))
            .map(|_| ())
            .ok_or(StorageError::NotFound { entity_type, id })
    }

    pub async fn load(&self, entity_type: EntityType, id: EntityId) -> Option<serde_json::Value> {
        self.load_and(entity_type, id, |_| ()).await
    }

    /// Load a row and hand it to `publish` while the table is still
    /// read-locked.
    ///
    /// Writers evict cached copies only after their write lock is released,
    /// so whatever `publish` caches is either current or evicted afterwards.
    pub async fn load_and<F>(&self, entity_type: EntityType, id: EntityId, publish: F) -> Option<serde_json::Value>
    where
        F: FnOnce(&serde_json::Value),
    {
        let tables = self.tables.read().await;
        let value = tables
            .get(&entity_type)
            .and_then(|table| table.get(&id))
            .map(|row| row.value.clone())?;
        publish(&value);
        Some(value)
    }

    /// Ids of every row of `entity_type`, in creation order.
    pub async fn load_ids(&self, entity_type: EntityType) -> Vec<EntityId> {
        self.load_ids_and(entity_type, |_| ()).await
    }

    /// [`load_ids`](Self::load_ids), publishing under the read lock.
    pub async fn load_ids_and<F>(&self, entity_type: EntityType, publish: F) -> Vec<EntityId>
    where
        F: FnOnce(&[EntityId]),
    {
        let tables = self.tables.read().await;
        let ids: Vec<EntityId> = tables
            .get(&entity_type)
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default();
        publish(&ids);
        ids
    }

    /// Ids of rows of `entity_type` owned by `parent_id`, in creation order.
    pub async fn load_children(&self, entity_type: EntityType, parent_id: EntityId) -> Vec<EntityId> {
        self.load_children_and(entity_type, parent_id, |_| ()).await
    }

    /// [`load_children`](Self::load_children), publishing under the read lock.
    pub async fn load_children_and<F>(&self, entity_type: EntityType, parent_id: EntityId, publish: F) -> Vec<EntityId>
    where
        F: FnOnce(&[EntityId]),
    {
        let tables = self.tables.read().await;
        let ids: Vec<EntityId> = tables
            .get(&entity_type)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, row)| row.parent_id == Some(parent_id))
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default();
        publish(&ids);
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_insert_and_load() -> StorageResult<()> {
        let store = EntityStore::new();
        let id = Uuid::now_v7();
        store.insert(EntityType::Sensor, id, None, json!({"n": 1})).await?;
        assert_eq!(store.load(EntityType::Sensor, id).await, Some(json!({"n": 1})));

        let dup = store.insert(EntityType::Sensor, id, None, json!({})).await;
        assert!(matches!(dup, Err(StorageError::AlreadyExists { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_replace_and_remove_missing() {
        let store = EntityStore::new();
        let id = Uuid::now_v7();
        let replaced = store.replace(EntityType::Analysis, id, None, json!({})).await;
        assert!(matches!(replaced, Err(StorageError::NotFound { .. })));
        let removed = store.remove(EntityType::Analysis, id).await;
        assert!(matches!(removed, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_children_filtered_by_parent() -> StorageResult<()> {
        let store = EntityStore::new();
        let parent = Uuid::now_v7();
        let first = Uuid::now_v7();
        let second = Uuid::now_v7();
        let other = Uuid::now_v7();
        store.insert(EntityType::Analysis, first, Some(parent), json!({})).await?;
        store.insert(EntityType::Analysis, other, Some(Uuid::now_v7()), json!({})).await?;
        store.insert(EntityType::Analysis, second, Some(parent), json!({})).await?;

        let children = store.load_children(EntityType::Analysis, parent).await;
        assert_eq!(children.len(), 2);
        assert!(children.contains(&first) && children.contains(&second));
        assert_eq!(store.load_ids(EntityType::Analysis).await.len(), 3);
        assert!(store.load_ids(EntityType::Solution).await.is_empty());
        Ok(())
    }
}
