//! Cache monitor: read and clear the persistence provider's cache.
//!
//! The monitor holds only a handle to the provider. It does not catch or
//! reinterpret provider failures; they propagate to the caller as
//! [`StorageError`].

use std::sync::Arc;

use sensorium_core::StorageError;
use sensorium_storage::CacheProvider;

use crate::types::CacheStatistics;

#[derive(Clone)]
pub struct CacheMonitor {
    provider: Arc<dyn CacheProvider>,
}

impl CacheMonitor {
    pub fn new(provider: Arc<dyn CacheProvider>) -> Self {
        Self { provider }
    }

    /// Snapshot the provider's statistics.
    ///
    /// Never mutates provider state. Counters read as zero when the
    /// provider has statistics disabled.
    pub async fn statistics(&self) -> Result<CacheStatistics, StorageError> {
        let reading = self.provider.statistics().await?;
        let snapshot = CacheStatistics::from_reading(reading);
        tracing::debug!(
            statistics_enabled = snapshot.statistics_enabled,
            second_level_hits = snapshot.second_level_cache_hit_count,
            second_level_misses = snapshot.second_level_cache_miss_count,
            "Read cache statistics"
        );
        Ok(snapshot)
    }

    /// Evict every cached entry in every region. Counters are not reset.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        self.provider.evict_all().await?;
        tracing::info!("Second-level cache cleared");
        Ok(())
    }
}

impl std::fmt::Debug for CacheMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheMonitor").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorium_core::{Sensor, SensorKind};
    use sensorium_storage::{PersistenceUnit, StorageConfig};

    fn monitor_over(unit: Arc<PersistenceUnit>) -> CacheMonitor {
        CacheMonitor::new(unit)
    }

    #[tokio::test]
    async fn test_statistics_reflect_traffic() -> Result<(), StorageError> {
        let unit = Arc::new(PersistenceUnit::new(StorageConfig::default()));
        let sensor = Sensor::new("m1", SensorKind::Temperature, None);
        unit.insert(&sensor).await?;
        let _: Option<Sensor> = unit.find(sensor.sensor_id).await?;
        let _: Option<Sensor> = unit.find(sensor.sensor_id).await?;

        let stats = monitor_over(unit).statistics().await?;
        assert!(stats.statistics_enabled);
        assert_eq!(stats.second_level_cache_hit_count, 1);
        assert_eq!(stats.second_level_cache_miss_count, 1);
        assert_eq!(stats.entity_fetch_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_does_not_reset_counters() -> Result<(), StorageError> {
        let unit = Arc::new(PersistenceUnit::new(StorageConfig::default()));
        let sensor = Sensor::new("m2", SensorKind::Pressure, None);
        unit.insert(&sensor).await?;
        let _: Option<Sensor> = unit.find(sensor.sensor_id).await?;

        let monitor = monitor_over(unit.clone());
        let before = monitor.statistics().await?;
        monitor.clear_all().await?;
        monitor.clear_all().await?;
        let after = monitor.statistics().await?;

        assert_eq!(before, after);
        assert_eq!(unit.second_level_cache().entity_count(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_disabled_statistics_are_zero() -> Result<(), StorageError> {
        let unit = Arc::new(PersistenceUnit::new(StorageConfig::default()));
        let sensor = Sensor::new("m3", SensorKind::Optical, None);
        unit.insert(&sensor).await?;
        let _: Option<Sensor> = unit.find(sensor.sensor_id).await?;
        unit.set_statistics_enabled(false);

        let stats = monitor_over(unit).statistics().await?;
        assert_eq!(stats, CacheStatistics::disabled());
        assert!(!stats.statistics_enabled);
        Ok(())
    }

    #[tokio::test]
    async fn test_unavailable_provider_propagates() {
        let unit = Arc::new(PersistenceUnit::unstarted(StorageConfig::default()));
        let monitor = monitor_over(unit);
        assert!(matches!(
            monitor.statistics().await,
            Err(StorageError::Unavailable { .. })
        ));
        assert!(matches!(
            monitor.clear_all().await,
            Err(StorageError::Unavailable { .. })
        ));
    }
}
