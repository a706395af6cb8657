//! Sensorium Test Utilities
//!
//! Centralized test infrastructure for the Sensorium workspace:
//! - A scriptable cache provider for monitor and endpoint tests
//! - Proptest generators for entities and statistics readings
//! - Test fixtures for common scenarios

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

// Re-export core types for convenience
pub use sensorium_core::{
    Analysis, AnalysisStatus, EntityId, EntityType, RequestPriority, RequestStatus, Sensor,
    SensorKind, SensorStatus, ServiceRequest, ServiceResponse, Solution, SolutionStatus,
    StorageError,
};
pub use sensorium_storage::{
    CacheProvider, PersistenceUnit, StatisticsReading, StorageConfig, StorageResult,
};

// ============================================================================
// MOCK CACHE PROVIDER
// ============================================================================

/// Cache provider whose statistics and availability are set by the test.
///
/// Counts every call so tests can assert that reads never evict and that
/// clears reach the provider exactly once per request.
#[derive(Debug)]
pub struct MockCacheProvider {
    reading: RwLock<StatisticsReading>,
    unavailable: AtomicBool,
    statistics_calls: AtomicUsize,
    evictions: AtomicUsize,
}

impl MockCacheProvider {
    pub fn new(reading: StatisticsReading) -> Self {
        Self {
            reading: RwLock::new(reading),
            unavailable: AtomicBool::new(false),
            statistics_calls: AtomicUsize::new(0),
            evictions: AtomicUsize::new(0),
        }
    }

    /// Provider reporting the given second-level hits and misses.
    pub fn with_hits_and_misses(hits: u64, misses: u64) -> Self {
        Self::new(StatisticsReading {
            second_level_cache_hit_count: hits,
            second_level_cache_miss_count: misses,
            statistics_enabled: true,
            ..Default::default()
        })
    }

    /// Provider with statistics disabled.
    pub fn disabled() -> Self {
        Self::new(StatisticsReading::default())
    }

    /// Provider that rejects every call.
    pub fn unavailable() -> Self {
        let provider = Self::new(StatisticsReading::default());
        provider.set_unavailable(true);
        provider
    }

    pub async fn set_reading(&self, reading: StatisticsReading) {
        *self.reading.write().await = reading;
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn statistics_calls(&self) -> usize {
        self.statistics_calls.load(Ordering::SeqCst)
    }

    pub fn evictions(&self) -> usize {
        self.evictions.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> StorageResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StorageError::unavailable("mock provider is unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Default for MockCacheProvider {
    fn default() -> Self {
        Self::new(StatisticsReading {
            statistics_enabled: true,
            ..Default::default()
        })
    }
}

#[async_trait]
impl CacheProvider for MockCacheProvider {
    async fn statistics(&self) -> StorageResult<StatisticsReading> {
        self.statistics_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(*self.reading.read().await)
    }

    async fn evict_all(&self) -> StorageResult<()> {
        self.check_available()?;
        self.evictions.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for Sensorium types.

    use super::*;
    use proptest::prelude::*;
    use uuid::Uuid;

    /// Generate a random UUID.
    pub fn arb_uuid() -> impl Strategy<Value = Uuid> {
        any::<[u8; 16]>().prop_map(Uuid::from_bytes)
    }

    pub fn arb_entity_type() -> impl Strategy<Value = EntityType> {
        prop::sample::select(EntityType::ALL.to_vec())
    }

    pub fn arb_sensor_kind() -> impl Strategy<Value = SensorKind> {
        prop_oneof![
            Just(SensorKind::Temperature),
            Just(SensorKind::Humidity),
            Just(SensorKind::Pressure),
            Just(SensorKind::Vibration),
            Just(SensorKind::Acoustic),
            Just(SensorKind::Optical),
        ]
    }

    pub fn arb_request_priority() -> impl Strategy<Value = RequestPriority> {
        prop_oneof![
            Just(RequestPriority::Low),
            Just(RequestPriority::Normal),
            Just(RequestPriority::High),
            Just(RequestPriority::Critical),
        ]
    }

    /// Non-blank display text.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z0-9][A-Za-z0-9 _-]{0,31}"
    }

    pub fn arb_sensor() -> impl Strategy<Value = Sensor> {
        (arb_text(), arb_sensor_kind(), proptest::option::of(arb_text()))
            .prop_map(|(name, kind, location)| Sensor::new(name, kind, location))
    }

    /// Statistics reading with arbitrary counters.
    pub fn arb_statistics_reading() -> impl Strategy<Value = StatisticsReading> {
        (any::<[u64; 8]>(), any::<bool>()).prop_map(|(c, enabled)| StatisticsReading {
            second_level_cache_hit_count: c[0],
            second_level_cache_miss_count: c[1],
            second_level_cache_put_count: c[2],
            query_cache_hit_count: c[3],
            query_cache_miss_count: c[4],
            query_cache_put_count: c[5],
            entity_fetch_count: c[6],
            collection_fetch_count: c[7],
            statistics_enabled: enabled,
        })
    }

    /// Sequence of cache reads: `(sensor index, use list query)`.
    pub fn arb_read_sequence(sensors: usize) -> impl Strategy<Value = Vec<(usize, bool)>> {
        prop::collection::vec((0..sensors.max(1), any::<bool>()), 0..64)
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use std::sync::Arc;

    use super::*;

    /// Open persistence unit with default configuration.
    pub fn open_unit() -> Arc<PersistenceUnit> {
        Arc::new(PersistenceUnit::new(StorageConfig::default()))
    }

    /// Open persistence unit with statistics disabled.
    pub fn unit_without_statistics() -> Arc<PersistenceUnit> {
        Arc::new(PersistenceUnit::new(StorageConfig::default().with_statistics(false)))
    }

    pub fn temperature_sensor() -> Sensor {
        Sensor::new("boiler-inlet", SensorKind::Temperature, Some("plant 1".to_string()))
    }

    /// Sensor with one analysis, one request raised from it, and one
    /// response plus one solution on that request, all persisted.
    pub async fn seeded_workflow(
        unit: &PersistenceUnit,
    ) -> StorageResult<(Sensor, Analysis, ServiceRequest)> {
        let sensor = temperature_sensor();
        unit.insert(&sensor).await?;

        let analysis = Analysis::new(sensor.sensor_id, "Inlet temperature drifts upward");
        unit.insert(&analysis).await?;

        let request = ServiceRequest::new(
            Some(analysis.analysis_id),
            "Recalibrate inlet probe",
            "Drift exceeds tolerance after 48h",
            RequestPriority::High,
        );
        unit.insert(&request).await?;

        unit.insert(&ServiceResponse::new(request.request_id, "Scheduled for Monday", "ops"))
            .await?;
        unit.insert(&Solution::new(request.request_id, "Replace probe gasket"))
            .await?;

        Ok((sensor, analysis, request))
    }
}
