//! Property-Based Tests for Cache Statistics
//!
//! - Any sequence of reads leaves every counter non-decreasing and the
//!   second-level hit/miss total equal to the number of entity lookups.
//! - A disabled reading always snapshots to all-zero counters.
//! - Clearing never changes a counter.

use std::sync::Arc;

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use sensorium_api::{CacheMonitor, CacheStatistics};
use sensorium_core::Sensor;
use sensorium_storage::{PersistenceUnit, StatisticsReading};
use sensorium_test_utils::{fixtures, generators, MockCacheProvider};

fn runtime() -> Result<tokio::runtime::Runtime, TestCaseError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| TestCaseError::fail(format!("runtime: {e}")))
}

fn fail<E: std::fmt::Display>(e: E) -> TestCaseError {
    TestCaseError::fail(e.to_string())
}

fn counters(stats: &CacheStatistics) -> [u64; 8] {
    [
        stats.second_level_cache_hit_count,
        stats.second_level_cache_miss_count,
        stats.second_level_cache_put_count,
        stats.query_cache_hit_count,
        stats.query_cache_miss_count,
        stats.query_cache_put_count,
        stats.entity_fetch_count,
        stats.collection_fetch_count,
    ]
}

async fn seed(unit: &PersistenceUnit, sensors: &[Sensor]) -> Result<(), TestCaseError> {
    for sensor in sensors {
        unit.insert(sensor).await.map_err(fail)?;
    }
    Ok(())
}

async fn check_reads(sensors: Vec<Sensor>, reads: Vec<(usize, bool)>) -> Result<(), TestCaseError> {
    let unit = fixtures::open_unit();
    seed(&unit, &sensors).await?;
    let monitor = CacheMonitor::new(unit.clone());

    let mut previous = counters(&monitor.statistics().await.map_err(fail)?);
    let mut lookups = 0u64;
    for (index, use_list) in &reads {
        if *use_list {
            let listed = unit.list::<Sensor>().await.map_err(fail)?;
            lookups += listed.len() as u64;
        } else {
            let sensor = &sensors[index % sensors.len()];
            let _: Option<Sensor> = unit.find(sensor.sensor_id).await.map_err(fail)?;
            lookups += 1;
        }

        let current = counters(&monitor.statistics().await.map_err(fail)?);
        for (before, after) in previous.iter().zip(current.iter()) {
            prop_assert!(after >= before);
        }
        previous = current;
    }

    let stats = monitor.statistics().await.map_err(fail)?;
    prop_assert_eq!(
        stats.second_level_cache_hit_count + stats.second_level_cache_miss_count,
        lookups
    );
    prop_assert!(stats.entity_fetch_count <= sensors.len() as u64);
    Ok(())
}

async fn check_clears(reading: StatisticsReading, clears: usize) -> Result<(), TestCaseError> {
    let provider = Arc::new(MockCacheProvider::new(reading));
    let monitor = CacheMonitor::new(provider.clone());

    let before = monitor.statistics().await.map_err(fail)?;
    for _ in 0..clears {
        monitor.clear_all().await.map_err(fail)?;
    }
    let after = monitor.statistics().await.map_err(fail)?;

    prop_assert_eq!(before, after);
    prop_assert_eq!(provider.evictions(), clears);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn counters_never_decrease(
        sensors in prop::collection::vec(generators::arb_sensor(), 1..6),
        reads in generators::arb_read_sequence(6),
    ) {
        runtime()?.block_on(check_reads(sensors, reads))?;
    }

    #[test]
    fn disabled_reading_snapshots_to_zero(reading in generators::arb_statistics_reading()) {
        let snapshot = CacheStatistics::from_reading(reading);
        if reading.statistics_enabled {
            prop_assert_eq!(snapshot.second_level_cache_hit_count, reading.second_level_cache_hit_count);
            prop_assert_eq!(snapshot.collection_fetch_count, reading.collection_fetch_count);
            prop_assert!(snapshot.statistics_enabled);
        } else {
            prop_assert_eq!(counters(&snapshot), [0u64; 8]);
            prop_assert!(!snapshot.statistics_enabled);
        }
    }

    #[test]
    fn clear_never_changes_counters(reading in generators::arb_statistics_reading(), clears in 1usize..5) {
        runtime()?.block_on(check_clears(reading, clears))?;
    }
}
