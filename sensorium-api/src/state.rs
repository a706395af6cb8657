//! Shared application state for Axum routers.

use std::sync::Arc;

use sensorium_storage::{CacheProvider, PersistenceUnit};

use crate::monitor::CacheMonitor;

/// Application-wide state shared across all routes.
///
/// Built once at startup; handlers receive clones through axum state.
#[derive(Clone)]
pub struct AppState {
    /// Persistence unit backing the resource endpoints.
    pub unit: Arc<PersistenceUnit>,
    /// Monitor over the cache provider. Usually the same unit as `unit`.
    pub monitor: CacheMonitor,
    pub start_time: std::time::Instant,
}

impl AppState {
    /// State whose monitor reports on the persistence unit itself.
    pub fn new(unit: Arc<PersistenceUnit>) -> Self {
        let provider: Arc<dyn CacheProvider> = unit.clone();
        Self::with_provider(unit, provider)
    }

    /// State with a separately injected cache provider.
    pub fn with_provider(unit: Arc<PersistenceUnit>, provider: Arc<dyn CacheProvider>) -> Self {
        Self {
            unit,
            monitor: CacheMonitor::new(provider),
            start_time: std::time::Instant::now(),
        }
    }
}

crate::impl_from_ref!(Arc<PersistenceUnit>, unit);
crate::impl_from_ref!(CacheMonitor, monitor);
crate::impl_from_ref!(std::time::Instant, start_time);
