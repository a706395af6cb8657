//! Cache Administration Routes
//!
//! - `GET /cache/stats` - snapshot of the second-level cache statistics
//! - `POST /cache/clear` - evict every region
//!
//! Both delegate to the [`CacheMonitor`]; provider failures surface as the
//! standard error envelope.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::ApiResult;
use crate::monitor::CacheMonitor;
use crate::state::AppState;
use crate::telemetry::metrics::record_cache_operation;
use crate::types::CacheStatistics;

/// Body returned by a successful clear.
pub const CACHE_CLEARED: &str = "Cache cleared";

/// GET /cache/stats - Current cache statistics
#[utoipa::path(
    get,
    path = "/cache/stats",
    tag = "Cache",
    responses(
        (status = 200, description = "Statistics snapshot", body = CacheStatistics),
        (status = 500, description = "Persistence provider unavailable", body = crate::error::ErrorEnvelope),
    ),
)]
pub async fn get_cache_statistics(State(monitor): State<CacheMonitor>) -> ApiResult<Json<CacheStatistics>> {
    let result = monitor.statistics().await;
    record_cache_operation("stats", result.is_ok());
    Ok(Json(result?))
}

/// POST /cache/clear - Evict all cached entries
///
/// Counters are left untouched. Idempotent.
#[utoipa::path(
    post,
    path = "/cache/clear",
    tag = "Cache",
    responses(
        (status = 200, description = "Cache cleared", body = String, content_type = "text/plain"),
        (status = 500, description = "Persistence provider unavailable", body = crate::error::ErrorEnvelope),
    ),
)]
pub async fn clear_cache(State(monitor): State<CacheMonitor>) -> ApiResult<(StatusCode, &'static str)> {
    let result = monitor.clear_all().await;
    record_cache_operation("clear", result.is_ok());
    result?;
    Ok((StatusCode::OK, CACHE_CLEARED))
}

/// Create the cache routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_cache_statistics))
        .route("/clear", post(clear_cache))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use sensorium_storage::{PersistenceUnit, StorageConfig};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_clear_returns_text() -> ApiResult<()> {
        let unit = Arc::new(PersistenceUnit::new(StorageConfig::default()));
        let (status, body) = clear_cache(State(CacheMonitor::new(unit))).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Cache cleared");
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_on_closed_unit() {
        let unit = Arc::new(PersistenceUnit::new(StorageConfig::default()));
        unit.close();
        let err = get_cache_statistics(State(CacheMonitor::new(unit))).await.err();
        assert_eq!(err.map(|e| e.code), Some(ErrorCode::ProviderUnavailable));
    }
}
