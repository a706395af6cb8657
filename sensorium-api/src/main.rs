//! Sensorium API Server Entry Point
//!
//! Bootstraps configuration, opens the persistence unit and starts the
//! Axum HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use sensorium_api::server::{serve_until, shutdown_signal};
use sensorium_api::telemetry::{init_tracing, TelemetryConfig};
use sensorium_api::{ApiConfig, ApiError, ApiResult, ApiRouterBuilder, AppState};
use sensorium_storage::{PersistenceUnit, StorageConfig};

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracing(&telemetry_config)?;

    let storage_config = StorageConfig::from_env();
    let unit = Arc::new(PersistenceUnit::new(storage_config));

    let api_config = ApiConfig::from_env();
    let app = ApiRouterBuilder::new(AppState::new(unit.clone()), api_config)?
        .with_metrics(telemetry_config.metrics_enabled)
        .build();

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Sensorium API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    serve_until(listener, app, shutdown_signal()).await?;

    unit.close();
    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("SENSORIUM_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("SENSORIUM_API_PORT").ok())
        .unwrap_or_else(|| "3000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
