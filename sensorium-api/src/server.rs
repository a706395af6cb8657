//! HTTP server lifecycle.

use std::future::Future;

use axum::Router;
use tokio::net::TcpListener;

use crate::error::{ApiError, ApiResult};

/// Serve `app` until `shutdown` resolves, then stop accepting connections
/// and wait for in-flight requests to finish.
pub async fn serve_until<F>(listener: TcpListener, app: Router, shutdown: F) -> ApiResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining in-flight requests");
}
