//! Sensorium Telemetry - Observability Infrastructure
//!
//! Provides structured tracing and Prometheus metrics for the API layer.
//! Nothing here needs an external collector.

pub mod metrics;
pub mod middleware;
pub mod tracer;

pub use metrics::{metrics_handler, SensoriumMetrics, METRICS};
pub use middleware::observability_middleware;
pub use tracer::{init_tracing, TelemetryConfig};
