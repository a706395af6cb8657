//! Sensorium API - REST Layer
//!
//! Exposes the sensor analysis resources over REST (Axum) together with
//! the cache administration endpoints:
//!
//! - `GET /cache/stats` returns the second-level cache statistics snapshot
//! - `POST /cache/clear` evicts every cached region
//!
//! Every failure, including unknown routes, unsupported methods and handler
//! panics, is rendered
//! as one JSON error envelope (see [`error`]).

pub mod component;
pub mod config;
pub mod error;
pub mod extractors;
pub mod macros;
pub mod monitor;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCategory, ErrorCode, ErrorEnvelope};
pub use monitor::CacheMonitor;
pub use openapi::ApiDoc;
pub use routes::{create_api_router, create_test_router, ApiRouterBuilder};
pub use state::AppState;
pub use types::*;
