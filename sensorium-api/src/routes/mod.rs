//! REST API Routes Module
//!
//! Includes:
//! - Resource CRUD routes (sensors, analyses, requests, responses, solutions)
//! - Lookup enum listings
//! - Cache administration (`/cache/stats`, `/cache/clear`)
//! - Health check endpoints (Kubernetes-compatible)
//! - Prometheus metrics and the OpenAPI document
//! - CORS support for browser-based clients

pub mod analysis;
pub mod cache;
pub mod enums;
pub mod generic;
pub mod health;
pub mod request;
pub mod response;
pub mod sensor;
pub mod solution;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
};

use crate::config::ApiConfig;
use crate::error::{method_not_allowed, panic_response, route_not_found, ApiError, ApiResult};
use crate::state::AppState;
use crate::telemetry::{metrics_handler, observability_middleware};

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
#[cfg(feature = "openapi")]
async fn openapi_json() -> impl axum::response::IntoResponse {
    use utoipa::OpenApi;
    axum::Json(crate::openapi::ApiDoc::openapi())
}

// ============================================================================
// PRODUCTION VALIDATION
// ============================================================================

/// Check if running in a production environment.
fn is_production_environment() -> bool {
    std::env::var("SENSORIUM_ENVIRONMENT")
        .map(|e| matches!(e.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

/// Validate API configuration for production use.
fn validate_api_config_for_production(config: &ApiConfig) -> ApiResult<()> {
    if config.cors_origins.is_empty() {
        return Err(ApiError::invalid_input(
            "CORS origins not configured for production. Set SENSORIUM_CORS_ORIGINS.",
        ));
    }
    Ok(())
}

// ============================================================================
// ROUTER BUILDER
// ============================================================================

/// Builder for the complete API router.
///
/// Every route, including the fallback, is wrapped by:
/// 1. CORS (outermost) - handles preflight requests
/// 2. Observability - tracing and metrics
/// 3. Panic catching - renders the 500 envelope
pub struct ApiRouterBuilder {
    state: AppState,
    api_config: ApiConfig,
    metrics_enabled: bool,
}

impl ApiRouterBuilder {
    /// Create a new builder.
    ///
    /// In production environments this validates the CORS configuration
    /// and refuses to build without explicit origins.
    pub fn new(state: AppState, api_config: ApiConfig) -> ApiResult<Self> {
        if is_production_environment() {
            validate_api_config_for_production(&api_config)?;
        }
        Ok(Self {
            state,
            api_config,
            metrics_enabled: true,
        })
    }

    /// Toggle the `/metrics` endpoint.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// Resource routes mounted under `/api/v1`.
    fn build_resource_routes() -> Router<AppState> {
        Router::new()
            .nest("/sensors", sensor::create_router())
            .nest("/analyses", analysis::create_router())
            .nest("/requests", request::create_router())
            .nest("/responses", response::create_router())
            .nest("/solutions", solution::create_router())
            .nest("/enums", enums::create_router())
    }

    /// Build the complete router.
    pub fn build(self) -> Router {
        let mut router = Router::new()
            .nest("/api/v1", Self::build_resource_routes())
            .nest("/cache", cache::create_router())
            .nest("/health", health::create_router());

        if self.metrics_enabled {
            router = router.route("/metrics", get(metrics_handler));
        }

        #[cfg(feature = "openapi")]
        {
            router = router.route("/openapi.json", get(openapi_json));
        }

        #[cfg(feature = "swagger-ui")]
        {
            use utoipa::OpenApi;
            use utoipa_swagger_ui::SwaggerUi;
            router = router.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", crate::openapi::ApiDoc::openapi()),
            );
        }

        let cors = build_cors_layer(&self.api_config);

        // Applies to every route registered above, so it must come last
        router
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(route_not_found)
            .with_state(self.state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(from_fn(observability_middleware))
            .layer(cors)
    }
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(config.cors_max_age_secs));

    if config.cors_origins.is_empty() {
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any).allow_headers(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        if config.cors_allow_credentials {
            cors.allow_origin(origins).allow_credentials(true)
        } else {
            cors.allow_origin(origins)
        }
    }
}

/// Create the complete API router.
///
/// - Resource routes under /api/v1/*
/// - Cache administration at /cache/*
/// - Health checks at /health/*
/// - Metrics at /metrics
/// - OpenAPI spec at /openapi.json (openapi feature)
/// - Swagger UI at /swagger-ui (swagger-ui feature)
///
/// Unknown paths render the 404 envelope; known paths hit with the wrong
/// method render the 400 envelope.
pub fn create_api_router(state: AppState, api_config: &ApiConfig) -> ApiResult<Router> {
    Ok(ApiRouterBuilder::new(state, api_config.clone())?.build())
}

/// Router with default configuration and no production checks, for tests.
pub fn create_test_router(state: AppState) -> Router {
    ApiRouterBuilder {
        state,
        api_config: ApiConfig::default(),
        metrics_enabled: true,
    }
    .build()
}
