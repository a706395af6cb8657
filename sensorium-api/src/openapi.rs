//! OpenAPI Specification for the Sensorium API
//!
//! Generated with utoipa from the route annotations and schema derives.
//! The generic CRUD routes carry no per-handler annotations; their request
//! and entity schemas are still listed so clients can generate models.

use utoipa::OpenApi;

use crate::error::ErrorEnvelope;
use crate::routes::{
    analysis::{CreateAnalysisRequest, UpdateAnalysisRequest},
    cache, enums, health,
    health::{ComponentHealth, HealthDetails, HealthResponse, HealthStatus},
    request::{CreateServiceRequest, UpdateServiceRequest},
    response::{CreateServiceResponse, UpdateServiceResponse},
    sensor::{CreateSensorRequest, UpdateSensorRequest},
    solution::{CreateSolutionRequest, UpdateSolutionRequest},
};
use crate::telemetry::metrics;
use crate::types::{CacheStatistics, EnumNamesResponse, EnumValuesResponse};

use sensorium_core::{
    Analysis, AnalysisStatus, RequestPriority, RequestStatus, Sensor, SensorKind, SensorStatus,
    ServiceRequest, ServiceResponse, Solution, SolutionStatus,
};

/// OpenAPI document for the Sensorium API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sensorium API",
        description = "Sensor analysis workflow resources and second-level cache administration",
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Cache", description = "Second-level cache statistics and eviction"),
        (name = "Enums", description = "Lookup enum values"),
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Observability", description = "Prometheus metrics")
    ),
    paths(
        cache::get_cache_statistics,
        cache::clear_cache,
        enums::list_enums,
        enums::get_enum,
        health::ping,
        health::liveness,
        health::readiness,
        metrics::metrics_handler,
    ),
    components(schemas(
        CacheStatistics,
        ErrorEnvelope,
        EnumNamesResponse,
        EnumValuesResponse,
        HealthResponse,
        HealthStatus,
        HealthDetails,
        ComponentHealth,
        Sensor,
        Analysis,
        ServiceRequest,
        ServiceResponse,
        Solution,
        SensorKind,
        SensorStatus,
        AnalysisStatus,
        RequestPriority,
        RequestStatus,
        SolutionStatus,
        CreateSensorRequest,
        UpdateSensorRequest,
        CreateAnalysisRequest,
        UpdateAnalysisRequest,
        CreateServiceRequest,
        UpdateServiceRequest,
        CreateServiceResponse,
        UpdateServiceResponse,
        CreateSolutionRequest,
        UpdateSolutionRequest,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_paths_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/cache/stats"));
        assert!(doc.paths.paths.contains_key("/cache/clear"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }

    #[test]
    fn test_statistics_schema_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.map(|c| c.schemas).unwrap_or_default();
        assert!(schemas.contains_key("CacheStatistics"));
        assert!(schemas.contains_key("ErrorEnvelope"));
    }

    #[test]
    fn test_entity_schemas_registered() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.map(|c| c.schemas).unwrap_or_default();
        for name in ["Sensor", "Analysis", "ServiceRequest", "ServiceResponse", "Solution"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
        assert!(schemas.contains_key("CreateAnalysisRequest"));
    }
}
