//! Lookup enum REST API Routes
//!
//! Read-only listing of the enum values accepted by the resource
//! endpoints, so clients can populate pickers without hardcoding them.

use axum::{extract::Path, routing::get, Json, Router};
use sensorium_core::{lookup_variants, LOOKUP_ENUM_NAMES};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use crate::types::{EnumNamesResponse, EnumValuesResponse};

/// GET /api/v1/enums - Names of every lookup enum
#[utoipa::path(
    get,
    path = "/api/v1/enums",
    tag = "Enums",
    responses(
        (status = 200, description = "Lookup enum names", body = EnumNamesResponse),
    ),
)]
pub async fn list_enums() -> Json<EnumNamesResponse> {
    Json(EnumNamesResponse {
        names: LOOKUP_ENUM_NAMES.iter().map(|n| n.to_string()).collect(),
    })
}

/// GET /api/v1/enums/{name} - Values of one lookup enum
#[utoipa::path(
    get,
    path = "/api/v1/enums/{name}",
    tag = "Enums",
    params(("name" = String, Path, description = "Enum name, e.g. sensor_kind")),
    responses(
        (status = 200, description = "Enum values", body = EnumValuesResponse),
        (status = 404, description = "Unknown enum", body = crate::error::ErrorEnvelope),
    ),
)]
pub async fn get_enum(Path(name): Path<String>) -> ApiResult<Json<EnumValuesResponse>> {
    let values = lookup_variants(&name).ok_or_else(|| ApiError::enum_not_found(&name))?;
    Ok(Json(EnumValuesResponse {
        name,
        values: values.into_iter().map(str::to_string).collect(),
    }))
}

/// Create the enum routes router.
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enums))
        .route("/:name", get(get_enum))
}
