//! Generic CRUD route handlers for Component types.
//!
//! These handlers work with any type implementing [`Component`] and keep
//! the individual resource route files down to their request types and
//! validation rules.
//!
//! # Usage
//!
//! ```ignore
//! use super::generic::{children_route, crud_routes};
//!
//! pub fn create_router() -> Router<AppState> {
//!     crud_routes::<Sensor>()
//!         .route("/:id/analyses", get(children_route::<Sensor, Analysis>))
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sensorium_core::EntityId;
use sensorium_storage::{CacheableEntity, PersistenceUnit};

use crate::{
    component::Component,
    error::{ApiError, ApiResult},
    extractors::{ApiJson, PathId},
    state::AppState,
    types::ListResponse,
};

// ============================================================================
// GENERIC HANDLER HELPERS
// ============================================================================

/// Generic create handler - validates, checks the owner and persists.
pub async fn create_handler<C: Component>(
    unit: &PersistenceUnit,
    req: C::Create,
) -> ApiResult<(StatusCode, Json<C>)> {
    let entity = C::from_create(req)?;

    if let (Some(parent_type), Some(parent_id)) = (C::PARENT_TYPE, entity.parent_id()) {
        if !unit.exists(parent_type, parent_id).await? {
            return Err(ApiError::entity_not_found(&parent_type.to_string(), parent_id));
        }
    }

    unit.insert(&entity).await?;
    tracing::debug!(entity = C::ENTITY_NAME, id = %entity.entity_id(), "Created entity");
    Ok((StatusCode::CREATED, Json(entity)))
}

/// Generic get handler - retrieves an entity by ID.
pub async fn get_handler<C: Component>(unit: &PersistenceUnit, id: EntityId) -> ApiResult<Json<C>> {
    let entity = unit
        .find::<C>(id)
        .await?
        .ok_or_else(|| C::not_found_error(id))?;
    Ok(Json(entity))
}

/// Generic update handler - applies the update and returns the entity.
pub async fn update_handler<C: Component>(
    unit: &PersistenceUnit,
    id: EntityId,
    req: C::Update,
) -> ApiResult<Json<C>> {
    let mut entity = unit
        .find::<C>(id)
        .await?
        .ok_or_else(|| C::not_found_error(id))?;
    entity.apply_update(req)?;
    unit.update(&entity).await?;
    Ok(Json(entity))
}

/// Generic delete handler - deletes an entity.
pub async fn delete_handler<C: Component>(unit: &PersistenceUnit, id: EntityId) -> ApiResult<StatusCode> {
    unit.delete::<C>(id).await?;
    tracing::debug!(entity = C::ENTITY_NAME, %id, "Deleted entity");
    Ok(StatusCode::NO_CONTENT)
}

/// Generic list handler - lists every entity of the type.
pub async fn list_handler<C: Component>(unit: &PersistenceUnit) -> ApiResult<Json<ListResponse<C>>> {
    let entities = unit.list::<C>().await?;
    Ok(Json(ListResponse::new(entities)))
}

// ============================================================================
// GENERIC ROUTE FACTORY
// ============================================================================

/// Create a router with standard CRUD routes for a Component type.
///
/// # Routes Created
///
/// - `POST /` - Create entity
/// - `GET /` - List entities
/// - `GET /:id` - Get entity by ID
/// - `PUT /:id` - Update entity
/// - `DELETE /:id` - Delete entity
pub fn crud_routes<C: Component>() -> Router<AppState> {
    Router::new()
        .route("/", post(create_route::<C>).get(list_route::<C>))
        .route(
            "/:id",
            get(get_route::<C>)
                .put(update_route::<C>)
                .delete(delete_route::<C>),
        )
}

/// `GET /:id/<children>` - list the `C` children of parent `P`.
///
/// An unknown parent is a 404, not an empty list.
pub async fn children_route<P, C>(
    State(unit): State<Arc<PersistenceUnit>>,
    PathId(parent_id): PathId,
) -> ApiResult<Json<ListResponse<C>>>
where
    P: Component,
    C: CacheableEntity,
{
    if !unit.exists(P::entity_type(), parent_id).await? {
        return Err(P::not_found_error(parent_id));
    }
    let children = unit.children::<C>(parent_id).await?;
    Ok(Json(ListResponse::new(children)))
}

async fn create_route<C: Component>(
    State(unit): State<Arc<PersistenceUnit>>,
    ApiJson(req): ApiJson<C::Create>,
) -> ApiResult<impl IntoResponse> {
    create_handler::<C>(&unit, req).await
}

async fn list_route<C: Component>(State(unit): State<Arc<PersistenceUnit>>) -> ApiResult<impl IntoResponse> {
    list_handler::<C>(&unit).await
}

async fn get_route<C: Component>(
    State(unit): State<Arc<PersistenceUnit>>,
    PathId(id): PathId,
) -> ApiResult<impl IntoResponse> {
    get_handler::<C>(&unit, id).await
}

async fn update_route<C: Component>(
    State(unit): State<Arc<PersistenceUnit>>,
    PathId(id): PathId,
    ApiJson(req): ApiJson<C::Update>,
) -> ApiResult<impl IntoResponse> {
    update_handler::<C>(&unit, id, req).await
}

async fn delete_route<C: Component>(
    State(unit): State<Arc<PersistenceUnit>>,
    PathId(id): PathId,
) -> ApiResult<impl IntoResponse> {
    delete_handler::<C>(&unit, id).await
}
