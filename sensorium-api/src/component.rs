//! Component trait for generic CRUD operations.
//!
//! Every resource exposed under `/api/v1` implements [`Component`], which
//! lets the five resources share one set of create/get/list/update/delete
//! handlers in [`crate::routes::generic`].
//!
//! # Pattern
//!
//! Each entity provides:
//! - Create/Update request types
//! - Construction of a new entity from a validated create request
//! - Application of a validated update request
//! - The entity type of its owner, if it has one
//!
//! Persistence itself is the [`PersistenceUnit`](sensorium_storage::PersistenceUnit)'s
//! job; components never touch the caches directly.

use sensorium_core::{EntityId, EntityType, ValidationError};
use sensorium_storage::CacheableEntity;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

// ============================================================================
// COMPONENT TRAIT
// ============================================================================

/// A resource that can be managed through the generic CRUD handlers.
pub trait Component: CacheableEntity {
    /// Request body for creating new entities.
    type Create: DeserializeOwned + Send + 'static;

    /// Request body for updating entities.
    type Update: DeserializeOwned + Send + 'static;

    /// Entity name used in error messages (e.g., "Sensor").
    const ENTITY_NAME: &'static str;

    /// Type of the owning entity, checked for existence on create.
    const PARENT_TYPE: Option<EntityType> = None;

    /// Build a new entity from a create request.
    fn from_create(req: Self::Create) -> ApiResult<Self>;

    /// Apply an update request in place. Implementations must bump
    /// `updated_at`.
    fn apply_update(&mut self, req: Self::Update) -> ApiResult<()>;

    /// Create a not-found error for this entity type.
    fn not_found_error(id: EntityId) -> ApiError {
        ApiError::entity_not_found(Self::ENTITY_NAME, id)
    }
}

// ============================================================================
// VALIDATION HELPERS
// ============================================================================

/// Trimmed value of a required text field.
pub fn require_text(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredFieldMissing {
            field: field.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Trimmed value of an optional text field in an update request.
///
/// Absent means "leave unchanged"; present but blank is rejected.
pub fn optional_text(field: &str, value: Option<&str>) -> Result<Option<String>, ValidationError> {
    match value {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: "must not be blank".to_string(),
        }),
        Some(v) => Ok(Some(v.trim().to_string())),
    }
}
