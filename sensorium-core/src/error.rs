//! Error types for Sensorium operations

use crate::EntityType;
use thiserror::Error;
use uuid::Uuid;

/// Persistence provider errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: EntityType, id: Uuid },

    #[error("Entity already exists: {entity_type} with id {id}")]
    AlreadyExists { entity_type: EntityType, id: Uuid },

    /// The provider has not been opened or has already been closed.
    #[error("Persistence provider unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("Serialization failed for {entity_type}: {reason}")]
    Serialization {
        entity_type: EntityType,
        reason: String,
    },
}

impl StorageError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        StorageError::Unavailable {
            reason: reason.into(),
        }
    }
}

/// Validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredFieldMissing { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Master error type for all Sensorium errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SensoriumError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for Sensorium operations.
pub type SensoriumResult<T> = Result<T, SensoriumError>;
