//! Sensorium Core - Domain Types
//!
//! Plain data types shared by the storage provider and the API layer:
//! entities, lookup enums, identifiers and the error taxonomy.
//! This crate performs no I/O.

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod entities;
pub mod enums;
pub mod error;

/// Identifier for every persisted entity (UUIDv7, time-sortable).
pub type EntityId = Uuid;

/// Timestamp type used across all entities.
pub type Timestamp = DateTime<Utc>;

/// Generate a new time-sortable entity identifier.
pub fn new_entity_id() -> EntityId {
    Uuid::now_v7()
}

pub use entities::{Analysis, Sensor, ServiceRequest, ServiceResponse, Solution};
pub use enums::{
    lookup_variants, AnalysisStatus, EntityType, EnumParseError, LookupEnum, RequestPriority,
    RequestStatus, SensorKind, SensorStatus, SolutionStatus, LOOKUP_ENUM_NAMES,
};
pub use error::{SensoriumError, SensoriumResult, StorageError, ValidationError};
