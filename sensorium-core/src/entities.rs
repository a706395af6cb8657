//! Domain entities exposed by the resource API.
//!
//! Entities carry no behavior beyond construction; persistence and caching
//! live in `sensorium-storage`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::enums::{AnalysisStatus, RequestPriority, RequestStatus, SensorKind, SensorStatus, SolutionStatus};
use crate::{new_entity_id, EntityId, Timestamp};

/// A field device producing measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Sensor {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub sensor_id: EntityId,
    pub name: String,
    pub kind: SensorKind,
    pub location: Option<String>,
    pub status: SensorStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Sensor {
    pub fn new(name: impl Into<String>, kind: SensorKind, location: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            sensor_id: new_entity_id(),
            name: name.into(),
            kind,
            location,
            status: SensorStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An analysis run over a sensor's readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Analysis {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub analysis_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub sensor_id: EntityId,
    pub summary: String,
    pub status: AnalysisStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Analysis {
    pub fn new(sensor_id: EntityId, summary: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            analysis_id: new_entity_id(),
            sensor_id,
            summary: summary.into(),
            status: AnalysisStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A request for action raised from an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceRequest {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub request_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = "uuid"))]
    pub analysis_id: Option<EntityId>,
    pub subject: String,
    pub body: String,
    pub priority: RequestPriority,
    pub status: RequestStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl ServiceRequest {
    pub fn new(
        analysis_id: Option<EntityId>,
        subject: impl Into<String>,
        body: impl Into<String>,
        priority: RequestPriority,
    ) -> Self {
        let now = Utc::now();
        Self {
            request_id: new_entity_id(),
            analysis_id,
            subject: subject.into(),
            body: body.into(),
            priority,
            status: RequestStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A reply to a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub response_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub request_id: EntityId,
    pub body: String,
    pub responder: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl ServiceResponse {
    pub fn new(request_id: EntityId, body: impl Into<String>, responder: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            response_id: new_entity_id(),
            request_id,
            body: body.into(),
            responder: responder.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A proposed resolution for a service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Solution {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub solution_id: EntityId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "uuid"))]
    pub request_id: EntityId,
    pub description: String,
    pub status: SolutionStatus,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub created_at: Timestamp,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = "date-time"))]
    pub updated_at: Timestamp,
}

impl Solution {
    pub fn new(request_id: EntityId, description: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            solution_id: new_entity_id(),
            request_id,
            description: description.into(),
            status: SolutionStatus::Proposed,
            created_at: now,
            updated_at: now,
        }
    }
}
