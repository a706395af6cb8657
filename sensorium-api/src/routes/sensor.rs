//! Sensor REST API Routes
//!
//! Sensors are the root resource; analyses hang off them.

use axum::{routing::get, Router};
use chrono::Utc;
use sensorium_core::{Analysis, Sensor, SensorKind, SensorStatus};
use serde::{Deserialize, Serialize};

use super::generic::{children_route, crud_routes};
use crate::component::{optional_text, require_text, Component};
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// REQUEST TYPES
// ============================================================================

/// Request to register a sensor.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateSensorRequest {
    pub name: String,
    pub kind: SensorKind,
    #[serde(default)]
    pub location: Option<String>,
}

/// Request to update a sensor. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateSensorRequest {
    pub name: Option<String>,
    pub kind: Option<SensorKind>,
    pub location: Option<String>,
    pub status: Option<SensorStatus>,
}

impl Component for Sensor {
    type Create = CreateSensorRequest;
    type Update = UpdateSensorRequest;

    const ENTITY_NAME: &'static str = "Sensor";

    fn from_create(req: CreateSensorRequest) -> ApiResult<Self> {
        let name = require_text("name", &req.name)?;
        let location = optional_text("location", req.location.as_deref())?;
        Ok(Sensor::new(name, req.kind, location))
    }

    fn apply_update(&mut self, req: UpdateSensorRequest) -> ApiResult<()> {
        if let Some(name) = optional_text("name", req.name.as_deref())? {
            self.name = name;
        }
        if let Some(location) = optional_text("location", req.location.as_deref())? {
            self.location = Some(location);
        }
        if let Some(kind) = req.kind {
            self.kind = kind;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// ROUTER
// ============================================================================

/// Create the sensor routes router.
pub fn create_router() -> Router<AppState> {
    crud_routes::<Sensor>().route("/:id/analyses", get(children_route::<Sensor, Analysis>))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_create_trims_and_defaults() -> ApiResult<()> {
        let sensor = Sensor::from_create(CreateSensorRequest {
            name: "  kiln-3 ".to_string(),
            kind: SensorKind::Temperature,
            location: None,
        })?;
        assert_eq!(sensor.name, "kiln-3");
        assert_eq!(sensor.status, SensorStatus::Active);
        Ok(())
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let err = Sensor::from_create(CreateSensorRequest {
            name: " ".to_string(),
            kind: SensorKind::Humidity,
            location: None,
        })
        .err();
        assert_eq!(err.map(|e| e.code), Some(ErrorCode::MissingField));
    }

    #[test]
    fn test_update_only_touches_given_fields() -> ApiResult<()> {
        let mut sensor = Sensor::new("press", SensorKind::Pressure, Some("hall A".to_string()));
        let created = sensor.updated_at;
        sensor.apply_update(UpdateSensorRequest {
            status: Some(SensorStatus::Maintenance),
            ..Default::default()
        })?;
        assert_eq!(sensor.status, SensorStatus::Maintenance);
        assert_eq!(sensor.name, "press");
        assert_eq!(sensor.location.as_deref(), Some("hall A"));
        assert!(sensor.updated_at >= created);
        Ok(())
    }

    #[test]
    fn test_unknown_kind_fails_to_deserialize() {
        let body = serde_json::json!({ "name": "x", "kind": "SEISMIC" });
        assert!(serde_json::from_value::<CreateSensorRequest>(body).is_err());
    }
}
