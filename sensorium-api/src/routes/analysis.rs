//! Analysis REST API Routes

use axum::{routing::get, Router};
use chrono::Utc;
use sensorium_core::{Analysis, AnalysisStatus, EntityId, EntityType, ServiceRequest};
use serde::{Deserialize, Serialize};

use super::generic::{children_route, crud_routes};
use crate::component::{optional_text, require_text, Component};
use crate::error::ApiResult;
use crate::state::AppState;

/// Request to start an analysis over a sensor.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateAnalysisRequest {
    #[schema(value_type = String, format = "uuid")]
    pub sensor_id: EntityId,
    pub summary: String,
}

/// Request to update an analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateAnalysisRequest {
    pub summary: Option<String>,
    pub status: Option<AnalysisStatus>,
}

impl Component for Analysis {
    type Create = CreateAnalysisRequest;
    type Update = UpdateAnalysisRequest;

    const ENTITY_NAME: &'static str = "Analysis";
    const PARENT_TYPE: Option<EntityType> = Some(EntityType::Sensor);

    fn from_create(req: CreateAnalysisRequest) -> ApiResult<Self> {
        let summary = require_text("summary", &req.summary)?;
        Ok(Analysis::new(req.sensor_id, summary))
    }

    fn apply_update(&mut self, req: UpdateAnalysisRequest) -> ApiResult<()> {
        if let Some(summary) = optional_text("summary", req.summary.as_deref())? {
            self.summary = summary;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Create the analysis routes router.
pub fn create_router() -> Router<AppState> {
    crud_routes::<Analysis>().route("/:id/requests", get(children_route::<Analysis, ServiceRequest>))
}
