//! Solution REST API Routes

use axum::Router;
use chrono::Utc;
use sensorium_core::{EntityId, EntityType, Solution, SolutionStatus};
use serde::{Deserialize, Serialize};

use super::generic::crud_routes;
use crate::component::{optional_text, require_text, Component};
use crate::error::ApiResult;
use crate::state::AppState;

/// Request to propose a solution for a service request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateSolutionRequest {
    #[schema(value_type = String, format = "uuid")]
    pub request_id: EntityId,
    pub description: String,
}

/// Request to update a solution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateSolutionRequest {
    pub description: Option<String>,
    pub status: Option<SolutionStatus>,
}

impl Component for Solution {
    type Create = CreateSolutionRequest;
    type Update = UpdateSolutionRequest;

    const ENTITY_NAME: &'static str = "Solution";
    const PARENT_TYPE: Option<EntityType> = Some(EntityType::Request);

    fn from_create(req: CreateSolutionRequest) -> ApiResult<Self> {
        let description = require_text("description", &req.description)?;
        Ok(Solution::new(req.request_id, description))
    }

    fn apply_update(&mut self, req: UpdateSolutionRequest) -> ApiResult<()> {
        if let Some(description) = optional_text("description", req.description.as_deref())? {
            self.description = description;
        }
        if let Some(status) = req.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Create the solution routes router.
pub fn create_router() -> Router<AppState> {
    crud_routes::<Solution>()
}
