//! Service Response REST API Routes

use axum::Router;
use chrono::Utc;
use sensorium_core::{EntityId, EntityType, ServiceResponse};
use serde::{Deserialize, Serialize};

use super::generic::crud_routes;
use crate::component::{optional_text, require_text, Component};
use crate::error::ApiResult;
use crate::state::AppState;

/// Request to reply to a service request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateServiceResponse {
    #[schema(value_type = String, format = "uuid")]
    pub request_id: EntityId,
    pub body: String,
    pub responder: String,
}

/// Request to edit a reply.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateServiceResponse {
    pub body: Option<String>,
}

impl Component for ServiceResponse {
    type Create = CreateServiceResponse;
    type Update = UpdateServiceResponse;

    const ENTITY_NAME: &'static str = "Response";
    const PARENT_TYPE: Option<EntityType> = Some(EntityType::Request);

    fn from_create(req: CreateServiceResponse) -> ApiResult<Self> {
        let body = require_text("body", &req.body)?;
        let responder = require_text("responder", &req.responder)?;
        Ok(ServiceResponse::new(req.request_id, body, responder))
    }

    fn apply_update(&mut self, req: UpdateServiceResponse) -> ApiResult<()> {
        if let Some(body) = optional_text("body", req.body.as_deref())? {
            self.body = body;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Create the service response routes router.
pub fn create_router() -> Router<AppState> {
    crud_routes::<ServiceResponse>()
}
