//! Service Request REST API Routes
//!
//! Requests may be raised from an analysis or stand alone. Responses and
//! solutions are listed under the request that owns them.

use axum::{routing::get, Router};
use chrono::Utc;
use sensorium_core::{
    EntityId, EntityType, RequestPriority, RequestStatus, ServiceRequest, ServiceResponse, Solution,
};
use serde::{Deserialize, Serialize};

use super::generic::{children_route, crud_routes};
use crate::component::{optional_text, require_text, Component};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request to open a service request.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreateServiceRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub analysis_id: Option<EntityId>,
    pub subject: String,
    pub body: String,
    #[serde(default = "default_priority")]
    pub priority: RequestPriority,
}

fn default_priority() -> RequestPriority {
    RequestPriority::Normal
}

/// Request to update a service request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateServiceRequest {
    pub subject: Option<String>,
    pub body: Option<String>,
    pub priority: Option<RequestPriority>,
    pub status: Option<RequestStatus>,
}

impl Component for ServiceRequest {
    type Create = CreateServiceRequest;
    type Update = UpdateServiceRequest;

    const ENTITY_NAME: &'static str = "Request";
    const PARENT_TYPE: Option<EntityType> = Some(EntityType::Analysis);

    fn from_create(req: CreateServiceRequest) -> ApiResult<Self> {
        let subject = require_text("subject", &req.subject)?;
        let body = require_text("body", &req.body)?;
        Ok(ServiceRequest::new(req.analysis_id, subject, body, req.priority))
    }

    fn apply_update(&mut self, req: UpdateServiceRequest) -> ApiResult<()> {
        if let Some(status) = req.status {
            // Closed requests are final
            if self.status == RequestStatus::Closed && status != RequestStatus::Closed {
                return Err(ApiError::validation_failed(format!(
                    "Request {} is closed and cannot move to {}",
                    self.request_id, status
                )));
            }
            self.status = status;
        }
        if let Some(subject) = optional_text("subject", req.subject.as_deref())? {
            self.subject = subject;
        }
        if let Some(body) = optional_text("body", req.body.as_deref())? {
            self.body = body;
        }
        if let Some(priority) = req.priority {
            self.priority = priority;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Create the service request routes router.
pub fn create_router() -> Router<AppState> {
    crud_routes::<ServiceRequest>()
        .route("/:id/responses", get(children_route::<ServiceRequest, ServiceResponse>))
        .route("/:id/solutions", get(children_route::<ServiceRequest, Solution>))
}
