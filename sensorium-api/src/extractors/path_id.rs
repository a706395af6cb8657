//! Path extractor for entity identifiers.
//!
//! `PathId` extracts the single `:id` path parameter as a UUID and rejects
//! malformed values with the 400 envelope instead of axum's plain-text
//! rejection.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use sensorium_core::EntityId;

use crate::error::ApiError;

/// Extractor for an entity id path parameter.
///
/// ```rust,ignore
/// async fn get_sensor(PathId(sensor_id): PathId) -> ApiResult<impl IntoResponse> {
///     // sensor_id is a parsed Uuid
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub EntityId);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<EntityId>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                ApiError::invalid_format(
                    "id",
                    &format!("UUID in path {} ({})", parts.uri.path(), e.body_text()),
                )
            })?;
        Ok(PathId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiResult, ErrorEnvelope};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn echo(PathId(id): PathId) -> ApiResult<String> {
        Ok(id.to_string())
    }

    fn test_app() -> Router {
        Router::new().route("/items/:id", get(echo))
    }

    #[tokio::test]
    async fn test_valid_uuid() -> Result<(), String> {
        let id = Uuid::now_v7();
        let request = Request::builder()
            .uri(format!("/items/{}", id))
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = test_app()
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| e.to_string())?;
        assert_eq!(body, id.to_string().as_bytes());
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_uuid_renders_envelope() -> Result<(), String> {
        let request = Request::builder()
            .uri("/items/not-a-uuid")
            .body(Body::empty())
            .map_err(|e| e.to_string())?;

        let response = test_app()
            .oneshot(request)
            .await
            .map_err(|e| format!("Request failed: {:?}", e))?;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| e.to_string())?;
        let envelope: ErrorEnvelope = serde_json::from_slice(&body).map_err(|e| e.to_string())?;
        assert_eq!(envelope.error, "Bad Request");
        assert!(envelope.message.contains("id"));
        Ok(())
    }
}
