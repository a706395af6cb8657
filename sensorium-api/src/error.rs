//! Error Types for Sensorium API
//!
//! This module defines error handling for the API layer, including:
//! - ErrorCode enum for fine-grained error causes
//! - ErrorCategory for the three envelope categories (400, 404, 500)
//! - ApiError struct returned by every handler
//! - ErrorEnvelope, the JSON body rendered for every failure
//!
//! Every failure leaves the server as
//! `{ "error": <category label>, "message": <detail>, "timestamp": <RFC 3339> }`.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use sensorium_core::{SensoriumError, StorageError, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CATEGORY
// ============================================================================

/// Envelope category. Determines the HTTP status and the `error` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The request is syntactically or semantically invalid (400).
    MalformedRequest,
    /// The resource or route does not exist (404).
    ResourceNotFound,
    /// The provider cannot service the request, or anything else (500).
    Unhandled,
}

impl ErrorCategory {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCategory::MalformedRequest => StatusCode::BAD_REQUEST,
            ErrorCategory::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Unhandled => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label rendered in the envelope's `error` field.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::MalformedRequest => "Bad Request",
            ErrorCategory::ResourceNotFound => "Not Found",
            ErrorCategory::Unhandled => "Internal Server Error",
        }
    }
}

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API failures.
///
/// Codes are grouped into categories most-specific first: malformed
/// request, then not found, then everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // ========================================================================
    // Malformed Request (400)
    // ========================================================================
    /// Request validation failed
    ValidationFailed,

    /// Request body could not be parsed
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// Field or path parameter format is incorrect
    InvalidFormat,

    /// Route exists but does not accept the request method
    MethodNotAllowed,

    // ========================================================================
    // Resource Not Found (404)
    // ========================================================================
    /// Requested entity does not exist
    EntityNotFound,

    /// Requested lookup enum does not exist
    EnumNotFound,

    /// No route matches the request path
    RouteNotFound,

    // ========================================================================
    // Unhandled (500)
    // ========================================================================
    /// Persistence or cache provider cannot service the request
    ProviderUnavailable,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidInput
            | ErrorCode::MissingField
            | ErrorCode::InvalidFormat
            | ErrorCode::MethodNotAllowed => ErrorCategory::MalformedRequest,

            ErrorCode::EntityNotFound | ErrorCode::EnumNotFound | ErrorCode::RouteNotFound => {
                ErrorCategory::ResourceNotFound
            }

            ErrorCode::ProviderUnavailable | ErrorCode::InternalError => ErrorCategory::Unhandled,
        }
    }

    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        self.category().status_code()
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Request validation failed",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::MethodNotAllowed => "Method not allowed",
            ErrorCode::EntityNotFound => "Entity not found",
            ErrorCode::EnumNotFound => "Enum not found",
            ErrorCode::RouteNotFound => "Resource not found",
            ErrorCode::ProviderUnavailable => "Cache provider unavailable",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Error returned by API handlers.
///
/// Rendered as an [`ErrorEnvelope`]; the code only selects the category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    pub fn category(&self) -> ErrorCategory {
        self.code.category()
    }

    // ========================================================================
    // Convenience constructors for common errors
    // ========================================================================

    pub fn validation_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    pub fn invalid_format(field: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Field '{}' has invalid format, expected {}", field, expected),
        )
    }

    pub fn entity_not_found(entity_type: &str, id: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::EntityNotFound,
            format!("{} with id {} not found", entity_type, id),
        )
    }

    pub fn enum_not_found(name: &str) -> Self {
        Self::new(ErrorCode::EnumNotFound, format!("Enum '{}' not found", name))
    }

    pub fn route_not_found(path: &str) -> Self {
        Self::new(
            ErrorCode::RouteNotFound,
            format!("No resource found at path {}", path),
        )
    }

    pub fn method_not_allowed(method: &Method, path: &str) -> Self {
        Self::new(
            ErrorCode::MethodNotAllowed,
            format!("Method {} is not allowed on {}", method, path),
        )
    }

    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ProviderUnavailable, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// ERROR ENVELOPE
// ============================================================================

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorEnvelope {
    /// Category label (`Bad Request`, `Not Found`, `Internal Server Error`)
    pub error: String,
    /// Human-readable detail
    pub message: String,
    /// When the error was rendered
    pub timestamp: DateTime<Utc>,
}

impl ErrorEnvelope {
    pub fn from_error(err: &ApiError) -> Self {
        let message = if err.message.trim().is_empty() {
            err.code.default_message().to_string()
        } else {
            err.message.clone()
        };
        Self {
            error: err.category().label().to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Render the error as its envelope.
///
/// ```ignore
/// async fn handler() -> Result<Json<Response>, ApiError> {
///     Err(ApiError::missing_field("name"))
/// }
/// ```
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.category() {
            ErrorCategory::Unhandled => {
                tracing::error!(code = %self.code, message = %self.message, "Request failed");
            }
            _ => {
                tracing::debug!(code = %self.code, message = %self.message, "Request rejected");
            }
        }
        (status, Json(ErrorEnvelope::from_error(&self))).into_response()
    }
}

/// Router fallback: unknown paths render the not-found envelope.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::route_not_found(uri.path())
}

/// Router fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(&method, uri.path())
}

/// Panic handler for `CatchPanicLayer`: panics render the general envelope.
pub fn panic_response(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");
    ApiError::internal_error("Unexpected server error").into_response()
}

// ============================================================================
// CONVERSIONS FROM LIBRARY ERRORS
// ============================================================================

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::NotFound { entity_type, id } => {
                ApiError::entity_not_found(&entity_type.to_string(), id)
            }
            StorageError::Unavailable { .. } => ApiError::provider_unavailable(err.to_string()),
            StorageError::AlreadyExists { .. } | StorageError::Serialization { .. } => {
                tracing::error!("Storage error: {:?}", err);
                ApiError::internal_error(err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::RequiredFieldMissing { field } => ApiError::missing_field(field),
            ValidationError::InvalidValue { .. } => ApiError::validation_failed(err.to_string()),
        }
    }
}

impl From<SensoriumError> for ApiError {
    fn from(err: SensoriumError) -> Self {
        match err {
            SensoriumError::Storage(e) => e.into(),
            SensoriumError::Validation(e) => e.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_input(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(ErrorCode::InvalidFormat, rejection.body_text())
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
