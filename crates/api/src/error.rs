//! API error handling
//!
//! Consistent JSON error responses across all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Per-field detail for validation failures
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Structured JSON error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

/// API error type that converts to JSON responses
#[derive(Debug)]
pub enum ApiError {
    /// Malformed request
    BadRequest(String),
    /// No usable session
    Unauthorized,
    /// Session belongs to a different owner
    Forbidden(String),
    /// Resource not found
    NotFound(String),
    /// Unique constraint violated
    Conflict(String),
    /// Schema-level validation failure with field detail
    Validation(Vec<FieldError>),
    /// Database error
    Database(String),
    /// Hosted platform error
    Platform(String),
    /// Internal server error
    Internal(String),
}

impl ApiError {
    fn plain(error: String, code: &str) -> ErrorResponse {
        ErrorResponse {
            error,
            code: Some(code.to_string()),
            fields: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, response) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::plain(msg, "bad_request"))
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiError::plain("Authentication required".to_string(), "unauthorized"),
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiError::plain(msg, "forbidden")),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::plain(msg, "not_found")),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ApiError::plain(msg, "conflict")),
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "Validation failed".to_string(),
                    code: Some("validation_failed".to_string()),
                    fields: Some(fields),
                },
            ),
            ApiError::Database(msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::plain("Database error".to_string(), "database_error"),
                )
            }
            ApiError::Platform(msg) => {
                error!("Platform API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ApiError::plain("Upstream platform error".to_string(), "platform_error"),
                )
            }
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::plain("Internal server error".to_string(), "internal_error"),
                )
            }
        };

        (status, Json(response)).into_response()
    }
}

impl From<common::Error> for ApiError {
    fn from(err: common::Error) -> Self {
        match err {
            common::Error::Database(msg) => ApiError::Database(msg),
            common::Error::Platform(msg) => ApiError::Platform(msg),
            common::Error::NotFound(msg) => ApiError::NotFound(msg),
            common::Error::InvalidSession => ApiError::Unauthorized,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<platform::ClientError> for ApiError {
    fn from(err: platform::ClientError) -> Self {
        ApiError::Platform(err.to_string())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Extension trait to convert sqlx errors to ApiError
pub trait DbResultExt<T> {
    /// Map database failures; unique violations become a generic conflict
    fn db_err(self) -> Result<T, ApiError>;
    /// Map database failures; unique violations become a conflict with the
    /// given message
    fn db_conflict(self, message: &str) -> Result<T, ApiError>;
}

impl<T> DbResultExt<T> for Result<T, sqlx::Error> {
    fn db_err(self) -> Result<T, ApiError> {
        self.db_conflict("Resource already exists")
    }

    fn db_conflict(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|e| {
            if db::is_unique_violation(&e) {
                ApiError::Conflict(message.to_string())
            } else {
                ApiError::Database(e.to_string())
            }
        })
    }
}

/// Extension trait to convert Option to NotFound
pub trait OptionExt<T> {
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn not_found(self, resource: impl Into<String>) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::NotFound(resource.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(ApiError::BadRequest("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ApiError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(ApiError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(ApiError::Validation(vec![FieldError::new("f", "m")])),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(ApiError::Database("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(ApiError::Platform("x".into())),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_option_ext_maps_none_to_not_found() {
        let missing: Option<()> = None;
        assert!(matches!(
            missing.not_found("gone"),
            Err(ApiError::NotFound(_))
        ));
        assert!(Some(1).not_found("here").is_ok());
    }

    #[test]
    fn test_row_not_found_is_not_a_conflict() {
        let err: Result<(), sqlx::Error> = Err(sqlx::Error::RowNotFound);
        assert!(matches!(
            err.db_conflict("dup"),
            Err(ApiError::Database(_))
        ));
    }
}
