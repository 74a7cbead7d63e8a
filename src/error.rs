//! Error types for the library API

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::ValidationFailure;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(Vec<ValidationFailure>),

    #[error("Conflict on {}: {}", .0.property_name, .0.error_message)]
    Conflict(ValidationFailure),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Bodies that are not JSON, or whose values have the wrong type, are
/// reported in the same list shape as rule violations.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::Validation(vec![ValidationFailure::new("body", rejection.body_text())])
    }
}

/// Error response body for failures that are not field-level
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    fn new(error: &str, message: impl Into<String>) -> Self {
        Self {
            error: error.to_string(),
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // Field-level failures share one wire shape so clients parse a single list.
            AppError::Validation(failures) => (StatusCode::BAD_REQUEST, Json(failures)).into_response(),
            AppError::Conflict(failure) => {
                (StatusCode::BAD_REQUEST, Json(vec![failure])).into_response()
            }
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                StatusCode::NOT_FOUND.into_response()
            }
            AppError::Authentication(msg) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new("NotAuthorized", msg)),
            )
                .into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("DbFailure", "Database error")),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
