use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use isrs_srs::SrsError;
use serde::Serialize;
use thiserror::Error;

use crate::generation::GenerationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authentication error: {0}")]
    Auth(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Review error: {0}")]
    Srs(#[from] SrsError),
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        Self::UpstreamUnavailable(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Auth(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            Self::UpstreamUnavailable(_) | Self::Srs(SrsError::UpstreamUnavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_unavailable")
            }
            Self::Srs(SrsError::ScheduleOverflow { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "schedule_overflow")
            }
            // A stored level below 1 means corrupt data, not a client mistake
            Self::Srs(SrsError::InvalidLevel(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "invalid_level")
            }
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            Self::Jwt(_) | Self::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_kind();

        // Details of server-side failures stay in the logs
        let message = if status == StatusCode::SERVICE_UNAVAILABLE {
            tracing::warn!(error = %self, "Text service unavailable");
            "Text generation service unavailable, try again later".to_string()
        } else if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error, message })).into_response()
    }
}
