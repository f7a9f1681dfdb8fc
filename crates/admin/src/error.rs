//! Unified error handling for the admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::ValidationError;
use crate::sanity::SanityError;

/// Application-level error type for the admin.
#[derive(Debug, Error)]
pub enum AppError {
    /// Content store operation failed.
    #[error("Content store error: {0}")]
    Content(#[from] SanityError),

    /// Request payload failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The store rejected a mutating operation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Content(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Content(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose store or internal error details to clients
        let message = match &self {
            Self::Content(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Validation(e) => e.to_string(),
            Self::NotFound(m) | Self::BadRequest(m) => m.clone(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
