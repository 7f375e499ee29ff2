//! Unified error handling for the backend API.
//!
//! Handlers return `ApiResult<T>` and use `?` freely; `ApiError` maps each
//! failure to a status code and a JSON `ErrorResponse` body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::api::ErrorResponse;
use shared::recurrence::RecurrenceError;
use thiserror::Error;

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Generic internal error
    #[error("{0}")]
    Internal(#[from] anyhow::Error),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Request body failed field validation
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Request body was not the expected JSON
    #[error("Invalid JSON: {0}")]
    JsonRejection(#[from] JsonRejection),

    /// Recurrence settings cannot produce a next occurrence
    #[error("Invalid recurrence: {0}")]
    Recurrence(#[from] RecurrenceError),
}

impl ApiError {
    /// Create a not found error with a custom message
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound(resource.into())
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details("Internal server error", e.to_string()),
                )
            }
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(format!("{} not found", resource)),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg.clone())),
            ApiError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details("Validation failed", e.to_string()),
            ),
            ApiError::JsonRejection(e) => {
                tracing::warn!("JSON rejection: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details("Invalid JSON format", e.body_text()),
                )
            }
            ApiError::Recurrence(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::with_details("Invalid recurrence", e.to_string()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::not_found("Event").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::bad_request("nope").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(RecurrenceError::NoDates).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
