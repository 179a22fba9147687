//! API error type with HTTP status code mapping.
//!
//! Callers only ever see the fixed failure message; the underlying cause is
//! logged where the error is raised.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::schema::FAILURE_MESSAGE;

/// Errors returned by the HTTP handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The pipeline failed or timed out (500).
    #[error("processing failed: {0}")]
    ProcessingFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ProcessingFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": FAILURE_MESSAGE,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<crate::errors::HumaniseError> for ApiError {
    fn from(err: crate::errors::HumaniseError) -> Self {
        ApiError::ProcessingFailed(err.to_string())
    }
}
