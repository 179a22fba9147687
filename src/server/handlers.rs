//! Humanise and health handlers.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use log::{debug, error};

use super::error::ApiError;
use super::schema::{HealthResponse, HumaniseRequest, HumaniseResponse};
use super::state::AppState;
use crate::errors::HumaniseError;

/// `POST /api/humanise`
pub async fn humanise(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<HumaniseResponse>, ApiError> {
    let request = HumaniseRequest::from_body(&body);
    debug!("Humanise request with {} characters", request.text.len());

    let outcome = tokio::time::timeout(state.request_timeout, state.humaniser.humanise(&request.text)).await;

    let result = match outcome {
        Ok(result) => result,
        Err(_) => Err(HumaniseError::Timeout(state.request_timeout.as_secs())),
    };

    match result {
        Ok(humanised_text) => Ok(Json(HumaniseResponse { humanised_text })),
        Err(e) => {
            error!("Failed to humanise text: {}", e);
            Err(ApiError::from(e))
        }
    }
}

/// `GET /healthz`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        strategy: state.strategy.to_lowercase_string(),
    })
}
