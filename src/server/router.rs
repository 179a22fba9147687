//! Router assembly for the humaniser HTTP API.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use super::handlers;
use super::state::AppState;

/// Builds the axum router with every route.
///
/// CORS is permissive and request bodies are not size limited.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/humanise", post(handlers::humanise))
        .route("/healthz", get(handlers::health))
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
