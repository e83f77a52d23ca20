//! Router assembly.

use crate::AppState;
use crate::handlers::{analyze, analyze_code, generate, get_metrics, health_check, upload};
use axum::Router;
use axum::routing::{get, post};

/// Creates the Cadence API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/generate", post(generate))
        .route("/upload", post(upload))
        .route("/analyze-code", post(analyze_code))
        .route("/health", get(health_check))
        .route("/metrics", get(get_metrics))
        .with_state(state)
}
