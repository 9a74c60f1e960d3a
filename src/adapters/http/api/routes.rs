//! Axum router for the reindex API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health, reindex_all, reindex_conference, reindex_talk, webhook, ApiAppState};

/// Creates the API router.
///
/// # Routes
///
/// - `GET /health` - Liveness check
/// - `POST /api/reindex` - Full reindex
/// - `POST /api/reindex/conference/:slug` - Conference reindex
/// - `POST /api/reindex/talk/:talk_id` - Single talk reindex
/// - `POST /api/webhook` - Change notification (logged only)
pub fn api_router(state: ApiAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/reindex", post(reindex_all))
        .route("/api/reindex/conference/:slug", post(reindex_conference))
        .route("/api/reindex/talk/:talk_id", post(reindex_talk))
        .route("/api/webhook", post(webhook))
        .with_state(state)
}
