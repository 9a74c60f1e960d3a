//! Axum router for the admin console.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{dashboard, reindex_all, reindex_conference, reindex_talk, AdminAppState};

/// Creates the admin router.
///
/// # Routes
///
/// - `GET /admin` - Dashboard
/// - `POST /admin/reindex/all`
/// - `POST /admin/reindex/conference` - form field `slug`
/// - `POST /admin/reindex/talk` - form field `talkId`
pub fn admin_router(state: AdminAppState) -> Router {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/reindex/all", post(reindex_all))
        .route("/admin/reindex/conference", post(reindex_conference))
        .route("/admin/reindex/talk", post(reindex_talk))
        .with_state(state)
}
