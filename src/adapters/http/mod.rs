//! HTTP adapters - axum routers over the indexer.
//!
//! - `api` - JSON reindex endpoints, webhook receiver and health check
//! - `admin` - HTML console for operators

pub mod admin;
pub mod api;

pub use admin::{admin_router, AdminAppState};
pub use api::{api_router, ApiAppState};

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::{ConferenceCache, Indexer};

/// Builds the complete application router with tracing and a request timeout.
pub fn app_router(indexer: Arc<dyn Indexer>, conferences: Arc<ConferenceCache>, request_timeout: Duration) -> Router {
    Router::new()
        .merge(api_router(ApiAppState::new(indexer.clone())))
        .merge(admin_router(AdminAppState::new(indexer, conferences)))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
