//! HTTP handlers for the reindex API.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info};

use crate::application::{Indexer, SyncError};

use super::dto::{ErrorResponse, HealthResponse, ReindexResponse, WebhookResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ApiAppState {
    pub indexer: Arc<dyn Indexer>,
}

impl ApiAppState {
    pub fn new(indexer: Arc<dyn Indexer>) -> Self {
        Self { indexer }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// POST /api/reindex - Rebuild both indices from every conference
pub async fn reindex_all(State(state): State<ApiAppState>) -> Result<impl IntoResponse, ApiError> {
    let summary = state.indexer.reindex_all().await?;
    Ok(Json(ReindexResponse::with_summary(
        "Successfully reindexed all conferences",
        summary,
    )))
}

/// POST /api/reindex/conference/:slug - Replace one conference's documents
pub async fn reindex_conference(
    State(state): State<ApiAppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.indexer.reindex_conference(&slug).await?;
    Ok(Json(ReindexResponse::with_summary(
        format!("Successfully reindexed conference: {}", slug),
        summary,
    )))
}

/// POST /api/reindex/talk/:talk_id - Re-sync a single talk
pub async fn reindex_talk(
    State(state): State<ApiAppState>,
    Path(talk_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.indexer.reindex_talk(&talk_id).await?;
    Ok(Json(ReindexResponse::with_outcome(
        format!("Successfully reindexed talk: {}", talk_id),
        outcome,
    )))
}

/// POST /api/webhook - Acknowledge a change notification
///
/// The payload is logged only; no reindex is triggered.
pub async fn webhook(headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    info!(
        content_type,
        content_length = body.len(),
        body = %String::from_utf8_lossy(&body),
        "webhook received"
    );

    Json(WebhookResponse::received())
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

/// API error type that converts reindex failures to HTTP responses.
pub struct ApiError(SyncError);

impl From<SyncError> for ApiError {
    fn from(err: SyncError) -> Self {
        Self(err)
    }
}

/// HTTP status for a reindex failure.
pub fn status_for(err: &SyncError) -> StatusCode {
    match err {
        SyncError::NotFound { .. } => StatusCode::NOT_FOUND,
        SyncError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        SyncError::TimedOut { .. } => StatusCode::GATEWAY_TIMEOUT,
        SyncError::Index { .. } | SyncError::Configuration { .. } | SyncError::Partial { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, "reindex request failed");
        }
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}
