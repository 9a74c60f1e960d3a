//! HTTP handlers for the admin console.
//!
//! Reindex results come back as HTML fragments with status 200, success or
//! failure alike, so the page can swap them in place.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::application::{ConferenceCache, Indexer};

use super::views;

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdminAppState {
    pub indexer: Arc<dyn Indexer>,
    pub conferences: Arc<ConferenceCache>,
}

impl AdminAppState {
    pub fn new(indexer: Arc<dyn Indexer>, conferences: Arc<ConferenceCache>) -> Self {
        Self { indexer, conferences }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
pub struct ConferenceForm {
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct TalkForm {
    #[serde(default, rename = "talkId")]
    pub talk_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /admin - Dashboard with the cached conference list
pub async fn dashboard(State(state): State<AdminAppState>) -> Response {
    match state.conferences.get_conferences().await {
        Ok(conferences) => Html(views::dashboard(&conferences)).into_response(),
        Err(err) => {
            error!(error = %err, "failed to fetch conferences");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load conferences").into_response()
        }
    }
}

/// POST /admin/reindex/all
pub async fn reindex_all(State(state): State<AdminAppState>) -> Html<String> {
    info!("admin: starting full reindex");
    match state.indexer.reindex_all().await {
        Ok(summary) => {
            info!(conferences = summary.conferences, "admin: full reindex completed");
            Html(views::result_success("Successfully reindexed all conferences"))
        }
        Err(err) => {
            error!(error = %err, "admin: full reindex failed");
            Html(views::result_error(&format!("Failed to reindex: {}", err)))
        }
    }
}

/// POST /admin/reindex/conference - form field `slug`
pub async fn reindex_conference(
    State(state): State<AdminAppState>,
    Form(form): Form<ConferenceForm>,
) -> Html<String> {
    let slug = form.slug.trim();
    if slug.is_empty() {
        return Html(views::result_error("Please select a conference"));
    }

    info!(slug, "admin: starting conference reindex");
    match state.indexer.reindex_conference(slug).await {
        Ok(_) => Html(views::result_success(&format!(
            "Successfully reindexed conference: {}",
            slug
        ))),
        Err(err) => {
            error!(slug, error = %err, "admin: conference reindex failed");
            Html(views::result_error(&format!("Failed to reindex conference: {}", err)))
        }
    }
}

/// POST /admin/reindex/talk - form field `talkId`
pub async fn reindex_talk(State(state): State<AdminAppState>, Form(form): Form<TalkForm>) -> Html<String> {
    let talk_id = form.talk_id.trim();
    if talk_id.is_empty() {
        return Html(views::result_error("Please enter a talk ID"));
    }

    info!(talk_id, "admin: starting talk reindex");
    match state.indexer.reindex_talk(talk_id).await {
        Ok(_) => Html(views::result_success(&format!(
            "Successfully reindexed talk: {}",
            talk_id
        ))),
        Err(err) => {
            error!(talk_id, error = %err, "admin: talk reindex failed");
            Html(views::result_error(&format!("Failed to reindex talk: {}", err)))
        }
    }
}
