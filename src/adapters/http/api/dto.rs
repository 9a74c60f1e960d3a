//! HTTP DTOs for the reindex API.

use serde::Serialize;

use crate::application::{ReindexSummary, SyncError, TalkOutcome};

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Successful reindex. Carries a summary for conference-sized scopes and an
/// outcome for single talks.
#[derive(Debug, Clone, Serialize)]
pub struct ReindexResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ReindexSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<TalkOutcome>,
}

impl ReindexResponse {
    pub fn with_summary(message: impl Into<String>, summary: ReindexSummary) -> Self {
        Self {
            status: "ok",
            message: message.into(),
            summary: Some(summary),
            outcome: None,
        }
    }

    pub fn with_outcome(message: impl Into<String>, outcome: TalkOutcome) -> Self {
        Self {
            status: "ok",
            message: message.into(),
            summary: None,
            outcome: Some(outcome),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
}

impl WebhookResponse {
    pub fn received() -> Self {
        Self { status: "received" }
    }
}

/// Error body for failed reindex calls.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub scope: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<&'static str>,
    pub message: String,
}

impl From<&SyncError> for ErrorResponse {
    fn from(err: &SyncError) -> Self {
        Self {
            status: "error",
            scope: err.scope().kind(),
            stage: err.stage().map(|stage| stage.as_str()),
            message: err.to_string(),
        }
    }
}
