//! Integration tests for the HTTP surface.
//!
//! Requests go through the assembled router with `tower::ServiceExt::oneshot`,
//! backed by a scripted indexer so each error mapping can be exercised.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use talks_indexer::adapters::http::app_router;
use talks_indexer::adapters::InMemoryTalkSource;
use talks_indexer::application::{
    ConferenceCache, Indexer, ReindexSummary, Scope, Stage, SyncError, TalkOutcome,
};
use talks_indexer::domain::Conference;
use talks_indexer::ports::SourceError;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Records every call and answers according to the requested id.
#[derive(Default)]
struct ScriptedIndexer {
    calls: Mutex<Vec<String>>,
}

impl ScriptedIndexer {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn summary() -> ReindexSummary {
    ReindexSummary {
        conferences: 2,
        public_documents: 10,
        private_documents: 25,
    }
}

#[async_trait]
impl Indexer for ScriptedIndexer {
    async fn reindex_all(&self) -> Result<ReindexSummary, SyncError> {
        self.calls.lock().unwrap().push("all".to_string());
        Ok(summary())
    }

    async fn reindex_conference(&self, slug: &str) -> Result<ReindexSummary, SyncError> {
        self.calls.lock().unwrap().push(format!("conference {}", slug));
        let scope = Scope::Conference(slug.to_string());
        match slug {
            "unknown" => Err(SyncError::NotFound { scope }),
            "upstream-down" => Err(SyncError::Upstream {
                scope,
                stage: Stage::FetchTalks,
                source: SourceError::network("connection refused"),
            }),
            "slow" => Err(SyncError::TimedOut {
                scope,
                after: Duration::from_secs(300),
            }),
            _ => Ok(summary()),
        }
    }

    async fn reindex_talk(&self, talk_id: &str) -> Result<TalkOutcome, SyncError> {
        self.calls.lock().unwrap().push(format!("talk {}", talk_id));
        match talk_id {
            "missing" | "<script>" => Err(SyncError::NotFound {
                scope: Scope::Talk(talk_id.to_string()),
            }),
            "draft" => Ok(TalkOutcome::Unpublished),
            _ => Ok(TalkOutcome::Published),
        }
    }
}

fn app(indexer: Arc<ScriptedIndexer>) -> Router {
    let source = Arc::new(InMemoryTalkSource::new());
    source.add_conference(Conference::new("c-1", "JavaZone 2024", "javazone2024"));
    source.add_conference(Conference::new("c-2", "Rust & Friends", "rust-friends"));
    let conferences = Arc::new(ConferenceCache::new(source));
    app_router(indexer, conferences, Duration::from_secs(5))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn post(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

// =============================================================================
// JSON API
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(
        app(Arc::default()),
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "ok");
}

#[tokio::test]
async fn reindex_all_returns_summary() {
    let indexer = Arc::new(ScriptedIndexer::default());
    let (status, body) = send(app(indexer.clone()), post("/api/reindex")).await;

    assert_eq!(status, StatusCode::OK);
    let body = json(&body);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "Successfully reindexed all conferences");
    assert_eq!(body["summary"]["publicDocuments"], 10);
    assert_eq!(body["summary"]["privateDocuments"], 25);
    assert_eq!(indexer.calls(), vec!["all"]);
}

#[tokio::test]
async fn reindex_conference_passes_slug() {
    let indexer = Arc::new(ScriptedIndexer::default());
    let (status, body) = send(app(indexer.clone()), post("/api/reindex/conference/javazone2024")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["message"], "Successfully reindexed conference: javazone2024");
    assert_eq!(indexer.calls(), vec!["conference javazone2024"]);
}

#[tokio::test]
async fn reindex_talk_reports_outcome() {
    let (status, body) = send(app(Arc::default()), post("/api/reindex/talk/draft")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["outcome"], "unpublished");
}

#[tokio::test]
async fn not_found_maps_to_404() {
    let (status, body) = send(app(Arc::default()), post("/api/reindex/conference/unknown")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body = json(&body);
    assert_eq!(body["status"], "error");
    assert_eq!(body["scope"], "conference");
    assert_eq!(body["message"], "conference 'unknown' not found");
    assert!(body.get("stage").is_none());
}

#[tokio::test]
async fn upstream_failure_maps_to_502_with_stage() {
    let (status, body) = send(app(Arc::default()), post("/api/reindex/conference/upstream-down")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json(&body)["stage"], "fetch-talks");
}

#[tokio::test]
async fn timeout_maps_to_504() {
    let (status, _) = send(app(Arc::default()), post("/api/reindex/conference/slow")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn reindex_requires_post() {
    let (status, _) = send(
        app(Arc::default()),
        Request::get("/api/reindex").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn webhook_acknowledges_without_reindexing() {
    let indexer = Arc::new(ScriptedIndexer::default());
    let request = Request::post("/api/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"event":"talk.updated","conferenceId":"javazone-2024"}"#))
        .unwrap();

    let (status, body) = send(app(indexer.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "received");
    assert!(indexer.calls().is_empty());
}

#[tokio::test]
async fn webhook_accepts_empty_body() {
    let (status, body) = send(app(Arc::default()), post("/api/webhook")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "received");
}

// =============================================================================
// Admin console
// =============================================================================

#[tokio::test]
async fn dashboard_lists_conferences() {
    let (status, body) = send(
        app(Arc::default()),
        Request::get("/admin").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<option value="javazone2024">JavaZone 2024</option>"#));
    assert!(body.contains("Rust &amp; Friends"));
}

#[tokio::test]
async fn admin_reindex_all_returns_success_fragment() {
    let (status, body) = send(app(Arc::default()), post("/admin/reindex/all")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Successfully reindexed all conferences"));
}

#[tokio::test]
async fn admin_conference_form_requires_slug() {
    let indexer = Arc::new(ScriptedIndexer::default());
    let (status, body) = send(app(indexer.clone()), post_form("/admin/reindex/conference", "slug=")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please select a conference"));
    assert!(indexer.calls().is_empty());
}

#[tokio::test]
async fn admin_conference_form_triggers_reindex() {
    let indexer = Arc::new(ScriptedIndexer::default());
    let (_, body) = send(
        app(indexer.clone()),
        post_form("/admin/reindex/conference", "slug=javazone2024"),
    )
    .await;

    assert!(body.contains("Successfully reindexed conference: javazone2024"));
    assert_eq!(indexer.calls(), vec!["conference javazone2024"]);
}

#[tokio::test]
async fn admin_talk_form_requires_talk_id() {
    let (_, body) = send(app(Arc::default()), post_form("/admin/reindex/talk", "talkId=")).await;
    assert!(body.contains("Please enter a talk ID"));
}

#[tokio::test]
async fn admin_error_fragment_escapes_input() {
    let (status, body) = send(
        app(Arc::default()),
        post_form("/admin/reindex/talk", "talkId=%3Cscript%3E"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("result-error"));
    assert!(body.contains("&lt;script&gt;"));
    assert!(!body.contains("<script>"));
}
