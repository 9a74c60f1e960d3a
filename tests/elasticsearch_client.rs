//! Elasticsearch client tests against a mock HTTP server.

use serde_json::{json, Value};
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use talks_indexer::adapters::{ElasticsearchClient, ElasticsearchConfig};
use talks_indexer::domain::foundation::FieldValue;
use talks_indexer::domain::{talk_index_mapping, Talk, TalkStatus};
use talks_indexer::ports::{SearchIndex, SearchIndexError};

fn client(server: &MockServer) -> ElasticsearchClient {
    ElasticsearchClient::new(ElasticsearchConfig::new(server.uri())).unwrap()
}

fn talk(id: &str) -> Talk {
    let mut talk = Talk::new(id, "c-1", TalkStatus::Approved);
    talk.conference_slug = "javazone2024".to_string();
    talk.data.insert("title".to_string(), FieldValue::from("Borrowing"));
    talk
}

// ── Index lifecycle ──

#[tokio::test]
async fn index_exists_follows_head_status() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/talks_public"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/talks_private"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client(&server);

    assert!(client.index_exists("talks_public").await.unwrap());
    assert!(!client.index_exists("talks_private").await.unwrap());
}

#[tokio::test]
async fn create_index_sends_mapping() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/talks_public"))
        .and(body_json(talk_index_mapping()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .create_index("talks_public", talk_index_mapping())
        .await
        .unwrap();
}

#[tokio::test]
async fn refused_mapping_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/talks_public"))
        .respond_with(ResponseTemplate::new(400).set_body_string("mapper_parsing_exception"))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_index("talks_public", &json!({ "mappings": { "properties": { "x": { "type": "nope" } } } }))
        .await
        .unwrap_err();

    assert!(err.is_rejected());
    assert!(err.to_string().contains("mapper_parsing_exception"));
}

#[tokio::test]
async fn deleting_absent_index_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/talks_public"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    client(&server).delete_index("talks_public").await.unwrap();
}

#[tokio::test]
async fn engine_failure_on_delete_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/talks_public"))
        .respond_with(ResponseTemplate::new(503).set_body_string("cluster unavailable"))
        .mount(&server)
        .await;

    let err = client(&server).delete_index("talks_public").await.unwrap_err();

    assert_eq!(
        err,
        SearchIndexError::Status {
            status: 503,
            message: "cluster unavailable".to_string()
        }
    );
}

// ── Documents ──

#[tokio::test]
async fn bulk_index_posts_ndjson_with_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .and(query_param("refresh", "true"))
        .and(header("content-type", "application/x-ndjson"))
        .and(body_string_contains(r#""_id":"t-1""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": false,
            "items": [
                { "index": { "_id": "t-1", "status": 201 } },
                { "index": { "_id": "t-2", "status": 201 } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .bulk_index("talks_public", &[talk("t-1"), talk("t-2")])
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    let lines: Vec<Value> = body.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1]["conferenceSlug"], "javazone2024");
    assert_eq!(lines[3]["id"], "t-2");
}

#[tokio::test]
async fn bulk_item_failures_name_the_documents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": true,
            "items": [
                { "index": { "_id": "t-1", "status": 201 } },
                { "index": { "_id": "t-2", "status": 400, "error": { "type": "mapper_parsing_exception" } } }
            ]
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .bulk_index("talks_public", &[talk("t-1"), talk("t-2")])
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SearchIndexError::BulkItems {
            failed: vec!["t-2".to_string()]
        }
    );
}

#[tokio::test]
async fn empty_bulk_sends_nothing() {
    let server = MockServer::start().await;

    client(&server).bulk_index("talks_public", &[]).await.unwrap();

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_document_tolerates_missing_document() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/talks_public/_doc/t-1"))
        .and(query_param("refresh", "true"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "result": "not_found" })))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_document("talks_public", "t-1").await.unwrap();
}

#[tokio::test]
async fn delete_conference_documents_queries_by_conference_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/talks_private/_delete_by_query"))
        .and(query_param("refresh", "true"))
        .and(body_json(json!({ "query": { "term": { "conferenceId": "c-1" } } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "deleted": 12, "failures": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let deleted = client(&server)
        .delete_conference_documents("talks_private", "c-1")
        .await
        .unwrap();

    assert_eq!(deleted, 12);
}

#[tokio::test]
async fn delete_conference_documents_in_missing_index_removes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/talks_private/_delete_by_query"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let deleted = client(&server)
        .delete_conference_documents("talks_private", "c-1")
        .await
        .unwrap();

    assert_eq!(deleted, 0);
}
