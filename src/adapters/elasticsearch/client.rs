//! Elasticsearch client - SearchIndex over the Elasticsearch REST API.
//!
//! Writes go through `_bulk` with one `index` action per talk, keyed by the
//! talk id, so repeating a write replaces the document. Every write asks for
//! a refresh so the documents are searchable when the call returns.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::domain::{Talk, TalkDocument};
use crate::ports::{SearchIndex, SearchIndexError};

const NDJSON: &str = "application/x-ndjson";

/// Configuration for the Elasticsearch client.
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Base URL, e.g. `http://localhost:9200`.
    pub url: String,
    /// Basic auth user. Empty disables authentication.
    pub username: String,
    password: Secret<String>,
    pub timeout: Duration,
}

impl ElasticsearchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: String::new(),
            password: Secret::new(String::new()),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets basic auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: Secret<String>) -> Self {
        self.username = username.into();
        self.password = password;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

pub struct ElasticsearchClient {
    config: ElasticsearchConfig,
    base_url: Url,
    client: Client,
}

impl ElasticsearchClient {
    pub fn new(config: ElasticsearchConfig) -> Result<Self, SearchIndexError> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| SearchIndexError::parse(format!("invalid elasticsearch url: {}", e)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchIndexError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    fn url(&self, segments: &[&str], query: Option<&str>) -> Result<Url, SearchIndexError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SearchIndexError::parse(format!("elasticsearch url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        if self.config.username.is_empty() {
            request
        } else {
            request.basic_auth(&self.config.username, Some(self.config.password()))
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SearchIndexError> {
        self.authorized(request).send().await.map_err(|e| {
            if e.is_timeout() {
                SearchIndexError::network(format!("request timed out after {}s", self.config.timeout.as_secs()))
            } else if e.is_connect() {
                SearchIndexError::network(format!("connection failed: {}", e))
            } else {
                SearchIndexError::network(e.to_string())
            }
        })
    }

    /// Turns any non-2xx response into a status error carrying the body.
    async fn expect_success(response: Response) -> Result<Response, SearchIndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(SearchIndexError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Builds the `_bulk` body: an action line and a source line per talk.
fn bulk_body(index: &str, talks: &[Talk]) -> Result<String, SearchIndexError> {
    let mut body = String::new();
    for talk in talks {
        let document = TalkDocument::new(talk);
        let action = json!({ "index": { "_index": index, "_id": document.id() } });
        let source = serde_json::to_string(&document)
            .map_err(|e| SearchIndexError::parse(format!("failed to encode talk {}: {}", talk.id, e)))?;
        body.push_str(&action.to_string());
        body.push('\n');
        body.push_str(&source);
        body.push('\n');
    }
    Ok(body)
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    #[serde(default)]
    errors: bool,
    #[serde(default)]
    items: Vec<HashMap<String, BulkItem>>,
}

#[derive(Debug, Deserialize)]
struct BulkItem {
    #[serde(rename = "_id", default)]
    id: String,
    #[serde(default)]
    error: Option<Value>,
}

impl BulkResponse {
    fn failed_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .flat_map(|item| item.values())
            .filter(|result| result.error.is_some())
            .map(|result| result.id.clone())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct DeleteByQueryResponse {
    #[serde(default)]
    deleted: u64,
}

#[async_trait]
impl SearchIndex for ElasticsearchClient {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let url = self.url(&[index], None)?;
        let response = self.send(self.client.head(url)).await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(false),
            status if status.is_success() => Ok(true),
            _ => Self::expect_success(response).await.map(|_| false),
        }
    }

    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchIndexError> {
        let url = self.url(&[index], None)?;
        let response = self.send(self.client.put(url).json(mapping)).await?;

        let status = response.status();
        if status.is_client_error() {
            let reason = response.text().await.unwrap_or_default();
            warn!(index, status = status.as_u16(), "index creation rejected");
            return Err(SearchIndexError::Rejected {
                index: index.to_string(),
                reason,
            });
        }
        Self::expect_success(response).await?;
        debug!(index, "index created");
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let url = self.url(&[index], None)?;
        let response = self.send(self.client.delete(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(index, "index already absent");
            return Ok(());
        }
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn bulk_index(&self, index: &str, talks: &[Talk]) -> Result<(), SearchIndexError> {
        if talks.is_empty() {
            return Ok(());
        }

        let body = bulk_body(index, talks)?;
        let url = self.url(&["_bulk"], Some("refresh=true"))?;
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, NDJSON)
            .body(body);
        let response = Self::expect_success(self.send(request).await?).await?;

        let result: BulkResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(format!("failed to decode bulk response: {}", e)))?;
        if result.errors {
            let failed = result.failed_ids();
            warn!(index, failed = failed.len(), "bulk write had item failures");
            return Err(SearchIndexError::BulkItems { failed });
        }

        debug!(index, documents = talks.len(), "bulk write completed");
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchIndexError> {
        let url = self.url(&[index, "_doc", id], Some("refresh=true"))?;
        let response = self.send(self.client.delete(url)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn delete_conference_documents(
        &self,
        index: &str,
        conference_id: &str,
    ) -> Result<u64, SearchIndexError> {
        let url = self.url(&[index, "_delete_by_query"], Some("refresh=true"))?;
        let query = json!({ "query": { "term": { "conferenceId": conference_id } } });
        let response = self.send(self.client.post(url).json(&query)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(0);
        }

        let result: DeleteByQueryResponse = Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(format!("failed to decode delete-by-query response: {}", e)))?;
        Ok(result.deleted)
    }
}
