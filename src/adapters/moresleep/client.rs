//! Moresleep client - TalkSource over the moresleep REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = MoresleepConfig::new("https://sleepingpill.javazone.no")
//!     .with_credentials("indexer", password)
//!     .with_timeout(Duration::from_secs(30));
//!
//! let source = MoresleepClient::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Conference, Talk};
use crate::ports::{SourceError, TalkSource};

use super::mapper::{map_conferences, map_talk, map_talks};
use super::models::{ConferencesResponse, SessionResponse, SessionsResponse};

/// Configuration for the moresleep client.
#[derive(Debug, Clone)]
pub struct MoresleepConfig {
    /// Base URL, e.g. `http://localhost:8082`.
    pub base_url: String,
    /// Basic auth user. Empty disables authentication.
    pub user: String,
    password: Secret<String>,
    pub timeout: Duration,
}

impl MoresleepConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user: String::new(),
            password: Secret::new(String::new()),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets basic auth credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, password: Secret<String>) -> Self {
        self.user = user.into();
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

/// Reads conferences and sessions from moresleep.
pub struct MoresleepClient {
    config: MoresleepConfig,
    base_url: Url,
    client: Client,
}

impl MoresleepClient {
    pub fn new(config: MoresleepConfig) -> Result<Self, SourceError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SourceError::parse(format!("invalid moresleep url: {}", e)))?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SourceError::network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::parse(format!("moresleep url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, resource: &str) -> Result<T, SourceError> {
        debug!(url = %url, "moresleep request");

        let mut request = self.client.get(url);
        if !self.config.user.is_empty() {
            request = request.basic_auth(&self.config.user, Some(self.config.password()));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::network(format!("request timed out after {}s", self.config.timeout.as_secs()))
            } else if e.is_connect() {
                SourceError::network(format!("connection failed: {}", e))
            } else {
                SourceError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::not_found(resource));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::parse(format!("failed to decode {}: {}", resource, e)))
    }
}

#[async_trait]
impl TalkSource for MoresleepClient {
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError> {
        let url = self.url(&["data", "conference"])?;
        let body: ConferencesResponse = self.get_json(url, "conference list").await?;
        Ok(map_conferences(body.conferences))
    }

    async fn get_talks(&self, conference_id: &str) -> Result<Vec<Talk>, SourceError> {
        let url = self.url(&["data", "conference", conference_id, "session"])?;
        let resource = format!("sessions of conference {}", conference_id);
        let body: SessionsResponse = self.get_json(url, &resource).await?;
        let talks = map_talks(body.sessions)?;
        debug!(conference_id, count = talks.len(), "sessions fetched");
        Ok(talks)
    }

    async fn get_talk(&self, talk_id: &str) -> Result<Talk, SourceError> {
        let url = self.url(&["data", "session", talk_id])?;
        let body: SessionResponse = self.get_json(url, &format!("session {}", talk_id)).await?;
        map_talk(body)
    }
}
