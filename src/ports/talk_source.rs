//! Talk Source Port - Interface to the upstream submission system.
//!
//! Implementations fetch raw conference/talk/speaker records and normalize
//! them into domain entities. Retries and backoff, if any, belong to the
//! implementation; callers treat every error as final for the current call.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Conference, Talk};

/// Port for reading conferences and talk submissions.
///
/// # Contract
///
/// - `get_talks` returns talks carrying their conference id; slug and name
///   may be empty and are filled in by the caller.
/// - `get_talk` returns [`SourceError::NotFound`] for an unknown id, never an
///   empty talk.
#[async_trait]
pub trait TalkSource: Send + Sync {
    /// Retrieves all available conferences.
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError>;

    /// Retrieves all talks for a specific conference.
    async fn get_talks(&self, conference_id: &str) -> Result<Vec<Talk>, SourceError>;

    /// Retrieves a single talk by its id.
    async fn get_talk(&self, talk_id: &str) -> Result<Talk, SourceError>;
}

/// Errors from the upstream submission system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The requested resource does not exist upstream.
    #[error("not found: {resource}")]
    NotFound { resource: String },

    /// Upstream answered with an unexpected HTTP status.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Request never completed (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded or mapped.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SourceError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        SourceError::NotFound {
            resource: resource.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        SourceError::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        SourceError::Parse(message.into())
    }

    /// Returns true if the resource is missing rather than unreachable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}
