//! Search Index Port - Interface to the search engine holding talk documents.
//!
//! The engine writes already-projected talks through this port. Documents
//! are keyed by talk id, so writing the same talk twice replaces it.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::Talk;

/// Port for index lifecycle and document writes.
///
/// # Contract
///
/// - `bulk_index` upserts by talk id. An empty slice is a no-op.
/// - `delete_index` and `delete_document` succeed when the target is
///   already absent.
/// - `delete_conference_documents` removes every document whose
///   `conferenceId` matches and reports how many were removed.
/// - `create_index` reports a schema the engine refuses as
///   [`SearchIndexError::Rejected`].
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Checks if an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Creates a new index with the given settings and mapping body.
    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchIndexError>;

    /// Removes an index and all of its documents.
    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Indexes multiple talks, replacing any document with the same id.
    async fn bulk_index(&self, index: &str, talks: &[Talk]) -> Result<(), SearchIndexError>;

    /// Removes a single talk document.
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchIndexError>;

    /// Removes all documents belonging to one conference.
    async fn delete_conference_documents(
        &self,
        index: &str,
        conference_id: &str,
    ) -> Result<u64, SearchIndexError>;
}

/// Errors from the search engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchIndexError {
    /// The engine refused an index definition (bad mapping or settings).
    #[error("index {index} rejected: {reason}")]
    Rejected { index: String, reason: String },

    /// A write targeted an index that does not exist.
    #[error("index {0} does not exist")]
    IndexNotFound(String),

    /// Some documents of a bulk write failed.
    #[error("bulk write failed for {} document(s): {}", .failed.len(), .failed.join(", "))]
    BulkItems { failed: Vec<String> },

    /// Engine answered with an unexpected HTTP status.
    #[error("search engine returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Request never completed (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl SearchIndexError {
    pub fn network(message: impl Into<String>) -> Self {
        SearchIndexError::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        SearchIndexError::Parse(message.into())
    }

    /// Returns true if the engine refused the index definition itself.
    pub fn is_rejected(&self) -> bool {
        matches!(self, SearchIndexError::Rejected { .. })
    }
}
