//! Indexer - reindex orchestration over the talk source and search index.

mod error;
mod scope_locks;
mod service;

pub use error::{Scope, Stage, SyncError};
pub use scope_locks::{ScopeGuard, ScopeLocks};
pub use service::{IndexNames, IndexerService, ReindexSummary, TalkOutcome};

use async_trait::async_trait;

/// The reindex operations exposed to the HTTP layer.
///
/// Implemented by [`IndexerService`]; handlers depend on this trait so they
/// can be exercised with a stub.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Rebuilds both indices from every conference.
    async fn reindex_all(&self) -> Result<ReindexSummary, SyncError>;

    /// Replaces the documents of the conference with this slug.
    async fn reindex_conference(&self, slug: &str) -> Result<ReindexSummary, SyncError>;

    /// Re-syncs a single talk by id.
    async fn reindex_talk(&self, talk_id: &str) -> Result<TalkOutcome, SyncError>;
}
