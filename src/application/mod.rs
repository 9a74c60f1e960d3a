//! Application layer - reindex orchestration and read-side caching.
//!
//! This layer coordinates the talk source and search index ports. It holds
//! no HTTP or wire-format knowledge.

pub mod conference_cache;
pub mod indexer;

pub use conference_cache::ConferenceCache;
pub use indexer::{
    IndexNames, Indexer, IndexerService, ReindexSummary, Scope, Stage, SyncError, TalkOutcome,
};
