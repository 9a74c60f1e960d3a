//! Failure taxonomy for reindex operations.
//!
//! Every failure names the scope that was being reindexed and, where one
//! applies, the stage that failed, so an operator can decide whether to
//! retry the whole scope.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::ports::{SearchIndexError, SourceError};

/// Granularity of a reindex operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    All,
    Conference(String),
    Talk(String),
}

impl Scope {
    /// Short scope kind for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Scope::All => "all",
            Scope::Conference(_) => "conference",
            Scope::Talk(_) => "talk",
        }
    }

    /// Key used for per-scope mutual exclusion.
    pub fn lock_key(&self) -> String {
        match self {
            Scope::All => "all".to_string(),
            Scope::Conference(slug) => format!("conference:{}", slug),
            Scope::Talk(id) => format!("talk:{}", id),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all conferences"),
            Scope::Conference(slug) => write!(f, "conference '{}'", slug),
            Scope::Talk(id) => write!(f, "talk '{}'", id),
        }
    }
}

/// Sub-operation of a reindex flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    FetchConferences,
    FetchTalks,
    FetchTalk,
    EnsureIndex,
    DeleteIndex,
    PurgeDocuments,
    BulkWrite,
    DeleteDocument,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::FetchConferences => "fetch-conferences",
            Stage::FetchTalks => "fetch-talks",
            Stage::FetchTalk => "fetch-talk",
            Stage::EnsureIndex => "ensure-index",
            Stage::DeleteIndex => "delete-index",
            Stage::PurgeDocuments => "purge-documents",
            Stage::BulkWrite => "bulk-write",
            Stage::DeleteDocument => "delete-document",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the indexer service.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Unknown conference slug or talk id.
    #[error("{scope} not found")]
    NotFound { scope: Scope },

    /// The submission system failed or returned something unusable.
    #[error("{scope}: {stage} failed: {source}")]
    Upstream {
        scope: Scope,
        stage: Stage,
        #[source]
        source: SourceError,
    },

    /// The search engine failed a lifecycle or write call.
    #[error("{scope}: {stage} failed: {source}")]
    Index {
        scope: Scope,
        stage: Stage,
        #[source]
        source: SearchIndexError,
    },

    /// The search engine refused the canonical mapping at creation time.
    #[error("{scope}: index '{index}' rejected its mapping: {source}")]
    Configuration {
        scope: Scope,
        index: String,
        #[source]
        source: SearchIndexError,
    },

    /// The operation deadline elapsed before the scope finished.
    #[error("{scope}: timed out after {}s", .after.as_secs())]
    TimedOut { scope: Scope, after: Duration },

    /// A full reindex finished, but some conferences failed.
    #[error("{scope}: {} of {attempted} conference(s) failed: {}", .failures.len(), summarize(.failures))]
    Partial {
        scope: Scope,
        attempted: usize,
        failures: Vec<SyncError>,
    },
}

impl SyncError {
    pub(crate) fn upstream(scope: &Scope, stage: Stage, source: SourceError) -> Self {
        SyncError::Upstream {
            scope: scope.clone(),
            stage,
            source,
        }
    }

    pub(crate) fn index(scope: &Scope, stage: Stage, source: SearchIndexError) -> Self {
        SyncError::Index {
            scope: scope.clone(),
            stage,
            source,
        }
    }

    /// The scope the failing operation was working on.
    pub fn scope(&self) -> &Scope {
        match self {
            SyncError::NotFound { scope }
            | SyncError::Upstream { scope, .. }
            | SyncError::Index { scope, .. }
            | SyncError::Configuration { scope, .. }
            | SyncError::TimedOut { scope, .. }
            | SyncError::Partial { scope, .. } => scope,
        }
    }

    /// The stage that failed, when the failure belongs to a single stage.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            SyncError::Upstream { stage, .. } | SyncError::Index { stage, .. } => Some(*stage),
            SyncError::Configuration { .. } => Some(Stage::EnsureIndex),
            SyncError::NotFound { .. } | SyncError::TimedOut { .. } | SyncError::Partial { .. } => None,
        }
    }

    /// Returns true for an unknown conference or talk.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SyncError::NotFound { .. })
    }
}

fn summarize(failures: &[SyncError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
