//! IndexerService - keeps the public and private talk indices in sync.
//!
//! Three scopes are supported:
//!
//! - all conferences: both indices are rebuilt from scratch, then every
//!   conference is written. Conference failures are collected and reported
//!   together as [`SyncError::Partial`]; the remaining conferences are still
//!   written.
//! - one conference: that conference's documents are purged from both
//!   indices and rewritten from the current upstream state.
//! - one talk: the private document is upserted; the public document is
//!   upserted when the talk is approved and deleted otherwise.
//!
//! Every flow ensures both indices exist before writing, so a flow that was
//! interrupted between deleting and recreating an index heals on the next
//! call. Nothing is retried here.
//!
//! Index deletion and recreation during a full rebuild hold the lifecycle
//! gate exclusively. Conference and talk flows hold it shared from their
//! first index check to their last write, so they never observe or write
//! into a half-rebuilt index.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::domain::conference::{find_by_id, find_by_slug};
use crate::domain::{private_views, public_views, talk_index_mapping, Conference, Talk};
use crate::ports::{SearchIndex, TalkSource};

use super::error::{Scope, Stage, SyncError};
use super::scope_locks::ScopeLocks;
use super::Indexer;

/// Names of the two indices the service maintains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexNames {
    /// Redacted, approved-only documents.
    pub public: String,
    /// Full documents for internal use.
    pub private: String,
}

impl IndexNames {
    pub fn new(public: impl Into<String>, private: impl Into<String>) -> Self {
        Self {
            public: public.into(),
            private: private.into(),
        }
    }
}

/// Counts of what a conference or full reindex wrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReindexSummary {
    pub conferences: usize,
    pub public_documents: usize,
    pub private_documents: usize,
}

impl ReindexSummary {
    fn absorb(&mut self, other: ReindexSummary) {
        self.conferences += other.conferences;
        self.public_documents += other.public_documents;
        self.private_documents += other.private_documents;
    }
}

/// Public-index membership of a talk after a single-talk reindex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkOutcome {
    /// Approved: present in both indices.
    Published,
    /// Not approved: present in the private index only.
    Unpublished,
}

/// Orchestrates reindexing from the talk source into the search index.
pub struct IndexerService {
    source: Arc<dyn TalkSource>,
    search: Arc<dyn SearchIndex>,
    indices: IndexNames,
    locks: ScopeLocks,
    lifecycle: RwLock<()>,
    deadline: Option<Duration>,
}

impl IndexerService {
    pub fn new(source: Arc<dyn TalkSource>, search: Arc<dyn SearchIndex>, indices: IndexNames) -> Self {
        Self {
            source,
            search,
            indices,
            locks: ScopeLocks::new(),
            lifecycle: RwLock::new(()),
            deadline: None,
        }
    }

    /// Bounds every operation (including waiting for its scope lock).
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn indices(&self) -> &IndexNames {
        &self.indices
    }

    /// Rebuilds both indices from every conference upstream.
    pub async fn reindex_all(&self) -> Result<ReindexSummary, SyncError> {
        let scope = Scope::All;
        self.bounded(&scope, async {
            let _guard = self.locks.acquire(&scope.lock_key()).await;
            info!("starting full reindex");

            let conferences = self.fetch_conferences(&scope).await?;

            {
                let _rebuilding = self.lifecycle.write().await;
                for index in [&self.indices.public, &self.indices.private] {
                    self.rebuild_index(&scope, index).await?;
                }
            }

            let mut summary = ReindexSummary::default();
            let mut failures = Vec::new();
            for conference in &conferences {
                let conference_scope = Scope::Conference(conference.slug.clone());
                let _conference_guard = self.locks.acquire(&conference_scope.lock_key()).await;

                match self.write_conference(&conference_scope, conference, false).await {
                    Ok(written) => summary.absorb(written),
                    Err(err) => {
                        warn!(slug = %conference.slug, error = %err, "conference failed during full reindex");
                        failures.push(err);
                    }
                }
            }

            if !failures.is_empty() {
                return Err(SyncError::Partial {
                    scope: scope.clone(),
                    attempted: conferences.len(),
                    failures,
                });
            }

            info!(
                conferences = summary.conferences,
                public_documents = summary.public_documents,
                private_documents = summary.private_documents,
                "full reindex completed"
            );
            Ok(summary)
        })
        .await
    }

    /// Replaces one conference's documents in both indices.
    pub async fn reindex_conference(&self, slug: &str) -> Result<ReindexSummary, SyncError> {
        let scope = Scope::Conference(slug.to_string());
        self.bounded(&scope, async {
            let _guard = self.locks.acquire(&scope.lock_key()).await;
            info!(slug, "starting conference reindex");

            let conferences = self.fetch_conferences(&scope).await?;
            let conference = find_by_slug(&conferences, slug).ok_or_else(|| SyncError::NotFound {
                scope: scope.clone(),
            })?;

            let _indices = self.lifecycle.read().await;
            for index in [&self.indices.public, &self.indices.private] {
                self.ensure_index(&scope, index).await?;
            }

            let summary = self.write_conference(&scope, conference, true).await?;
            info!(
                slug,
                public_documents = summary.public_documents,
                private_documents = summary.private_documents,
                "conference reindex completed"
            );
            Ok(summary)
        })
        .await
    }

    /// Brings one talk's documents in line with its current upstream state.
    pub async fn reindex_talk(&self, talk_id: &str) -> Result<TalkOutcome, SyncError> {
        let scope = Scope::Talk(talk_id.to_string());
        self.bounded(&scope, async {
            let _guard = self.locks.acquire(&scope.lock_key()).await;
            info!(talk_id, "starting talk reindex");

            let talk = match self.source.get_talk(talk_id).await {
                Ok(talk) => talk,
                Err(err) if err.is_not_found() => {
                    return Err(SyncError::NotFound { scope: scope.clone() })
                }
                Err(err) => return Err(SyncError::upstream(&scope, Stage::FetchTalk, err)),
            };
            let talk = self.with_conference_details(&scope, talk).await?;

            let _indices = self.lifecycle.read().await;
            for index in [&self.indices.public, &self.indices.private] {
                self.ensure_index(&scope, index).await?;
            }

            self.search
                .bulk_index(&self.indices.private, &[talk.to_private()])
                .await
                .map_err(|e| SyncError::index(&scope, Stage::BulkWrite, e))?;

            let outcome = if talk.is_public() {
                self.search
                    .bulk_index(&self.indices.public, &[talk.to_public()])
                    .await
                    .map_err(|e| SyncError::index(&scope, Stage::BulkWrite, e))?;
                TalkOutcome::Published
            } else {
                self.search
                    .delete_document(&self.indices.public, &talk.id)
                    .await
                    .map_err(|e| SyncError::index(&scope, Stage::DeleteDocument, e))?;
                TalkOutcome::Unpublished
            };

            info!(talk_id, status = %talk.status, outcome = ?outcome, "talk reindex completed");
            Ok(outcome)
        })
        .await
    }

    async fn bounded<T, F>(&self, scope: &Scope, operation: F) -> Result<T, SyncError>
    where
        F: Future<Output = Result<T, SyncError>>,
    {
        let result = match self.deadline {
            Some(after) => tokio::time::timeout(after, operation)
                .await
                .unwrap_or_else(|_| {
                    Err(SyncError::TimedOut {
                        scope: scope.clone(),
                        after,
                    })
                }),
            None => operation.await,
        };

        if let Err(err) = &result {
            warn!(scope = %scope, stage = ?err.stage(), error = %err, "reindex failed");
        }
        result
    }

    async fn fetch_conferences(&self, scope: &Scope) -> Result<Vec<Conference>, SyncError> {
        self.source
            .get_conferences()
            .await
            .map_err(|e| SyncError::upstream(scope, Stage::FetchConferences, e))
    }

    /// Fills conference slug and name for talks fetched on their own.
    async fn with_conference_details(&self, scope: &Scope, talk: Talk) -> Result<Talk, SyncError> {
        if !talk.conference_slug.is_empty() {
            return Ok(talk);
        }

        let conferences = self.fetch_conferences(scope).await?;
        match find_by_id(&conferences, &talk.conference_id) {
            Some(conference) => Ok(talk.with_conference(conference)),
            None => {
                warn!(
                    talk_id = %talk.id,
                    conference_id = %talk.conference_id,
                    "talk references an unknown conference"
                );
                Ok(talk)
            }
        }
    }

    /// Fetches a conference's talks and writes both views.
    ///
    /// Talks are fetched before anything is purged, so an upstream failure
    /// leaves the previous documents in place.
    async fn write_conference(
        &self,
        scope: &Scope,
        conference: &Conference,
        purge: bool,
    ) -> Result<ReindexSummary, SyncError> {
        let talks: Vec<Talk> = self
            .source
            .get_talks(&conference.id)
            .await
            .map_err(|e| SyncError::upstream(scope, Stage::FetchTalks, e))?
            .into_iter()
            .map(|talk| talk.with_conference(conference))
            .collect();

        let public = public_views(&talks);
        let private = private_views(&talks);
        debug!(
            slug = %conference.slug,
            talks = talks.len(),
            public = public.len(),
            "talks fetched"
        );

        for (index, documents) in [(&self.indices.public, &public), (&self.indices.private, &private)] {
            if purge {
                let removed = self
                    .search
                    .delete_conference_documents(index, &conference.id)
                    .await
                    .map_err(|e| SyncError::index(scope, Stage::PurgeDocuments, e))?;
                debug!(index = %index, removed, "conference documents purged");
            }
            self.search
                .bulk_index(index, documents)
                .await
                .map_err(|e| SyncError::index(scope, Stage::BulkWrite, e))?;
        }

        Ok(ReindexSummary {
            conferences: 1,
            public_documents: public.len(),
            private_documents: private.len(),
        })
    }

    async fn index_present(&self, scope: &Scope, index: &str) -> Result<bool, SyncError> {
        self.search
            .index_exists(index)
            .await
            .map_err(|e| SyncError::index(scope, Stage::EnsureIndex, e))
    }

    /// Creates the index if it is missing. Losing a creation race to another
    /// writer counts as success.
    async fn ensure_index(&self, scope: &Scope, index: &str) -> Result<(), SyncError> {
        if self.index_present(scope, index).await? {
            return Ok(());
        }

        info!(index, "creating index");
        let created = self.create_index(scope, index).await;
        if let Err(SyncError::Configuration { .. }) = &created {
            if self.index_present(scope, index).await? {
                debug!(index, "index was created concurrently");
                return Ok(());
            }
        }
        created
    }

    async fn rebuild_index(&self, scope: &Scope, index: &str) -> Result<(), SyncError> {
        if self.index_present(scope, index).await? {
            info!(index, "deleting index");
            self.search
                .delete_index(index)
                .await
                .map_err(|e| SyncError::index(scope, Stage::DeleteIndex, e))?;
        }

        info!(index, "creating index");
        self.create_index(scope, index).await
    }

    async fn create_index(&self, scope: &Scope, index: &str) -> Result<(), SyncError> {
        self.search
            .create_index(index, talk_index_mapping())
            .await
            .map_err(|e| {
                if e.is_rejected() {
                    SyncError::Configuration {
                        scope: scope.clone(),
                        index: index.to_string(),
                        source: e,
                    }
                } else {
                    SyncError::index(scope, Stage::EnsureIndex, e)
                }
            })
    }
}

#[async_trait]
impl Indexer for IndexerService {
    async fn reindex_all(&self) -> Result<ReindexSummary, SyncError> {
        IndexerService::reindex_all(self).await
    }

    async fn reindex_conference(&self, slug: &str) -> Result<ReindexSummary, SyncError> {
        IndexerService::reindex_conference(self, slug).await
    }

    async fn reindex_talk(&self, talk_id: &str) -> Result<TalkOutcome, SyncError> {
        IndexerService::reindex_talk(self, talk_id).await
    }
}
