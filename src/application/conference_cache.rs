//! Conference list cache for the admin console.
//!
//! The list is fetched from the talk source on first use and kept for the
//! life of the process. Concurrent first callers share a single fetch.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::Conference;
use crate::ports::{SourceError, TalkSource};

pub struct ConferenceCache {
    source: Arc<dyn TalkSource>,
    conferences: RwLock<Option<Arc<Vec<Conference>>>>,
}

impl ConferenceCache {
    pub fn new(source: Arc<dyn TalkSource>) -> Self {
        Self {
            source,
            conferences: RwLock::new(None),
        }
    }

    /// Returns the cached list, fetching it if this is the first call.
    ///
    /// A failed fetch is not cached; the next call tries again.
    pub async fn get_conferences(&self) -> Result<Arc<Vec<Conference>>, SourceError> {
        if let Some(cached) = self.conferences.read().await.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let mut slot = self.conferences.write().await;
        if let Some(cached) = slot.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let fetched = Arc::new(self.source.get_conferences().await?);
        debug!(count = fetched.len(), "conference list cached");
        *slot = Some(Arc::clone(&fetched));
        Ok(fetched)
    }

    #[cfg(test)]
    async fn is_populated(&self) -> bool {
        self.conferences.read().await.is_some()
    }
}
