//! Keyed mutual exclusion for reindex scopes.
//!
//! Two triggers for the same conference (or the same talk) must not
//! interleave their purge and write steps. Different keys never block each
//! other. Entries are dropped once nobody holds or waits for them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-key async locks.
#[derive(Debug, Default)]
pub struct ScopeLocks {
    locks: Mutex<HashMap<String, Weak<AsyncMutex<()>>>>,
}

/// Held for as long as the scope is being reindexed.
#[derive(Debug)]
pub struct ScopeGuard {
    _guard: OwnedMutexGuard<()>,
}

impl ScopeLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other holder of `key` remains, then holds it.
    pub async fn acquire(&self, key: &str) -> ScopeGuard {
        let lock = self.lock_for(key);
        ScopeGuard {
            _guard: lock.lock_owned().await,
        }
    }

    /// Number of keys currently held or awaited.
    #[cfg(test)]
    fn active_keys(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| lock.strong_count() > 0);
        locks.len()
    }

    fn lock_for(&self, key: &str) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| lock.strong_count() > 0);

        if let Some(existing) = locks.get(key).and_then(Weak::upgrade) {
            return existing;
        }

        let lock = Arc::new(AsyncMutex::new(()));
        locks.insert(key.to_string(), Arc::downgrade(&lock));
        lock
    }
}
