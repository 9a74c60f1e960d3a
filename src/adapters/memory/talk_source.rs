//! In-memory talk source.
//!
//! Holds conferences and talks set up by the caller. Used by integration
//! tests and for running the service without a submission system.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{Conference, Talk};
use crate::ports::{SourceError, TalkSource};

#[derive(Default)]
struct State {
    conferences: Vec<Conference>,
    /// Talks keyed by conference id, then talk id.
    talks: BTreeMap<String, BTreeMap<String, Talk>>,
    failing: HashSet<String>,
}

/// In-memory implementation of the TalkSource port.
#[derive(Default)]
pub struct InMemoryTalkSource {
    state: Mutex<State>,
    conference_fetches: AtomicUsize,
}

impl InMemoryTalkSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_conference(&self, conference: Conference) {
        let mut state = self.state();
        state.talks.entry(conference.id.clone()).or_default();
        state.conferences.push(conference);
    }

    /// Inserts or replaces a talk under its conference id.
    pub fn put_talk(&self, talk: Talk) {
        self.state()
            .talks
            .entry(talk.conference_id.clone())
            .or_default()
            .insert(talk.id.clone(), talk);
    }

    pub fn remove_talk(&self, talk_id: &str) {
        for talks in self.state().talks.values_mut() {
            talks.remove(talk_id);
        }
    }

    /// Makes `get_talks` fail for this conference id.
    pub fn fail_conference(&self, conference_id: &str) {
        self.state().failing.insert(conference_id.to_string());
    }

    /// Number of `get_conferences` calls served so far.
    pub fn conference_fetches(&self) -> usize {
        self.conference_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TalkSource for InMemoryTalkSource {
    async fn get_conferences(&self) -> Result<Vec<Conference>, SourceError> {
        self.conference_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.state().conferences.clone())
    }

    async fn get_talks(&self, conference_id: &str) -> Result<Vec<Talk>, SourceError> {
        let state = self.state();
        if state.failing.contains(conference_id) {
            return Err(SourceError::Status {
                status: 503,
                message: format!("sessions of conference {} unavailable", conference_id),
            });
        }
        Ok(state
            .talks
            .get(conference_id)
            .map(|talks| talks.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_talk(&self, talk_id: &str) -> Result<Talk, SourceError> {
        self.state()
            .talks
            .values()
            .find_map(|talks| talks.get(talk_id))
            .cloned()
            .ok_or_else(|| SourceError::not_found(format!("session {}", talk_id)))
    }
}
