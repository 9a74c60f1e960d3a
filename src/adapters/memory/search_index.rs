//! In-memory search index.
//!
//! Stores each document as the JSON the Elasticsearch adapter would send, so
//! tests can assert on exactly what a search client would see.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Talk, TalkDocument};
use crate::ports::{SearchIndex, SearchIndexError};

#[derive(Default)]
struct StoredIndex {
    mapping: Value,
    documents: BTreeMap<String, Value>,
}

#[derive(Default)]
struct State {
    indices: HashMap<String, StoredIndex>,
    reject_mappings: bool,
    write_failure: Option<SearchIndexError>,
}

/// In-memory implementation of the SearchIndex port.
#[derive(Default)]
pub struct InMemorySearchIndex {
    state: Mutex<State>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_index(&self, index: &str) -> bool {
        self.state().indices.contains_key(index)
    }

    /// The mapping body the index was created with.
    pub fn mapping(&self, index: &str) -> Option<Value> {
        self.state().indices.get(index).map(|i| i.mapping.clone())
    }

    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.state().indices.get(index)?.documents.get(id).cloned()
    }

    /// Sorted ids of every document in the index.
    pub fn document_ids(&self, index: &str) -> Vec<String> {
        self.state()
            .indices
            .get(index)
            .map(|i| i.documents.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Makes every subsequent `create_index` fail as a rejected mapping.
    pub fn reject_mappings(&self) {
        self.state().reject_mappings = true;
    }

    /// Makes every subsequent `bulk_index` fail with this error.
    pub fn fail_writes(&self, error: SearchIndexError) {
        self.state().write_failure = Some(error);
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        Ok(self.has_index(index))
    }

    async fn create_index(&self, index: &str, mapping: &Value) -> Result<(), SearchIndexError> {
        let mut state = self.state();
        if state.reject_mappings {
            return Err(SearchIndexError::Rejected {
                index: index.to_string(),
                reason: "mapping rejected".to_string(),
            });
        }
        if state.indices.contains_key(index) {
            return Err(SearchIndexError::Rejected {
                index: index.to_string(),
                reason: "resource_already_exists_exception".to_string(),
            });
        }
        state.indices.insert(
            index.to_string(),
            StoredIndex {
                mapping: mapping.clone(),
                documents: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn delete_index(&self, index: &str) -> Result<(), SearchIndexError> {
        self.state().indices.remove(index);
        Ok(())
    }

    async fn bulk_index(&self, index: &str, talks: &[Talk]) -> Result<(), SearchIndexError> {
        if talks.is_empty() {
            return Ok(());
        }

        let mut state = self.state();
        if let Some(error) = &state.write_failure {
            return Err(error.clone());
        }
        let stored = state
            .indices
            .get_mut(index)
            .ok_or_else(|| SearchIndexError::IndexNotFound(index.to_string()))?;

        for talk in talks {
            let document = serde_json::to_value(TalkDocument::new(talk))
                .map_err(|e| SearchIndexError::parse(e.to_string()))?;
            stored.documents.insert(talk.id.clone(), document);
        }
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchIndexError> {
        if let Some(stored) = self.state().indices.get_mut(index) {
            stored.documents.remove(id);
        }
        Ok(())
    }

    async fn delete_conference_documents(
        &self,
        index: &str,
        conference_id: &str,
    ) -> Result<u64, SearchIndexError> {
        let mut state = self.state();
        let Some(stored) = state.indices.get_mut(index) else {
            return Ok(0);
        };

        let before = stored.documents.len();
        stored
            .documents
            .retain(|_, document| document["conferenceId"] != conference_id);
        Ok((before - stored.documents.len()) as u64)
    }
}
