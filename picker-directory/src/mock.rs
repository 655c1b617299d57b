//! A mock directory for testing.
//!
//! Wraps a [`MemoryDirectory`] and records every call. Failures and latency
//! can be injected per call kind.

use crate::directory::{EntityDirectory, SearchQuery};
use crate::error::{DirectoryError, DirectoryResult};
use crate::memory::MemoryDirectory;
use async_trait::async_trait;
use picker_types::{Entity, EntityId, SearchHit};
use std::sync::Mutex;
use std::time::Duration;

/// A call observed by [`MockDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryCall {
    LookupByIds(Vec<EntityId>),
    LookupById(EntityId),
    Search(SearchQuery),
}

#[derive(Debug, Default)]
struct Faults {
    fail_lookups: bool,
    fail_searches: bool,
    latency: Option<Duration>,
}

/// A recording, fault-injecting directory.
#[derive(Debug)]
pub struct MockDirectory {
    inner: Mutex<MemoryDirectory>,
    calls: Mutex<Vec<DirectoryCall>>,
    faults: Mutex<Faults>,
}

impl MockDirectory {
    pub fn new(records: impl IntoIterator<Item = Entity>) -> Self {
        Self::from_memory(MemoryDirectory::new(records))
    }

    pub fn from_memory(inner: MemoryDirectory) -> Self {
        Self {
            inner: Mutex::new(inner),
            calls: Mutex::new(Vec::new()),
            faults: Mutex::new(Faults::default()),
        }
    }

    /// Makes every lookup (batch and single) fail until reset.
    pub fn fail_lookups(&self, fail: bool) {
        self.faults.lock().unwrap().fail_lookups = fail;
    }

    /// Makes every search fail until reset.
    pub fn fail_searches(&self, fail: bool) {
        self.faults.lock().unwrap().fail_searches = fail;
    }

    /// Delays every call by `latency` (uses `tokio::time`, so paused-clock
    /// tests can advance past it).
    pub fn set_latency(&self, latency: Option<Duration>) {
        self.faults.lock().unwrap().latency = latency;
    }

    /// Adds or replaces a record in the backing directory.
    pub fn upsert(&self, entity: Entity) {
        self.inner.lock().unwrap().upsert(entity);
    }

    /// Removes a record from the backing directory.
    pub fn remove(&self, id: &EntityId) -> Option<Entity> {
        self.inner.lock().unwrap().remove(id)
    }

    /// All calls observed so far, oldest first.
    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of searches observed so far.
    pub fn search_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| matches!(c, DirectoryCall::Search(_)))
            .count()
    }

    /// Number of lookups (batch and single) observed so far.
    pub fn lookup_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| !matches!(c, DirectoryCall::Search(_)))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    async fn enter(&self, call: DirectoryCall) -> (bool, bool) {
        let is_search = matches!(call, DirectoryCall::Search(_));
        self.calls.lock().unwrap().push(call);
        let (latency, fail) = {
            let faults = self.faults.lock().unwrap();
            let fail = if is_search {
                faults.fail_searches
            } else {
                faults.fail_lookups
            };
            (faults.latency, fail)
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        (fail, is_search)
    }
}

fn injected(is_search: bool) -> DirectoryError {
    let what = if is_search { "search" } else { "lookup" };
    DirectoryError::Unavailable(format!("injected {what} failure"))
}

#[async_trait]
impl EntityDirectory for MockDirectory {
    async fn lookup_by_ids(&self, ids: &[EntityId]) -> DirectoryResult<Vec<Entity>> {
        let (fail, is_search) = self.enter(DirectoryCall::LookupByIds(ids.to_vec())).await;
        if fail {
            return Err(injected(is_search));
        }
        Ok(self.inner.lock().unwrap().lookup_sync(ids))
    }

    async fn lookup_by_id(&self, id: &EntityId) -> DirectoryResult<Option<Entity>> {
        let (fail, is_search) = self.enter(DirectoryCall::LookupById(id.clone())).await;
        if fail {
            return Err(injected(is_search));
        }
        Ok(self.inner.lock().unwrap().get(id).cloned())
    }

    async fn search(&self, query: &SearchQuery) -> DirectoryResult<Vec<SearchHit>> {
        let (fail, is_search) = self.enter(DirectoryCall::Search(query.clone())).await;
        if fail {
            return Err(injected(is_search));
        }
        Ok(self.inner.lock().unwrap().search_sync(query))
    }
}
