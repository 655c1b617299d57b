//! Directory capability abstraction.
//!
//! Defines the trait the picker uses to enrich bare ids into records and to
//! search for new candidates, allowing the state machine to work with any
//! backend.

use crate::error::DirectoryResult;
use async_trait::async_trait;
use picker_types::{Entity, EntityId, SearchHit};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Page size used when a query does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Upper bound on the page size a directory will serve.
pub const MAX_PAGE_SIZE: usize = 100;

/// A free-text directory query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Text typed by the user. Empty text matches every record.
    pub text: String,
    /// Ids that must not appear in the results.
    pub exclude: BTreeSet<EntityId>,
    /// Number of matching records to skip.
    pub skip: usize,
    /// Requested page size; clamped by [`SearchQuery::effective_limit`].
    pub limit: usize,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exclude: BTreeSet::new(),
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Adds ids to the exclusion set.
    #[must_use]
    pub fn excluding(mut self, ids: impl IntoIterator<Item = EntityId>) -> Self {
        self.exclude.extend(ids);
        self
    }

    /// Sets the paging window.
    #[must_use]
    pub fn page(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    /// The page size actually served: at least 1, at most [`MAX_PAGE_SIZE`].
    pub fn effective_limit(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }

    /// Returns whether `id` is excluded by this query.
    pub fn is_excluded(&self, id: &EntityId) -> bool {
        self.exclude.contains(id)
    }
}

/// An entity directory: the source of truth for entity records.
#[async_trait]
pub trait EntityDirectory: Send + Sync {
    /// Looks up many ids at once. Ids the directory does not know are
    /// omitted from the result; that is not an error.
    async fn lookup_by_ids(&self, ids: &[EntityId]) -> DirectoryResult<Vec<Entity>>;

    /// Looks up a single id. `Ok(None)` means the entity does not exist.
    async fn lookup_by_id(&self, id: &EntityId) -> DirectoryResult<Option<Entity>>;

    /// Searches the directory, never returning excluded ids.
    async fn search(&self, query: &SearchQuery) -> DirectoryResult<Vec<SearchHit>>;
}

#[async_trait]
impl<D: EntityDirectory + ?Sized> EntityDirectory for Arc<D> {
    async fn lookup_by_ids(&self, ids: &[EntityId]) -> DirectoryResult<Vec<Entity>> {
        (**self).lookup_by_ids(ids).await
    }

    async fn lookup_by_id(&self, id: &EntityId) -> DirectoryResult<Option<Entity>> {
        (**self).lookup_by_id(id).await
    }

    async fn search(&self, query: &SearchQuery) -> DirectoryResult<Vec<SearchHit>> {
        (**self).search(query).await
    }
}
