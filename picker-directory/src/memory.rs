//! In-memory directory backed by a fixed record list.

use crate::directory::{EntityDirectory, SearchQuery};
use crate::error::{DirectoryError, DirectoryResult};
use async_trait::async_trait;
use picker_types::{Entity, EntityId, SearchHit, TitleFormat};
use std::collections::HashSet;
use tracing::debug;

/// Fields matched by free-text search unless configured otherwise.
const DEFAULT_SEARCH_FIELDS: [&str; 2] = ["first_name", "last_name"];

/// Field used to order search results.
const SORT_FIELD: &str = "first_name";

/// A directory holding its records in memory.
///
/// Search matches the query text case-insensitively against the configured
/// search fields, orders hits by `first_name` and formats each hit's text
/// with the configured [`TitleFormat`].
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    records: Vec<Entity>,
    title_format: TitleFormat,
    search_fields: Vec<String>,
}

impl MemoryDirectory {
    /// Creates a directory from records. Later duplicates of an id are dropped.
    pub fn new(records: impl IntoIterator<Item = Entity>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|e| seen.insert(e.id.clone()))
            .collect();
        Self {
            records,
            title_format: TitleFormat::default(),
            search_fields: DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Parses a JSON array of records.
    pub fn from_json(json: &str) -> DirectoryResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Array(items) = value else {
            return Err(DirectoryError::InvalidResponse(
                "expected a JSON array of records".into(),
            ));
        };
        let records = items
            .into_iter()
            .map(Entity::from_value)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DirectoryError::InvalidResponse(e.to_string()))?;
        Ok(Self::new(records))
    }

    /// Sets the format used for search hit text.
    #[must_use]
    pub fn with_title_format(mut self, format: impl Into<TitleFormat>) -> Self {
        self.title_format = format.into();
        self
    }

    /// Sets the fields matched by free-text search.
    #[must_use]
    pub fn with_search_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Adds or replaces a record.
    pub fn upsert(&mut self, entity: Entity) {
        match self.records.iter_mut().find(|e| e.id == entity.id) {
            Some(slot) => *slot = entity,
            None => self.records.push(entity),
        }
    }

    /// Removes a record, returning it if present.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let pos = self.records.iter().position(|e| &e.id == id)?;
        Some(self.records.remove(pos))
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.records.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn title_format(&self) -> &TitleFormat {
        &self.title_format
    }

    fn matches(&self, entity: &Entity, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.search_fields.iter().any(|field| {
            entity
                .field(field)
                .and_then(|v| v.as_str())
                .is_some_and(|s| s.to_lowercase().contains(needle))
        })
    }

    /// Synchronous search used by both the trait impl and the server.
    pub fn search_sync(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let needle = query.text.trim().to_lowercase();
        let mut hits: Vec<&Entity> = self
            .records
            .iter()
            .filter(|e| !query.is_excluded(&e.id))
            .filter(|e| self.matches(e, &needle))
            .collect();
        hits.sort_by(|a, b| {
            let ka = a.field(SORT_FIELD).and_then(|v| v.as_str()).unwrap_or("");
            let kb = b.field(SORT_FIELD).and_then(|v| v.as_str()).unwrap_or("");
            ka.cmp(kb)
        });

        hits.into_iter()
            .skip(query.skip)
            .take(query.effective_limit())
            .map(|e| SearchHit::new(e.id.clone(), self.title_format.render(e)))
            .collect()
    }

    /// Synchronous batch lookup; preserves the order of `ids`, drops unknown
    /// and repeated ids.
    pub fn lookup_sync(&self, ids: &[EntityId]) -> Vec<Entity> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.get(id).cloned())
            .collect()
    }
}

#[async_trait]
impl EntityDirectory for MemoryDirectory {
    async fn lookup_by_ids(&self, ids: &[EntityId]) -> DirectoryResult<Vec<Entity>> {
        let found = self.lookup_sync(ids);
        debug!("memory lookup: {} requested, {} found", ids.len(), found.len());
        Ok(found)
    }

    async fn lookup_by_id(&self, id: &EntityId) -> DirectoryResult<Option<Entity>> {
        Ok(self.get(id).cloned())
    }

    async fn search(&self, query: &SearchQuery) -> DirectoryResult<Vec<SearchHit>> {
        Ok(self.search_sync(query))
    }
}
