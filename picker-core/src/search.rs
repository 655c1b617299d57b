//! Query-as-you-type search for the dialog.
//!
//! The dialog holds no authoritative state beyond the current query and the
//! results shown for it. Keystrokes are debounced: each one supersedes the
//! previous, and only a query that stays unchanged for the debounce period
//! reaches the directory. Results that arrive for a superseded query are
//! dropped.

use crate::config::SearchConfig;
use crate::error::PickerResult;
use picker_directory::{EntityDirectory, SearchQuery};
use picker_types::{EntityId, SearchHit};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct SearchState {
    text: String,
    hits: Vec<SearchHit>,
    /// Next page offset.
    skip: usize,
    /// The last page came back short.
    exhausted: bool,
}

/// Debounced, paged directory search.
pub struct SearchDialog {
    directory: Arc<dyn EntityDirectory>,
    config: SearchConfig,
    generation: AtomicU64,
    state: Mutex<SearchState>,
}

impl SearchDialog {
    pub fn new(directory: Arc<dyn EntityDirectory>, config: SearchConfig) -> Self {
        Self {
            directory,
            config,
            generation: AtomicU64::new(0),
            state: Mutex::new(SearchState::default()),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Current query text.
    pub async fn query(&self) -> String {
        self.state.lock().await.text.clone()
    }

    /// Results accumulated for the current query.
    pub async fn hits(&self) -> Vec<SearchHit> {
        self.state.lock().await.hits.clone()
    }

    /// Whether another page may exist for the current query.
    pub async fn has_more(&self) -> bool {
        let state = self.state.lock().await;
        !state.text.trim().is_empty() && !state.exhausted
    }

    /// Handles a keystroke.
    ///
    /// Returns `Ok(None)` when a later keystroke superseded this one, either
    /// during the debounce period or while the request was in flight.
    /// Whitespace-only text clears the results without a request.
    pub async fn on_query_changed(
        &self,
        text: &str,
        exclude: BTreeSet<EntityId>,
    ) -> PickerResult<Option<Vec<SearchHit>>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.lock().await;
            state.text = text.to_string();
            state.hits.clear();
            state.skip = 0;
            state.exhausted = false;
        }

        if text.trim().is_empty() {
            return Ok(Some(Vec::new()));
        }

        tokio::time::sleep(self.config.debounce()).await;
        if !self.is_current(generation) {
            debug!("Search for {:?} superseded during debounce", text);
            return Ok(None);
        }

        self.fetch_page(generation, text, exclude, 0).await
    }

    /// Fetches the next page of the current query, without debounce.
    /// Returns only the new hits.
    pub async fn load_more(
        &self,
        exclude: BTreeSet<EntityId>,
    ) -> PickerResult<Option<Vec<SearchHit>>> {
        let generation = self.generation.load(Ordering::SeqCst);
        let (text, skip) = {
            let state = self.state.lock().await;
            if state.text.trim().is_empty() || state.exhausted {
                return Ok(Some(Vec::new()));
            }
            (state.text.clone(), state.skip)
        };
        self.fetch_page(generation, &text, exclude, skip).await
    }

    /// Drops the query and results; any pending search becomes stale.
    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *self.state.lock().await = SearchState::default();
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn fetch_page(
        &self,
        generation: u64,
        text: &str,
        exclude: BTreeSet<EntityId>,
        skip: usize,
    ) -> PickerResult<Option<Vec<SearchHit>>> {
        let query = SearchQuery {
            text: text.trim().to_string(),
            exclude,
            skip,
            limit: self.config.page_size,
        };
        let result = self.directory.search(&query).await;

        if !self.is_current(generation) {
            debug!("Dropping results for superseded query {:?}", text);
            return Ok(None);
        }
        let page = result?;

        let mut state = self.state.lock().await;
        // A concurrent load_more for the same generation may have advanced.
        if state.skip != skip {
            return Ok(None);
        }
        state.skip = skip + page.len();
        state.exhausted = page.len() < query.effective_limit();
        state.hits.extend(page.iter().cloned());
        debug!("Search {:?} returned {} hits (skip {})", text, page.len(), skip);
        Ok(Some(page))
    }
}

impl std::fmt::Debug for SearchDialog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchDialog")
            .field("config", &self.config)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
