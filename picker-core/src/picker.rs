//! Async picker driver.
//!
//! Wraps a [`PickerController`] and performs the directory I/O its tickets
//! ask for. The controller lock is never held across a directory call, so
//! a cancel issued while a confirm is in flight is applied immediately and
//! the late response is discarded as stale.

use crate::config::PickerConfig;
use crate::controller::PickerController;
use crate::dialog::{DialogState, DialogView};
use crate::error::{PickerError, PickerResult};
use crate::hooks::{PickerHooks, RemovalConfirm};
use crate::search::SearchDialog;
use crate::selection::Selection;
use crate::slots::{SlotRenderer, SlotView, render_slots};
use picker_directory::EntityDirectory;
use picker_types::{Entity, EntityId, SearchHit};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// A mounted picker: controller, search dialog and directory.
#[derive(Clone)]
pub struct Picker {
    controller: Arc<Mutex<PickerController>>,
    search: Arc<SearchDialog>,
    directory: Arc<dyn EntityDirectory>,
}

impl Picker {
    /// Creates a picker that asks `confirm` before every removal.
    pub fn new(
        config: PickerConfig,
        directory: Arc<dyn EntityDirectory>,
        confirm: Arc<dyn RemovalConfirm>,
    ) -> PickerResult<Self> {
        Self::with_hooks(config, PickerHooks::new(confirm), directory)
    }

    /// Creates a picker with host-supplied hooks.
    pub fn with_hooks(
        config: PickerConfig,
        hooks: PickerHooks,
        directory: Arc<dyn EntityDirectory>,
    ) -> PickerResult<Self> {
        let search = SearchDialog::new(directory.clone(), config.search.clone());
        let controller = PickerController::with_hooks(config, hooks)?;
        Ok(Self {
            controller: Arc::new(Mutex::new(controller)),
            search: Arc::new(search),
            directory,
        })
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Enriches the initial ids and fills the selection. Returns its size.
    pub async fn initialize(&self, initial_ids: Vec<EntityId>) -> PickerResult<usize> {
        let ticket = self.controller.lock().await.initialize(initial_ids);
        self.search.reset().await;
        let result = self.directory.lookup_by_ids(ticket.ids()).await;
        self.controller.lock().await.apply_batch(ticket, result)
    }

    // ── Slot grid events ─────────────────────────────────────────

    pub async fn click_empty_slot(&self) -> bool {
        let opened = self.controller.lock().await.on_empty_slot_clicked();
        if opened {
            self.search.reset().await;
        }
        opened
    }

    pub async fn click_slot(&self, id: &EntityId) -> bool {
        let opened = self.controller.lock().await.on_slot_clicked(id);
        if opened {
            self.search.reset().await;
        }
        opened
    }

    // ── Dialog events ────────────────────────────────────────────

    /// Feeds a keystroke to the search. See [`SearchDialog::on_query_changed`].
    pub async fn type_query(&self, text: &str) -> PickerResult<Option<Vec<SearchHit>>> {
        let exclude = self.open_exclusion_set().await?;
        self.search.on_query_changed(text, exclude).await
    }

    /// Fetches the next page of the current search.
    pub async fn load_more(&self) -> PickerResult<Option<Vec<SearchHit>>> {
        let exclude = self.open_exclusion_set().await?;
        self.search.load_more(exclude).await
    }

    pub async fn select(&self, id: EntityId) -> PickerResult<()> {
        self.controller.lock().await.on_provisional_select(id)
    }

    /// Enriches the provisional id and commits it.
    pub async fn confirm(&self) -> PickerResult<Entity> {
        let ticket = self.controller.lock().await.on_dialog_confirm()?;
        let id = ticket
            .id()
            .cloned()
            .ok_or(PickerError::NoProvisionalSelection)?;
        debug!("Confirm: looking up {}", id);
        let result = self.directory.lookup_by_id(&id).await;
        // Search reset happens while the controller is still locked.
        let mut controller = self.controller.lock().await;
        let entity = controller.apply_lookup(ticket, result)?;
        self.search.reset().await;
        Ok(entity)
    }

    pub async fn cancel(&self) {
        self.controller.lock().await.on_dialog_cancel();
        self.search.reset().await;
    }

    /// See [`PickerController::on_delete_requested`].
    pub async fn request_delete(&self, id: &EntityId) -> PickerResult<Option<Entity>> {
        self.controller.lock().await.on_delete_requested(id)
    }

    // ── Views ────────────────────────────────────────────────────

    pub async fn value(&self) -> Vec<EntityId> {
        self.controller.lock().await.value()
    }

    pub async fn form_fields(&self) -> Vec<(String, String)> {
        self.controller.lock().await.form_fields()
    }

    pub async fn selection(&self) -> Selection {
        self.controller.lock().await.selection().clone()
    }

    pub async fn dialog(&self) -> DialogState {
        self.controller.lock().await.dialog().clone()
    }

    pub async fn dialog_view(&self) -> Option<DialogView> {
        self.controller.lock().await.dialog_view()
    }

    pub async fn slots(&self) -> Vec<SlotView> {
        self.controller.lock().await.slots()
    }

    pub async fn render<R: SlotRenderer + ?Sized>(&self, renderer: &R) -> Vec<R::Output> {
        render_slots(&self.slots().await, renderer)
    }

    pub async fn search_hits(&self) -> Vec<SearchHit> {
        self.search.hits().await
    }

    pub async fn last_error(&self) -> Option<String> {
        self.controller.lock().await.last_error().map(str::to_string)
    }

    async fn open_exclusion_set(&self) -> PickerResult<std::collections::BTreeSet<EntityId>> {
        let controller = self.controller.lock().await;
        if !controller.dialog().is_open() {
            return Err(PickerError::DialogClosed);
        }
        Ok(controller.exclusion_set())
    }
}

impl std::fmt::Debug for Picker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker").finish_non_exhaustive()
    }
}
