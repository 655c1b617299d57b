//! Picker controller: the selection state machine, without I/O.
//!
//! The controller owns the selection and the dialog state. Operations that
//! need the directory return a [`LookupTicket`]; the caller performs the
//! lookup and hands the result back with [`PickerController::apply_batch`]
//! or [`PickerController::apply_lookup`]. A ticket that no longer matches
//! the controller's outstanding request is stale and its result is dropped.
//! The [`crate::Picker`] driver performs the I/O.

use crate::config::PickerConfig;
use crate::dialog::{DialogMode, DialogState, DialogView};
use crate::error::{PickerError, PickerResult};
use crate::hooks::{PickerHooks, RemovalConfirm};
use crate::selection::Selection;
use crate::slots::{OccupiedSlot, SlotView};
use picker_directory::DirectoryResult;
use picker_types::{Entity, EntityId, SearchHit, TitleFormat};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Kind of directory request a ticket stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// Batch enrichment of the initial ids.
    Batch,
    /// Single enrichment of the provisional id on confirm.
    Single,
}

/// Handle for one outstanding directory request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    kind: LookupKind,
    generation: u64,
    ids: Vec<EntityId>,
}

impl LookupTicket {
    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    /// Ids to look up. A `Single` ticket carries exactly one.
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// The id of a `Single` ticket.
    pub fn id(&self) -> Option<&EntityId> {
        match self.kind {
            LookupKind::Single => self.ids.first(),
            LookupKind::Batch => None,
        }
    }
}

/// The picker state machine.
#[derive(Debug)]
pub struct PickerController {
    config: PickerConfig,
    title_format: TitleFormat,
    hooks: PickerHooks,
    selection: Selection,
    dialog: DialogState,
    /// Bumped whenever the dialog opens or resets.
    session: u64,
    pending_confirm: Option<LookupTicket>,
    /// Bumped by every `initialize`.
    init_generation: u64,
    pending_init: Option<LookupTicket>,
    last_error: Option<String>,
}

impl PickerController {
    /// Creates a controller that asks `confirm` before every removal.
    pub fn new(config: PickerConfig, confirm: Arc<dyn RemovalConfirm>) -> PickerResult<Self> {
        Self::with_hooks(config, PickerHooks::new(confirm))
    }

    /// Creates a controller with host-supplied hooks.
    pub fn with_hooks(config: PickerConfig, hooks: PickerHooks) -> PickerResult<Self> {
        config.validate()?;
        Ok(Self {
            title_format: TitleFormat::new(config.display_template.clone()),
            selection: Selection::new(config.max_slots),
            config,
            hooks,
            dialog: DialogState::closed(),
            session: 0,
            pending_confirm: None,
            init_generation: 0,
            pending_init: None,
            last_error: None,
        })
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// Replace and delete affordances are available.
    pub fn is_editable(&self) -> bool {
        self.config.enabled
    }

    pub fn is_initializing(&self) -> bool {
        self.pending_init.is_some()
    }

    pub fn is_confirm_in_flight(&self) -> bool {
        self.pending_confirm.is_some()
    }

    /// Message of the last failed directory operation.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The externally visible value: selected ids in slot order.
    pub fn value(&self) -> Vec<EntityId> {
        self.selection.ids()
    }

    /// Form serialization: one `{name}[]` field per selected id.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let key = format!("{}[]", self.config.name);
        self.selection
            .keys()
            .map(|id| (key.clone(), id.to_string()))
            .collect()
    }

    /// Ids the search must not offer: the selection, minus the replace
    /// target while in replace mode.
    pub fn exclusion_set(&self) -> BTreeSet<EntityId> {
        let target = self.dialog.replace_target_id();
        self.selection
            .keys()
            .filter(|id| Some(*id) != target)
            .cloned()
            .collect()
    }

    pub fn title_of(&self, entity: &Entity) -> String {
        self.title_format.render(entity)
    }

    pub fn confirm_enabled(&self) -> bool {
        self.hooks
            .affordances
            .confirm_enabled(&self.dialog, self.is_confirm_in_flight())
    }

    pub fn cancel_enabled(&self) -> bool {
        self.hooks
            .affordances
            .cancel_enabled(&self.dialog, self.is_confirm_in_flight())
    }

    /// Slot grid projection: occupied slots in order, then the empty slot
    /// when capacity remains and it is enabled.
    pub fn slots(&self) -> Vec<SlotView> {
        let editable = self.is_editable();
        let mut slots: Vec<SlotView> = self
            .selection
            .iter()
            .map(|entity| {
                SlotView::Occupied(OccupiedSlot {
                    title: self.title_of(entity),
                    picture_url: entity.picture_url().map(str::to_string),
                    deletable: editable,
                    replaceable: editable && self.config.allow_replace,
                    link: if editable {
                        None
                    } else {
                        entity.profile_url().map(str::to_string)
                    },
                    entity: entity.clone(),
                })
            })
            .collect();
        if self.config.empty_slot_enabled && !self.selection.is_full() {
            slots.push(SlotView::Empty);
        }
        slots
    }

    /// Projection for the modal shell; `None` while closed.
    pub fn dialog_view(&self) -> Option<DialogView> {
        let mode = self.dialog.mode()?;
        let preselected = match &mode {
            DialogMode::Replace(target) => self
                .selection
                .get(target)
                .map(|e| SearchHit::new(e.id.clone(), self.title_of(e))),
            DialogMode::Add => None,
        };
        let ok_caption = match mode {
            DialogMode::Add => "Add",
            DialogMode::Replace(_) => "Replace",
        };
        Some(DialogView {
            title: self.config.modal_title.clone(),
            ok_caption: ok_caption.to_string(),
            cancel_caption: "Cancel".to_string(),
            confirm_enabled: self.confirm_enabled(),
            cancel_enabled: self.cancel_enabled(),
            preselected,
            provisional_id: self.dialog.provisional_id().cloned(),
            exclude: self.exclusion_set(),
            error: self.last_error.clone(),
            mode,
        })
    }

    // ── Initialization ───────────────────────────────────────────

    /// Starts enrichment of the host's initial ids.
    ///
    /// The selection is emptied and stays empty until the batch result is
    /// applied. Any earlier initialization or open dialog is superseded.
    pub fn initialize(&mut self, initial_ids: Vec<EntityId>) -> LookupTicket {
        self.init_generation += 1;
        self.selection.clear();
        self.reset_dialog();
        self.last_error = None;

        let mut seen = HashSet::new();
        let ids: Vec<EntityId> = initial_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let ticket = LookupTicket {
            kind: LookupKind::Batch,
            generation: self.init_generation,
            ids,
        };
        debug!(
            "Initializing picker with {} ids (generation {})",
            ticket.ids.len(),
            self.init_generation
        );
        self.pending_init = Some(ticket.clone());
        ticket
    }

    /// Applies the batch enrichment result. Returns the selection size.
    ///
    /// Records are taken in initial-id order; unknown ids are dropped, as
    /// are records beyond `max_slots`.
    pub fn apply_batch(
        &mut self,
        ticket: LookupTicket,
        result: DirectoryResult<Vec<Entity>>,
    ) -> PickerResult<usize> {
        if ticket.kind != LookupKind::Batch || self.pending_init.as_ref() != Some(&ticket) {
            debug!("Discarding stale batch result (generation {})", ticket.generation);
            return Err(PickerError::StaleResponse);
        }
        self.pending_init = None;

        let records = match result {
            Ok(records) => records,
            Err(e) => return Err(self.fail(PickerError::Directory(e))),
        };

        let mut by_id: HashMap<EntityId, Entity> =
            records.into_iter().map(|e| (e.id.clone(), e)).collect();
        let mut selection = Selection::new(self.config.max_slots);
        let mut missing = 0usize;
        let mut overflow = 0usize;

        for id in &ticket.ids {
            let Some(entity) = by_id.remove(id) else {
                missing += 1;
                continue;
            };
            if selection.is_full() {
                overflow += 1;
                continue;
            }
            selection.insert(entity)?;
        }

        if missing > 0 {
            debug!("{} initial ids no longer exist in the directory", missing);
        }
        if overflow > 0 {
            warn!(
                "Dropped {} initial entities beyond max_slots={}",
                overflow, self.config.max_slots
            );
        }
        if !by_id.is_empty() {
            warn!("Directory returned {} unrequested records", by_id.len());
        }

        self.selection = selection;
        info!("Picker initialized with {} entities", self.selection.len());
        Ok(self.selection.len())
    }

    // ── Slot grid events ─────────────────────────────────────────

    /// Opens the dialog in add mode. Returns whether it opened.
    pub fn on_empty_slot_clicked(&mut self) -> bool {
        if self.dialog.is_open() {
            debug!("Ignoring empty slot click: dialog already open");
            return false;
        }
        if !self.config.empty_slot_enabled || self.is_initializing() {
            debug!("Ignoring empty slot click: empty slot not offered");
            return false;
        }
        if self.selection.is_full() {
            debug!(
                "Ignoring empty slot click: selection full ({} slots)",
                self.config.max_slots
            );
            return false;
        }
        self.open(DialogState::add());
        true
    }

    /// Opens the dialog in replace mode for `id`. Returns whether it opened.
    pub fn on_slot_clicked(&mut self, id: &EntityId) -> bool {
        if !self.is_editable() || !self.config.allow_replace {
            return false;
        }
        if self.dialog.is_open() || !self.selection.contains(id) {
            debug!("Ignoring click on slot {}", id);
            return false;
        }
        self.open(DialogState::replace(id.clone()));
        true
    }

    // ── Dialog events ────────────────────────────────────────────

    /// Records a tentative pick. Nothing is committed.
    pub fn on_provisional_select(&mut self, id: EntityId) -> PickerResult<()> {
        if !self.dialog.is_open() {
            return Err(PickerError::DialogClosed);
        }
        if self.is_confirm_in_flight() {
            return Err(PickerError::ConfirmInFlight);
        }
        if self.exclusion_set().contains(&id) {
            return Err(PickerError::Excluded(id));
        }
        self.dialog.set_provisional(id);
        Ok(())
    }

    /// Starts the confirm: returns the single-record lookup to perform.
    pub fn on_dialog_confirm(&mut self) -> PickerResult<LookupTicket> {
        if !self.dialog.is_open() {
            return Err(PickerError::DialogClosed);
        }
        if self.is_confirm_in_flight() {
            return Err(PickerError::ConfirmInFlight);
        }
        let id = self
            .dialog
            .provisional_id()
            .cloned()
            .ok_or(PickerError::NoProvisionalSelection)?;

        let ticket = LookupTicket {
            kind: LookupKind::Single,
            generation: self.session,
            ids: vec![id],
        };
        self.last_error = None;
        self.pending_confirm = Some(ticket.clone());
        Ok(ticket)
    }

    /// Applies the confirm lookup and commits on success.
    ///
    /// On failure the dialog stays open with the state unchanged and the
    /// error is reported to the host.
    pub fn apply_lookup(
        &mut self,
        ticket: LookupTicket,
        result: DirectoryResult<Option<Entity>>,
    ) -> PickerResult<Entity> {
        if ticket.kind != LookupKind::Single || self.pending_confirm.as_ref() != Some(&ticket) {
            debug!("Discarding stale lookup result (session {})", ticket.generation);
            return Err(PickerError::StaleResponse);
        }
        self.pending_confirm = None;

        let Some(requested) = ticket.ids.into_iter().next() else {
            return Err(PickerError::NoProvisionalSelection);
        };

        let entity = match result {
            Ok(Some(entity)) => entity,
            Ok(None) => return Err(self.fail(PickerError::NotFound(requested))),
            Err(e) => return Err(self.fail(PickerError::Directory(e))),
        };
        if entity.id != requested {
            return Err(self.fail(PickerError::UnexpectedRecord {
                requested,
                received: entity.id,
            }));
        }

        let committed = match self.dialog.replace_target_id().cloned() {
            Some(target) if target != requested => self
                .selection
                .replace(&target, entity.clone())
                .map(|old| info!("Replaced {} with {}", old.id, requested)),
            _ if self.selection.contains(&requested) => self
                .selection
                .overwrite(entity.clone())
                .map(|_| debug!("Refreshed record of {}", requested)),
            _ => self
                .selection
                .insert(entity.clone())
                .map(|()| info!("Added {}", requested)),
        };
        if let Err(e) = committed {
            return Err(self.fail(e));
        }

        self.reset_dialog();
        self.hooks.host.on_entity_added(&entity);
        Ok(entity)
    }

    /// Closes the dialog without touching the selection. A confirm still
    /// in flight becomes stale.
    pub fn on_dialog_cancel(&mut self) {
        if !self.dialog.is_open() {
            return;
        }
        if self.pending_confirm.is_some() {
            debug!("Cancel abandons in-flight confirm");
        }
        self.reset_dialog();
        self.hooks.host.on_cancel();
    }

    // ── Removal ──────────────────────────────────────────────────

    /// Veto, confirmation and removal in one step. `Ok(None)` when the
    /// host vetoed or the user declined.
    pub fn on_delete_requested(&mut self, id: &EntityId) -> PickerResult<Option<Entity>> {
        if !self.is_editable() {
            return Err(PickerError::NotEditable);
        }
        let entity = self
            .selection
            .get(id)
            .cloned()
            .ok_or_else(|| PickerError::NotSelected(id.clone()))?;

        if !self.hooks.delete_guard.before_delete(&entity) {
            debug!("Delete of {} vetoed by host", id);
            return Ok(None);
        }
        if !self.hooks.confirm.confirm_removal(&entity) {
            debug!("Delete of {} declined", id);
            return Ok(None);
        }

        let removed = self
            .selection
            .remove(id)
            .ok_or_else(|| PickerError::NotSelected(id.clone()))?;
        if self.dialog.replace_target_id() == Some(id) {
            self.reset_dialog();
        }
        info!("Removed {}", id);
        self.hooks.host.on_entity_removed(&removed);
        Ok(Some(removed))
    }

    // ── Internals ────────────────────────────────────────────────

    fn open(&mut self, state: DialogState) {
        self.session += 1;
        self.pending_confirm = None;
        self.last_error = None;
        debug!("Dialog session {} opened: {:?}", self.session, state.mode());
        self.dialog = state;
    }

    fn reset_dialog(&mut self) {
        if self.dialog.is_open() {
            self.session += 1;
        }
        self.pending_confirm = None;
        self.dialog = DialogState::closed();
    }

    fn fail(&mut self, error: PickerError) -> PickerError {
        warn!("Picker operation failed: {}", error);
        self.last_error = Some(error.to_string());
        self.hooks.host.on_error(&error);
        error
    }
}
