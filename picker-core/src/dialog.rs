//! Search dialog state as owned by the controller.

use picker_types::{EntityId, SearchHit};
use serde::Serialize;
use std::collections::BTreeSet;

/// Which flow the dialog was opened for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DialogMode {
    /// Append a new entity.
    Add,
    /// Swap the given selected entity for another one.
    Replace(EntityId),
}

/// Authoritative dialog state.
///
/// Only the controller mutates it; hosts read it through accessors. A
/// closed dialog always carries no provisional or target id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DialogState {
    is_open: bool,
    provisional_id: Option<EntityId>,
    replace_target_id: Option<EntityId>,
}

impl DialogState {
    pub(crate) fn closed() -> Self {
        Self::default()
    }

    pub(crate) fn add() -> Self {
        Self {
            is_open: true,
            provisional_id: None,
            replace_target_id: None,
        }
    }

    pub(crate) fn replace(target: EntityId) -> Self {
        Self {
            is_open: true,
            provisional_id: Some(target.clone()),
            replace_target_id: Some(target),
        }
    }

    pub(crate) fn set_provisional(&mut self, id: EntityId) {
        self.provisional_id = Some(id);
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn provisional_id(&self) -> Option<&EntityId> {
        self.provisional_id.as_ref()
    }

    pub fn replace_target_id(&self) -> Option<&EntityId> {
        self.replace_target_id.as_ref()
    }

    /// `None` while closed.
    pub fn mode(&self) -> Option<DialogMode> {
        if !self.is_open {
            return None;
        }
        Some(match &self.replace_target_id {
            Some(target) => DialogMode::Replace(target.clone()),
            None => DialogMode::Add,
        })
    }
}

/// Everything the modal shell needs to draw the open dialog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DialogView {
    pub title: String,
    pub mode: DialogMode,
    pub ok_caption: String,
    pub cancel_caption: String,
    pub confirm_enabled: bool,
    pub cancel_enabled: bool,
    /// Current occupant in replace mode, pre-seeded into the search input.
    pub preselected: Option<SearchHit>,
    pub provisional_id: Option<EntityId>,
    /// Ids the search must not offer.
    pub exclude: BTreeSet<EntityId>,
    /// Message of the last failed confirm, shown until the next attempt.
    pub error: Option<String>,
}
