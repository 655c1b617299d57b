//! Host strategies the controller is constructed with.

use crate::dialog::DialogState;
use crate::error::PickerError;
use picker_types::Entity;
use std::sync::Arc;

/// Receives picker events.
///
/// Every method has a no-op default; implement only what the host needs.
pub trait PickerHost: Send + Sync {
    /// An entity was committed by a dialog confirm (add or replace).
    fn on_entity_added(&self, entity: &Entity) {
        let _ = entity;
    }

    /// An entity was removed after a confirmed delete.
    fn on_entity_removed(&self, entity: &Entity) {
        let _ = entity;
    }

    /// The dialog was cancelled.
    fn on_cancel(&self) {}

    /// A directory operation failed; the message is meant for display.
    fn on_error(&self, error: &PickerError) {
        let _ = error;
    }
}

/// Lets the host veto a delete before the user is asked to confirm it.
pub trait DeleteGuard: Send + Sync {
    /// Return `false` to abort the delete silently.
    fn before_delete(&self, entity: &Entity) -> bool {
        let _ = entity;
        true
    }
}

/// Blocking destructive-action confirmation (a modal "are you sure?").
pub trait RemovalConfirm: Send + Sync {
    /// Return `true` to proceed with the removal.
    fn confirm_removal(&self, entity: &Entity) -> bool;
}

/// Decides whether the dialog's confirm/cancel buttons are enabled.
pub trait AffordancePolicy: Send + Sync {
    fn confirm_enabled(&self, dialog: &DialogState, confirm_in_flight: bool) -> bool {
        dialog.is_open() && dialog.provisional_id().is_some() && !confirm_in_flight
    }

    fn cancel_enabled(&self, dialog: &DialogState, confirm_in_flight: bool) -> bool {
        let _ = confirm_in_flight;
        dialog.is_open()
    }
}

/// Host that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl PickerHost for NoopHost {}

/// Guard that never vetoes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllowDelete;

impl DeleteGuard for AllowDelete {}

/// Confirm enabled iff something is provisionally selected and no confirm
/// is in flight; cancel enabled while open.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAffordances;

impl AffordancePolicy for DefaultAffordances {}

/// The strategies a controller is constructed with.
///
/// The removal confirmation has no default: every picker asks before it
/// deletes.
#[derive(Clone)]
pub struct PickerHooks {
    pub host: Arc<dyn PickerHost>,
    pub delete_guard: Arc<dyn DeleteGuard>,
    pub confirm: Arc<dyn RemovalConfirm>,
    pub affordances: Arc<dyn AffordancePolicy>,
}

impl PickerHooks {
    /// Hooks with the given removal confirmation; no host, no veto and the
    /// default affordances.
    pub fn new(confirm: Arc<dyn RemovalConfirm>) -> Self {
        Self {
            host: Arc::new(NoopHost),
            delete_guard: Arc::new(AllowDelete),
            confirm,
            affordances: Arc::new(DefaultAffordances),
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: Arc<dyn PickerHost>) -> Self {
        self.host = host;
        self
    }

    #[must_use]
    pub fn with_delete_guard(mut self, guard: Arc<dyn DeleteGuard>) -> Self {
        self.delete_guard = guard;
        self
    }

    #[must_use]
    pub fn with_confirm(mut self, confirm: Arc<dyn RemovalConfirm>) -> Self {
        self.confirm = confirm;
        self
    }

    #[must_use]
    pub fn with_affordances(mut self, affordances: Arc<dyn AffordancePolicy>) -> Self {
        self.affordances = affordances;
        self
    }
}

impl std::fmt::Debug for PickerHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerHooks").finish_non_exhaustive()
    }
}
