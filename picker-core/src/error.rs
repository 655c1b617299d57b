//! Error types for the picker.

use picker_directory::DirectoryError;
use picker_types::EntityId;
use thiserror::Error;

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;

/// Errors that can occur in picker operations.
///
/// Every error is local to the operation that produced it; none leaves the
/// picker unusable.
#[derive(Debug, Error)]
pub enum PickerError {
    /// Directory lookup or search failed.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Selection is already at `max_slots`.
    #[error("selection is full ({max} slots)")]
    CapacityExceeded { max: usize },

    /// Entity is already selected.
    #[error("entity already selected: {0}")]
    Duplicate(EntityId),

    /// Entity is not part of the selection.
    #[error("entity not selected: {0}")]
    NotSelected(EntityId),

    /// Directory does not know the entity.
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// Directory answered a lookup with a different record.
    #[error("requested entity {requested}, directory returned {received}")]
    UnexpectedRecord {
        requested: EntityId,
        received: EntityId,
    },

    /// Entity is in the exclusion set of the open dialog.
    #[error("entity is excluded from selection: {0}")]
    Excluded(EntityId),

    /// Operation requires an open dialog.
    #[error("dialog is not open")]
    DialogClosed,

    /// Confirm requires a provisional selection.
    #[error("no entity selected in dialog")]
    NoProvisionalSelection,

    /// A confirm is already waiting on the directory.
    #[error("confirm already in progress")]
    ConfirmInFlight,

    /// Operation requires an editable picker.
    #[error("picker is not editable")]
    NotEditable,

    /// Response belongs to a dialog session or initialization that is no
    /// longer current; it was discarded.
    #[error("stale response discarded")]
    StaleResponse,
}
