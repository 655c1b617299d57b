//! Slotted multi-entity picker.
//!
//! Lets an operator pick a bounded set of directory entities and manage
//! them as slots: add through a search dialog, replace by clicking a slot,
//! remove with a confirmed delete.
//!
//! # Architecture
//!
//! - **Selection**: ordered, capacity-bounded id → entity map
//! - **Controller**: the state machine; owns selection and dialog state,
//!   emits lookup tickets instead of doing I/O
//! - **SearchDialog**: debounced, paged query-as-you-type search
//! - **Picker**: async driver that runs tickets against an
//!   [`EntityDirectory`](picker_directory::EntityDirectory)
//!
//! # Example
//!
//! ```
//! use picker_core::{PickerConfig, PickerController, RemovalConfirm};
//! use picker_types::Entity;
//! use std::sync::Arc;
//!
//! struct AskOperator;
//!
//! impl RemovalConfirm for AskOperator {
//!     fn confirm_removal(&self, entity: &Entity) -> bool {
//!         println!("Remove {}?", entity.id);
//!         true
//!     }
//! }
//!
//! let config = PickerConfig {
//!     max_slots: 2,
//!     ..Default::default()
//! };
//! let mut controller = PickerController::new(config, Arc::new(AskOperator)).unwrap();
//! let ticket = controller.initialize(vec!["u1".into()]);
//! assert_eq!(ticket.ids().len(), 1);
//! ```

mod config;
mod controller;
mod dialog;
mod error;
mod hooks;
mod picker;
mod search;
mod selection;
mod slots;

pub use config::{PickerConfig, SearchConfig};
pub use controller::{LookupKind, LookupTicket, PickerController};
pub use dialog::{DialogMode, DialogState, DialogView};
pub use error::{PickerError, PickerResult};
pub use hooks::{
    AffordancePolicy, AllowDelete, DefaultAffordances, DeleteGuard, NoopHost, PickerHooks,
    PickerHost, RemovalConfirm,
};
pub use picker::Picker;
pub use search::SearchDialog;
pub use selection::Selection;
pub use slots::{OccupiedSlot, SlotRenderer, SlotView, TextSlotRenderer, render_slots};
