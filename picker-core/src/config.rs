//! Picker configuration.

use crate::error::{PickerError, PickerResult};
use picker_directory::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use picker_types::DEFAULT_TITLE_TEMPLATE;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Host-provided picker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Form field name; ids serialize as `{name}[]`.
    pub name: String,
    /// Maximum number of selected entities (at least 1).
    pub max_slots: usize,
    /// Enables the replace and delete affordances.
    pub enabled: bool,
    /// Enables replace mode on slot click (requires `enabled`).
    pub allow_replace: bool,
    /// Offers the empty "add" slot while capacity remains.
    pub empty_slot_enabled: bool,
    /// Display title template, e.g. `{first_name} {last_name}`.
    pub display_template: String,
    /// Search dialog title.
    pub modal_title: String,
    /// Search behavior.
    pub search: SearchConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            name: "users".to_string(),
            max_slots: 100,
            enabled: true,
            allow_replace: true,
            empty_slot_enabled: true,
            display_template: DEFAULT_TITLE_TEMPLATE.to_string(),
            modal_title: "Select user".to_string(),
            search: SearchConfig::default(),
        }
    }
}

impl PickerConfig {
    /// Checks the configuration invariants.
    pub fn validate(&self) -> PickerResult<()> {
        if self.max_slots == 0 {
            return Err(PickerError::InvalidConfig(
                "max_slots must be at least 1".into(),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(PickerError::InvalidConfig("name must not be empty".into()));
        }
        self.search.validate()
    }
}

/// Query-as-you-type settings for the search dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before a search is issued (ms).
    pub debounce_ms: u64,
    /// Results per page.
    pub page_size: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    fn validate(&self) -> PickerResult<()> {
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(PickerError::InvalidConfig(format!(
                "search.page_size must be within 1..={MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }
}
