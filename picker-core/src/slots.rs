//! Slot projection consumed by the slot grid renderer.

use picker_types::Entity;
use serde::Serialize;

/// One occupied slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OccupiedSlot {
    pub entity: Entity,
    /// Display title rendered from the configured template.
    pub title: String,
    pub picture_url: Option<String>,
    /// Delete button offered.
    pub deletable: bool,
    /// Clicking the slot opens the dialog in replace mode.
    pub replaceable: bool,
    /// Profile link, only set when the picker is read-only.
    pub link: Option<String>,
}

/// A slot as rendered by the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SlotView {
    Occupied(OccupiedSlot),
    /// The "add" affordance.
    Empty,
}

impl SlotView {
    pub fn is_empty_slot(&self) -> bool {
        matches!(self, SlotView::Empty)
    }

    pub fn occupied(&self) -> Option<&OccupiedSlot> {
        match self {
            SlotView::Occupied(slot) => Some(slot),
            SlotView::Empty => None,
        }
    }
}

/// Turns slot views into whatever the host draws with.
pub trait SlotRenderer {
    type Output;

    fn render_slot(&self, slot: &OccupiedSlot) -> Self::Output;

    fn render_empty(&self) -> Self::Output;
}

/// Renders every slot in order.
pub fn render_slots<R: SlotRenderer + ?Sized>(slots: &[SlotView], renderer: &R) -> Vec<R::Output> {
    slots
        .iter()
        .map(|slot| match slot {
            SlotView::Occupied(occupied) => renderer.render_slot(occupied),
            SlotView::Empty => renderer.render_empty(),
        })
        .collect()
}

/// Plain-text renderer: `[Ann Lee ×]`, `[+]`. Handy for logs and terminals.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextSlotRenderer;

impl SlotRenderer for TextSlotRenderer {
    type Output = String;

    fn render_slot(&self, slot: &OccupiedSlot) -> String {
        match (&slot.link, slot.deletable) {
            (_, true) => format!("[{} ×]", slot.title),
            (Some(link), false) => format!("[{}]({})", slot.title, link),
            (None, false) => format!("[{}]", slot.title),
        }
    }

    fn render_empty(&self) -> String {
        "[+]".to_string()
    }
}
