//! The canonical selection set.
//!
//! All mutation of the selected entities goes through [`Selection`]'s
//! explicit operations; each one validates the capacity and uniqueness
//! invariants before touching the entries.

use crate::error::{PickerError, PickerResult};
use picker_types::{Entity, EntityId};

/// Ordered, capacity-bounded map of entity id → entity.
///
/// Insertion order is the rendering order. A replacement keeps the slot
/// position of the entity it replaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    entries: Vec<Entity>,
    capacity: usize,
}

impl Selection {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Number of free slots.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Slot index of `id`.
    pub fn position(&self, id: &EntityId) -> Option<usize> {
        self.entries.iter().position(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EntityId> {
        self.entries.iter().map(|e| &e.id)
    }

    /// Selected ids in slot order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.keys().cloned().collect()
    }

    /// Appends a new entity.
    pub fn insert(&mut self, entity: Entity) -> PickerResult<()> {
        if self.contains(&entity.id) {
            return Err(PickerError::Duplicate(entity.id));
        }
        if self.is_full() {
            return Err(PickerError::CapacityExceeded { max: self.capacity });
        }
        self.entries.push(entity);
        Ok(())
    }

    /// Replaces the record of an already-selected entity in place,
    /// returning the previous record.
    pub fn overwrite(&mut self, entity: Entity) -> PickerResult<Entity> {
        let pos = self
            .position(&entity.id)
            .ok_or_else(|| PickerError::NotSelected(entity.id.clone()))?;
        Ok(std::mem::replace(&mut self.entries[pos], entity))
    }

    /// Swaps `target` for `entity` in the same slot, returning the removed
    /// record. The selection size never changes.
    pub fn replace(&mut self, target: &EntityId, entity: Entity) -> PickerResult<Entity> {
        let pos = self
            .position(target)
            .ok_or_else(|| PickerError::NotSelected(target.clone()))?;
        if &entity.id != target && self.contains(&entity.id) {
            return Err(PickerError::Duplicate(entity.id));
        }
        Ok(std::mem::replace(&mut self.entries[pos], entity))
    }

    /// Removes an entity, returning its record if it was selected.
    pub fn remove(&mut self, id: &EntityId) -> Option<Entity> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a Selection {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
