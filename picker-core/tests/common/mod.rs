#![allow(dead_code)]

use picker_core::{DeleteGuard, PickerError, PickerHooks, PickerHost, RemovalConfirm};
use picker_types::{Entity, EntityId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An event observed by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Added(EntityId, String),
    Removed(EntityId, String),
    Cancel,
    Error(String),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
}

impl RecordingHost {
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&HostEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

fn first_name(entity: &Entity) -> String {
    entity.get_str("/first_name").unwrap_or_default().to_string()
}

impl PickerHost for RecordingHost {
    fn on_entity_added(&self, entity: &Entity) {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::Added(entity.id.clone(), first_name(entity)));
    }

    fn on_entity_removed(&self, entity: &Entity) {
        self.events
            .lock()
            .unwrap()
            .push(HostEvent::Removed(entity.id.clone(), first_name(entity)));
    }

    fn on_cancel(&self) {
        self.events.lock().unwrap().push(HostEvent::Cancel);
    }

    fn on_error(&self, error: &PickerError) {
        self.events.lock().unwrap().push(HostEvent::Error(error.to_string()));
    }
}

/// Confirmation whose answer can be flipped between calls.
#[derive(Debug)]
pub struct ToggleConfirm {
    answer: AtomicBool,
    asked: AtomicUsize,
}

impl ToggleConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            asked: AtomicUsize::new(0),
        }
    }

    pub fn set(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl RemovalConfirm for ToggleConfirm {
    fn confirm_removal(&self, _entity: &Entity) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer.load(Ordering::SeqCst)
    }
}

/// Confirmation that always answers the same way.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirm(pub bool);

impl RemovalConfirm for FixedConfirm {
    fn confirm_removal(&self, _entity: &Entity) -> bool {
        self.0
    }
}

pub fn always_confirm() -> Arc<dyn RemovalConfirm> {
    Arc::new(FixedConfirm(true))
}

/// Hooks that accept every removal and report nothing.
pub fn default_hooks() -> PickerHooks {
    PickerHooks::new(always_confirm())
}

/// Vetoes deletes of the listed ids.
#[derive(Debug, Default)]
pub struct ProtectIds(pub Vec<EntityId>);

impl DeleteGuard for ProtectIds {
    fn before_delete(&self, entity: &Entity) -> bool {
        !self.0.contains(&entity.id)
    }
}

pub struct Harness {
    pub host: Arc<RecordingHost>,
    pub confirm: Arc<ToggleConfirm>,
    pub hooks: PickerHooks,
}

pub fn harness() -> Harness {
    let host = Arc::new(RecordingHost::default());
    let confirm = Arc::new(ToggleConfirm::new(true));
    let hooks = PickerHooks::new(confirm.clone()).with_host(host.clone());
    Harness {
        host,
        confirm,
        hooks,
    }
}

pub fn person(id: &str, first: &str, last: &str) -> Entity {
    Entity::new(id)
        .with_field("first_name", first)
        .with_field("last_name", last)
}

pub fn people() -> Vec<Entity> {
    vec![
        person("u1", "Ann", "Lee"),
        person("u2", "Bob", "X"),
        person("u3", "Cleo", "Brown"),
        person("u4", "Dan", "Ode"),
    ]
}

pub fn id(s: &str) -> EntityId {
    EntityId::from(s)
}

pub fn ids(list: &[&str]) -> Vec<EntityId> {
    list.iter().map(|s| EntityId::from(*s)).collect()
}
