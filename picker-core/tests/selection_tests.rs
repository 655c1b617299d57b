mod common;

use common::{id, ids, person};
use picker_core::{PickerError, Selection};
use pretty_assertions::assert_eq;

#[test]
fn insert_preserves_order() {
    let mut sel = Selection::new(3);
    sel.insert(person("u2", "Bob", "X")).unwrap();
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    assert_eq!(sel.ids(), ids(&["u2", "u1"]));
    assert_eq!(sel.position(&id("u1")), Some(1));
    assert_eq!(sel.remaining(), 1);
}

#[test]
fn insert_rejects_duplicate() {
    let mut sel = Selection::new(3);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    let err = sel.insert(person("u1", "Ann", "Again")).unwrap_err();
    assert!(matches!(err, PickerError::Duplicate(d) if d == id("u1")));
    assert_eq!(sel.len(), 1);
    assert_eq!(sel.get(&id("u1")).unwrap().get_str("/last_name"), Some("Lee"));
}

#[test]
fn insert_rejects_overflow() {
    let mut sel = Selection::new(1);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    assert!(sel.is_full());
    let err = sel.insert(person("u2", "Bob", "X")).unwrap_err();
    assert!(matches!(err, PickerError::CapacityExceeded { max: 1 }));
    assert_eq!(sel.len(), 1);
}

#[test]
fn overwrite_requires_existing_key() {
    let mut sel = Selection::new(2);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    let old = sel.overwrite(person("u1", "Anna", "Lee")).unwrap();
    assert_eq!(old.get_str("/first_name"), Some("Ann"));
    assert_eq!(sel.get(&id("u1")).unwrap().get_str("/first_name"), Some("Anna"));

    assert!(matches!(
        sel.overwrite(person("u9", "Nobody", "")),
        Err(PickerError::NotSelected(_))
    ));
}

#[test]
fn replace_keeps_slot_and_size() {
    let mut sel = Selection::new(3);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    sel.insert(person("u2", "Bob", "X")).unwrap();
    sel.insert(person("u3", "Cleo", "Brown")).unwrap();

    let removed = sel.replace(&id("u2"), person("u4", "Dan", "Ode")).unwrap();
    assert_eq!(removed.id, id("u2"));
    assert_eq!(sel.ids(), ids(&["u1", "u4", "u3"]));
    assert_eq!(sel.len(), 3);
}

#[test]
fn replace_rejects_duplicate_and_missing_target() {
    let mut sel = Selection::new(3);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    sel.insert(person("u2", "Bob", "X")).unwrap();

    assert!(matches!(
        sel.replace(&id("u1"), person("u2", "Bob", "X")),
        Err(PickerError::Duplicate(_))
    ));
    assert!(matches!(
        sel.replace(&id("u9"), person("u3", "Cleo", "Brown")),
        Err(PickerError::NotSelected(_))
    ));
    assert_eq!(sel.ids(), ids(&["u1", "u2"]));
}

#[test]
fn replace_with_self_overwrites() {
    let mut sel = Selection::new(2);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    sel.replace(&id("u1"), person("u1", "Ann", "Updated")).unwrap();
    assert_eq!(sel.len(), 1);
    assert_eq!(sel.get(&id("u1")).unwrap().get_str("/last_name"), Some("Updated"));
}

#[test]
fn remove_and_clear() {
    let mut sel = Selection::new(2);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    sel.insert(person("u2", "Bob", "X")).unwrap();
    assert!(sel.remove(&id("u1")).is_some());
    assert!(sel.remove(&id("u1")).is_none());
    assert_eq!(sel.ids(), ids(&["u2"]));

    sel.clear();
    assert!(sel.is_empty());
    assert_eq!(sel.remaining(), 2);
}

#[test]
fn iterates_by_reference() {
    let mut sel = Selection::new(2);
    sel.insert(person("u1", "Ann", "Lee")).unwrap();
    let names: Vec<&str> = (&sel)
        .into_iter()
        .filter_map(|e| e.get_str("/first_name"))
        .collect();
    assert_eq!(names, vec!["Ann"]);
}
