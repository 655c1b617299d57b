use picker_types::{Entity, EntityId, SearchHit};
use pretty_assertions::assert_eq;
use serde_json::json;

fn ann() -> Entity {
    Entity::from_value(json!({
        "uid": "u1",
        "first_name": "Ann",
        "last_name": "Lee",
        "age": 31,
        "active": true,
        "picture": { "url": "https://img.example/u1.png" },
        "url": "https://example.com/profile/ann"
    }))
    .unwrap()
}

// ── Deserialization ──────────────────────────────────────────────

#[test]
fn accepts_uid_as_id() {
    let e = ann();
    assert_eq!(e.id, EntityId::from("u1"));
    assert!(e.field("uid").is_none());
}

#[test]
fn accepts_id_key() {
    let e = Entity::from_value(json!({"id": "u2", "first_name": "Bob"})).unwrap();
    assert_eq!(e.id.as_str(), "u2");
    assert_eq!(e.get_str("/first_name"), Some("Bob"));
}

#[test]
fn rejects_non_object() {
    assert!(Entity::from_value(json!(["u1"])).is_err());
    assert!(Entity::from_value(json!("u1")).is_err());
}

#[test]
fn rejects_record_without_id() {
    assert!(Entity::from_value(json!({"first_name": "Nobody"})).is_err());
}

#[test]
fn rejects_blank_id() {
    assert!(Entity::from_value(json!({"id": "", "first_name": "Nobody"})).is_err());
    assert!(serde_json::from_str::<Entity>(r#"{"uid": "  "}"#).is_err());
}

#[test]
fn serializes_id_alongside_fields() {
    let e = Entity::new("u3").with_field("first_name", "Cy");
    let value = serde_json::to_value(&e).unwrap();
    assert_eq!(value, json!({"id": "u3", "first_name": "Cy"}));
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn pointer_accessors() {
    let e = ann();
    assert_eq!(e.get_str("/last_name"), Some("Lee"));
    assert_eq!(e.get_number("/age"), Some(31.0));
    assert_eq!(e.get_bool("/active"), Some(true));
    assert_eq!(e.get_str("/missing"), None);
    assert_eq!(e.get_str("no-leading-slash"), None);
}

#[test]
fn nested_pointer_and_shortcuts() {
    let e = ann();
    assert_eq!(e.picture_url(), Some("https://img.example/u1.png"));
    assert_eq!(e.profile_url(), Some("https://example.com/profile/ann"));
    assert_eq!(e.get_str("/picture/missing"), None);
}

#[test]
fn pointer_unescapes_segment() {
    let e = Entity::new("u1").with_field("a/b", "slash");
    assert_eq!(e.get_str("/a~1b"), Some("slash"));
}

// ── SearchHit ────────────────────────────────────────────────────

#[test]
fn search_hit_wire_format_uses_text() {
    let hit = SearchHit::new("u2", "Bob X");
    let value = serde_json::to_value(&hit).unwrap();
    assert_eq!(value, json!({"id": "u2", "text": "Bob X"}));

    let parsed: SearchHit = serde_json::from_value(json!({"id": "u5", "display_text": "Eve"})).unwrap();
    assert_eq!(parsed.display_text, "Eve");
}
