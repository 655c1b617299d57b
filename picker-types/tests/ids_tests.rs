use picker_types::EntityId;
use std::collections::HashSet;
use std::str::FromStr;

#[test]
fn entity_id_parse_trims_whitespace() {
    let id = EntityId::parse("  u1 ").unwrap();
    assert_eq!(id.as_str(), "u1");
}

#[test]
fn entity_id_parse_rejects_empty() {
    assert!(EntityId::parse("").is_err());
    assert!(EntityId::parse("   ").is_err());
}

#[test]
fn entity_id_from_str_matches_parse() {
    let a = EntityId::from_str("u42").unwrap();
    let b = EntityId::parse("u42").unwrap();
    assert_eq!(a, b);
}

#[test]
fn entity_id_display() {
    let id = EntityId::from("abc");
    assert_eq!(id.to_string(), "abc");
    assert_eq!(format!("{id}"), "abc");
}

#[test]
fn entity_id_hash_set_lookup_by_str() {
    let mut set = HashSet::new();
    set.insert(EntityId::from("u1"));
    set.insert(EntityId::from("u2"));
    assert!(set.contains("u1"));
    assert!(!set.contains("u3"));
}

#[test]
fn entity_id_serializes_as_plain_string() {
    let id = EntityId::from("u7");
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""u7""#);
    let back: EntityId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn entity_id_orders_lexicographically() {
    let mut ids = vec![EntityId::from("b"), EntityId::from("a"), EntityId::from("c")];
    ids.sort();
    assert_eq!(ids, vec![EntityId::from("a"), EntityId::from("b"), EntityId::from("c")]);
}

#[test]
fn entity_id_deserialize_rejects_blank() {
    assert!(serde_json::from_str::<EntityId>(r#""""#).is_err());
    assert!(serde_json::from_str::<EntityId>(r#""  ""#).is_err());
    let id: EntityId = serde_json::from_str(r#""u1""#).unwrap();
    assert_eq!(id.as_str(), "u1");
    assert_eq!(serde_json::to_string(&id).unwrap(), r#""u1""#);
}

#[test]
fn entity_id_try_from_keeps_input() {
    let id = EntityId::try_from(" u1".to_string()).unwrap();
    assert_eq!(id.as_str(), " u1");
    assert!(EntityId::try_from(String::new()).is_err());
}
