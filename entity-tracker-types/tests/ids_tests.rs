use entity_tracker_types::{EntityId, EntityTypeId, Error, EventId};
use proptest::prelude::*;
use std::collections::HashSet;
use std::str::FromStr;

// ── EntityId ──────────────────────────────────────────────────────

#[test]
fn entity_id_new_is_unique() {
    let a = EntityId::new();
    let b = EntityId::new();
    assert_ne!(a, b);
}

#[test]
fn entity_id_from_uuid_roundtrip() {
    let uuid = uuid::Uuid::now_v7();
    let id = EntityId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn entity_id_display_and_parse() {
    let id = EntityId::new();
    let parsed = EntityId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn entity_id_parse_invalid() {
    let err = EntityId::parse("not-a-uuid").unwrap_err();
    assert!(matches!(err, Error::InvalidUuid(_)));
}

#[test]
fn entity_id_from_str_invalid() {
    assert!(EntityId::from_str("garbage").is_err());
}

#[test]
fn entity_id_is_time_ordered() {
    let first = EntityId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = EntityId::new();
    assert!(first < second);
}

#[test]
fn entity_id_hash_and_eq() {
    let id = EntityId::new();
    let mut set = HashSet::new();
    set.insert(id);
    set.insert(id);
    assert_eq!(set.len(), 1);
}

#[test]
fn entity_id_serializes_as_plain_string() {
    let id = EntityId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{id}\""));
}

// ── EntityTypeId ──────────────────────────────────────────────────

#[test]
fn type_id_index_roundtrip() {
    let id = EntityTypeId::from_index(7);
    assert_eq!(id.index(), 7);
}

#[test]
fn type_id_display() {
    assert_eq!(EntityTypeId::from_index(3).to_string(), "type#3");
}

#[test]
fn type_id_parses_with_and_without_prefix() {
    assert_eq!("type#4".parse::<EntityTypeId>().unwrap(), EntityTypeId::from_index(4));
    assert_eq!("4".parse::<EntityTypeId>().unwrap(), EntityTypeId::from_index(4));
}

#[test]
fn type_id_parse_invalid() {
    let err = "type#x".parse::<EntityTypeId>().unwrap_err();
    assert!(matches!(err, Error::InvalidTypeId(s) if s == "type#x"));
}

#[test]
fn type_ids_order_by_index() {
    assert!(EntityTypeId::from_index(0) < EntityTypeId::from_index(1));
}

// ── EventId ───────────────────────────────────────────────────────

#[test]
fn event_id_new_is_unique() {
    assert_ne!(EventId::new(), EventId::new());
}

#[test]
fn event_id_display_and_from_str() {
    let id = EventId::new();
    let parsed: EventId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

proptest! {
    #[test]
    fn type_id_display_parse_roundtrip(index in any::<u32>()) {
        let id = EntityTypeId::from_index(index);
        prop_assert_eq!(id.to_string().parse::<EntityTypeId>().unwrap(), id);
    }
}
