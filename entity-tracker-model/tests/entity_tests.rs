use entity_tracker_model::{Entity, EntityId, EntityProxy, EntityRef, EntityTypeId, LazyReference};
use pretty_assertions::assert_eq;
use serde_json::json;

fn note_type() -> EntityTypeId {
    EntityTypeId::from_index(0)
}

fn make_entity() -> Entity {
    Entity::new(note_type())
        .with_field("title", "Hello")
        .with_field("count", 5)
        .with_field("done", true)
        .with_field("meta", json!({"author": "Alice"}))
}

// ── Construction & fields ────────────────────────────────────────

#[test]
fn new_entity_is_empty_with_fresh_id() {
    let a = Entity::new(note_type());
    let b = Entity::new(note_type());
    assert!(a.data.is_empty());
    assert_ne!(a.id(), b.id());
    assert_eq!(a.entity_type(), note_type());
}

#[test]
fn with_id_keeps_given_id() {
    let id = EntityId::new();
    let e = Entity::with_id(id, note_type());
    assert_eq!(e.id(), id);
}

#[test]
fn from_parts_keeps_identity_and_data() {
    let id = EntityId::new();
    let source = make_entity();
    let e = Entity::from_parts(id, EntityTypeId::from_index(4), source.data.clone());
    assert_eq!(e.id(), id);
    assert_eq!(e.entity_type(), EntityTypeId::from_index(4));
    assert_eq!(e.data, source.data);
}

#[test]
fn set_returns_previous_value() {
    let mut e = make_entity();
    let previous = e.set("title", "Bye");
    assert_eq!(previous, Some(json!("Hello")));
    assert_eq!(e.get("title"), Some(&json!("Bye")));
}

#[test]
fn unset_removes_field() {
    let mut e = make_entity();
    assert_eq!(e.unset("count"), Some(json!(5)));
    assert_eq!(e.get("count"), None);
}

#[test]
fn field_names_are_sorted() {
    let e = make_entity();
    let names: Vec<&str> = e.field_names().collect();
    assert_eq!(names, vec!["count", "done", "meta", "title"]);
}

// ── JSON pointer helpers ─────────────────────────────────────────

#[test]
fn get_str_returns_string_field() {
    assert_eq!(make_entity().get_str("/title"), Some("Hello"));
}

#[test]
fn get_str_with_nested_path() {
    assert_eq!(make_entity().get_str("/meta/author"), Some("Alice"));
}

#[test]
fn get_str_returns_none_for_non_string() {
    assert_eq!(make_entity().get_str("/count"), None);
}

#[test]
fn get_str_requires_leading_slash() {
    assert_eq!(make_entity().get_str("title"), None);
}

#[test]
fn get_bool_and_number() {
    let e = make_entity();
    assert_eq!(e.get_bool("/done"), Some(true));
    assert_eq!(e.get_number("/count"), Some(5.0));
    assert_eq!(e.get_number("/missing"), None);
}

#[test]
fn pointer_unescapes_slash_in_key() {
    let e = Entity::new(note_type()).with_field("a/b", "x");
    assert_eq!(e.get_str("/a~1b"), Some("x"));
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn entity_serializes_with_type_index() {
    let id = EntityId::new();
    let e = Entity::with_id(id, note_type()).with_field("title", "x");
    let value = serde_json::to_value(&e).unwrap();
    assert_eq!(
        value,
        json!({"id": id.to_string(), "entity_type": 0, "data": {"title": "x"}})
    );
}

#[test]
fn entity_data_defaults_to_empty() {
    let id = EntityId::new();
    let e: Entity =
        serde_json::from_value(json!({"id": id.to_string(), "entity_type": 2})).unwrap();
    assert!(e.data.is_empty());
    assert_eq!(e.entity_type(), EntityTypeId::from_index(2));
}

// ── Lazy references ──────────────────────────────────────────────

#[test]
fn plain_entity_is_not_lazy() {
    let e = make_entity();
    assert!(!e.is_lazy_reference());
    assert!(e.is_initialized());
}

#[test]
fn fresh_proxy_is_uninitialized() {
    let proxy = EntityProxy::new(note_type(), EntityId::new());
    assert!(proxy.is_lazy_reference());
    assert!(!proxy.is_initialized());
    assert!(proxy.target().is_none());
}

#[test]
fn initialize_takes_proxy_identity() {
    let id = EntityId::new();
    let mut proxy = EntityProxy::new(note_type(), id);
    proxy.initialize(Entity::new(EntityTypeId::from_index(9)).with_field("title", "x"));

    assert!(proxy.is_initialized());
    let target = proxy.target().unwrap();
    assert_eq!(target.id(), id);
    assert_eq!(target.entity_type(), note_type());
    assert_eq!(target.get_str("/title"), Some("x"));
}

#[test]
fn entity_ref_delegates_to_variant() {
    let loaded = EntityRef::from(make_entity());
    assert!(!loaded.is_lazy_reference());
    assert!(loaded.entity().is_some());

    let id = EntityId::new();
    let proxy = EntityRef::from(EntityProxy::new(note_type(), id));
    assert!(proxy.is_lazy_reference());
    assert!(!proxy.is_initialized());
    assert!(proxy.entity().is_none());
    assert_eq!(proxy.id(), id);
    assert_eq!(proxy.entity_type(), note_type());
}

#[test]
fn entity_mut_on_initialized_proxy() {
    let mut proxy = EntityProxy::new(note_type(), EntityId::new());
    proxy.initialize(Entity::new(note_type()));
    let mut handle = EntityRef::from(proxy);

    handle.entity_mut().unwrap().set("title", "edited");
    assert_eq!(handle.entity().unwrap().get_str("/title"), Some("edited"));
}

#[test]
fn entity_ref_serialization_is_tagged() {
    let handle = EntityRef::from(EntityProxy::new(note_type(), EntityId::new()));
    let value = serde_json::to_value(&handle).unwrap();
    assert_eq!(value["kind"], "proxy");
    assert!(value.get("target").is_none());
}
