use entity_tracker_types::{EntityId, EntityTypeId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A loaded entity instance.
///
/// Field values live in `data` as a JSON object keyed by field name. The same
/// type is used for the current state of an entity and for original
/// snapshots taken before it was mutated.
///
/// Identity is fixed at construction: `id` and `entity_type` have no setters,
/// so an entity handed out for editing cannot move to another identity-map
/// slot.
///
/// ```compile_fail
/// use entity_tracker_model::{Entity, EntityId, EntityTypeId};
///
/// let mut entity = Entity::new(EntityTypeId::from_index(0));
/// entity.id = EntityId::new();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub(crate) id: EntityId,
    pub(crate) entity_type: EntityTypeId,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Entity {
    /// Creates an empty entity of the given type with a fresh id.
    pub fn new(entity_type: EntityTypeId) -> Self {
        Self::with_id(EntityId::new(), entity_type)
    }

    /// Creates an empty entity with an existing id.
    pub fn with_id(id: EntityId, entity_type: EntityTypeId) -> Self {
        Self::from_parts(id, entity_type, Map::new())
    }

    /// Creates an entity from already-known parts, e.g. a stored snapshot.
    pub fn from_parts(id: EntityId, entity_type: EntityTypeId, data: Map<String, Value>) -> Self {
        Self {
            id,
            entity_type,
            data,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn entity_type(&self) -> EntityTypeId {
        self.entity_type
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(name.into(), value.into());
        self
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(name.into(), value.into())
    }

    /// Removes a field, returning its value.
    pub fn unset(&mut self, name: &str) -> Option<Value> {
        self.data.remove(name)
    }

    /// Returns a top-level field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    /// Names of all fields currently holding a value, in key order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Extract a string value using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(|v| v.as_f64())
    }

    fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.find('/') {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let value = self.data.get(&head)?;
        if tail.is_empty() {
            Some(value)
        } else {
            value.pointer(tail)
        }
    }
}
