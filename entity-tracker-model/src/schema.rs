use serde::{Deserialize, Serialize};

/// Describes an entity type for the tracker: whether mutations on it are
/// reported, and which fields are compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    pub entity_type: String,
    #[serde(default)]
    pub tracked: bool,
    /// Compared fields in reporting order. Empty means "every field present
    /// on either side", compared as plain values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<TrackedField>,
}

impl EntitySchema {
    /// Schema for a type whose mutations are reported.
    pub fn tracked(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            tracked: true,
            fields: Vec::new(),
        }
    }

    /// Schema for a type that is known but never reported.
    pub fn untracked(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            tracked: false,
            fields: Vec::new(),
        }
    }

    /// Builder-style field declaration.
    pub fn with_field(mut self, field: TrackedField) -> Self {
        self.fields.push(field);
        self
    }

    /// Looks up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&TrackedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field compared by the mutation diff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedField {
    pub name: String,
    pub field_type: FieldType,
    /// Ignored fields are never reported as mutated (e.g. bookkeeping
    /// timestamps the host rewrites on every save).
    #[serde(default)]
    pub ignored: bool,
}

impl TrackedField {
    fn simple(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ignored: false,
        }
    }

    pub fn text(name: &str) -> Self {
        Self::simple(name, FieldType::Text)
    }

    pub fn number(name: &str) -> Self {
        Self::simple(name, FieldType::Number)
    }

    pub fn bool(name: &str) -> Self {
        Self::simple(name, FieldType::Bool)
    }

    pub fn datetime(name: &str) -> Self {
        Self::simple(name, FieldType::DateTime)
    }

    pub fn json(name: &str) -> Self {
        Self::simple(name, FieldType::Json)
    }

    /// Shorthand for a reference to another entity.
    pub fn relation(name: &str) -> Self {
        Self::simple(name, FieldType::Relation)
    }

    /// Marks the field as excluded from the diff.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }
}

/// The data type of a compared field. Determines the equality rule the
/// mutation diff applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Bool,
    DateTime,
    Json,
    /// Compared by the identity of the referenced entity.
    Relation,
}
