//! Typed registry of entity types.
//!
//! Every type name is resolved to an [`EntityTypeId`] exactly once, at
//! registration. From then on the tracker works with ids only.

use crate::EntitySchema;
use entity_tracker_types::EntityTypeId;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors that can occur in registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A schema with this type name was already registered.
    #[error("entity type already registered: {0}")]
    DuplicateEntityType(String),

    /// The id was not issued by this registry.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(EntityTypeId),
}

/// Registry of entity schemas, indexed by dense [`EntityTypeId`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    schemas: Vec<EntitySchema>,
    by_name: HashMap<String, EntityTypeId>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from schemas in order.
    pub fn from_schemas(schemas: impl IntoIterator<Item = EntitySchema>) -> RegistryResult<Self> {
        let mut registry = Self::new();
        for schema in schemas {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Registers a schema and returns the id assigned to its type.
    pub fn register(&mut self, schema: EntitySchema) -> RegistryResult<EntityTypeId> {
        if self.by_name.contains_key(&schema.entity_type) {
            return Err(RegistryError::DuplicateEntityType(schema.entity_type));
        }
        let id = EntityTypeId::from_index(self.schemas.len() as u32);
        self.by_name.insert(schema.entity_type.clone(), id);
        self.schemas.push(schema);
        Ok(id)
    }

    pub fn id_of(&self, name: &str) -> Option<EntityTypeId> {
        self.by_name.get(name).copied()
    }

    pub fn schema(&self, id: EntityTypeId) -> RegistryResult<&EntitySchema> {
        self.schemas
            .get(id.index() as usize)
            .ok_or(RegistryError::UnknownEntityType(id))
    }

    pub fn name_of(&self, id: EntityTypeId) -> RegistryResult<&str> {
        self.schema(id).map(|s| s.entity_type.as_str())
    }

    pub fn is_tracked(&self, id: EntityTypeId) -> RegistryResult<bool> {
        self.schema(id).map(|s| s.tracked)
    }

    /// Ids of all tracked types, in registration order.
    pub fn tracked_types(&self) -> impl Iterator<Item = EntityTypeId> + '_ {
        self.iter().filter(|(_, s)| s.tracked).map(|(id, _)| id)
    }

    /// All registered schemas with their ids, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityTypeId, &EntitySchema)> {
        self.schemas
            .iter()
            .enumerate()
            .map(|(i, s)| (EntityTypeId::from_index(i as u32), s))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
