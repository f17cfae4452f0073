//! Entity handles and the lazy-reference capability.

use crate::Entity;
use entity_tracker_types::{EntityId, EntityTypeId};
use serde::{Deserialize, Serialize};

/// Capability of anything that may stand in for an entity whose field data
/// has not been loaded yet.
///
/// Tracking decisions consult this before touching field data.
pub trait LazyReference {
    /// True if this value is a placeholder rather than a plain entity.
    fn is_lazy_reference(&self) -> bool;

    /// True if field data is available. Always true for plain entities.
    fn is_initialized(&self) -> bool;
}

impl LazyReference for Entity {
    fn is_lazy_reference(&self) -> bool {
        false
    }

    fn is_initialized(&self) -> bool {
        true
    }
}

/// Placeholder for an entity known only by type and id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProxy {
    pub id: EntityId,
    pub entity_type: EntityTypeId,
    /// Realized entity, present once the proxy has been initialized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<Entity>,
}

impl EntityProxy {
    /// Creates an uninitialized proxy.
    pub fn new(entity_type: EntityTypeId, id: EntityId) -> Self {
        Self {
            id,
            entity_type,
            target: None,
        }
    }

    /// Realizes the proxy with loaded data. The id and type of the proxy win
    /// over whatever the loaded entity carries.
    pub fn initialize(&mut self, mut entity: Entity) {
        entity.id = self.id;
        entity.entity_type = self.entity_type;
        self.target = Some(entity);
    }

    pub fn target(&self) -> Option<&Entity> {
        self.target.as_ref()
    }

    pub fn target_mut(&mut self) -> Option<&mut Entity> {
        self.target.as_mut()
    }
}

impl LazyReference for EntityProxy {
    fn is_lazy_reference(&self) -> bool {
        true
    }

    fn is_initialized(&self) -> bool {
        self.target.is_some()
    }
}

/// Handle to an entity as seen by the persistence layer: either a loaded
/// entity or a lazy proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityRef {
    Loaded(Entity),
    Proxy(EntityProxy),
}

impl EntityRef {
    pub fn id(&self) -> EntityId {
        match self {
            Self::Loaded(entity) => entity.id,
            Self::Proxy(proxy) => proxy.id,
        }
    }

    pub fn entity_type(&self) -> EntityTypeId {
        match self {
            Self::Loaded(entity) => entity.entity_type,
            Self::Proxy(proxy) => proxy.entity_type,
        }
    }

    /// The realized entity, or `None` for an uninitialized proxy.
    pub fn entity(&self) -> Option<&Entity> {
        match self {
            Self::Loaded(entity) => Some(entity),
            Self::Proxy(proxy) => proxy.target(),
        }
    }

    pub fn entity_mut(&mut self) -> Option<&mut Entity> {
        match self {
            Self::Loaded(entity) => Some(entity),
            Self::Proxy(proxy) => proxy.target_mut(),
        }
    }
}

impl LazyReference for EntityRef {
    fn is_lazy_reference(&self) -> bool {
        match self {
            Self::Loaded(entity) => entity.is_lazy_reference(),
            Self::Proxy(proxy) => proxy.is_lazy_reference(),
        }
    }

    fn is_initialized(&self) -> bool {
        match self {
            Self::Loaded(entity) => entity.is_initialized(),
            Self::Proxy(proxy) => proxy.is_initialized(),
        }
    }
}

impl From<Entity> for EntityRef {
    fn from(entity: Entity) -> Self {
        Self::Loaded(entity)
    }
}

impl From<EntityProxy> for EntityRef {
    fn from(proxy: EntityProxy) -> Self {
        Self::Proxy(proxy)
    }
}
