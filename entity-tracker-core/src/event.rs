//! Change notification payload.

use entity_tracker_model::{Entity, EntityRef};
use entity_tracker_types::{EntityId, EntityTypeId, EventId};
use serde::Serialize;

/// Event names published by the tracker.
pub mod events {
    /// Published once per tracked entity whose fields changed.
    pub const ENTITY_CHANGED: &str = "entityChanged";
}

/// Lifecycle trigger that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    PreFlush,
    PrePersist,
}

/// Notification that a tracked entity was mutated.
///
/// Built only by the change listener and handed to the event manager; the
/// listener keeps no reference after publishing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityChangedEvent {
    id: EventId,
    phase: LifecyclePhase,
    entity: EntityRef,
    original: Option<Entity>,
    mutated_fields: Vec<String>,
}

impl EntityChangedEvent {
    pub(crate) fn new(
        phase: LifecyclePhase,
        entity: EntityRef,
        original: Option<Entity>,
        mutated_fields: Vec<String>,
    ) -> Self {
        Self {
            id: EventId::new(),
            phase,
            entity,
            original,
            mutated_fields,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// The entity in its current state.
    pub fn entity(&self) -> &EntityRef {
        &self.entity
    }

    pub fn entity_id(&self) -> EntityId {
        self.entity.id()
    }

    pub fn entity_type(&self) -> EntityTypeId {
        self.entity.entity_type()
    }

    /// Snapshot the entity was compared against. `None` for new entities.
    pub fn original(&self) -> Option<&Entity> {
        self.original.as_ref()
    }

    /// Names of the fields that changed, in the order the diff reported them.
    pub fn mutated_fields(&self) -> &[String] {
        &self.mutated_fields
    }

    pub fn is_mutated(&self, field: &str) -> bool {
        self.mutated_fields.iter().any(|f| f == field)
    }
}
