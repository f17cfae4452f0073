//! Provider contracts consumed by the change listener.
//!
//! Both traits are generic over the persistence context so a different
//! engine or metadata source can be plugged in without touching the
//! listener.

use crate::error::TrackerResult;
use entity_tracker_model::{ChangeSet, Entity, EntityRef};

/// Decides whether an entity's type is subject to tracking.
pub trait AnnotationMetadataProvider<C: ?Sized>: Send + Sync {
    /// Must be side-effect free and cheap; called for every candidate on
    /// every flush.
    fn is_tracked(&self, context: &C, entity: &EntityRef) -> TrackerResult<bool>;
}

/// Answers questions about entity state inside the unit of work.
pub trait MutationMetadataProvider<C: ?Sized>: Send + Sync {
    /// Whether the entity is currently managed by the identity map.
    fn is_entity_managed(&self, context: &C, entity: &EntityRef) -> TrackerResult<bool>;

    /// Materializes the entity as it was before the pending changes.
    /// Returns `None` when no prior state is recoverable. Must not flush.
    fn create_original_entity(&self, context: &C, entity: &EntityRef)
    -> TrackerResult<Option<Entity>>;

    /// Field names that differ between `current` and `original`. A `None`
    /// original means the entity has no prior state.
    fn get_mutated_fields(
        &self,
        context: &C,
        current: &EntityRef,
        original: Option<&Entity>,
    ) -> TrackerResult<Vec<String>>;

    /// Every entity pending flush, grouped by type.
    fn get_full_change_set(&self, context: &C) -> TrackerResult<ChangeSet>;
}
