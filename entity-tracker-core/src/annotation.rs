//! Tracking decisions backed by the type registry.

use crate::error::{TrackerError, TrackerResult};
use crate::provider::AnnotationMetadataProvider;
use entity_tracker_model::{EntityRef, TypeRegistry};
use std::sync::Arc;

/// Answers `is_tracked` from the `tracked` flag of the entity's schema.
///
/// The registry is injected and immutable, so lookups are a vector index.
#[derive(Debug, Clone)]
pub struct RegistryAnnotationProvider {
    registry: Arc<TypeRegistry>,
}

impl RegistryAnnotationProvider {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}

impl<C: ?Sized> AnnotationMetadataProvider<C> for RegistryAnnotationProvider {
    fn is_tracked(&self, _context: &C, entity: &EntityRef) -> TrackerResult<bool> {
        let entity_type = entity.entity_type();
        self.registry
            .is_tracked(entity_type)
            .map_err(|_| TrackerError::UnknownEntityType(entity_type))
    }
}
