//! Change listener turning lifecycle triggers into change notifications.
//!
//! The listener owns no state between triggers. Every decision is delegated
//! to the two metadata providers; the listener sequences the calls so that
//! lazy proxies that were never loaded are never diffed and each qualifying
//! entity yields exactly one [`EntityChangedEvent`] per trigger.
//!
//! Provider errors are returned to the caller as-is.

use crate::context::{LifecycleEventArgs, PersistenceContext, PreFlushEventArgs};
use crate::error::TrackerResult;
use crate::event::{EntityChangedEvent, LifecyclePhase, events};
use crate::provider::{AnnotationMetadataProvider, MutationMetadataProvider};
use entity_tracker_model::{Entity, EntityRef, LazyReference};
use std::sync::Arc;
use tracing::{debug, info};

/// Emits [`events::ENTITY_CHANGED`] for tracked entities whose fields changed.
pub struct EntityChangedListener<C: ?Sized> {
    annotations: Arc<dyn AnnotationMetadataProvider<C>>,
    mutations: Arc<dyn MutationMetadataProvider<C>>,
}

impl<C: PersistenceContext + ?Sized> EntityChangedListener<C> {
    pub fn new(
        annotations: Arc<dyn AnnotationMetadataProvider<C>>,
        mutations: Arc<dyn MutationMetadataProvider<C>>,
    ) -> Self {
        Self {
            annotations,
            mutations,
        }
    }

    /// Inspects every entity pending flush and notifies about the managed,
    /// tracked ones whose state differs from their original snapshot.
    pub fn pre_flush(&self, args: &PreFlushEventArgs<'_, C>) -> TrackerResult<()> {
        let context = args.context();
        let change_set = self.mutations.get_full_change_set(context)?;
        if change_set.is_empty() {
            debug!("Change-set is empty, nothing to inspect");
            return Ok(());
        }

        for entity in change_set {
            if !self.annotations.is_tracked(context, &entity)? {
                continue;
            }
            if !self.mutations.is_entity_managed(context, &entity)? {
                debug!(entity_id = %entity.id(), "Skipping unmanaged entity");
                continue;
            }
            if entity.is_lazy_reference() && !entity.is_initialized() {
                debug!(entity_id = %entity.id(), "Skipping uninitialized proxy");
                continue;
            }
            let Some(original) = self.mutations.create_original_entity(context, &entity)? else {
                continue;
            };

            let mutated_fields = self
                .mutations
                .get_mutated_fields(context, &entity, Some(&original))?;
            if mutated_fields.is_empty() {
                continue;
            }

            self.notify(
                context,
                LifecyclePhase::PreFlush,
                entity,
                Some(original),
                mutated_fields,
            );
        }

        Ok(())
    }

    /// Notifies about a tracked entity being registered for insertion. Every
    /// field the diff reports against an empty baseline counts as mutated.
    pub fn pre_persist(&self, args: &LifecycleEventArgs<'_, C>) -> TrackerResult<()> {
        let context = args.context();
        let entity = args.entity();
        if !self.annotations.is_tracked(context, entity)? {
            return Ok(());
        }

        let mutated_fields = self.mutations.get_mutated_fields(context, entity, None)?;
        if !mutated_fields.is_empty() {
            self.notify(
                context,
                LifecyclePhase::PrePersist,
                entity.clone(),
                None,
                mutated_fields,
            );
        }

        Ok(())
    }

    fn notify(
        &self,
        context: &C,
        phase: LifecyclePhase,
        entity: EntityRef,
        original: Option<Entity>,
        mutated_fields: Vec<String>,
    ) {
        info!(
            entity_type = %entity.entity_type(),
            entity_id = %entity.id(),
            mutated_fields = ?mutated_fields,
            "Going to notify a change"
        );
        let event = EntityChangedEvent::new(phase, entity, original, mutated_fields);
        context
            .event_manager()
            .dispatch_event(events::ENTITY_CHANGED, &event);
    }
}
