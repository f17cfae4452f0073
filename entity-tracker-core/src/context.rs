//! Persistence context seam and lifecycle callback arguments.

use crate::bus::EventManager;
use entity_tracker_model::EntityRef;

/// The active engine session a lifecycle trigger runs against.
pub trait PersistenceContext {
    /// Event manager the listener publishes notifications on.
    fn event_manager(&self) -> &dyn EventManager;
}

/// Arguments of the pre-flush trigger.
pub struct PreFlushEventArgs<'a, C: ?Sized> {
    context: &'a C,
}

impl<'a, C: ?Sized> PreFlushEventArgs<'a, C> {
    pub fn new(context: &'a C) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &'a C {
        self.context
    }
}

/// Arguments of a per-entity lifecycle trigger such as pre-persist.
pub struct LifecycleEventArgs<'a, C: ?Sized> {
    entity: &'a EntityRef,
    context: &'a C,
}

impl<'a, C: ?Sized> LifecycleEventArgs<'a, C> {
    pub fn new(entity: &'a EntityRef, context: &'a C) -> Self {
        Self { entity, context }
    }

    pub fn entity(&self) -> &'a EntityRef {
        self.entity
    }

    pub fn context(&self) -> &'a C {
        self.context
    }
}
