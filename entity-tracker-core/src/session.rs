//! In-memory persistence session wiring the unit of work to the listener.

use crate::annotation::RegistryAnnotationProvider;
use crate::bus::EventManager;
use crate::context::{LifecycleEventArgs, PersistenceContext, PreFlushEventArgs};
use crate::error::{TrackerError, TrackerResult};
use crate::listener::EntityChangedListener;
use crate::mutation::UnitOfWorkMutationProvider;
use crate::unit_of_work::{EntityState, UnitOfWork, UnitOfWorkContext};
use entity_tracker_model::{Entity, EntityRef, TypeRegistry};
use entity_tracker_types::{EntityId, EntityTypeId};
use std::sync::Arc;
use tracing::debug;

/// A unit of work plus the event manager and listener its lifecycle
/// triggers are routed to.
pub struct Session {
    unit_of_work: UnitOfWork,
    event_manager: Arc<dyn EventManager>,
    listener: Option<Arc<EntityChangedListener<Session>>>,
}

impl Session {
    pub fn new(event_manager: Arc<dyn EventManager>) -> Self {
        Self {
            unit_of_work: UnitOfWork::new(),
            event_manager,
            listener: None,
        }
    }

    /// Routes pre-flush and pre-persist to `listener`.
    pub fn with_listener(mut self, listener: Arc<EntityChangedListener<Session>>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn unit_of_work_mut(&mut self) -> &mut UnitOfWork {
        &mut self.unit_of_work
    }

    /// Registers an entity as loaded from storage.
    pub fn load(&mut self, entity: Entity) {
        self.unit_of_work.load(entity);
    }

    /// Returns a lazy reference to an entity without loading it.
    pub fn reference(&mut self, entity_type: EntityTypeId, id: EntityId) -> EntityRef {
        self.unit_of_work.reference(entity_type, id).clone()
    }

    pub fn find(&self, id: EntityId) -> Option<&EntityRef> {
        self.unit_of_work.get(id)
    }

    /// Mutable access to a realized entity for the host to edit.
    pub fn find_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.unit_of_work.get_mut(id)
    }

    /// Registers a new entity for insertion and fires pre-persist.
    ///
    /// Persisting an entity that is already managed is a no-op. Persisting an
    /// entity scheduled for removal cancels the removal; it is not new, so no
    /// pre-persist fires and its edits are reported by the next flush. A
    /// detached entity is rejected with [`TrackerError::DetachedEntity`].
    pub fn persist(&mut self, entity: Entity) -> TrackerResult<()> {
        let id = entity.id();
        match self.unit_of_work.entity_state(id) {
            None => {}
            Some(EntityState::Managed) => {
                debug!(entity_id = %id, "Entity already managed, persist ignored");
                return Ok(());
            }
            Some(EntityState::Removed) => return self.unit_of_work.restore(entity),
            Some(EntityState::Detached) => return Err(TrackerError::DetachedEntity(id)),
        }

        if !self.unit_of_work.schedule_insert(entity) {
            return Ok(());
        }
        let Some(listener) = self.listener.clone() else {
            return Ok(());
        };
        if let Some(entity) = self.unit_of_work.get(id) {
            listener.pre_persist(&LifecycleEventArgs::new(entity, self))?;
        }
        Ok(())
    }

    pub fn remove(&mut self, id: EntityId) -> TrackerResult<()> {
        self.unit_of_work.schedule_delete(id)
    }

    pub fn detach(&mut self, id: EntityId) -> TrackerResult<()> {
        self.unit_of_work.detach(id)
    }

    /// Fires pre-flush, then commits the unit of work. When the listener
    /// fails, nothing is committed.
    pub fn flush(&mut self) -> TrackerResult<()> {
        if let Some(listener) = self.listener.clone() {
            listener.pre_flush(&PreFlushEventArgs::new(self))?;
        }
        self.unit_of_work.commit();
        Ok(())
    }
}

impl PersistenceContext for Session {
    fn event_manager(&self) -> &dyn EventManager {
        self.event_manager.as_ref()
    }
}

impl UnitOfWorkContext for Session {
    fn unit_of_work(&self) -> &UnitOfWork {
        &self.unit_of_work
    }
}

impl EntityChangedListener<Session> {
    /// Listener using the registry for tracking decisions and the session's
    /// unit of work for snapshots and diffs.
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self::new(
            Arc::new(RegistryAnnotationProvider::new(registry.clone())),
            Arc::new(UnitOfWorkMutationProvider::new(registry)),
        )
    }
}
