//! In-memory unit of work.
//!
//! Models the state a persistence engine exposes to the tracker: an identity
//! map of managed entities with the data they were loaded with, lazy
//! proxies, and entities scheduled for insertion. Nothing is written
//! anywhere; `commit` only moves the bookkeeping forward as a real flush
//! would.

use crate::context::PersistenceContext;
use crate::error::{TrackerError, TrackerResult};
use entity_tracker_model::{Entity, EntityProxy, EntityRef, LazyReference};
use entity_tracker_types::{EntityId, EntityTypeId};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Lifecycle state of an entity known to the unit of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    /// Tracked by the identity map; changes are flushed.
    Managed,
    /// No longer managed; dropped at the next commit.
    Detached,
    /// Scheduled for deletion; dropped at the next commit.
    Removed,
}

/// A context that exposes a [`UnitOfWork`].
pub trait UnitOfWorkContext: PersistenceContext {
    fn unit_of_work(&self) -> &UnitOfWork;
}

#[derive(Debug, Clone)]
struct Entry {
    entity: EntityRef,
    state: EntityState,
    /// Field data as loaded or last committed.
    original: Option<Map<String, Value>>,
}

#[derive(Debug, Default)]
pub struct UnitOfWork {
    entries: HashMap<EntityId, Entry>,
    identity_map: BTreeMap<EntityTypeId, Vec<EntityId>>,
    scheduled_insertions: Vec<EntityId>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entity as loaded from storage. Its current data becomes
    /// the original snapshot. Loading an id that is already known refreshes it.
    pub fn load(&mut self, entity: Entity) {
        let id = entity.id();
        let entity_type = entity.entity_type();
        self.forget(id);
        let original = Some(entity.data.clone());
        self.entries.insert(
            id,
            Entry {
                entity: EntityRef::Loaded(entity),
                state: EntityState::Managed,
                original,
            },
        );
        self.identity_map.entry(entity_type).or_default().push(id);
    }

    /// Registers a lazy reference to an entity that has not been loaded.
    /// Returns the existing handle if the id is already known.
    pub fn reference(&mut self, entity_type: EntityTypeId, id: EntityId) -> &EntityRef {
        if !self.entries.contains_key(&id) {
            self.identity_map.entry(entity_type).or_default().push(id);
        }
        &self
            .entries
            .entry(id)
            .or_insert_with(|| Entry {
                entity: EntityProxy::new(entity_type, id).into(),
                state: EntityState::Managed,
                original: None,
            })
            .entity
    }

    /// Loads the data behind a proxy. The data becomes the original snapshot.
    pub fn initialize_proxy(&mut self, id: EntityId, entity: Entity) -> TrackerResult<()> {
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(TrackerError::EntityNotFound(id))?;
        if let EntityRef::Proxy(proxy) = &mut entry.entity {
            if !proxy.is_initialized() {
                entry.original = Some(entity.data.clone());
                proxy.initialize(entity);
                debug!(entity_id = %id, "Initialized proxy");
            }
        }
        Ok(())
    }

    /// Schedules a new entity for insertion. Returns false when the id is
    /// already known, in which case nothing changes.
    pub fn schedule_insert(&mut self, entity: Entity) -> bool {
        let id = entity.id();
        if self.entries.contains_key(&id) {
            return false;
        }
        self.entries.insert(
            id,
            Entry {
                entity: EntityRef::Loaded(entity),
                state: EntityState::Managed,
                original: None,
            },
        );
        self.scheduled_insertions.push(id);
        true
    }

    /// Schedules a managed entity for deletion. Removing an entity that was
    /// only scheduled for insertion forgets it entirely.
    pub fn schedule_delete(&mut self, id: EntityId) -> TrackerResult<()> {
        if self.is_scheduled_for_insert(id) {
            self.forget(id);
            return Ok(());
        }
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(TrackerError::EntityNotFound(id))?;
        entry.state = EntityState::Removed;
        Ok(())
    }

    /// Cancels a pending deletion: the entity is managed again and takes the
    /// given field data. The original snapshot is kept, so edits made in the
    /// meantime are diffed at the next flush. Detached entities cannot be
    /// restored.
    pub fn restore(&mut self, entity: Entity) -> TrackerResult<()> {
        let id = entity.id();
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(TrackerError::EntityNotFound(id))?;
        if entry.state == EntityState::Detached {
            return Err(TrackerError::DetachedEntity(id));
        }
        let entity_type = entry.entity.entity_type();
        entry.entity = Entity::from_parts(id, entity_type, entity.data).into();
        entry.state = EntityState::Managed;
        debug!(entity_id = %id, "Restored entity");
        Ok(())
    }

    /// Stops managing an entity. Pending insertions of it are cancelled.
    pub fn detach(&mut self, id: EntityId) -> TrackerResult<()> {
        if self.is_scheduled_for_insert(id) {
            self.forget(id);
            return Ok(());
        }
        let entry = self
            .entries
            .get_mut(&id)
            .ok_or(TrackerError::EntityNotFound(id))?;
        entry.state = EntityState::Detached;
        Ok(())
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityRef> {
        self.entries.get(&id).map(|e| &e.entity)
    }

    /// Mutable access to realized entity data. `None` for unknown ids and
    /// uninitialized proxies.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entries.get_mut(&id).and_then(|e| e.entity.entity_mut())
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn entity_state(&self, id: EntityId) -> Option<EntityState> {
        self.entries.get(&id).map(|e| e.state)
    }

    pub fn original_data(&self, id: EntityId) -> Option<&Map<String, Value>> {
        self.entries.get(&id).and_then(|e| e.original.as_ref())
    }

    pub fn is_scheduled_for_insert(&self, id: EntityId) -> bool {
        self.scheduled_insertions.contains(&id)
    }

    /// Entities in the identity map, grouped by type id, each group in
    /// registration order.
    pub fn identity_map(&self) -> impl Iterator<Item = &EntityRef> {
        self.identity_map
            .values()
            .flatten()
            .filter_map(|id| self.entries.get(id).map(|e| &e.entity))
    }

    /// Entities scheduled for insertion, in scheduling order.
    pub fn scheduled_insertions(&self) -> impl Iterator<Item = &EntityRef> {
        self.scheduled_insertions
            .iter()
            .filter_map(|id| self.entries.get(id).map(|e| &e.entity))
    }

    /// Completes a flush: insertions join the identity map, removed and
    /// detached entities are dropped, and the current data of every realized
    /// entity becomes its new original.
    pub fn commit(&mut self) {
        for id in std::mem::take(&mut self.scheduled_insertions) {
            if let Some(entry) = self.entries.get(&id) {
                let entity_type = entry.entity.entity_type();
                self.identity_map.entry(entity_type).or_default().push(id);
            }
        }

        let dropped: Vec<EntityId> = self
            .entries
            .iter()
            .filter(|(_, e)| e.state != EntityState::Managed)
            .map(|(id, _)| *id)
            .collect();
        for id in dropped {
            self.forget(id);
        }

        for entry in self.entries.values_mut() {
            if let Some(entity) = entry.entity.entity() {
                entry.original = Some(entity.data.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn forget(&mut self, id: EntityId) {
        if let Some(entry) = self.entries.remove(&id) {
            let entity_type = entry.entity.entity_type();
            if let Some(ids) = self.identity_map.get_mut(&entity_type) {
                ids.retain(|i| *i != id);
                if ids.is_empty() {
                    self.identity_map.remove(&entity_type);
                }
            }
        }
        self.scheduled_insertions.retain(|i| *i != id);
    }
}
