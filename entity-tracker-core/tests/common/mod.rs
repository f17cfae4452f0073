//! Scripted providers and a recording event manager for listener tests.
//!
//! Every provider answer must be scripted up front; an unscripted call
//! returns a `TrackerError::Provider` so tests fail loudly when the listener
//! asks more than it should.

#![allow(dead_code)]

use entity_tracker_core::{
    AnnotationMetadataProvider, EntityChangedEvent, EventManager, MutationMetadataProvider,
    PersistenceContext, TrackerError, TrackerResult,
};
use entity_tracker_model::{ChangeSet, Entity, EntityId, EntityRef, EntityTypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub fn type_a() -> EntityTypeId {
    EntityTypeId::from_index(0)
}

pub fn type_b() -> EntityTypeId {
    EntityTypeId::from_index(1)
}

// ── Event manager / context ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingEventManager {
    dispatched: Mutex<Vec<(String, EntityChangedEvent)>>,
}

impl RecordingEventManager {
    pub fn dispatched(&self) -> Vec<(String, EntityChangedEvent)> {
        self.dispatched.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.dispatched.lock().unwrap().len()
    }
}

impl EventManager for RecordingEventManager {
    fn dispatch_event(&self, event_name: &str, event: &EntityChangedEvent) {
        self.dispatched
            .lock()
            .unwrap()
            .push((event_name.to_string(), event.clone()));
    }
}

#[derive(Default)]
pub struct TestContext {
    pub events: RecordingEventManager,
}

impl PersistenceContext for TestContext {
    fn event_manager(&self) -> &dyn EventManager {
        &self.events
    }
}

// ── Call log ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<(&'static str, EntityId)>>,
}

impl CallLog {
    fn record(&self, method: &'static str, id: EntityId) {
        self.calls.lock().unwrap().push((method, id));
    }

    pub fn methods(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|(m, _)| *m).collect()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| *m == method)
            .count()
    }
}

fn unexpected(method: &str, id: EntityId) -> TrackerError {
    TrackerError::Provider(format!("unexpected {method} for {id}"))
}

// ── Annotation provider ──────────────────────────────────────────

pub struct ScriptedAnnotations {
    tracked: HashMap<EntityId, bool>,
    calls: Arc<CallLog>,
    fail: bool,
}

impl ScriptedAnnotations {
    pub fn new(calls: Arc<CallLog>) -> Self {
        Self {
            tracked: HashMap::new(),
            calls,
            fail: false,
        }
    }

    pub fn tracked(mut self, id: EntityId, tracked: bool) -> Self {
        self.tracked.insert(id, tracked);
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl<C: ?Sized> AnnotationMetadataProvider<C> for ScriptedAnnotations {
    fn is_tracked(&self, _context: &C, entity: &EntityRef) -> TrackerResult<bool> {
        self.calls.record("is_tracked", entity.id());
        if self.fail {
            return Err(TrackerError::Provider("metadata unavailable".into()));
        }
        self.tracked
            .get(&entity.id())
            .copied()
            .ok_or_else(|| unexpected("is_tracked", entity.id()))
    }
}

// ── Mutation provider ────────────────────────────────────────────

pub struct ScriptedMutations {
    change_set: ChangeSet,
    managed: HashMap<EntityId, bool>,
    originals: HashMap<EntityId, Option<Entity>>,
    mutated: HashMap<EntityId, Vec<String>>,
    diff_args: Mutex<Vec<(EntityId, Option<Entity>)>>,
    calls: Arc<CallLog>,
    fail_change_set: bool,
}

impl ScriptedMutations {
    pub fn new(calls: Arc<CallLog>, change_set: ChangeSet) -> Self {
        Self {
            change_set,
            managed: HashMap::new(),
            originals: HashMap::new(),
            mutated: HashMap::new(),
            diff_args: Mutex::new(Vec::new()),
            calls,
            fail_change_set: false,
        }
    }

    pub fn managed(mut self, id: EntityId, managed: bool) -> Self {
        self.managed.insert(id, managed);
        self
    }

    pub fn original(mut self, id: EntityId, original: Option<Entity>) -> Self {
        self.originals.insert(id, original);
        self
    }

    pub fn mutated(mut self, id: EntityId, fields: &[&str]) -> Self {
        self.mutated
            .insert(id, fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn failing_change_set(mut self) -> Self {
        self.fail_change_set = true;
        self
    }

    /// Arguments `get_mutated_fields` was called with.
    pub fn diff_args(&self) -> Vec<(EntityId, Option<Entity>)> {
        self.diff_args.lock().unwrap().clone()
    }
}

impl<C: ?Sized> MutationMetadataProvider<C> for ScriptedMutations {
    fn is_entity_managed(&self, _context: &C, entity: &EntityRef) -> TrackerResult<bool> {
        self.calls.record("is_entity_managed", entity.id());
        self.managed
            .get(&entity.id())
            .copied()
            .ok_or_else(|| unexpected("is_entity_managed", entity.id()))
    }

    fn create_original_entity(
        &self,
        _context: &C,
        entity: &EntityRef,
    ) -> TrackerResult<Option<Entity>> {
        self.calls.record("create_original_entity", entity.id());
        self.originals
            .get(&entity.id())
            .cloned()
            .ok_or_else(|| unexpected("create_original_entity", entity.id()))
    }

    fn get_mutated_fields(
        &self,
        _context: &C,
        current: &EntityRef,
        original: Option<&Entity>,
    ) -> TrackerResult<Vec<String>> {
        self.calls.record("get_mutated_fields", current.id());
        self.diff_args
            .lock()
            .unwrap()
            .push((current.id(), original.cloned()));
        self.mutated
            .get(&current.id())
            .cloned()
            .ok_or_else(|| unexpected("get_mutated_fields", current.id()))
    }

    fn get_full_change_set(&self, _context: &C) -> TrackerResult<ChangeSet> {
        if self.fail_change_set {
            return Err(TrackerError::Provider("unit of work closed".into()));
        }
        Ok(self.change_set.clone())
    }
}

/// Change-set holding a single entity under its own type.
pub fn single_entity_change_set(entity: &EntityRef) -> ChangeSet {
    ChangeSet::new().with_group(entity.entity_type(), vec![entity.clone()])
}
