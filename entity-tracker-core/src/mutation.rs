//! Mutation metadata backed by the in-memory unit of work.
//!
//! # Diff rules
//!
//! Fields are compared in schema order, or in key order when the schema
//! declares no fields. Ignored fields are never reported. Without an
//! original, a field counts as mutated when it holds a non-null value. With
//! an original, a field counts as mutated when the two values differ; a
//! missing value equals `null`.
//!
//! # Equality
//!
//! Values compare structurally, with numbers compared numerically so that
//! `1` and `1.0` are equal. Two integers compare exactly, including beyond
//! the 2^53 range where `f64` loses precision. Relation fields compare the
//! identity of the referenced entity (the `"id"` member of an object, or a
//! bare string or number), falling back to structural equality when either
//! side carries no identity.

use crate::error::{TrackerError, TrackerResult};
use crate::provider::MutationMetadataProvider;
use crate::unit_of_work::{EntityState, UnitOfWorkContext};
use entity_tracker_model::{
    ChangeSet, Entity, EntityRef, EntitySchema, FieldType, LazyReference, TypeRegistry,
};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;

/// [`MutationMetadataProvider`] for any context exposing a
/// [`UnitOfWork`](crate::UnitOfWork).
#[derive(Debug, Clone)]
pub struct UnitOfWorkMutationProvider {
    registry: Arc<TypeRegistry>,
}

impl UnitOfWorkMutationProvider {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    fn schema(&self, entity: &EntityRef) -> TrackerResult<&EntitySchema> {
        let entity_type = entity.entity_type();
        self.registry
            .schema(entity_type)
            .map_err(|_| TrackerError::UnknownEntityType(entity_type))
    }
}

impl<C: UnitOfWorkContext + ?Sized> MutationMetadataProvider<C> for UnitOfWorkMutationProvider {
    fn is_entity_managed(&self, context: &C, entity: &EntityRef) -> TrackerResult<bool> {
        Ok(context.unit_of_work().entity_state(entity.id()) == Some(EntityState::Managed))
    }

    fn create_original_entity(
        &self,
        context: &C,
        entity: &EntityRef,
    ) -> TrackerResult<Option<Entity>> {
        if entity.is_lazy_reference() && !entity.is_initialized() {
            return Ok(None);
        }
        let original = match context.unit_of_work().original_data(entity.id()) {
            Some(data) if !data.is_empty() => Some(Entity::from_parts(
                entity.id(),
                entity.entity_type(),
                data.clone(),
            )),
            _ => None,
        };
        Ok(original)
    }

    fn get_mutated_fields(
        &self,
        _context: &C,
        current: &EntityRef,
        original: Option<&Entity>,
    ) -> TrackerResult<Vec<String>> {
        let schema = self.schema(current)?;
        let current = current
            .entity()
            .ok_or(TrackerError::UninitializedProxy(current.id()))?;
        Ok(mutated_fields(schema, current, original))
    }

    fn get_full_change_set(&self, context: &C) -> TrackerResult<ChangeSet> {
        let unit_of_work = context.unit_of_work();
        Ok(unit_of_work
            .identity_map()
            .chain(unit_of_work.scheduled_insertions())
            .cloned()
            .collect())
    }
}

/// Computes the mutated field names of `current` against `original`.
pub fn mutated_fields(
    schema: &EntitySchema,
    current: &Entity,
    original: Option<&Entity>,
) -> Vec<String> {
    if schema.fields.is_empty() {
        let mut names: BTreeSet<&str> = current.field_names().collect();
        if let Some(original) = original {
            names.extend(original.field_names());
        }
        return names
            .into_iter()
            .filter(|name| field_changed(FieldType::Json, name, current, original))
            .map(str::to_string)
            .collect();
    }

    schema
        .fields
        .iter()
        .filter(|f| !f.ignored)
        .filter(|f| field_changed(f.field_type, &f.name, current, original))
        .map(|f| f.name.clone())
        .collect()
}

fn field_changed(
    field_type: FieldType,
    name: &str,
    current: &Entity,
    original: Option<&Entity>,
) -> bool {
    let now = current.get(name).unwrap_or(&Value::Null);
    match original {
        None => !now.is_null(),
        Some(original) => {
            let before = original.get(name).unwrap_or(&Value::Null);
            !field_values_equal(field_type, now, before)
        }
    }
}

/// Equality rule applied to one field.
pub fn field_values_equal(field_type: FieldType, a: &Value, b: &Value) -> bool {
    match field_type {
        FieldType::Relation => match (relation_identity(a), relation_identity(b)) {
            (Some(a), Some(b)) => values_equal(a, b),
            _ => values_equal(a, b),
        },
        _ => values_equal(a, b),
    }
}

fn relation_identity(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(map) => map.get("id"),
        Value::String(_) | Value::Number(_) => Some(value),
        _ => None,
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            // Integers compare exactly; only a float on either side widens to f64.
            x == y
                || ((x.is_f64() || y.is_f64())
                    && matches!((x.as_f64(), y.as_f64()), (Some(x), Some(y)) if x == y))
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}
