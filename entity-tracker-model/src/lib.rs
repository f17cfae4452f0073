//! Entity model for the entity tracker.
//!
//! Defines the types the change detector and its providers exchange:
//! - [`Entity`]: a loaded entity instance (id, type, field map)
//! - [`EntityRef`] / [`EntityProxy`]: handles that may stand in for
//!   entities whose data has not been loaded, see [`LazyReference`]
//! - [`EntitySchema`]: declares whether a type is tracked and how its fields
//!   are compared
//! - [`TypeRegistry`]: resolves type names to [`EntityTypeId`]s once
//! - [`ChangeSet`]: entities pending flush, grouped by type

mod change_set;
mod entity;
mod reference;
mod registry;
mod schema;

pub use change_set::ChangeSet;
pub use entity::Entity;
pub use reference::{EntityProxy, EntityRef, LazyReference};
pub use registry::{RegistryError, RegistryResult, TypeRegistry};
pub use schema::{EntitySchema, FieldType, TrackedField};

pub use entity_tracker_types::{EntityId, EntityTypeId};
