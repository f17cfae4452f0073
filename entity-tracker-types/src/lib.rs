//! Core identifier types for the entity tracker.
//!
//! This crate defines the identifiers every other layer
//! depends on:
//! - [`EntityId`]: identity of a single entity instance (UUID v7)
//! - [`EntityTypeId`]: dense handle for a registered entity type
//! - [`EventId`]: identity of an emitted change notification
//!
//! Entity data, schemas and the change detector live in the model and core
//! crates, not here.

mod ids;

pub use ids::{EntityId, EntityTypeId, EventId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid entity type id: {0}")]
    InvalidTypeId(String),
}
