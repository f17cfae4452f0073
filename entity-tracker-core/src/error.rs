//! Error types for the tracker.

use entity_tracker_model::RegistryError;
use entity_tracker_types::{EntityId, EntityTypeId};
use thiserror::Error;

/// Result type for tracker and provider operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors crossing the provider seam.
///
/// The change listener never produces these itself; it returns whatever a
/// provider returned, unchanged.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The entity's type id is not known to the metadata source.
    #[error("unknown entity type: {0}")]
    UnknownEntityType(EntityTypeId),

    /// Field data was requested from a proxy that was never loaded.
    #[error("entity {0} is an uninitialized proxy")]
    UninitializedProxy(EntityId),

    /// Entity not found in the unit of work.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// The entity was detached from the unit of work and cannot be persisted
    /// again.
    #[error("entity {0} is detached")]
    DetachedEntity(EntityId),

    /// Registry error.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure reported by a host-supplied provider.
    #[error("provider error: {0}")]
    Provider(String),
}
