//! Tracker configuration.

use crate::error::{TrackerError, TrackerResult};
use entity_tracker_model::{EntitySchema, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Declares the entity types the tracker knows about.
///
/// ```
/// use entity_tracker_core::TrackerConfig;
///
/// let config = TrackerConfig::from_json_str(r#"{
///     "entities": [
///         {"entity_type": "order", "tracked": true,
///          "fields": [{"name": "status", "field_type": "text"}]},
///         {"entity_type": "audit_log"}
///     ]
/// }"#).unwrap();
///
/// let registry = config.build_registry().unwrap();
/// assert!(registry.is_tracked(registry.id_of("order").unwrap()).unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub entities: Vec<EntitySchema>,
}

impl TrackerConfig {
    pub fn from_json_str(raw: &str) -> TrackerResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validates the schemas and registers them in declaration order.
    pub fn build_registry(&self) -> TrackerResult<TypeRegistry> {
        for schema in &self.entities {
            if schema.entity_type.trim().is_empty() {
                return Err(TrackerError::Config("entity type name is empty".into()));
            }
            let mut seen = HashSet::new();
            for field in &schema.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(TrackerError::Config(format!(
                        "field {} declared twice on {}",
                        field.name, schema.entity_type
                    )));
                }
            }
        }
        Ok(TypeRegistry::from_schemas(self.entities.iter().cloned())?)
    }
}
