//! Mutation detection and change notification for persistent entities.
//!
//! Hooks into a persistence engine's pre-flush and pre-persist lifecycle
//! points and publishes one [`EntityChangedEvent`] per tracked entity whose
//! fields actually changed.
//!
//! # Components
//!
//! - **Providers** ([`AnnotationMetadataProvider`], [`MutationMetadataProvider`]):
//!   the seams where a persistence engine and metadata source plug in
//! - **Listener** ([`EntityChangedListener`]): sequences the provider calls
//!   and publishes notifications
//! - **Event manager** ([`EventManager`], [`EventBus`]): synchronous
//!   publish-by-name
//! - **Reference engine** ([`Session`], [`UnitOfWork`],
//!   [`RegistryAnnotationProvider`], [`UnitOfWorkMutationProvider`]):
//!   in-memory implementations of every collaborator
//!
//! # Example
//!
//! ```
//! use entity_tracker_core::{events, EntityChangedListener, EventBus, Session};
//! use entity_tracker_model::{Entity, EntitySchema, TypeRegistry};
//! use std::sync::{Arc, Mutex};
//!
//! let mut registry = TypeRegistry::new();
//! let order = registry.register(EntitySchema::tracked("order")).unwrap();
//! let registry = Arc::new(registry);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let mut bus = EventBus::new();
//! let sink = seen.clone();
//! bus.subscribe(events::ENTITY_CHANGED, move |event| {
//!     sink.lock().unwrap().push(event.mutated_fields().to_vec());
//! });
//!
//! let listener = Arc::new(EntityChangedListener::with_registry(registry));
//! let mut session = Session::new(Arc::new(bus)).with_listener(listener);
//!
//! let entity = Entity::new(order).with_field("status", "open");
//! let id = entity.id();
//! session.load(entity);
//! session.find_mut(id).unwrap().set("status", "paid");
//! session.flush().unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![vec!["status".to_string()]]);
//! ```

mod annotation;
mod bus;
mod config;
mod context;
mod error;
mod event;
mod listener;
pub mod mutation;
mod provider;
mod session;
mod unit_of_work;

pub use annotation::RegistryAnnotationProvider;
pub use bus::{EventBus, EventManager};
pub use config::TrackerConfig;
pub use context::{LifecycleEventArgs, PersistenceContext, PreFlushEventArgs};
pub use error::{TrackerError, TrackerResult};
pub use event::{EntityChangedEvent, LifecyclePhase, events};
pub use listener::EntityChangedListener;
pub use mutation::UnitOfWorkMutationProvider;
pub use provider::{AnnotationMetadataProvider, MutationMetadataProvider};
pub use session::Session;
pub use unit_of_work::{EntityState, UnitOfWork, UnitOfWorkContext};
