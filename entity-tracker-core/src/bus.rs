//! Event manager seam and a synchronous in-process bus.

use crate::event::EntityChangedEvent;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Outbound publishing seam. One synchronous call per notification; the
/// caller does not inspect listener results.
pub trait EventManager: Send + Sync {
    fn dispatch_event(&self, event_name: &str, event: &EntityChangedEvent);
}

type Subscriber = Box<dyn Fn(&EntityChangedEvent) + Send + Sync>;

/// Name-keyed bus calling subscribers in subscription order.
///
/// Subscriptions are made while the bus is still exclusively owned, before
/// it is shared with a session.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<String, Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, event_name: impl Into<String>, subscriber: F)
    where
        F: Fn(&EntityChangedEvent) + Send + Sync + 'static,
    {
        self.subscribers
            .entry(event_name.into())
            .or_default()
            .push(Box::new(subscriber));
    }

    pub fn has_subscribers(&self, event_name: &str) -> bool {
        self.subscribers
            .get(event_name)
            .is_some_and(|subs| !subs.is_empty())
    }
}

impl EventManager for EventBus {
    fn dispatch_event(&self, event_name: &str, event: &EntityChangedEvent) {
        let Some(subscribers) = self.subscribers.get(event_name) else {
            trace!(event_name, "No subscribers");
            return;
        };
        for subscriber in subscribers {
            subscriber(event);
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .subscribers
            .iter()
            .map(|(name, subs)| (name.as_str(), subs.len()))
            .collect();
        f.debug_struct("EventBus").field("subscribers", &counts).finish()
    }
}
