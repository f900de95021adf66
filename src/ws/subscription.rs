//! Per-connection subscription management.
//!
//! Each WebSocket connection maintains its own set of subscribed event
//! kinds. A wildcard subscription (`"*"`) matches every kind.

use std::collections::HashSet;

use crate::domain::DexEvent;

/// Wildcard token accepted by subscribe/unsubscribe.
pub const WILDCARD: &str = "*";

/// Tracks which event kinds a single WebSocket connection is subscribed to.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Explicitly subscribed event type names.
    event_types: HashSet<&'static str>,
    /// Whether the connection subscribes to every event (`"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event kinds to the subscription set.
    ///
    /// Returns the names that are not known event kinds; those are ignored.
    pub fn subscribe(&mut self, names: &[String]) -> Vec<String> {
        let mut unknown = Vec::new();
        for name in names {
            if name == WILDCARD {
                self.subscribe_all = true;
            } else if let Some(kind) = known(name) {
                self.event_types.insert(kind);
            } else {
                unknown.push(name.clone());
            }
        }
        unknown
    }

    /// Removes event kinds from the subscription set.
    pub fn unsubscribe(&mut self, names: &[String]) {
        for name in names {
            if name == WILDCARD {
                self.subscribe_all = false;
            } else {
                self.event_types.remove(name.as_str());
            }
        }
    }

    /// Returns `true` if events of `event_type` should be forwarded.
    #[must_use]
    pub fn matches(&self, event_type: &str) -> bool {
        self.subscribe_all || self.event_types.contains(event_type)
    }

    /// Explicitly subscribed event kinds, sorted.
    #[must_use]
    pub fn subscribed(&self) -> Vec<&'static str> {
        let mut kinds: Vec<_> = self.event_types.iter().copied().collect();
        kinds.sort_unstable();
        kinds
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

fn known(name: &str) -> Option<&'static str> {
    DexEvent::EVENT_TYPES.iter().copied().find(|kind| *kind == name)
}
