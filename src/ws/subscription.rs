//! Per-connection subscription manager.
//!
//! Tracks which fields a live-feed client follows and filters events on
//! the server side. Events not tied to a field (role changes) only reach
//! wildcard subscribers.

use std::collections::HashSet;

use crate::domain::FieldId;

/// Wildcard token accepted in `field_ids`.
pub const WILDCARD: &str = "*";

/// Manages the set of field subscriptions for a single WebSocket connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Followed fields. Ignored while `subscribe_all` is set.
    field_ids: HashSet<FieldId>,
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds fields to the subscription set. `"*"` enables the wildcard.
    /// Returns the ids that were added explicitly.
    pub fn subscribe(&mut self, raw_ids: &[String]) -> Vec<FieldId> {
        let mut added = Vec::new();
        for raw in raw_ids {
            if raw == WILDCARD {
                self.subscribe_all = true;
            } else {
                let id = FieldId::new(raw.as_str());
                self.field_ids.insert(id.clone());
                added.push(id);
            }
        }
        added
    }

    /// Removes fields from the subscription set. `"*"` clears the wildcard.
    pub fn unsubscribe(&mut self, raw_ids: &[String]) -> Vec<FieldId> {
        let mut removed = Vec::new();
        for raw in raw_ids {
            if raw == WILDCARD {
                self.subscribe_all = false;
                continue;
            }
            let id = FieldId::new(raw.as_str());
            if self.field_ids.remove(&id) {
                removed.push(id);
            }
        }
        removed
    }

    /// Returns `true` if an event about `field_id` should be delivered.
    #[must_use]
    pub fn matches(&self, field_id: Option<&FieldId>) -> bool {
        self.subscribe_all || field_id.is_some_and(|id| self.field_ids.contains(id))
    }

    /// Returns the number of explicitly subscribed fields.
    #[must_use]
    pub fn count(&self) -> usize {
        self.field_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_matches_nothing() {
        let mgr = SubscriptionManager::new();
        assert!(!mgr.matches(Some(&FieldId::new("lapangan-a"))));
        assert!(!mgr.matches(None));
    }

    #[test]
    fn subscribe_specific_field() {
        let mut mgr = SubscriptionManager::new();
        let added = mgr.subscribe(&ids(&["lapangan-a"]));
        assert_eq!(added.len(), 1);
        assert!(mgr.matches(Some(&FieldId::new("lapangan-a"))));
        assert!(!mgr.matches(Some(&FieldId::new("lapangan-b"))));
        assert!(!mgr.matches(None));
    }

    #[test]
    fn wildcard_matches_field_less_events() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&ids(&["*"]));
        assert!(mgr.is_subscribed_all());
        assert!(mgr.matches(None));
        assert!(mgr.matches(Some(&FieldId::new("anything"))));

        mgr.unsubscribe(&ids(&["*"]));
        assert!(!mgr.matches(None));
    }

    #[test]
    fn unsubscribe_reports_only_known_fields() {
        let mut mgr = SubscriptionManager::new();
        mgr.subscribe(&ids(&["lapangan-a", "lapangan-b"]));
        assert_eq!(mgr.count(), 2);
        let removed = mgr.unsubscribe(&ids(&["lapangan-a", "lapangan-z"]));
        assert_eq!(removed, vec![FieldId::new("lapangan-a")]);
        assert_eq!(mgr.count(), 1);
    }
}
