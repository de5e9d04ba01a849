//! Notification panel state.
//!
//! The list is whatever the last fetch returned. Expand/collapse is a local
//! concern keyed by notification id and never sent to the server.

use std::collections::HashSet;

use crate::model::Notification;

#[derive(Debug, Clone, Default)]
pub struct NotificationPanel {
    items: Vec<Notification>,
    expanded: HashSet<String>,
}

impl NotificationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with a fresh fetch. Expanded ids that disappeared are
    /// forgotten.
    pub fn replace(&mut self, items: Vec<Notification>) {
        self.expanded
            .retain(|id| items.iter().any(|n| &n.id == id));
        self.items = items;
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    /// Flip one item's expand state; returns the new state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
