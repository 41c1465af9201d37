//! Selection tracking.
//!
//! Keeps the students picked for a report together with a snapshot of each
//! record taken when it was picked, so the selection survives re-filtering
//! of the directory listing.

use std::collections::HashMap;

use crate::models::StudentRecord;

/// Selected registration numbers plus their record snapshots.
///
/// `order` and `snapshots` always hold exactly the same identifiers.
#[derive(Debug, Clone, Default)]
pub struct SelectionTracker {
    order: Vec<String>,
    snapshots: HashMap<String, StudentRecord>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deselect the record if selected, otherwise select it.
    ///
    /// Returns whether the record is selected afterwards.
    pub fn toggle(&mut self, record: &StudentRecord) -> bool {
        if self.deselect(record.id()) {
            false
        } else {
            self.insert(record);
            true
        }
    }

    /// Add every candidate not already selected. Never removes anything.
    ///
    /// Returns the number of newly selected records.
    pub fn select_all<'a>(&mut self, candidates: impl IntoIterator<Item = &'a StudentRecord>) -> usize {
        let mut added = 0;
        for record in candidates {
            if !self.is_selected(record.id()) {
                self.insert(record);
                added += 1;
            }
        }
        added
    }

    /// Remove an identifier and its snapshot. Returns whether it was selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        if self.snapshots.remove(id).is_none() {
            return false;
        }
        self.order.retain(|selected| selected != id);
        true
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.snapshots.clear();
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.snapshots.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Selected identifiers in selection order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Snapshot for a selected identifier.
    pub fn snapshot(&self, id: &str) -> Option<&StudentRecord> {
        self.snapshots.get(id)
    }

    /// Snapshots in selection order, for a "selected only" listing.
    pub fn snapshots(&self) -> impl Iterator<Item = &StudentRecord> {
        self.order.iter().filter_map(|id| self.snapshots.get(id))
    }

    fn insert(&mut self, record: &StudentRecord) {
        self.order.push(record.registered_no.clone());
        self.snapshots
            .insert(record.registered_no.clone(), record.clone());
    }
}
