//! Row selection.

use std::collections::HashSet;

use crate::model::Record;
use crate::model::RecordId;

/// Tracks checked rows by their ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<RecordId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle selection for an id. Returns the new state.
    pub fn toggle(&mut self, id: RecordId) -> bool {
        if self.selected.remove(&id) {
            false
        } else {
            self.selected.insert(id);
            true
        }
    }

    /// Set selection for an id. Returns true if selection changed.
    pub fn set(&mut self, id: RecordId, selected: bool) -> bool {
        if selected {
            self.selected.insert(id)
        } else {
            self.selected.remove(&id)
        }
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selected.contains(id)
    }

    /// Clear all selections.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Get all selected ids.
    pub fn iter(&self) -> impl Iterator<Item = &RecordId> {
        self.selected.iter()
    }

    /// Selected records of `rows`, in row order.
    pub fn select_from<'a>(&'a self, rows: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        rows.iter()
            .filter(|r| r.id().is_some_and(|id| self.selected.contains(&id)))
    }

    /// How many of `rows` are selected.
    pub fn count_in(&self, rows: &[Record]) -> usize {
        self.select_from(rows).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_set() {
        let mut selection = Selection::new();
        assert!(selection.toggle(RecordId::Int(1)));
        assert!(selection.is_selected(&RecordId::Int(1)));
        assert!(!selection.toggle(RecordId::Int(1)));
        assert!(selection.is_empty());

        assert!(selection.set(RecordId::Int(2), true));
        assert!(!selection.set(RecordId::Int(2), true));
        assert!(selection.set(RecordId::Int(2), false));
    }

    #[test]
    fn test_select_from_keeps_row_order() {
        let rows: Vec<Record> = (1..=4).map(|i| Record::new().set("id", i)).collect();
        let mut selection = Selection::new();
        selection.set(RecordId::Int(3), true);
        selection.set(RecordId::Int(1), true);

        let ids: Vec<_> = selection.select_from(&rows).filter_map(Record::id).collect();
        assert_eq!(ids, [RecordId::Int(1), RecordId::Int(3)]);
        assert_eq!(selection.count_in(&rows), 2);
    }
}
