//! Sort state.

use crate::api::Direction;
use crate::api::SortKey;

/// The active sort, holding at most one key.
///
/// Stored as a sequence so multi-column sorting can be added without
/// changing the snapshot shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// The key sent to the server.
    pub fn primary(&self) -> Option<&SortKey> {
        self.keys.first()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Direction `column` is sorted in, if it is sorted.
    pub fn direction_of(&self, column: &str) -> Option<Direction> {
        self.keys
            .iter()
            .find(|k| k.column == column)
            .map(|k| k.direction)
    }

    /// Replaces the sort with a single key.
    pub fn set(&mut self, column: impl Into<String>, direction: Direction) {
        self.keys = vec![SortKey::new(column, direction)];
    }

    /// Header activation: unsorted → asc → desc → unsorted.
    ///
    /// Toggling a column other than the sorted one replaces the sort.
    pub fn toggle(&mut self, column: &str) {
        match self.direction_of(column) {
            None => self.set(column, Direction::Asc),
            Some(Direction::Asc) => self.set(column, Direction::Desc),
            Some(Direction::Desc) => self.clear(),
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}
