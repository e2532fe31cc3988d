//! Column definition errors

/// Errors raised when building a column set or referencing a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColumnError {
    /// Two columns share the same key.
    #[error("Duplicate column key '{key}'")]
    Duplicate { key: String },

    /// No column with this key exists.
    #[error("Unknown column '{key}'")]
    Unknown { key: String },

    /// The column exists but cannot be sorted.
    #[error("Column '{key}' is not sortable")]
    NotSortable { key: String },
}

impl ColumnError {
    pub fn duplicate(key: impl Into<String>) -> Self {
        Self::Duplicate { key: key.into() }
    }

    pub fn unknown(key: impl Into<String>) -> Self {
        Self::Unknown { key: key.into() }
    }

    pub fn not_sortable(key: impl Into<String>) -> Self {
        Self::NotSortable { key: key.into() }
    }
}
