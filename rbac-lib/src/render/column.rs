//! Column definitions.

use std::fmt;
use std::sync::Arc;

use crate::api::Direction;
use crate::error::ColumnError;
use crate::model::Record;
use crate::render::Cell;
use crate::render::HeaderCell;
use crate::render::SortIndicator;

/// What a column sees when rendering its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderContext {
    /// Direction this column is currently sorted in.
    pub sort: Option<Direction>,
}

/// What a column sees when rendering one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellContext {
    /// Index of the row on the current page.
    pub row_index: usize,
    /// Row number across pages.
    pub row_number: u64,
}

/// The capability set of a table column.
///
/// [`Column`] covers the common cases; implement this directly for columns
/// that need state or custom header rendering.
pub trait ColumnSpec: Send + Sync {
    /// Unique key, also the field name sent as `orderBy`.
    fn key(&self) -> &str;

    fn render_header(&self, ctx: &HeaderContext) -> HeaderCell;

    fn render_cell(&self, record: &Record, ctx: &CellContext) -> Cell;

    fn sortable(&self) -> bool {
        true
    }
}

type CellFn = Arc<dyn Fn(&Record) -> Cell + Send + Sync>;

/// A column bound to one record field.
///
/// # Example
///
/// ```
/// use rbac_lib::render::{Cell, Column};
///
/// let name = Column::new("name", "Name");
/// let created = Column::new("created_at", "Created At")
///     .cell(|record| Cell::text(record.text("created_at").to_uppercase()))
///     .not_sortable();
/// ```
#[derive(Clone)]
pub struct Column {
    key: String,
    label: String,
    sortable: bool,
    cell: Option<CellFn>,
}

impl Column {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            cell: None,
        }
    }

    /// Sets a custom cell renderer.
    pub fn cell<F>(mut self, f: F) -> Self
    where
        F: Fn(&Record) -> Cell + Send + Sync + 'static,
    {
        self.cell = Some(Arc::new(f));
        self
    }

    /// Renders the field through `f` as text.
    pub fn text<F>(self, f: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.cell(move |record| Cell::Text(f(record)))
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("custom_cell", &self.cell.is_some())
            .finish()
    }
}

impl ColumnSpec for Column {
    fn key(&self) -> &str {
        &self.key
    }

    fn render_header(&self, ctx: &HeaderContext) -> HeaderCell {
        HeaderCell::Label {
            key: Some(self.key.clone()),
            text: self.label.clone(),
            sort: self.sortable.then(|| SortIndicator::from(ctx.sort)),
        }
    }

    fn render_cell(&self, record: &Record, _ctx: &CellContext) -> Cell {
        match &self.cell {
            Some(f) => f(record),
            None => Cell::Text(record.text(&self.key)),
        }
    }

    fn sortable(&self) -> bool {
        self.sortable
    }
}

/// The ordered columns of one table, with unique keys.
pub struct Columns {
    columns: Vec<Box<dyn ColumnSpec>>,
}

impl Columns {
    /// Builds a column set, rejecting duplicate keys.
    pub fn new<I, C>(columns: I) -> Result<Self, ColumnError>
    where
        I: IntoIterator<Item = C>,
        C: ColumnSpec + 'static,
    {
        columns
            .into_iter()
            .try_fold(Self::empty(), |set, column| set.with(column))
    }

    pub fn empty() -> Self {
        Self { columns: Vec::new() }
    }

    /// Appends a column, rejecting a duplicate key.
    pub fn with(mut self, column: impl ColumnSpec + 'static) -> Result<Self, ColumnError> {
        if self.get(column.key()).is_some() {
            return Err(ColumnError::duplicate(column.key()));
        }
        self.columns.push(Box::new(column));
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&dyn ColumnSpec> {
        self.columns
            .iter()
            .find(|c| c.key() == key)
            .map(|c| c.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ColumnSpec> {
        self.columns.iter().map(|c| c.as_ref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.key())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Checks that `key` names an existing, sortable column.
    pub fn check_sortable(&self, key: &str) -> Result<(), ColumnError> {
        match self.get(key) {
            None => Err(ColumnError::unknown(key)),
            Some(column) if !column.sortable() => Err(ColumnError::not_sortable(key)),
            Some(_) => Ok(()),
        }
    }
}

impl fmt::Debug for Columns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.keys()).finish()
    }
}
