//! The table state manager.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::RwLockReadGuard;
use std::sync::RwLockWriteGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use log::debug;
use log::warn;

use super::Notice;
use super::Pagination;
use super::Selection;
use super::SortState;
use crate::api::DataEndpoint;
use crate::api::Direction;
use crate::api::ListQuery;
use crate::config::RefetchPolicy;
use crate::config::TableConfig;
use crate::error::ApiError;
use crate::error::ColumnError;
use crate::model::Record;
use crate::model::RecordId;
use crate::render::Columns;

/// Result of one fetch trigger.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page was replaced with `rows` records.
    Loaded { rows: usize },
    /// Another fetch was in flight; nothing was requested.
    Skipped,
    /// The request failed; rows and selection are unchanged.
    Failed(ApiError),
}

impl FetchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Immutable copy of the table state.
///
/// The renderer, the controls and the export engine read from this and never
/// touch the live state.
#[derive(Debug, Clone, Default)]
pub struct TableSnapshot {
    pub rows: Vec<Record>,
    pub pagination: Pagination,
    pub sort: SortState,
    pub global_filter: String,
    pub selection: Selection,
    pub loading: bool,
}

impl TableSnapshot {
    /// Selected rows in row order.
    pub fn selected_records(&self) -> Vec<&Record> {
        self.selection.select_from(&self.rows).collect()
    }

    /// Number of selected rows on the page.
    pub fn selected_count(&self) -> usize {
        self.selection.count_in(&self.rows)
    }

    pub fn is_selected(&self, record: &Record) -> bool {
        record.id().is_some_and(|id| self.selection.is_selected(&id))
    }
}

#[derive(Debug)]
struct TableInner {
    rows: Vec<Record>,
    pagination: Pagination,
    sort: SortState,
    global_filter: String,
    selection: Selection,
    notices: Vec<Notice>,
}

/// A server-driven data table.
///
/// Owns pagination, sort, search and selection state and keeps the row set
/// in sync with a [`DataEndpoint`]. Every setter mutates state and then
/// triggers a fetch. Only one fetch runs at a time; what happens to triggers
/// that arrive meanwhile is decided by [`RefetchPolicy`].
///
/// This type is cheap to clone (uses `Arc` internally); clones share state.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use rbac_lib::api::MemoryEndpoint;
/// use rbac_lib::config::TableConfig;
/// use rbac_lib::render::{Column, Columns};
/// use rbac_lib::table::DataTable;
///
/// let columns = Columns::new([Column::new("name", "Name")])?;
/// let table = DataTable::new(Arc::new(MemoryEndpoint::default()), columns, TableConfig::default());
///
/// table.set_global_filter("admin").await;
/// let snapshot = table.snapshot();
/// ```
#[derive(Clone)]
pub struct DataTable {
    endpoint: Arc<dyn DataEndpoint>,
    columns: Arc<Columns>,
    config: Arc<TableConfig>,
    inner: Arc<RwLock<TableInner>>,
    loading: Arc<AtomicBool>,
    stale: Arc<AtomicBool>,
}

impl DataTable {
    pub fn new(endpoint: Arc<dyn DataEndpoint>, columns: Columns, config: TableConfig) -> Self {
        let inner = TableInner {
            rows: Vec::new(),
            pagination: Pagination::new(config.per_page),
            sort: SortState::new(),
            global_filter: String::new(),
            selection: Selection::new(),
            notices: Vec::new(),
        };
        Self {
            endpoint,
            columns: Arc::new(columns),
            config: Arc::new(config),
            inner: Arc::new(RwLock::new(inner)),
            loading: Arc::new(AtomicBool::new(false)),
            stale: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &Arc<dyn DataEndpoint> {
        &self.endpoint
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        let inner = self.read();
        TableSnapshot {
            rows: inner.rows.clone(),
            pagination: inner.pagination,
            sort: inner.sort.clone(),
            global_filter: inner.global_filter.clone(),
            selection: inner.selection.clone(),
            loading: self.is_loading(),
        }
    }

    /// The query the next fetch will send.
    pub fn query(&self) -> ListQuery {
        let inner = self.read();
        ListQuery {
            page: inner.pagination.page(),
            per_page: Some(inner.pagination.per_page()),
            global_search: inner.global_filter.clone(),
            order: inner.sort.primary().cloned(),
        }
    }

    // -------------------------------------------------------------------------
    // State mutations
    // -------------------------------------------------------------------------

    /// Moves to page `n` (clamped) and fetches.
    pub async fn set_page(&self, n: u32) -> FetchOutcome {
        {
            let mut inner = self.write();
            inner.pagination.set_page(n);
            debug!("page set to {}", inner.pagination.page());
        }
        self.schedule_fetch().await
    }

    /// Changes the page size, returns to page 1 and fetches.
    pub async fn set_per_page(&self, n: u32) -> FetchOutcome {
        {
            let mut inner = self.write();
            inner.pagination.set_per_page(n);
            debug!("per page set to {}", inner.pagination.per_page());
        }
        self.schedule_fetch().await
    }

    /// Changes the search text, returns to page 1 and fetches.
    pub async fn set_global_filter(&self, filter: impl Into<String>) -> FetchOutcome {
        {
            let mut inner = self.write();
            inner.global_filter = filter.into();
            inner.pagination.reset_page();
            debug!("global filter set to {:?}", inner.global_filter);
        }
        self.schedule_fetch().await
    }

    /// Sorts by one column and fetches.
    pub async fn set_sort(&self, column: &str, direction: Direction) -> Result<FetchOutcome, ColumnError> {
        self.columns.check_sortable(column)?;
        {
            let mut inner = self.write();
            inner.sort.set(column, direction);
            debug!("sort set to {} {}", column, direction);
        }
        Ok(self.schedule_fetch().await)
    }

    /// Header activation on `column`: unsorted → asc → desc → unsorted.
    pub async fn toggle_sort(&self, column: &str) -> Result<FetchOutcome, ColumnError> {
        self.columns.check_sortable(column)?;
        {
            let mut inner = self.write();
            inner.sort.toggle(column);
            debug!("sort toggled on {}: {:?}", column, inner.sort.primary());
        }
        Ok(self.schedule_fetch().await)
    }

    /// Removes the sort so the server default applies, and fetches.
    pub async fn clear_sort(&self) -> FetchOutcome {
        self.write().sort.clear();
        self.schedule_fetch().await
    }

    /// Re-fetches the current page.
    pub async fn reload(&self) -> FetchOutcome {
        self.schedule_fetch().await
    }

    async fn schedule_fetch(&self) -> FetchOutcome {
        self.fetch().await
    }

    // -------------------------------------------------------------------------
    // Fetching
    // -------------------------------------------------------------------------

    /// Issues one list request for the current state.
    ///
    /// Non-reentrant: while a fetch is in flight this returns
    /// [`FetchOutcome::Skipped`] without sending anything. Under
    /// [`RefetchPolicy::Coalesce`] the skipped trigger is remembered and one
    /// follow-up fetch runs once the in-flight one resolves.
    pub async fn fetch(&self) -> FetchOutcome {
        let Some(mut guard) = LoadingGuard::acquire(&self.loading) else {
            if self.config.refetch == RefetchPolicy::Coalesce {
                self.stale.store(true, Ordering::SeqCst);
            }
            debug!("fetch skipped, request in flight");
            return FetchOutcome::Skipped;
        };

        let coalesce = self.config.refetch == RefetchPolicy::Coalesce;
        loop {
            let outcome = self.fetch_once().await;
            if coalesce && self.stale.swap(false, Ordering::SeqCst) {
                debug!("running coalesced follow-up fetch");
                continue;
            }

            drop(guard);
            // A trigger may land between the stale check and the release.
            if coalesce && self.stale.load(Ordering::SeqCst) {
                if let Some(next) = LoadingGuard::acquire(&self.loading) {
                    guard = next;
                    self.stale.store(false, Ordering::SeqCst);
                    continue;
                }
            }
            return outcome;
        }
    }

    async fn fetch_once(&self) -> FetchOutcome {
        let query = self.query();
        let timeout = self.config.fetch_timeout;
        debug!(
            "fetching page {} ({:?} per page, search {:?}, order {:?})",
            query.page, query.per_page, query.global_search, query.order
        );

        let result = match tokio::time::timeout(timeout, self.endpoint.list(&query)).await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Timeout(timeout)),
        };

        match result {
            Ok(envelope) => {
                let mut inner = self.write();
                inner.pagination.apply(&envelope);
                inner.rows = envelope.into_records();
                inner.selection.clear();
                debug!(
                    "loaded {} rows, page {} of {}",
                    inner.rows.len(),
                    inner.pagination.page(),
                    inner.pagination.last_page()
                );
                FetchOutcome::Loaded { rows: inner.rows.len() }
            }
            Err(e) => {
                warn!("fetch failed: {}", e);
                self.push_notice(Notice::error(format!("Failed to load data: {}", e)));
                FetchOutcome::Failed(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Row actions
    // -------------------------------------------------------------------------

    /// Deletes a record and refreshes on success.
    ///
    /// On failure a notice is pushed and the error returned; state is
    /// unchanged.
    pub async fn delete(&self, id: &RecordId) -> Result<FetchOutcome, ApiError> {
        debug!("deleting record {}", id);
        match self.endpoint.delete(id).await {
            Ok(()) => {
                self.push_notice(Notice::success("Data deleted"));
                Ok(self.fetch().await)
            }
            Err(e) => {
                warn!("delete of {} failed: {}", id, e);
                self.push_notice(Notice::error(format!("Failed to delete data: {}", e)));
                Err(e)
            }
        }
    }

    /// Marks a record verified and refreshes on success.
    pub async fn verify(&self, id: &RecordId) -> Result<FetchOutcome, ApiError> {
        debug!("verifying record {}", id);
        match self.endpoint.verify(id).await {
            Ok(()) => {
                self.push_notice(Notice::success("Data verified"));
                Ok(self.fetch().await)
            }
            Err(e) => {
                warn!("verify of {} failed: {}", id, e);
                self.push_notice(Notice::error(format!("Failed to verify data: {}", e)));
                Err(e)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggles a row. Ids not on the current page are ignored.
    ///
    /// Returns whether the row is selected afterwards.
    pub fn toggle_row(&self, id: &RecordId) -> bool {
        let mut inner = self.write();
        if !contains_row(&inner.rows, id) {
            return false;
        }
        inner.selection.toggle(id.clone())
    }

    /// Sets a row's selection. Returns true if selection changed.
    pub fn set_row_selected(&self, id: &RecordId, selected: bool) -> bool {
        let mut inner = self.write();
        if selected && !contains_row(&inner.rows, id) {
            return false;
        }
        inner.selection.set(id.clone(), selected)
    }

    /// Selects or deselects every row on the current page.
    pub fn toggle_all_page(&self, selected: bool) {
        let mut inner = self.write();
        if selected {
            let ids: Vec<RecordId> = inner.rows.iter().filter_map(Record::id).collect();
            for id in ids {
                inner.selection.set(id, true);
            }
        } else {
            inner.selection.clear();
        }
    }

    pub fn clear_selection(&self) {
        self.write().selection.clear();
    }

    /// Selected records, in row order.
    pub fn selected_records(&self) -> Vec<Record> {
        let inner = self.read();
        inner.selection.select_from(&inner.rows).cloned().collect()
    }

    // -------------------------------------------------------------------------
    // Notices
    // -------------------------------------------------------------------------

    pub fn push_notice(&self, notice: Notice) {
        self.write().notices.push(notice);
    }

    /// Drains queued notices.
    pub fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.write().notices)
    }

    fn read(&self) -> RwLockReadGuard<'_, TableInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, TableInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the in-flight flag; releases it on drop, including when the fetch
/// future is cancelled.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for DataTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("columns", &self.columns)
            .field("config", &self.config)
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

fn contains_row(rows: &[Record], id: &RecordId) -> bool {
    rows.iter().any(|r| r.id().as_ref() == Some(id))
}
