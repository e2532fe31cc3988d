//! Pagination and toolbar controls.
//!
//! [`ControlsView`] is the view model of the pager, page-size selector and
//! search box; [`ControlAction`]s are applied through
//! [`DataTable::apply`], which is the only way controls mutate the table.

use log::debug;

use crate::table::DataTable;
use crate::table::FetchOutcome;
use crate::table::TableSnapshot;

/// State of the controls for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub first_enabled: bool,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub last_enabled: bool,
    /// Page-size selector: offered sizes and the current one.
    pub page_sizes: Vec<u32>,
    pub per_page: u32,
    pub search: String,
    pub page: u32,
    pub last_page: u32,
    /// `Showing {from} to {to} of {total} entries`.
    pub info: String,
    /// Everything is disabled while a fetch is in flight.
    pub disabled: bool,
}

impl ControlsView {
    pub fn from_snapshot(snapshot: &TableSnapshot, page_sizes: &[u32]) -> Self {
        let pagination = &snapshot.pagination;
        let idle = !snapshot.loading;
        let back = idle && pagination.has_previous();
        let forward = idle && pagination.has_next();

        Self {
            first_enabled: back,
            previous_enabled: back,
            next_enabled: forward,
            last_enabled: forward,
            page_sizes: page_sizes.to_vec(),
            per_page: pagination.per_page(),
            search: snapshot.global_filter.clone(),
            page: pagination.page(),
            last_page: pagination.last_page(),
            info: format!(
                "Showing {} to {} of {} entries",
                pagination.from(),
                pagination.to(),
                pagination.total()
            ),
            disabled: snapshot.loading,
        }
    }
}

/// A user interaction with the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    First,
    Previous,
    Next,
    Last,
    PageSize(u32),
    Search(String),
    Reload,
}

impl DataTable {
    /// The controls for the current state.
    pub fn controls(&self) -> ControlsView {
        ControlsView::from_snapshot(&self.snapshot(), &self.config().page_sizes)
    }

    /// Applies a control action.
    ///
    /// Actions on disabled controls and page sizes that are not offered are
    /// ignored and return [`FetchOutcome::Skipped`].
    pub async fn apply(&self, action: ControlAction) -> FetchOutcome {
        let view = self.controls();
        let page = view.page;

        let enabled = match &action {
            ControlAction::First => view.first_enabled,
            ControlAction::Previous => view.previous_enabled,
            ControlAction::Next => view.next_enabled,
            ControlAction::Last => view.last_enabled,
            ControlAction::PageSize(n) => !view.disabled && self.config().offers_page_size(*n),
            ControlAction::Search(_) | ControlAction::Reload => !view.disabled,
        };
        if !enabled {
            debug!("ignoring control action {:?}", action);
            return FetchOutcome::Skipped;
        }

        match action {
            ControlAction::First => self.set_page(1).await,
            ControlAction::Previous => self.set_page(page - 1).await,
            ControlAction::Next => self.set_page(page + 1).await,
            ControlAction::Last => self.set_page(view.last_page).await,
            ControlAction::PageSize(n) => self.set_per_page(n).await,
            ControlAction::Search(text) => self.set_global_filter(text).await,
            ControlAction::Reload => self.reload().await,
        }
    }
}
