//! Row actions: navigation and delete confirmation.

use std::sync::Arc;

use log::debug;

use crate::api::Resource;
use crate::error::ApiError;
use crate::model::RecordId;
use crate::render::ActionLink;
use crate::table::DataTable;
use crate::table::FetchOutcome;

/// An action offered on one row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowAction {
    View(RecordId),
    Edit(RecordId),
    Delete(RecordId),
    Verify(RecordId),
}

impl RowAction {
    pub fn id(&self) -> &RecordId {
        match self {
            Self::View(id) | Self::Edit(id) | Self::Delete(id) | Self::Verify(id) => id,
        }
    }
}

/// View / Edit / Delete links for one row of `resource`.
pub fn row_actions(resource: &Resource, id: &RecordId) -> Vec<ActionLink> {
    vec![
        ActionLink {
            label: "View",
            action: RowAction::View(id.clone()),
            href: Some(resource.record_path(id)),
        },
        ActionLink {
            label: "Edit",
            action: RowAction::Edit(id.clone()),
            href: Some(resource.edit_path(id)),
        },
        ActionLink {
            label: "Delete",
            action: RowAction::Delete(id.clone()),
            href: None,
        },
    ]
}

/// The router/link layer row links navigate through.
pub trait Navigator: Send + Sync {
    fn visit(&self, href: &str);
}

/// Pending delete awaiting explicit confirmation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pending: Option<RecordId>,
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the confirmation for `id`.
    pub fn request(&mut self, id: RecordId) {
        self.pending = Some(id);
    }

    pub fn pending(&self) -> Option<&RecordId> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Closes without sending anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Deletes the pending record.
    ///
    /// On success the confirmation closes and the table refetches. On failure
    /// it stays open so the user may retry. Returns `None` if nothing was
    /// pending.
    pub async fn confirm(&mut self, table: &DataTable) -> Option<Result<FetchOutcome, ApiError>> {
        let id = self.pending.clone()?;
        let result = table.delete(&id).await;
        if result.is_ok() {
            self.pending = None;
        }
        Some(result)
    }
}

/// What handling a row action did.
#[derive(Debug)]
pub enum ActionOutcome {
    Navigated(String),
    ConfirmationOpened(RecordId),
    Verified(FetchOutcome),
    Failed(ApiError),
}

/// Dispatches row actions to the navigator, the delete confirmation or the
/// table.
pub struct RowActionHandler {
    table: DataTable,
    resource: Resource,
    navigator: Arc<dyn Navigator>,
    confirmation: DeleteConfirmation,
}

impl RowActionHandler {
    pub fn new(table: DataTable, resource: Resource, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            table,
            resource,
            navigator,
            confirmation: DeleteConfirmation::new(),
        }
    }

    pub fn confirmation(&self) -> &DeleteConfirmation {
        &self.confirmation
    }

    pub async fn handle(&mut self, action: &RowAction) -> ActionOutcome {
        debug!("row action {:?}", action);
        match action {
            RowAction::View(id) => self.navigate(self.resource.record_path(id)),
            RowAction::Edit(id) => self.navigate(self.resource.edit_path(id)),
            RowAction::Delete(id) => {
                self.confirmation.request(id.clone());
                ActionOutcome::ConfirmationOpened(id.clone())
            }
            RowAction::Verify(id) => match self.table.verify(id).await {
                Ok(outcome) => ActionOutcome::Verified(outcome),
                Err(e) => ActionOutcome::Failed(e),
            },
        }
    }

    /// Confirms the pending delete.
    pub async fn confirm_delete(&mut self) -> Option<Result<FetchOutcome, ApiError>> {
        self.confirmation.confirm(&self.table).await
    }

    pub fn cancel_delete(&mut self) {
        self.confirmation.cancel();
    }

    fn navigate(&self, href: String) -> ActionOutcome {
        self.navigator.visit(&href);
        ActionOutcome::Navigated(href)
    }
}
