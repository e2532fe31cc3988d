//! Header and body rendering.

use crate::api::Resource;
use crate::model::RecordId;
use crate::render::Cell;
use crate::render::CellContext;
use crate::render::CheckState;
use crate::render::Columns;
use crate::render::HeaderCell;
use crate::render::HeaderContext;
use crate::render::row_actions;
use crate::table::TableSnapshot;

/// Message shown when a page has no rows.
pub const NO_RESULTS: &str = "No results.";

/// What the table body shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Empty,
    Rows,
}

pub fn body_state(snapshot: &TableSnapshot) -> BodyState {
    if snapshot.loading {
        BodyState::Loading
    } else if snapshot.rows.is_empty() {
        BodyState::Empty
    } else {
        BodyState::Rows
    }
}

/// One rendered body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: Option<RecordId>,
    pub cells: Vec<Cell>,
}

/// Headers: select-all, `No`, one per column, `Action`.
pub fn render_headers(snapshot: &TableSnapshot, columns: &Columns) -> Vec<HeaderCell> {
    let select_all = CheckState::of(snapshot.selected_count(), snapshot.rows.len());

    let mut headers = Vec::with_capacity(columns.len() + 3);
    headers.push(HeaderCell::SelectAll(select_all));
    headers.push(HeaderCell::plain("No"));
    headers.extend(columns.iter().map(|column| {
        let ctx = HeaderContext {
            sort: snapshot.sort.direction_of(column.key()),
        };
        column.render_header(&ctx)
    }));
    headers.push(HeaderCell::plain("Action"));
    headers
}

/// Body rows: checkbox, row number, one cell per column, actions.
pub fn render_rows(snapshot: &TableSnapshot, columns: &Columns, resource: &Resource) -> Vec<RenderedRow> {
    snapshot
        .rows
        .iter()
        .enumerate()
        .map(|(row_index, record)| {
            let id = record.id();
            let ctx = CellContext {
                row_index,
                row_number: snapshot.pagination.row_number(row_index),
            };

            let mut cells = Vec::with_capacity(columns.len() + 3);
            cells.push(Cell::Checkbox(snapshot.is_selected(record)));
            cells.push(Cell::Number(ctx.row_number));
            cells.extend(columns.iter().map(|column| column.render_cell(record, &ctx)));
            let actions = id.as_ref().map(|id| row_actions(resource, id)).unwrap_or_default();
            cells.push(Cell::Actions(actions));

            RenderedRow { id, cells }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Direction;
    use crate::api::PageEnvelope;
    use crate::model::Record;
    use crate::render::Column;
    use crate::render::SortIndicator;
    use crate::table::Pagination;

    fn snapshot(page: u32, per_page: u32) -> TableSnapshot {
        let rows: Vec<Record> = (1..=3)
            .map(|i| Record::new().set("id", i).set("name", format!("Role {}", i)))
            .collect();
        let mut pagination = Pagination::new(per_page);
        let from = u64::from((page - 1) * per_page) + 1;
        pagination.apply(&PageEnvelope::new(Vec::new(), page, per_page, 1000, from, from + 2));
        TableSnapshot {
            rows,
            pagination,
            ..Default::default()
        }
    }

    fn columns() -> Columns {
        Columns::new([Column::new("name", "Name"), Column::new("guard_name", "Guard").not_sortable()]).unwrap()
    }

    #[test]
    fn test_row_layout_and_numbers() {
        let rows = render_rows(&snapshot(3, 25), &columns(), &Resource::roles());
        assert_eq!(rows.len(), 3);

        let first = &rows[0];
        assert_eq!(first.cells.len(), 5);
        assert_eq!(first.cells[0], Cell::Checkbox(false));
        assert_eq!(first.cells[1], Cell::Number(51));
        assert_eq!(first.cells[2], Cell::text("Role 1"));
        let Cell::Actions(links) = &first.cells[4] else {
            panic!("last cell should hold the actions");
        };
        let labels: Vec<_> = links.iter().map(|l| l.label).collect();
        assert_eq!(labels, ["View", "Edit", "Delete"]);
        assert_eq!(links[1].href.as_deref(), Some("core/roles/1/edit"));
    }

    #[test]
    fn test_headers() {
        let mut snapshot = snapshot(1, 10);
        snapshot.sort.set("name", Direction::Desc);
        snapshot.selection.set(RecordId::Int(1), true);

        let headers = render_headers(&snapshot, &columns());
        let texts: Vec<_> = headers.iter().map(HeaderCell::text).collect();
        assert_eq!(texts, ["[-]", "No", "Name ▼", "Guard", "Action"]);
        assert!(matches!(
            headers[2],
            HeaderCell::Label { sort: Some(SortIndicator::Descending), .. }
        ));

        for id in 2..=3 {
            snapshot.selection.set(RecordId::Int(id), true);
        }
        let headers = render_headers(&snapshot, &columns());
        assert_eq!(headers[0], HeaderCell::SelectAll(CheckState::Checked));
    }

    #[test]
    fn test_body_state() {
        let mut snapshot = snapshot(1, 10);
        assert_eq!(body_state(&snapshot), BodyState::Rows);
        snapshot.loading = true;
        assert_eq!(body_state(&snapshot), BodyState::Loading);
        snapshot.loading = false;
        snapshot.rows.clear();
        assert_eq!(body_state(&snapshot), BodyState::Empty);
    }
}
