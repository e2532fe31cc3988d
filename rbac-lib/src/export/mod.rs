//! Export of the selected rows.
//!
//! The selection is projected through an [`ExportFormatter`] into flat
//! [`ExportRow`]s, which one handler per [`ExportTarget`] turns into output
//! for an [`ExportSink`].

mod csv;
mod pdf;
mod sink;
mod xlsx;

use std::fmt;
use std::str::FromStr;

use log::debug;
use log::warn;
use serde_json::Map;
use serde_json::Value;

pub use sink::*;

use crate::error::ExportError;
use crate::model::Record;
use crate::table::DataTable;
use crate::table::Notice;

/// One exported row: an ordered flat mapping of column label to value.
pub type ExportRow = Map<String, Value>;

/// Where an export goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    /// Pretty-printed JSON on the clipboard.
    Copy,
    Pdf,
    Spreadsheet,
    Csv,
}

impl ExportTarget {
    pub const ALL: [Self; 4] = [Self::Copy, Self::Pdf, Self::Spreadsheet, Self::Csv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Copy => "copy",
            Self::Pdf => "pdf",
            Self::Spreadsheet => "excel",
            Self::Csv => "csv",
        }
    }

    /// File extension of the written file, `None` for the clipboard.
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Copy => None,
            Self::Pdf => Some("pdf"),
            Self::Spreadsheet => Some("xlsx"),
            Self::Csv => Some("csv"),
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "copy" => Ok(Self::Copy),
            "pdf" => Ok(Self::Pdf),
            "excel" | "xlsx" | "spreadsheet" => Ok(Self::Spreadsheet),
            "csv" => Ok(Self::Csv),
            _ => Err(format!("unknown export target '{}'", s)),
        }
    }
}

/// Projects selected records into export rows.
///
/// Implemented for closures, so a formatter can be written inline:
///
/// ```
/// use rbac_lib::export::{ExportFormatter, ExportRow};
/// use rbac_lib::model::Record;
///
/// let names = |records: &[Record]| -> Vec<ExportRow> {
///     records
///         .iter()
///         .map(|r| {
///             let mut row = ExportRow::new();
///             row.insert("Name".into(), r.text("name").into());
///             row
///         })
///         .collect()
/// };
/// let rows = names.format(&[Record::new().set("name", "Ayu")]);
/// assert_eq!(rows[0]["Name"], "Ayu");
/// ```
pub trait ExportFormatter: Send + Sync {
    fn format(&self, records: &[Record]) -> Vec<ExportRow>;
}

impl<F> ExportFormatter for F
where
    F: Fn(&[Record]) -> Vec<ExportRow> + Send + Sync,
{
    fn format(&self, records: &[Record]) -> Vec<ExportRow> {
        self(records)
    }
}

/// Passes record fields through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFormatter;

impl ExportFormatter for IdentityFormatter {
    fn format(&self, records: &[Record]) -> Vec<ExportRow> {
        records.iter().map(|r| r.fields().clone()).collect()
    }
}

/// A generated export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Exports `records` to `target`.
///
/// `entity` names the output: files are written as `<entity>.<ext>` and the
/// spreadsheet's worksheet is named after it.
pub fn export(
    records: &[Record],
    target: ExportTarget,
    formatter: &dyn ExportFormatter,
    entity: &str,
    sink: &mut dyn ExportSink,
) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let rows = formatter.format(records);
    if rows.is_empty() {
        return Err(ExportError::EmptySelection);
    }
    debug!("exporting {} rows of {} as {}", rows.len(), entity, target);

    match target {
        ExportTarget::Copy => sink.copy_to_clipboard(to_clipboard_text(&rows)?),
        ExportTarget::Pdf => sink.download(ExportFile {
            name: format!("{}.pdf", entity),
            mime: "application/pdf",
            bytes: pdf::render(&rows, entity)?,
        }),
        ExportTarget::Spreadsheet => sink.download(ExportFile {
            name: format!("{}.xlsx", entity),
            mime: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            bytes: xlsx::render(&rows, &sheet_name(entity))?,
        }),
        ExportTarget::Csv => sink.download(ExportFile {
            name: format!("{}.csv", entity),
            mime: "text/csv",
            bytes: csv::render(&rows)?,
        }),
    }
}

/// JSON array of the rows, 2-space indented.
pub fn to_clipboard_text(rows: &[ExportRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// `users` → `Users`.
fn sheet_name(entity: &str) -> String {
    let mut chars = entity.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Sheet1".to_string(),
    }
}

impl DataTable {
    /// Exports the current selection, in row order.
    ///
    /// Outcomes are also reported as notices: an empty selection pushes
    /// "No data selected", a clipboard copy "Data copied". Table state is
    /// never modified.
    pub fn export(
        &self,
        target: ExportTarget,
        formatter: &dyn ExportFormatter,
        entity: &str,
        sink: &mut dyn ExportSink,
    ) -> Result<(), ExportError> {
        let selected = self.selected_records();
        match export(&selected, target, formatter, entity, sink) {
            Ok(()) => {
                if target == ExportTarget::Copy {
                    self.push_notice(Notice::success("Data copied"));
                }
                Ok(())
            }
            Err(e) => {
                warn!("{} export failed: {}", target, e);
                self.push_notice(Notice::error(e.to_string()));
                Err(e)
            }
        }
    }
}
