//! Export error types

/// Errors that can occur while exporting the selection.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing is selected, so nothing was exported.
    #[error("No data selected")]
    EmptySelection,

    /// CSV encoding failed.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// PDF rendering failed.
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// Workbook generation failed.
    #[error("Spreadsheet export failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    /// The clipboard could not be written.
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    /// Writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
