//! Plain-text table output.

use std::fmt::Write;

use rbac_lib::render::HeaderCell;
use rbac_lib::render::RenderedRow;
use unicode_width::UnicodeWidthStr;

/// Lays out headers and rows as aligned columns.
///
/// `empty` is printed under the header when there are no rows.
pub fn table(headers: &[HeaderCell], rows: &[RenderedRow], empty: &str) -> String {
    let header: Vec<String> = headers.iter().map(HeaderCell::text).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.cells.iter().map(|c| c.display()).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for row in &body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    if body.is_empty() {
        out.push_str(empty);
        out.push('\n');
    }
    for row in &body {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{}{}", cell, " ".repeat(width.saturating_sub(cell.width())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
