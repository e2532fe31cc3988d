//! Spreadsheet export.

use rust_xlsxwriter::ColNum;
use rust_xlsxwriter::Format;
use rust_xlsxwriter::Workbook;
use rust_xlsxwriter::Worksheet;
use rust_xlsxwriter::XlsxError;
use serde_json::Value;

use super::ExportRow;
use crate::error::ExportError;

/// Renders one worksheet named `sheet`.
///
/// The header holds every key in order of first appearance across rows;
/// each row's values land under their key, typed as number, boolean or
/// text. Nulls and missing keys leave the cell empty.
pub(super) fn render(rows: &[ExportRow], sheet: &str) -> Result<Vec<u8>, ExportError> {
    let mut header: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !header.contains(&key.as_str()) {
                header.push(key);
            }
        }
    }

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    let bold = Format::new().set_bold();
    for (col, key) in header.iter().enumerate() {
        worksheet.write_string_with_format(0, col as ColNum, *key, &bold)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        for (col, key) in header.iter().enumerate() {
            if let Some(value) = row.get(*key) {
                write_value(worksheet, r, col as ColNum, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_value(worksheet: &mut Worksheet, row: u32, col: ColNum, value: &Value) -> Result<(), XlsxError> {
    match value {
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        Value::Number(n) => match n.as_f64() {
            Some(f) => {
                worksheet.write_number(row, col, f)?;
            }
            None => {
                worksheet.write_string(row, col, n.to_string())?;
            }
        },
        Value::String(s) => {
            worksheet.write_string(row, col, s)?;
        }
        other => {
            worksheet.write_string(row, col, other.to_string())?;
        }
    }
    Ok(())
}
