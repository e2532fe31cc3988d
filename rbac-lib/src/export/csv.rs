//! CSV export.
//!
//! Header is the first row's keys; each line holds one row's values in that
//! row's own key order. Values are neither quoted nor escaped, so a value
//! containing a comma or newline shifts its line.

use ::csv::QuoteStyle;
use ::csv::Terminator;
use ::csv::WriterBuilder;

use super::ExportRow;
use crate::error::ExportError;
use crate::model::value_text;

pub(super) fn render(rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut builder = WriterBuilder::new();
    builder
        .quote_style(QuoteStyle::Never)
        .flexible(true)
        .terminator(Terminator::Any(b'\n'));

    let mut out = Vec::new();
    if let Some(first) = rows.first() {
        let header: Vec<&str> = first.keys().map(String::as_str).collect();
        write_line(&builder, &mut out, &header)?;
    }
    for row in rows {
        let values: Vec<String> = row.values().map(value_text).collect();
        write_line(&builder, &mut out, &values)?;
    }
    Ok(out)
}

/// The writer emits `""` for a record made of one empty field, whatever the
/// quote style, so such lines are written bare.
fn write_line<T: AsRef<[u8]>>(builder: &WriterBuilder, out: &mut Vec<u8>, fields: &[T]) -> Result<(), ExportError> {
    match fields {
        [] => out.push(b'\n'),
        [only] if only.as_ref().is_empty() => out.push(b'\n'),
        _ => {
            let mut writer = builder.from_writer(&mut *out);
            writer.write_record(fields)?;
            writer.flush()?;
        }
    }
    Ok(())
}
