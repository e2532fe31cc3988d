//! PDF export: a plain table on A4 pages.

use printpdf::BuiltinFont;
use printpdf::IndirectFontRef;
use printpdf::Mm;
use printpdf::PdfDocument;
use printpdf::PdfLayerReference;

use super::ExportRow;
use crate::error::ExportError;
use crate::model::value_text;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const ROW_HEIGHT: f32 = 7.0;
const FONT_SIZE: f32 = 9.0;
/// Approximate Helvetica glyph width per point of font size, in mm.
const GLYPH_WIDTH: f32 = 0.19;

/// Renders the rows as a table. The header is the first row's keys; each
/// body line holds one row's values.
pub(super) fn render(rows: &[ExportRow], title: &str) -> Result<Vec<u8>, ExportError> {
    let header: Vec<String> = rows
        .first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default();
    let columns = header.len().max(1);
    let column_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let max_chars = ((column_width - 1.5) / (FONT_SIZE * GLYPH_WIDTH)).floor().max(1.0) as usize;

    let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;

    let mut layer = doc.get_page(page).get_layer(layer);
    let top = PAGE_HEIGHT - MARGIN;
    write_line(&layer, &header, top, column_width, max_chars, &bold);
    let mut y = top - ROW_HEIGHT;

    for row in rows {
        if y < MARGIN {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            write_line(&layer, &header, top, column_width, max_chars, &bold);
            y = top - ROW_HEIGHT;
        }
        let values: Vec<String> = row.values().map(value_text).collect();
        write_line(&layer, &values, y, column_width, max_chars, &regular);
        y -= ROW_HEIGHT;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

fn write_line(
    layer: &PdfLayerReference,
    cells: &[String],
    y: f32,
    column_width: f32,
    max_chars: usize,
    font: &IndirectFontRef,
) {
    for (i, cell) in cells.iter().enumerate() {
        let x = MARGIN + i as f32 * column_width;
        layer.use_text(truncate(cell, max_chars), FONT_SIZE, Mm(x), Mm(y), font);
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

fn pdf_error(e: printpdf::Error) -> ExportError {
    ExportError::Pdf(format!("{:?}", e))
}
