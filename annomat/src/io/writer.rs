//! Writers for the annotated and plain tab-delimited layouts
//!
//! Fields are written unquoted, so text containing the delimiter or a line
//! break does not survive a round trip.

use std::io::Write;

use annomat_core::format::{keys, TableHeader};
use annomat_core::Cell;
use tracing::debug;

use super::error::TableResult;
use super::format::TextFormat;
use crate::view::AnnotatedMatrix;

impl TextFormat {
    fn token(&self, cell: Option<Cell>) -> String {
        cell.and_then(|cell| cell.to_text())
            .unwrap_or_else(|| self.null_token.clone())
    }
}

/// Write the full annotated layout: header, annotations and cells
pub fn write_annotated<W: Write>(
    view: &AnnotatedMatrix,
    writer: W,
    format: &TextFormat,
) -> TableResult<()> {
    let mut out = format.csv_writer(writer);
    let (rows, cols) = (view.rows(), view.cols());
    let row_annotations = view.row_annotations();
    let column_annotations = view.column_annotations();

    let mut header = TableHeader::new(view.kind(), rows, cols);
    header.row_annotations = row_annotations.names().to_vec();
    header.column_annotations = column_annotations.names().to_vec();
    for record in header.to_records() {
        out.write_record(&record)?;
    }

    for (name, vector) in column_annotations.iter() {
        let mut record = Vec::with_capacity(cols + 1);
        record.push(name.to_string());
        record.extend((0..cols).map(|col| format.token(vector.cell(0, col))));
        out.write_record(&record)?;
    }
    out.write_record([keys::MATRIX])?;

    let inner = view.inner();
    for row in 0..rows {
        let mut record: Vec<String> = row_annotations
            .iter()
            .map(|(_, vector)| format.token(vector.cell(0, row)))
            .collect();
        record.extend((0..cols).map(|col| format.token(inner.cell(row, col))));
        out.write_record(&record)?;
    }
    out.flush()?;

    debug!(
        storage = %view.kind(),
        rows,
        cols,
        row_annotations = row_annotations.len(),
        column_annotations = column_annotations.len(),
        "Wrote annotated table"
    );
    Ok(())
}

/// Write the plain layout: column names, then one line per row
///
/// Rows are prefixed with their row name when the view has row names.
/// Missing column names are replaced by 1-based column numbers.
pub fn write_plain<W: Write>(
    view: &AnnotatedMatrix,
    writer: W,
    format: &TextFormat,
) -> TableResult<()> {
    let mut out = format.csv_writer(writer);
    let (rows, cols) = (view.rows(), view.cols());

    let mut names = view.column_names();
    if names.len() != cols {
        names = (1..=cols).map(|col| col.to_string()).collect();
    }
    out.write_record(&names)?;

    let row_names = view.row_names();
    let has_row_names = row_names.len() == rows && !view.row_annotations().is_empty();
    let inner = view.inner();
    for row in 0..rows {
        let mut record = Vec::with_capacity(cols + 1);
        if has_row_names {
            record.push(row_names[row].clone());
        }
        record.extend((0..cols).map(|col| format.token(inner.cell(row, col))));
        out.write_record(&record)?;
    }
    out.flush()?;

    debug!(rows, cols, has_row_names, "Wrote plain table");
    Ok(())
}
