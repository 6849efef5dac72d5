//! Readers for the annotated and plain tab-delimited layouts

use std::io::Read;

use annomat_core::format::{HeaderLine, TableHeader, HEADER_PREFIX};
use annomat_core::{parse_number, Cell, StoreKind};
use csv::StringRecord;
use tracing::debug;

use super::error::{TableError, TableResult};
use super::format::{MatrixBuilder, TextFormat};
use crate::matrix::Matrix;
use crate::view::AnnotatedMatrix;

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |position| position.line())
}

/// Cells of one annotation vector read from text
///
/// The vector at position 0 holds axis names and always stays text. Any
/// other vector is numeric only when every non-null token parses.
fn annotation_cells<S: AsRef<str>>(tokens: &[S], position: usize, null_token: &str) -> Vec<Cell> {
    let is_null = |token: &str| token.is_empty() || token == null_token;
    let numeric = position > 0
        && tokens
            .iter()
            .map(AsRef::as_ref)
            .all(|token| is_null(token) || parse_number(token).is_some());
    tokens
        .iter()
        .map(|token| match token.as_ref() {
            token if numeric => Cell::from_token(token, null_token),
            token if is_null(token) => Cell::Null,
            token => Cell::text(token),
        })
        .collect()
}

/// Read a table written by [`write_annotated`](super::write_annotated)
///
/// The header decides the storage kind and shape; `builder` supplies the
/// delimiter, the null token and the token conversion for inner cells.
pub fn read_annotated<R, B>(reader: R, builder: &mut B) -> TableResult<AnnotatedMatrix>
where
    R: Read,
    B: MatrixBuilder + ?Sized,
{
    let mut csv = TextFormat::csv_reader(builder.delimiter(), reader);
    let mut record = StringRecord::new();
    let mut header = TableHeader::default();
    let mut column_values: Vec<(String, Vec<Cell>)> = Vec::new();
    let mut found_matrix = false;
    let mut last_line = 0;

    while csv.read_record(&mut record)? {
        let line = line_of(&record);
        last_line = line;
        let fields: Vec<&str> = record.iter().collect();
        match header
            .parse_line(&fields)
            .map_err(|message| TableError::format(line, message))?
        {
            HeaderLine::Keyword => {}
            HeaderLine::MatrixMarker => {
                found_matrix = true;
                break;
            }
            HeaderLine::Other => {
                let Some((name, values)) = fields.split_first() else {
                    continue;
                };
                if name.starts_with(HEADER_PREFIX) {
                    return Err(TableError::format(line, format!("Unknown keyword `{name}`")));
                }
                let Some(expected) = header.column_annotations.get(column_values.len()) else {
                    return Err(TableError::format(
                        line,
                        format!("Unexpected line `{name}` before the matrix marker"),
                    ));
                };
                if name != expected {
                    return Err(TableError::format(
                        line,
                        format!("Expected column annotation `{expected}`, found `{name}`"),
                    ));
                }
                if values.len() != header.cols {
                    return Err(TableError::format(
                        line,
                        format!("Expected {} values, found {}", header.cols, values.len()),
                    ));
                }
                let cells = annotation_cells(values, column_values.len(), builder.null_token());
                column_values.push((name.to_string(), cells));
            }
        }
    }

    if !found_matrix {
        return Err(TableError::format(last_line + 1, "Missing #matrix marker"));
    }
    if column_values.len() != header.column_annotations.len() {
        return Err(TableError::format(
            last_line,
            format!(
                "Expected {} column annotation lines, found {}",
                header.column_annotations.len(),
                column_values.len()
            ),
        ));
    }

    let mut view = AnnotatedMatrix::new(header.storage, header.rows, header.cols)?;
    {
        let row_annotations = view.row_annotations_mut()?;
        for name in &header.row_annotations {
            row_annotations.add_empty(name, StoreKind::DenseMixed)?;
        }
    }
    {
        let column_annotations = view.column_annotations_mut()?;
        for (name, cells) in &column_values {
            let mut vector = Matrix::new(StoreKind::DenseMixed, 1, header.cols)?;
            for (col, cell) in cells.iter().enumerate() {
                vector.put_cell(0, col, cell)?;
            }
            column_annotations.set_annotation(name, vector)?;
        }
    }

    let annotations = header.row_annotations.len();
    let width = annotations + header.cols;
    let mut row_tokens: Vec<Vec<String>> = vec![Vec::with_capacity(header.rows); annotations];
    let mut row = 0;
    while csv.read_record(&mut record)? {
        let line = line_of(&record);
        last_line = line;
        if row >= header.rows {
            return Err(TableError::format(
                line,
                format!("More than the declared {} rows", header.rows),
            ));
        }
        if record.len() != width {
            return Err(TableError::format(
                line,
                format!("Expected {width} fields, found {}", record.len()),
            ));
        }

        for (tokens, token) in row_tokens.iter_mut().zip(record.iter()) {
            tokens.push(token.to_string());
        }
        for (col, token) in record.iter().skip(annotations).enumerate() {
            builder.set_cell_from_token(&mut view, row, col, token)?;
        }
        row += 1;
    }
    if row != header.rows {
        return Err(TableError::format(
            last_line + 1,
            format!("Expected {} rows, found {row}", header.rows),
        ));
    }

    let row_annotations = view.row_annotations_mut()?;
    for (position, tokens) in row_tokens.iter().enumerate() {
        let cells = annotation_cells(tokens, position, builder.null_token());
        for (index, cell) in cells.iter().enumerate() {
            row_annotations.update_at(position, index, cell)?;
        }
    }

    view.inner_mut().notify_changed();
    debug!(
        storage = %header.storage,
        rows = header.rows,
        cols = header.cols,
        row_annotations = annotations,
        column_annotations = column_values.len(),
        "Read annotated table"
    );
    Ok(view)
}

/// Read a plain table: a column-name line followed by data lines
///
/// When every data line carries one field more than the name line, the
/// leading field is taken as the row name.
pub fn read_plain<R, B>(reader: R, builder: &mut B) -> TableResult<AnnotatedMatrix>
where
    R: Read,
    B: MatrixBuilder + ?Sized,
{
    let mut csv = TextFormat::csv_reader(builder.delimiter(), reader);
    let mut lines: Vec<(u64, StringRecord)> = Vec::new();
    for record in csv.records() {
        let record = record?;
        lines.push((line_of(&record), record));
    }

    let Some(((header_line, names), data)) = lines.split_first() else {
        return Ok(builder.create_matrix(0, 0)?);
    };
    let cols = names.len();
    let width = data.first().map_or(cols, |(_, record)| record.len());
    let has_row_names = if width == cols {
        false
    } else if width == cols + 1 {
        true
    } else {
        return Err(TableError::format(
            *header_line,
            format!("Header has {cols} fields but data lines have {width}"),
        ));
    };
    if let Some((line, record)) = data.iter().find(|(_, record)| record.len() != width) {
        return Err(TableError::format(
            *line,
            format!("Expected {width} fields, found {}", record.len()),
        ));
    }

    let mut view = builder.create_matrix(data.len(), cols)?;
    let names: Vec<String> = names.iter().map(str::to_string).collect();
    builder.set_column_names(&mut view, &names)?;
    if has_row_names {
        view.set_row_names(data.iter().map(|(_, record)| record.get(0).unwrap_or_default()))?;
    }

    let skip = usize::from(has_row_names);
    for (row, (_, record)) in data.iter().enumerate() {
        for (col, token) in record.iter().skip(skip).enumerate() {
            builder.set_cell_from_token(&mut view, row, col, token)?;
        }
    }

    view.inner_mut().notify_changed();
    debug!(rows = data.len(), cols, has_row_names, "Read plain table");
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNOTATED: &str = "\
#annomat\t1
#storage\tmixed
#rows\t2
#cols\t3
#rowAnnotations\t2\tRow Names\tGroup
#columnAnnotations\t1\tColumn Names
Column Names\tA\tB\tC
#matrix
r1\tctl\t1\t2.5\tx
r2\tn/a\t4\tn/a\ty
";

    #[test]
    fn test_read_annotated() {
        let view = read_annotated(ANNOTATED.as_bytes(), &mut TextFormat::default()).unwrap();
        assert_eq!(view.kind(), StoreKind::DenseMixed);
        assert_eq!((view.rows(), view.cols()), (2, 3));
        assert_eq!(view.row_names(), vec!["r1", "r2"]);
        assert_eq!(view.column_names(), vec!["A", "B", "C"]);
        assert_eq!(view.get(0, -1), Some(Cell::text("ctl")));
        assert_eq!(view.get(1, -1), Some(Cell::Null));
        assert_eq!(view.number(0, 1), Some(2.5));
        assert_eq!(view.get(1, 1), Some(Cell::Null));
        assert_eq!(view.text(1, 2).as_deref(), Some("y"));
    }

    #[test]
    fn test_annotation_tokens_keep_names_as_text() {
        let text = ANNOTATED
            .replace("Column Names\tA\tB\tC", "Column Names\t1e3\tB\t007")
            .replace("r1\tctl", "007\t5")
            .replace("r2\tn/a", "1.50\t6");
        let view = read_annotated(text.as_bytes(), &mut TextFormat::default()).unwrap();
        assert_eq!(view.row_names(), vec!["007", "1.50"]);
        assert_eq!(view.column_names(), vec!["1e3", "B", "007"]);
        assert_eq!(view.get(0, -1), Some(Cell::Number(5.0)));

        let mixed = ANNOTATED.replace("r2\tn/a", "r2\t12");
        let view = read_annotated(mixed.as_bytes(), &mut TextFormat::default()).unwrap();
        assert_eq!(view.get(1, -1), Some(Cell::text("12")));
    }

    #[test]
    fn test_read_annotated_reports_line() {
        let broken = ANNOTATED.replace("r2\tn/a\t4\tn/a\ty", "r2\tn/a\t4");
        let err = read_annotated(broken.as_bytes(), &mut TextFormat::default()).unwrap_err();
        assert_eq!(err.line(), Some(10));

        let unknown = ANNOTATED.replace("#cols\t3", "#cols\t3\n#bogus\t1");
        let err = read_annotated(unknown.as_bytes(), &mut TextFormat::default()).unwrap_err();
        assert_eq!(err.line(), Some(5));
    }

    #[test]
    fn test_read_annotated_requires_marker_and_rows() {
        let no_marker = "#annomat\t1\n#rows\t0\n#cols\t0\n";
        let err = read_annotated(no_marker.as_bytes(), &mut TextFormat::default()).unwrap_err();
        assert!(matches!(err, TableError::Format { .. }));

        let short = ANNOTATED.replace("#rows\t2", "#rows\t3");
        let err = read_annotated(short.as_bytes(), &mut TextFormat::default()).unwrap_err();
        assert!(matches!(err, TableError::Format { .. }));
    }

    #[test]
    fn test_read_plain_with_row_names() {
        let text = "A\tB\nr1\t1\tfoo\nr2\tn/a\t3\n";
        let view = read_plain(text.as_bytes(), &mut TextFormat::default()).unwrap();
        assert_eq!((view.rows(), view.cols()), (2, 2));
        assert_eq!(view.row_names(), vec!["r1", "r2"]);
        assert_eq!(view.column_names(), vec!["A", "B"]);
        assert_eq!(view.text(0, 1).as_deref(), Some("foo"));
        assert_eq!(view.get(1, 0), Some(Cell::Null));
    }

    #[test]
    fn test_read_plain_without_row_names() {
        let text = "A\tB\n1\t2\n";
        let format = &mut TextFormat::default().with_store_kind(StoreKind::DenseNumbers);
        let view = read_plain(text.as_bytes(), format).unwrap();
        assert_eq!(view.kind(), StoreKind::DenseNumbers);
        assert!(view.row_names().is_empty());
        assert_eq!(view.number(0, 1), Some(2.0));
    }

    #[test]
    fn test_read_plain_rejects_ragged_lines() {
        let text = "A\tB\n1\t2\n1\t2\t3\n";
        let err = read_plain(text.as_bytes(), &mut TextFormat::default()).unwrap_err();
        assert_eq!(err.line(), Some(3));

        let text = "A\n1\t2\t3\n";
        let err = read_plain(text.as_bytes(), &mut TextFormat::default()).unwrap_err();
        assert_eq!(err.line(), Some(1));
    }
}
