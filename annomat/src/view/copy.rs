//! Row and column copies between annotated views
//!
//! Copying extended row `r` moves the inner row together with every row
//! annotation entry at `r`. A negative source or destination index names a
//! column annotation vector instead, so a copy can materialise an
//! annotation vector as an inner row (or store an inner row as an
//! annotation vector). Such cross-axis copies carry the axis label along:
//! the vector's name becomes the row name, and the row name becomes the
//! vector's name. Columns work the same way with the axes swapped.

use annomat_core::format::{COLUMN_NAMES, ROW_NAMES};
use annomat_core::{alt_index_modulo, validate_label, Cell, MatrixError, Result, StoreKind};
use tracing::trace;

use super::AnnotatedMatrix;
use crate::annotations::AnnotationSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Row,
    Column,
}

/// What a source line carries once read out of the source view
struct Line {
    /// Inner index when the line is an inner row/column
    inner: Option<usize>,
    /// Cell snapshot, taken when the line cannot be copied store to store
    cells: Option<Vec<Cell>>,
    /// Axis label of the line (row name, or annotation vector name)
    label: Option<String>,
    /// Entries of the annotations that travel with an inner line
    entries: Vec<(String, StoreKind, Cell)>,
}

impl AnnotatedMatrix {
    /// Copy extended row `src_row` of `from` into row `dst_row`
    ///
    /// Inner cells and row annotation entries are copied together; row
    /// annotations missing from `self` are registered. Negative indices
    /// address column annotation vectors.
    pub fn copy_row(&mut self, from: &AnnotatedMatrix, src_row: isize, dst_row: isize) -> Result<()> {
        self.copy_line(from, Axis::Row, src_row, dst_row)
    }

    /// Copy extended column `src_col` of `from` into column `dst_col`
    pub fn copy_column(
        &mut self,
        from: &AnnotatedMatrix,
        src_col: isize,
        dst_col: isize,
    ) -> Result<()> {
        self.copy_line(from, Axis::Column, src_col, dst_col)
    }

    /// Copy the rows `indices` of `from` into consecutive rows from `offset`
    pub fn copy_rows(&mut self, from: &AnnotatedMatrix, indices: &[isize], offset: isize) -> Result<()> {
        for (step, &src) in (0..).zip(indices) {
            self.copy_row(from, src, offset + step)?;
        }
        Ok(())
    }

    /// Copy the columns `indices` of `from` into consecutive columns from `offset`
    pub fn copy_columns(
        &mut self,
        from: &AnnotatedMatrix,
        indices: &[isize],
        offset: isize,
    ) -> Result<()> {
        for (step, &src) in (0..).zip(indices) {
            self.copy_column(from, src, offset + step)?;
        }
        Ok(())
    }

    /// Annotations indexed along `axis` (row annotations for rows)
    fn along(&self, axis: Axis) -> &AnnotationSet {
        match axis {
            Axis::Row => &self.row_annotations,
            Axis::Column => &self.column_annotations,
        }
    }

    fn along_mut(&mut self, axis: Axis) -> &mut AnnotationSet {
        match axis {
            Axis::Row => &mut self.row_annotations,
            Axis::Column => &mut self.column_annotations,
        }
    }

    /// Annotation vectors lying parallel to `axis` (column annotations for rows)
    fn across(&self, axis: Axis) -> &AnnotationSet {
        self.along(axis.flip())
    }

    fn across_mut(&mut self, axis: Axis) -> &mut AnnotationSet {
        self.along_mut(axis.flip())
    }

    fn line_count(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.rows(),
            Axis::Column => self.cols(),
        }
    }

    fn read_line(&self, axis: Axis, src: isize, snapshot: bool) -> Result<Line> {
        if src < 0 {
            let across = self.across(axis);
            let which = alt_index_modulo(src, across.len())
                .ok_or_else(|| MatrixError::UnknownAnnotation(format!("{} {src}", axis.across_label())))?;
            let cells = across
                .get_at(which)
                .map(|vector| vector.row_cells(0).collect())
                .unwrap_or_default();
            return Ok(Line {
                inner: None,
                cells: Some(cells),
                label: across.name_at(which).map(str::to_string),
                entries: Vec::new(),
            });
        }

        let index = src.unsigned_abs();
        if index >= self.line_count(axis) {
            let (row, col) = axis.orient(index, 0);
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        let cells = snapshot.then(|| {
            let inner = self.inner.borrow();
            match axis {
                Axis::Row => inner.row_cells(index).collect(),
                Axis::Column => inner.column_cells(index).collect(),
            }
        });
        let along = self.along(axis);
        let label = along
            .value_at(0, index)
            .and_then(|cell| cell.to_text());
        let entries = along
            .iter()
            .map(|(name, vector)| {
                let cell = vector.cell(0, index).unwrap_or_default();
                (name.to_string(), vector.kind(), cell)
            })
            .collect();
        Ok(Line {
            inner: Some(index),
            cells,
            label,
            entries,
        })
    }

    fn copy_line(&mut self, from: &AnnotatedMatrix, axis: Axis, src: isize, dst: isize) -> Result<()> {
        let aliased = self.shares_inner(from);
        let line = from.read_line(axis, src, aliased || dst < 0)?;
        trace!(?axis, src, dst, aliased, "Copying annotated line");
        self.sync()?;

        if dst < 0 {
            return self.store_as_vector(axis, dst, line);
        }
        let dst = dst.unsigned_abs();

        match (&line.cells, line.inner) {
            (Some(cells), _) => {
                let mut inner = self.inner.borrow_mut();
                match axis {
                    Axis::Row => inner.put_row(dst, cells)?,
                    Axis::Column => inner.put_column(dst, cells)?,
                }
            }
            (None, Some(src)) => {
                let source = from.inner.borrow();
                let mut inner = self.inner.borrow_mut();
                match axis {
                    Axis::Row => inner.copy_row(&source, src, dst)?,
                    Axis::Column => inner.copy_column(&source, src, dst)?,
                }
            }
            (None, None) => {}
        }
        self.sync()?;

        let along = self.along_mut(axis);
        if line.inner.is_some() {
            for (name, kind, cell) in &line.entries {
                let position = match along.position(name) {
                    Some(position) => position,
                    None => {
                        let kind = if kind.is_square_only() {
                            StoreKind::DenseMixed
                        } else {
                            *kind
                        };
                        along.add_empty(name, kind)?;
                        along.len() - 1
                    }
                };
                along.update_at(position, dst, cell)?;
            }
        } else if let Some(label) = &line.label {
            // An annotation vector became an inner line: its name labels it
            if along.is_empty() {
                along.add_empty(axis.names_label(), StoreKind::DenseText)?;
            }
            along.update_at(0, dst, &Cell::text(label.as_str()))?;
        }
        along.notify();
        Ok(())
    }

    fn store_as_vector(&mut self, axis: Axis, dst: isize, line: Line) -> Result<()> {
        let across = self.across_mut(axis);
        let which = alt_index_modulo(dst, across.len())
            .ok_or_else(|| MatrixError::UnknownAnnotation(format!("{} {dst}", axis.across_label())))?;
        let cells = line.cells.unwrap_or_default();
        for (index, cell) in cells.iter().enumerate().take(across.axis_len()) {
            across.update_at(which, index, cell)?;
        }
        if let (Some(label), Some(current)) = (&line.label, across.name_at(which)) {
            if label != current && validate_label(label).is_ok() && !across.contains(label) {
                let current = current.to_string();
                across.rename(&current, label)?;
            }
        }
        across.notify();
        Ok(())
    }
}

impl Axis {
    fn flip(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }

    /// `(row, col)` of position `pos` on line `line`
    fn orient(self, line: usize, pos: usize) -> (usize, usize) {
        match self {
            Axis::Row => (line, pos),
            Axis::Column => (pos, line),
        }
    }

    fn names_label(self) -> &'static str {
        match self {
            Axis::Row => ROW_NAMES,
            Axis::Column => COLUMN_NAMES,
        }
    }

    fn across_label(self) -> &'static str {
        match self {
            Axis::Row => "column annotation",
            Axis::Column => "row annotation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::InnerMode;

    fn source() -> AnnotatedMatrix {
        let mut view = AnnotatedMatrix::new(StoreKind::DenseMixed, 3, 2).unwrap();
        view.set_row_names(["a", "b", "c"]).unwrap();
        view.set_column_names(["X", "Y"]).unwrap();
        view.row_annotations_mut()
            .unwrap()
            .set_numbers("Group", [1.0, 2.0, 3.0])
            .unwrap();
        for row in 0..3 {
            for col in 0..2 {
                view.set(row, col, (row * 10 + col) as f64).unwrap();
            }
        }
        view
    }

    #[test]
    fn test_copy_row_carries_annotations() {
        let from = source();
        let mut to = from.of_same_type(2, 2).unwrap();
        to.set_column_names(["X", "Y"]).unwrap();

        to.copy_row(&from, 2, 0).unwrap();
        assert_eq!(to.number(0, 1), Some(21.0));
        assert_eq!(to.text(0, -2).as_deref(), Some("c"));
        assert_eq!(to.row_annotations().value("Group", 0), Some(Cell::Number(3.0)));
        assert_eq!(to.row_annotations().names(), from.row_annotations().names());
    }

    #[test]
    fn test_copy_rows_in_order_from_offset() {
        let from = source();
        let mut to = from.of_same_type(3, 2).unwrap();
        to.copy_rows(&from, &[2, 0], 1).unwrap();
        assert_eq!(to.row_names(), vec!["", "c", "a"]);
        assert_eq!(to.number(2, 0), Some(0.0));
    }

    #[test]
    fn test_copy_column_into_different_kind() {
        let from = source();
        let mut to = AnnotatedMatrix::new(StoreKind::DenseNumbers, 3, 1).unwrap();
        to.copy_column(&from, 1, 0).unwrap();
        assert_eq!(to.number(2, 0), Some(21.0));
        assert_eq!(to.column_names(), vec!["Y"]);
    }

    #[test]
    fn test_annotation_vector_becomes_inner_row() {
        let from = source();
        let mut to = AnnotatedMatrix::new(StoreKind::DenseMixed, 1, 2).unwrap();
        to.copy_row(&from, -1, 0).unwrap();
        assert_eq!(to.text(0, 0).as_deref(), Some("X"));
        assert_eq!(to.text(0, 1).as_deref(), Some("Y"));
        assert_eq!(to.row_names(), vec![COLUMN_NAMES]);
    }

    #[test]
    fn test_inner_column_becomes_annotation_vector() {
        let from = source();
        let mut to = AnnotatedMatrix::new(StoreKind::DenseMixed, 3, 1).unwrap();
        to.row_annotations_mut()
            .unwrap()
            .add_empty("Scratch", StoreKind::DenseMixed)
            .unwrap();
        to.copy_column(&from, 0, -1).unwrap();
        assert_eq!(to.row_annotations().names(), &["X".to_string()]);
        assert_eq!(to.number(1, -1), Some(10.0));
    }

    #[test]
    fn test_copy_between_aliased_views() {
        let from = source();
        let mut other = AnnotatedMatrix::with_inner(from.shared(), InnerMode::Alias);
        other.copy_row(&from, 0, 2).unwrap();
        assert_eq!(from.number(2, 1), Some(1.0));
    }

    #[test]
    fn test_copy_out_of_range_source() {
        let from = source();
        let mut to = from.of_same_type(3, 2).unwrap();
        assert!(matches!(
            to.copy_row(&from, 3, 0),
            Err(MatrixError::OutOfBounds { .. })
        ));
        let bare = AnnotatedMatrix::new(StoreKind::DenseMixed, 3, 2).unwrap();
        assert!(matches!(
            to.copy_column(&bare, -1, 0),
            Err(MatrixError::UnknownAnnotation(_))
        ));
    }
}
