//! Annotated view over a matrix
//!
//! [`AnnotatedMatrix`] composes one inner [`Matrix`] with two
//! [`AnnotationSet`]s and exposes all three through the signed extended
//! coordinate space described in [`coord`]:
//!
//! - row annotations have one entry per inner row and appear as extra
//!   columns at negative column indices;
//! - column annotations have one entry per inner column and appear as
//!   extra rows at negative row indices.
//!
//! The view subscribes to the inner matrix and to both annotation sets and
//! keeps a cache of the extended shape, updated eagerly by those
//! callbacks. When the inner matrix grows the annotation vectors are padded
//! with nulls on the next write through the view; until then reads inside
//! the grown axis report null.

pub mod coord;
mod copy;
mod extract;
mod search;

pub use coord::Coord;
pub use search::{Hit, SearchOptions};

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use annomat_core::format::{COLUMN_NAMES, ROW_NAMES};
use annomat_core::{parse_number, Cell, CellKind, MatrixError, Result, StoreKind};
use tracing::debug;

use crate::annotations::AnnotationSet;
use crate::matrix::{Matrix, SharedMatrix};
use crate::notify::{ChangeEvent, ListenerId};

/// How a view takes hold of an existing inner matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerMode {
    /// Deep-copy the matrix; the view owns its cells
    Copy,
    /// Share the matrix; views over it observe each other's writes
    Alias,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Extents {
    inner_rows: usize,
    inner_cols: usize,
    row_annotations: usize,
    column_annotations: usize,
    /// Inner shape changed since the annotation axes were last resized
    stale: bool,
}

/// Matrix with named row and column annotations
pub struct AnnotatedMatrix {
    inner: SharedMatrix,
    row_annotations: AnnotationSet,
    column_annotations: AnnotationSet,
    extents: Rc<RefCell<Extents>>,
    inner_listener: ListenerId,
}

impl AnnotatedMatrix {
    /// Create an empty view over a new matrix of `kind`
    pub fn new(kind: StoreKind, rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_matrix(Matrix::new(kind, rows, cols)?))
    }

    /// Create an empty view over a `0 x 0` growable matrix
    pub fn dynamic() -> Self {
        Self::from_matrix(Matrix::dynamic())
    }

    /// Take ownership of a matrix
    pub fn from_matrix(matrix: Matrix) -> Self {
        Self::with_inner(&matrix.into_shared(), InnerMode::Alias)
    }

    /// View an existing shared matrix, copying or aliasing it
    pub fn with_inner(inner: &SharedMatrix, mode: InnerMode) -> Self {
        let inner = match mode {
            InnerMode::Copy => inner.borrow().clone().into_shared(),
            InnerMode::Alias => Rc::clone(inner),
        };
        let (rows, cols) = {
            let matrix = inner.borrow();
            (matrix.rows(), matrix.cols())
        };
        Self::assemble(inner, AnnotationSet::new(rows), AnnotationSet::new(cols))
    }

    /// Fresh view, without annotations, over this view's inner matrix
    pub fn annotate(&self) -> Self {
        Self::with_inner(&self.inner, InnerMode::Alias)
    }

    /// Wire the change subscriptions and build the extent cache
    pub(crate) fn assemble(
        inner: SharedMatrix,
        mut row_annotations: AnnotationSet,
        mut column_annotations: AnnotationSet,
    ) -> Self {
        let (inner_rows, inner_cols) = {
            let matrix = inner.borrow();
            (matrix.rows(), matrix.cols())
        };
        let extents = Rc::new(RefCell::new(Extents {
            inner_rows,
            inner_cols,
            row_annotations: row_annotations.len(),
            column_annotations: column_annotations.len(),
            stale: row_annotations.axis_len() != inner_rows
                || column_annotations.axis_len() != inner_cols,
        }));

        let inner_listener = {
            let extents = Rc::clone(&extents);
            inner.borrow_mut().subscribe(move |event| match *event {
                ChangeEvent::Cells { rows, cols } | ChangeEvent::Resized { rows, cols } => {
                    let mut extents = extents.borrow_mut();
                    if (extents.inner_rows, extents.inner_cols) != (rows, cols) {
                        extents.inner_rows = rows;
                        extents.inner_cols = cols;
                        extents.stale = true;
                    }
                }
                ChangeEvent::Annotations { .. } => {}
            })
        };
        {
            let extents = Rc::clone(&extents);
            row_annotations.subscribe(move |event| {
                if let ChangeEvent::Annotations { count } = *event {
                    extents.borrow_mut().row_annotations = count;
                }
            });
        }
        {
            let extents = Rc::clone(&extents);
            column_annotations.subscribe(move |event| {
                if let ChangeEvent::Annotations { count } = *event {
                    extents.borrow_mut().column_annotations = count;
                }
            });
        }

        Self {
            inner,
            row_annotations,
            column_annotations,
            extents,
            inner_listener,
        }
    }

    /// Pad or truncate the annotation axes after the inner shape changed
    fn sync(&mut self) -> Result<()> {
        let extents = *self.extents.borrow();
        if extents.stale {
            self.row_annotations.resize(extents.inner_rows)?;
            self.column_annotations.resize(extents.inner_cols)?;
            self.extents.borrow_mut().stale = false;
        }
        Ok(())
    }

    /// Storage kind of the inner matrix
    pub fn kind(&self) -> StoreKind {
        self.inner.borrow().kind()
    }

    /// Inner row count
    pub fn rows(&self) -> usize {
        self.extents.borrow().inner_rows
    }

    /// Inner column count
    pub fn cols(&self) -> usize {
        self.extents.borrow().inner_cols
    }

    /// Inner rows plus one row per column annotation
    pub fn ext_rows(&self) -> usize {
        let extents = self.extents.borrow();
        extents.inner_rows + extents.column_annotations
    }

    /// Inner columns plus one column per row annotation
    pub fn ext_cols(&self) -> usize {
        let extents = self.extents.borrow();
        extents.inner_cols + extents.row_annotations
    }

    /// Borrow the inner matrix
    pub fn inner(&self) -> Ref<'_, Matrix> {
        self.inner.borrow()
    }

    /// Mutably borrow the inner matrix
    ///
    /// Writes made through the borrow still reach every view's extent
    /// cache through the matrix's notifications.
    pub fn inner_mut(&self) -> RefMut<'_, Matrix> {
        self.inner.borrow_mut()
    }

    /// Shared handle to the inner matrix
    pub fn shared(&self) -> &SharedMatrix {
        &self.inner
    }

    /// Whether `other` views the same inner matrix
    pub fn shares_inner(&self, other: &AnnotatedMatrix) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Row annotations (one entry per inner row)
    pub fn row_annotations(&self) -> &AnnotationSet {
        &self.row_annotations
    }

    /// Column annotations (one entry per inner column)
    pub fn column_annotations(&self) -> &AnnotationSet {
        &self.column_annotations
    }

    /// Row annotations for mutation, resized to the current inner shape
    pub fn row_annotations_mut(&mut self) -> Result<&mut AnnotationSet> {
        self.sync()?;
        Ok(&mut self.row_annotations)
    }

    /// Column annotations for mutation, resized to the current inner shape
    pub fn column_annotations_mut(&mut self) -> Result<&mut AnnotationSet> {
        self.sync()?;
        Ok(&mut self.column_annotations)
    }

    /// Text of the first registered row annotation, empty if there is none
    pub fn row_names(&self) -> Vec<String> {
        axis_names(&self.row_annotations, self.rows())
    }

    /// Text of the first registered column annotation, empty if there is none
    pub fn column_names(&self) -> Vec<String> {
        axis_names(&self.column_annotations, self.cols())
    }

    /// Replace the row names, registering "Row Names" first if needed
    pub fn set_row_names<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sync()?;
        set_axis_names(&mut self.row_annotations, ROW_NAMES, names)
    }

    /// Replace the column names, registering "Column Names" first if needed
    pub fn set_column_names<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.sync()?;
        set_axis_names(&mut self.column_annotations, COLUMN_NAMES, names)
    }

    /// Resolve a signed coordinate against the current annotation counts
    pub fn resolve(&self, row: isize, col: isize) -> Option<Coord> {
        let extents = self.extents.borrow();
        Coord::resolve(
            row,
            col,
            extents.row_annotations,
            extents.column_annotations,
        )
    }

    /// Tagged value at an extended coordinate
    ///
    /// The corner (`row < 0 && col < 0`) yields the name of the addressed
    /// row annotation as text. `None` for anything out of range.
    pub fn get(&self, row: isize, col: isize) -> Option<Cell> {
        match self.resolve(row, col)? {
            Coord::Inner { row, col } => self.inner.borrow().cell(row, col),
            Coord::RowAnnotation { row, which } => (row < self.rows())
                .then(|| self.row_annotations.value_at(which, row).unwrap_or_default()),
            Coord::ColumnAnnotation { col, which } => (col < self.cols())
                .then(|| self.column_annotations.value_at(which, col).unwrap_or_default()),
            Coord::Corner { which } => self.row_annotations.name_at(which).map(Cell::text),
        }
    }

    /// Numeric value at an extended coordinate; the corner has none
    pub fn number(&self, row: isize, col: isize) -> Option<f64> {
        match self.resolve(row, col)? {
            Coord::Corner { .. } => None,
            _ => self.get(row, col)?.as_number(),
        }
    }

    /// Text value at an extended coordinate
    pub fn text(&self, row: isize, col: isize) -> Option<String> {
        self.get(row, col)?.to_text()
    }

    /// Type tag at an extended coordinate
    pub fn cell_kind(&self, row: isize, col: isize) -> Option<CellKind> {
        self.get(row, col).map(|cell| cell.kind())
    }

    /// Generic write and notify
    ///
    /// Text that parses as a number is stored as a number. Corner writes
    /// are accepted and ignored.
    pub fn set(&mut self, row: isize, col: isize, value: impl Into<Cell>) -> Result<()> {
        self.write(row, col, generic(value.into()), true)
    }

    /// Store a number and notify
    pub fn set_number(&mut self, row: isize, col: isize, value: f64) -> Result<()> {
        self.write(row, col, Cell::number(value), true)
    }

    /// Store text verbatim and notify
    pub fn set_text(&mut self, row: isize, col: isize, value: &str) -> Result<()> {
        self.write(row, col, Cell::text(value), true)
    }

    /// Generic write without notifying
    pub fn update(&mut self, row: isize, col: isize, value: impl Into<Cell>) -> Result<()> {
        self.write(row, col, generic(value.into()), false)
    }

    /// Store a number without notifying
    pub fn update_number(&mut self, row: isize, col: isize, value: f64) -> Result<()> {
        self.write(row, col, Cell::number(value), false)
    }

    /// Store text verbatim without notifying
    pub fn update_text(&mut self, row: isize, col: isize, value: &str) -> Result<()> {
        self.write(row, col, Cell::text(value), false)
    }

    fn write(&mut self, row: isize, col: isize, cell: Cell, notify: bool) -> Result<()> {
        self.sync()?;
        let coord = self
            .resolve(row, col)
            .ok_or_else(|| unaddressable(row, col))?;
        match coord {
            Coord::Inner { row, col } => {
                let mut inner = self.inner.borrow_mut();
                inner.put_cell(row, col, &cell)?;
                if notify {
                    inner.notify_changed();
                }
            }
            Coord::RowAnnotation { row, which } => {
                if notify {
                    self.row_annotations.set_at(which, row, &cell)?;
                } else {
                    self.row_annotations.update_at(which, row, &cell)?;
                }
            }
            Coord::ColumnAnnotation { col, which } => {
                if notify {
                    self.column_annotations.set_at(which, col, &cell)?;
                } else {
                    self.column_annotations.update_at(which, col, &cell)?;
                }
            }
            Coord::Corner { .. } => {}
        }
        self.sync()
    }

    /// Empty view whose inner matrix has the same storage kind
    ///
    /// Square-only kinds asked for a non-square shape fall back to dense
    /// numbers.
    pub fn of_same_type(&self, rows: usize, cols: usize) -> Result<AnnotatedMatrix> {
        let matrix = self.inner.borrow().of_same_type(rows, cols)?;
        Ok(Self::from_matrix(matrix))
    }

    /// New view with the inner matrix transposed
    ///
    /// The whole row annotation set becomes the column annotation set of
    /// the result and vice versa.
    pub fn transpose(&self) -> Result<AnnotatedMatrix> {
        let inner = self.inner.borrow().transpose()?;
        debug!(
            rows = inner.rows(),
            cols = inner.cols(),
            row_annotations = self.column_annotations.len(),
            column_annotations = self.row_annotations.len(),
            "Transposed annotated matrix"
        );
        Ok(Self::assemble(
            inner.into_shared(),
            self.column_annotations.clone(),
            self.row_annotations.clone(),
        ))
    }
}

/// Generic dispatch: text that parses as a number becomes a number
fn generic(cell: Cell) -> Cell {
    match cell {
        Cell::Text(text) => match parse_number(&text) {
            Some(value) => Cell::Number(value),
            None => Cell::Text(text),
        },
        other => other,
    }
}

fn unaddressable(row: isize, col: isize) -> MatrixError {
    MatrixError::UnknownAnnotation(format!("no annotation at ({row}, {col})"))
}

/// First annotation as text, sized to the current inner axis
fn axis_names(set: &AnnotationSet, axis_len: usize) -> Vec<String> {
    let mut names = set.texts_at(0).unwrap_or_default();
    if !set.is_empty() {
        names.resize(axis_len, String::new());
    }
    names
}

fn set_axis_names<I, S>(set: &mut AnnotationSet, default_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let name = set
        .name_at(0)
        .map_or_else(|| default_name.to_string(), str::to_string);
    set.set_texts(&name, names)
}

impl Drop for AnnotatedMatrix {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.inner.try_borrow_mut() {
            inner.unsubscribe(self.inner_listener);
        }
    }
}

impl Clone for AnnotatedMatrix {
    /// Deep copy: the clone owns a copy of the inner matrix
    fn clone(&self) -> Self {
        Self::assemble(
            self.inner.borrow().clone().into_shared(),
            self.row_annotations.clone(),
            self.column_annotations.clone(),
        )
    }
}

impl PartialEq for AnnotatedMatrix {
    fn eq(&self, other: &Self) -> bool {
        *self.inner.borrow() == *other.inner.borrow()
            && self.row_annotations == other.row_annotations
            && self.column_annotations == other.column_annotations
    }
}

impl fmt::Debug for AnnotatedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnnotatedMatrix")
            .field("kind", &self.kind())
            .field("rows", &self.rows())
            .field("cols", &self.cols())
            .field("row_annotations", &self.row_annotations.names())
            .field("column_annotations", &self.column_annotations.names())
            .finish()
    }
}
