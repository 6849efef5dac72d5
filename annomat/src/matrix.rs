//! Core matrix
//!
//! [`Matrix`] wraps one [`Store`] with bounds checks, growth handling and
//! change notification. Every mutation goes through an `update_*`
//! primitive; the matching `set_*` call wraps it and then notifies
//! listeners. Bulk operations use the `update_*` path per cell and notify
//! once at the end.
//!
//! A shape change (growth of a dynamic store, or [`Matrix::resize`]) always
//! fires [`ChangeEvent::Resized`], even from the `update_*` path, so
//! observers never hold a stale shape.

use std::cell::RefCell;
use std::rc::Rc;

use annomat_core::{check_cell, Cell, CellKind, CellStore, MatrixError, Result, StoreKind};
use tracing::{debug, trace};

use crate::notify::{ChangeEvent, ListenerId, Listeners};
use crate::store::Store;

/// Matrix shared between several annotated views
pub type SharedMatrix = Rc<RefCell<Matrix>>;

/// Grid of cells over a pluggable storage backend
#[derive(Debug)]
pub struct Matrix {
    store: Store,
    listeners: Listeners,
}

impl Clone for Matrix {
    /// Deep copy of the cells; listeners stay with the original
    fn clone(&self) -> Self {
        Self::from_store(self.store.clone())
    }
}

impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind()
            && self.rows() == other.rows()
            && self.cols() == other.cols()
            && (0..self.rows()).all(|row| self.row_cells(row).eq(other.row_cells(row)))
    }
}

impl Matrix {
    /// Create an empty matrix of the given storage kind
    pub fn new(kind: StoreKind, rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::from_store(Store::create(kind, rows, cols)?))
    }

    /// Create a `0 x 0` matrix that grows as cells are written
    pub fn dynamic() -> Self {
        Self::from_store(crate::store::DynamicStore::new())
    }

    /// Wrap an existing backend
    pub fn from_store(store: impl Into<Store>) -> Self {
        Self {
            store: store.into(),
            listeners: Listeners::new(),
        }
    }

    /// Build a `1 x n` numeric vector
    pub fn from_numbers(values: Vec<f64>) -> Result<Self> {
        let cols = values.len();
        Ok(Self::from_store(crate::store::DenseNumbers::from_vec(
            1, cols, values,
        )?))
    }

    /// Build a `1 x n` text vector
    pub fn from_texts<I, S>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        let mut store = crate::store::DenseText::new(1, values.len())?;
        for (col, value) in values.iter().enumerate() {
            store.update_text(0, col, value.as_ref());
        }
        Ok(Self::from_store(store))
    }

    /// Move the matrix behind a shared handle
    pub fn into_shared(self) -> SharedMatrix {
        Rc::new(RefCell::new(self))
    }

    /// Storage kind of the backend
    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.store.rows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.store.cols()
    }

    /// Borrow the backend
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Whether `(row, col)` is inside the current shape
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    /// Type tag of a cell, `None` out of range
    pub fn cell_kind(&self, row: usize, col: usize) -> Option<CellKind> {
        self.contains(row, col)
            .then(|| self.store.cell_kind(row, col))
    }

    /// Tagged value of a cell, `None` out of range
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.contains(row, col).then(|| self.store.cell(row, col))
    }

    /// Numeric value of a cell
    ///
    /// `None` for out-of-range coordinates, null cells and text that does
    /// not parse as a number.
    pub fn number(&self, row: usize, col: usize) -> Option<f64> {
        if self.contains(row, col) {
            self.store.number(row, col)
        } else {
            None
        }
    }

    /// Numeric value of a cell or `default`
    pub fn number_or(&self, row: usize, col: usize, default: f64) -> f64 {
        self.number(row, col).unwrap_or(default)
    }

    /// Text value of a cell, `None` out of range or for null cells
    pub fn text(&self, row: usize, col: usize) -> Option<String> {
        if self.contains(row, col) {
            self.store.text(row, col)
        } else {
            None
        }
    }

    /// Make `(row, col)` writable, growing the store if it can
    ///
    /// Fires [`ChangeEvent::Resized`] when the shape changed.
    fn prepare(&mut self, row: usize, col: usize) -> Result<()> {
        let (rows, cols) = (self.rows(), self.cols());
        if !self.store.make_room(row, col) {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        self.report_growth(rows, cols);
        Ok(())
    }

    fn report_growth(&mut self, rows: usize, cols: usize) {
        if (rows, cols) != (self.rows(), self.cols()) {
            let event = ChangeEvent::Resized {
                rows: self.rows(),
                cols: self.cols(),
            };
            self.listeners.notify(&event);
        }
    }

    /// Fire a [`ChangeEvent::Cells`] event
    ///
    /// Callers that batch `update_*` writes call this once at the end.
    pub fn notify_changed(&mut self) {
        let event = ChangeEvent::Cells {
            rows: self.rows(),
            cols: self.cols(),
        };
        self.listeners.notify(&event);
    }

    /// Store a number without notifying
    pub fn update_number(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.prepare(row, col)?;
        self.store.update_number(row, col, value);
        Ok(())
    }

    /// Store text verbatim where the backend allows it, without notifying
    pub fn update_text(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        self.prepare(row, col)?;
        self.store.update_text(row, col, value);
        Ok(())
    }

    /// Reset a cell to null without notifying
    pub fn update_null(&mut self, row: usize, col: usize) -> Result<()> {
        self.prepare(row, col)?;
        self.store.to_null(row, col);
        Ok(())
    }

    /// Generic write without notifying
    ///
    /// Text that parses as a number takes the numeric path.
    pub fn update_cell(&mut self, row: usize, col: usize, cell: &Cell) -> Result<()> {
        self.prepare(row, col)?;
        self.store.update_cell(row, col, cell);
        Ok(())
    }

    /// Typed write that keeps text as text, without notifying
    pub fn put_cell(&mut self, row: usize, col: usize, cell: &Cell) -> Result<()> {
        self.prepare(row, col)?;
        self.store.put_cell(row, col, cell);
        Ok(())
    }

    /// Store a number and notify
    pub fn set_number(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.update_number(row, col, value)?;
        self.notify_changed();
        Ok(())
    }

    /// Store text and notify
    pub fn set_text(&mut self, row: usize, col: usize, value: &str) -> Result<()> {
        self.update_text(row, col, value)?;
        self.notify_changed();
        Ok(())
    }

    /// Reset a cell to null and notify
    pub fn set_null(&mut self, row: usize, col: usize) -> Result<()> {
        self.update_null(row, col)?;
        self.notify_changed();
        Ok(())
    }

    /// Generic write and notify
    pub fn set_cell(&mut self, row: usize, col: usize, cell: &Cell) -> Result<()> {
        self.update_cell(row, col, cell)?;
        self.notify_changed();
        Ok(())
    }

    /// Copy row `src_row` of `from` into row `dst_row`
    ///
    /// Copies the shorter of the two row lengths; a dynamic store grows to
    /// fit the whole source row. Notifies once.
    pub fn copy_row(&mut self, from: &Matrix, src_row: usize, dst_row: usize) -> Result<()> {
        check_cell(src_row, 0, from.rows(), from.cols().max(1))?;
        self.prepare_line(dst_row, from.cols(), true)?;
        trace!(src_row, dst_row, from = %from.kind(), to = %self.kind(), "Copying row");
        self.store.copy_row_from(&from.store, src_row, dst_row);
        self.notify_changed();
        Ok(())
    }

    /// Copy column `src_col` of `from` into column `dst_col`
    pub fn copy_column(&mut self, from: &Matrix, src_col: usize, dst_col: usize) -> Result<()> {
        check_cell(0, src_col, from.rows().max(1), from.cols())?;
        self.prepare_line(dst_col, from.rows(), false)?;
        trace!(src_col, dst_col, from = %from.kind(), to = %self.kind(), "Copying column");
        self.store.copy_column_from(&from.store, src_col, dst_col);
        self.notify_changed();
        Ok(())
    }

    /// Write `cells` into row `row`, keeping each cell's type
    ///
    /// Writes the shorter of the two lengths (a dynamic store grows to fit
    /// every cell) and notifies once.
    pub fn put_row(&mut self, row: usize, cells: &[Cell]) -> Result<()> {
        self.prepare_line(row, cells.len(), true)?;
        for (col, cell) in cells.iter().enumerate().take(self.cols()) {
            self.store.put_cell(row, col, cell);
        }
        self.notify_changed();
        Ok(())
    }

    /// Write `cells` into column `col`, keeping each cell's type
    pub fn put_column(&mut self, col: usize, cells: &[Cell]) -> Result<()> {
        self.prepare_line(col, cells.len(), false)?;
        for (row, cell) in cells.iter().enumerate().take(self.rows()) {
            self.store.put_cell(row, col, cell);
        }
        self.notify_changed();
        Ok(())
    }

    /// Make row (or column) `line` writable for a source of length `width`
    fn prepare_line(&mut self, line: usize, width: usize, is_row: bool) -> Result<()> {
        let (rows, cols) = (self.rows(), self.cols());
        if width == 0 {
            // Nothing is written, so nothing grows
            let extent = if is_row { rows } else { cols };
            if line < extent || self.kind().is_growable() {
                return Ok(());
            }
            let (row, col) = if is_row { (line, 0) } else { (0, line) };
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        let far = width - 1;
        let (row, col) = if is_row { (line, far) } else { (far, line) };
        let fits = self.store.make_room(row, col);
        let extent = if is_row { self.rows() } else { self.cols() };
        if !fits && line >= extent {
            return Err(MatrixError::OutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        self.report_growth(rows, cols);
        Ok(())
    }

    /// Matrix with rows and columns swapped, of the same storage kind
    pub fn transpose(&self) -> Result<Matrix> {
        debug!(kind = %self.kind(), rows = self.rows(), cols = self.cols(), "Transposing matrix");
        Ok(Self::from_store(self.store.transposed()?))
    }

    /// Empty matrix of the same storage kind
    pub fn of_same_type(&self, rows: usize, cols: usize) -> Result<Matrix> {
        Ok(Self::from_store(self.store.of_same_type(rows, cols)?))
    }

    /// Change the shape, keeping the overlapping cells
    ///
    /// The store is rebuilt with the same kind (or dense numbers when a
    /// square-only kind is given a non-square shape). Fires
    /// [`ChangeEvent::Resized`] when the shape changed.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        let (old_rows, old_cols) = (self.rows(), self.cols());
        if (rows, cols) == (old_rows, old_cols) {
            return Ok(());
        }
        let mut store = self.store.of_same_type(rows, cols)?;
        for row in 0..old_rows.min(rows) {
            store.copy_row_from(&self.store, row, row);
        }
        self.store = store;
        self.report_growth(old_rows, old_cols);
        Ok(())
    }

    /// Cells of one row; empty when the row is out of range
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = Cell> + '_ {
        let cols = if row < self.rows() { self.cols() } else { 0 };
        (0..cols).map(move |col| self.store.cell(row, col))
    }

    /// Cells of one column; empty when the column is out of range
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        let rows = if col < self.cols() { self.rows() } else { 0 };
        (0..rows).map(move |row| self.store.cell(row, col))
    }

    /// Numeric values of one row, skipping null and non-numeric cells
    pub fn numbers_in_row(&self, row: usize) -> impl Iterator<Item = f64> + '_ {
        let cols = if row < self.rows() { self.cols() } else { 0 };
        (0..cols).filter_map(move |col| self.store.number(row, col))
    }

    /// Numeric values of one column, skipping null and non-numeric cells
    pub fn numbers_in_column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        let rows = if col < self.cols() { self.rows() } else { 0 };
        (0..rows).filter_map(move |row| self.store.number(row, col))
    }

    /// Replace every null cell with `value`; returns the number replaced
    pub fn fill_null(&mut self, value: &Cell) -> usize {
        let mut filled = 0;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.store.cell_kind(row, col) == CellKind::Null {
                    self.store.put_cell(row, col, value);
                    filled += 1;
                }
            }
        }
        if filled > 0 {
            self.notify_changed();
        }
        filled
    }

    /// Register a change callback
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Remove a change callback
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Number of registered callbacks
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
