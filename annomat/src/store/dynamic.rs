//! Growable storage
//!
//! A two level map (row, then column) whose reported shape expands to cover
//! every written coordinate. This is the only backend whose dimensions
//! change after construction.

use annomat_core::{Cell, CellKind, CellStore, Result, StoreKind};
use hashbrown::HashMap;
use tracing::debug;

/// Auto-expanding storage holding tagged cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicStore {
    rows: usize,
    cols: usize,
    cells: HashMap<usize, HashMap<usize, Cell>>,
}

impl DynamicStore {
    /// Create an empty `0 x 0` matrix
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matrix that already reports `rows x cols`
    pub fn with_shape(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: HashMap::new(),
        }
    }

    /// Number of materialised cells
    pub fn nnz(&self) -> usize {
        self.cells.values().map(HashMap::len).sum()
    }

    fn slot(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(&row).and_then(|cols| cols.get(&col))
    }

    fn store(&mut self, row: usize, col: usize, cell: Cell) {
        if cell.is_null() {
            if let Some(cols) = self.cells.get_mut(&row) {
                cols.remove(&col);
                if cols.is_empty() {
                    self.cells.remove(&row);
                }
            }
        } else {
            self.cells.entry(row).or_default().insert(col, cell);
        }
    }
}

impl CellStore for DynamicStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Dynamic
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        self.slot(row, col).map_or(CellKind::Null, Cell::kind)
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.slot(row, col).and_then(Cell::as_number)
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.slot(row, col).and_then(Cell::to_text)
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.slot(row, col).cloned().unwrap_or_default()
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        self.store(row, col, Cell::number(value));
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        self.store(row, col, Cell::text(value));
    }

    fn to_null(&mut self, row: usize, col: usize) {
        self.store(row, col, Cell::Null);
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::with_shape(rows, cols))
    }

    fn make_room(&mut self, row: usize, col: usize) -> bool {
        let rows = self.rows.max(row + 1);
        let cols = self.cols.max(col + 1);
        if (rows, cols) != (self.rows, self.cols) {
            debug!(
                from_rows = self.rows,
                from_cols = self.cols,
                rows,
                cols,
                "Growing dynamic store"
            );
            self.rows = rows;
            self.cols = cols;
        }
        true
    }

    fn transposed(&self) -> Result<Self> {
        let mut out = Self::with_shape(self.cols, self.rows);
        for (&row, cols) in &self.cells {
            for (&col, cell) in cols {
                out.store(col, row, cell.clone());
            }
        }
        Ok(out)
    }
}
