//! Compressed symmetric storage
//!
//! Keeps only the upper triangle of a square matrix. `(row, col)` and
//! `(col, row)` fold onto the same slot, so a write through either
//! ordering is visible through both.

use annomat_core::{
    format_number, parse_number, CellKind, CellStore, MatrixError, Result, StoreKind,
    SymmetricLayout,
};

/// Square numeric matrix storing `n * (n + 1) / 2` values
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricStore {
    layout: SymmetricLayout,
    values: Vec<f64>,
}

impl SymmetricStore {
    /// Create an `size x size` matrix with every cell null
    pub fn new(size: usize) -> Result<Self> {
        let layout = SymmetricLayout::new(size)?;
        let values = vec![f64::NAN; layout.len()];
        Ok(Self { layout, values })
    }

    /// Number of stored slots
    pub fn stored_len(&self) -> usize {
        self.values.len()
    }
}

impl CellStore for SymmetricStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Symmetric
    }

    fn rows(&self) -> usize {
        self.layout.size()
    }

    fn cols(&self) -> usize {
        self.layout.size()
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        if self.values[self.layout.index(row, col)].is_nan() {
            CellKind::Null
        } else {
            CellKind::Number
        }
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        let value = self.values[self.layout.index(row, col)];
        (!value.is_nan()).then_some(value)
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.number(row, col).map(format_number)
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        let index = self.layout.index(row, col);
        self.values[index] = value;
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        let parsed = parse_number(value).unwrap_or(f64::NAN);
        self.update_number(row, col, parsed);
    }

    fn to_null(&mut self, row: usize, col: usize) {
        self.update_number(row, col, f64::NAN);
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        if rows != cols {
            return Err(MatrixError::NotSquare {
                kind: StoreKind::Symmetric.name(),
                rows,
                cols,
            });
        }
        Self::new(rows)
    }

    fn transposed(&self) -> Result<Self> {
        Ok(self.clone())
    }
}
