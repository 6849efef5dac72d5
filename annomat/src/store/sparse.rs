//! Sparse numeric storage
//!
//! Only cells whose value differs from the store's default are kept in a
//! hash map keyed by linear index. Writing the default removes the entry,
//! so the map never grows from zero-fills.

use annomat_core::{
    format_number, parse_number, CellKind, CellStore, Result, RowLayout, StoreKind,
};
use hashbrown::HashMap;

/// Hash-map backed numeric storage with a default for absent cells
#[derive(Debug, Clone, PartialEq)]
pub struct SparseNumbers {
    layout: RowLayout,
    default: f64,
    values: HashMap<usize, f64>,
}

/// Equality that treats two `NaN` sentinels as the same value
fn same_number(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl SparseNumbers {
    /// Create a matrix whose absent cells read as zero
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::with_default(rows, cols, 0.0)
    }

    /// Create a matrix whose absent cells read as `default`
    ///
    /// A `NaN` default makes absent cells null.
    pub fn with_default(rows: usize, cols: usize, default: f64) -> Result<Self> {
        Ok(Self {
            layout: RowLayout::new(rows, cols)?,
            default,
            values: HashMap::new(),
        })
    }

    /// Value reported for cells that were never written
    pub fn default_value(&self) -> f64 {
        self.default
    }

    /// Number of materialised cells
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    fn value(&self, row: usize, col: usize) -> f64 {
        self.values
            .get(&self.layout.index(row, col))
            .copied()
            .unwrap_or(self.default)
    }
}

impl CellStore for SparseNumbers {
    fn kind(&self) -> StoreKind {
        StoreKind::Sparse
    }

    fn rows(&self) -> usize {
        self.layout.rows()
    }

    fn cols(&self) -> usize {
        self.layout.cols()
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        if self.value(row, col).is_nan() {
            CellKind::Null
        } else {
            CellKind::Number
        }
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        let value = self.value(row, col);
        (!value.is_nan()).then_some(value)
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.number(row, col).map(format_number)
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        let index = self.layout.index(row, col);
        if same_number(value, self.default) {
            self.values.remove(&index);
        } else {
            self.values.insert(index, value);
        }
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        let parsed = parse_number(value).unwrap_or(f64::NAN);
        self.update_number(row, col, parsed);
    }

    fn to_null(&mut self, row: usize, col: usize) {
        self.update_number(row, col, f64::NAN);
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        Self::with_default(rows, cols, self.default)
    }

    fn transposed(&self) -> Result<Self> {
        let mut out = self.blank(self.cols(), self.rows())?;
        for (&index, &value) in &self.values {
            let (row, col) = self.layout.position(index);
            let target = out.layout.index(col, row);
            out.values.insert(target, value);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_writes_are_not_materialised() {
        let mut store = SparseNumbers::new(10, 10).unwrap();
        assert_eq!(store.number(3, 3), Some(0.0));

        store.update_number(3, 3, 2.5);
        store.update_number(4, 4, 0.0);
        assert_eq!(store.nnz(), 1);
        assert_eq!(store.number(3, 3), Some(2.5));

        store.update_number(3, 3, 0.0);
        assert_eq!(store.nnz(), 0);
    }

    #[test]
    fn test_null_is_materialised_against_zero_default() {
        let mut store = SparseNumbers::new(2, 2).unwrap();
        store.to_null(0, 1);
        assert_eq!(store.cell_kind(0, 1), CellKind::Null);
        assert_eq!(store.nnz(), 1);
    }

    #[test]
    fn test_nan_default() {
        let mut store = SparseNumbers::with_default(2, 2, f64::NAN).unwrap();
        assert_eq!(store.cell_kind(1, 1), CellKind::Null);
        store.update_number(1, 1, 7.0);
        store.to_null(1, 1);
        assert_eq!(store.nnz(), 0);
    }

    #[test]
    fn test_transpose_moves_entries() {
        let mut store = SparseNumbers::new(2, 5).unwrap();
        store.update_number(1, 4, 9.0);
        let t = store.transposed().unwrap();
        assert_eq!((t.rows(), t.cols()), (5, 2));
        assert_eq!(t.number(4, 1), Some(9.0));
        assert_eq!(t.nnz(), 1);
    }
}
