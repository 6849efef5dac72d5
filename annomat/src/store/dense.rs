//! Dense storage backends
//!
//! Each dense backend keeps one flat row-major buffer of `rows * cols`
//! slots. They are the only backends with contiguous rows, so copies
//! between two matrices of the same dense kind move slots directly.

use annomat_core::{
    format_number, parse_number, Cell, CellKind, CellStore, ContiguousRows, MatrixError, Result,
    RowLayout, StoreKind,
};

/// Dense `f64` storage; `NaN` is the null sentinel
#[derive(Debug, Clone, PartialEq)]
pub struct DenseNumbers {
    layout: RowLayout,
    values: Vec<f64>,
}

impl DenseNumbers {
    /// Create a matrix with every cell null
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let layout = RowLayout::new(rows, cols)?;
        let values = vec![f64::NAN; layout.len()];
        Ok(Self { layout, values })
    }

    /// Wrap an existing row-major buffer
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self> {
        let layout = RowLayout::new(rows, cols)?;
        if values.len() != layout.len() {
            return Err(MatrixError::LengthMismatch {
                name: "values".to_string(),
                expected: layout.len(),
                actual: values.len(),
            });
        }
        Ok(Self { layout, values })
    }

    /// Row-major backing buffer
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

impl CellStore for DenseNumbers {
    fn kind(&self) -> StoreKind {
        StoreKind::DenseNumbers
    }

    fn rows(&self) -> usize {
        self.layout.rows()
    }

    fn cols(&self) -> usize {
        self.layout.cols()
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
        Self::new(rows, cols)
    }

    fn transposed(&self) -> Result<Self> {
        let (rows, cols) = (self.rows(), self.cols());
        let mut out = Self::new(cols, rows)?;
        for row in 0..rows {
            for (col, value) in self.values[self.layout.row_range(row)].iter().enumerate() {
                let index = out.layout.index(col, row);
                out.values[index] = *value;
            }
        }
        Ok(out)
    }
}

impl ContiguousRows for DenseNumbers {
    type Slot = f64;

    fn row_slice(&self, row: usize) -> &[f64] {
        &self.values[self.layout.row_range(row)]
    }

    fn row_slice_mut(&mut self, row: usize) -> &mut [f64] {
        let range = self.layout.row_range(row);
        &mut self.values[range]
    }
}

/// Dense text storage; an absent string is null
#[derive(Debug, Clone, PartialEq)]
pub struct DenseText {
    layout: RowLayout,
    values: Vec<Option<String>>,
}

impl DenseText {
    /// Create a matrix with every cell null
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let layout = RowLayout::new(rows, cols)?;
        let values = vec![None; layout.len()];
        Ok(Self { layout, values })
    }
}

impl CellStore for DenseText {
    fn kind(&self) -> StoreKind {
        StoreKind::DenseText
    }

    fn rows(&self) -> usize {
        self.layout.rows()
    }

    fn cols(&self) -> usize {
        self.layout.cols()
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        match self.values[self.layout.index(row, col)] {
            Some(_) => CellKind::Text,
            None => CellKind::Null,
        }
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.values[self.layout.index(row, col)]
            .as_deref()
            .and_then(parse_number)
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.values[self.layout.index(row, col)].clone()
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        let index = self.layout.index(row, col);
        self.values[index] = (!value.is_nan()).then(|| format_number(value));
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        let index = self.layout.index(row, col);
        self.values[index] = Some(value.to_string());
    }

    fn to_null(&mut self, row: usize, col: usize) {
        let index = self.layout.index(row, col);
        self.values[index] = None;
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols)
    }
}

impl ContiguousRows for DenseText {
    type Slot = Option<String>;

    fn row_slice(&self, row: usize) -> &[Option<String>] {
        &self.values[self.layout.row_range(row)]
    }

    fn row_slice_mut(&mut self, row: usize) -> &mut [Option<String>] {
        let range = self.layout.row_range(row);
        &mut self.values[range]
    }
}

/// Dense storage mixing numbers, text and nulls
///
/// Each slot is a tagged [`Cell`], so the type tag travels with the value.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMixed {
    layout: RowLayout,
    cells: Vec<Cell>,
}

impl DenseMixed {
    /// Create a matrix with every cell null
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let layout = RowLayout::new(rows, cols)?;
        let cells = vec![Cell::Null; layout.len()];
        Ok(Self { layout, cells })
    }
}

impl CellStore for DenseMixed {
    fn kind(&self) -> StoreKind {
        StoreKind::DenseMixed
    }

    fn rows(&self) -> usize {
        self.layout.rows()
    }

    fn cols(&self) -> usize {
        self.layout.cols()
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        self.cells[self.layout.index(row, col)].kind()
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        self.cells[self.layout.index(row, col)].as_number()
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.cells[self.layout.index(row, col)].to_text()
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[self.layout.index(row, col)].clone()
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        let index = self.layout.index(row, col);
        self.cells[index] = Cell::number(value);
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        let index = self.layout.index(row, col);
        self.cells[index] = Cell::Text(value.to_string());
    }

    fn to_null(&mut self, row: usize, col: usize) {
        let index = self.layout.index(row, col);
        self.cells[index] = Cell::Null;
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols)
    }
}

impl ContiguousRows for DenseMixed {
    type Slot = Cell;

    fn row_slice(&self, row: usize) -> &[Cell] {
        &self.cells[self.layout.row_range(row)]
    }

    fn row_slice_mut(&mut self, row: usize) -> &mut [Cell] {
        let range = self.layout.row_range(row);
        &mut self.cells[range]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annomat_core::{copy_column_slots, copy_row_slots};

    #[test]
    fn test_numbers_round_trip_and_null() {
        let mut store = DenseNumbers::new(2, 3).unwrap();
        assert_eq!(store.cell_kind(1, 2), CellKind::Null);

        store.update_number(1, 2, 3.25);
        assert_eq!(store.number(1, 2), Some(3.25));
        assert_eq!(store.text(1, 2).as_deref(), Some("3.25"));

        // Unparseable text becomes the null sentinel
        store.update_text(0, 0, "abc");
        assert_eq!(store.cell_kind(0, 0), CellKind::Null);
        store.update_text(0, 0, "12");
        assert_eq!(store.number(0, 0), Some(12.0));

        store.to_null(1, 2);
        assert_eq!(store.number(1, 2), None);
    }

    #[test]
    fn test_numbers_from_vec_checks_length() {
        assert!(DenseNumbers::from_vec(2, 2, vec![1.0; 4]).is_ok());
        assert!(matches!(
            DenseNumbers::from_vec(2, 2, vec![1.0; 3]),
            Err(MatrixError::LengthMismatch { expected: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_text_store_keeps_text_verbatim() {
        let mut store = DenseText::new(1, 2).unwrap();
        store.update_text(0, 0, "007");
        store.update_number(0, 1, 4.0);
        assert_eq!(store.text(0, 0).as_deref(), Some("007"));
        assert_eq!(store.number(0, 0), Some(7.0));
        assert_eq!(store.text(0, 1).as_deref(), Some("4"));
        assert_eq!(store.cell_kind(0, 1), CellKind::Text);
    }

    #[test]
    fn test_mixed_store_generic_dispatch() {
        let mut store = DenseMixed::new(2, 2).unwrap();
        store.update_cell(0, 0, &Cell::text("1.5"));
        store.update_cell(0, 1, &Cell::text("hello"));
        store.put_cell(1, 0, &Cell::text("2"));

        assert_eq!(store.cell(0, 0), Cell::Number(1.5));
        assert_eq!(store.cell(0, 1), Cell::text("hello"));
        // Typed writes keep text as text
        assert_eq!(store.cell_kind(1, 0), CellKind::Text);
        assert_eq!(store.cell(1, 1), Cell::Null);
    }

    #[test]
    fn test_transpose_numbers() {
        let store = DenseNumbers::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = store.transposed().unwrap();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.values(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_contiguous_copies_shorter_extent() {
        let from = DenseNumbers::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let mut to = DenseNumbers::new(3, 2).unwrap();

        copy_row_slots(&from, 1, &mut to, 0);
        assert_eq!(to.row_slice(0), &[4.0, 5.0]);

        copy_column_slots(&from, 2, &mut to, 1);
        assert_eq!(to.number(0, 1), Some(3.0));
        assert_eq!(to.number(1, 1), Some(6.0));
        assert_eq!(to.number(2, 1), None);
    }
}
