//! Storage backends and enum dispatch over them
//!
//! Each backend implements [`CellStore`]. [`Store`] is the closed set of
//! backends a [`Matrix`](crate::Matrix) can hold; it forwards the contract
//! to the active variant and picks the contiguous slot copy when two
//! stores share a dense kind.

pub mod bits;
pub mod dense;
pub mod dynamic;
pub mod sparse;
pub mod symmetric;

pub use bits::BitStore;
pub use dense::{DenseMixed, DenseNumbers, DenseText};
pub use dynamic::DynamicStore;
pub use sparse::SparseNumbers;
pub use symmetric::SymmetricStore;

use annomat_core::{
    copy_column_slots, copy_row_slots, Cell, CellKind, CellStore, MatrixError, Result, StoreKind,
};
use tracing::{debug, warn};

/// Backend-erased storage
#[derive(Debug, Clone, PartialEq)]
pub enum Store {
    DenseNumbers(DenseNumbers),
    DenseText(DenseText),
    DenseMixed(DenseMixed),
    Sparse(SparseNumbers),
    Dynamic(DynamicStore),
    Bits(BitStore),
    Symmetric(SymmetricStore),
}

macro_rules! dispatch {
    ($store:expr, $inner:ident => $body:expr) => {
        match $store {
            Store::DenseNumbers($inner) => $body,
            Store::DenseText($inner) => $body,
            Store::DenseMixed($inner) => $body,
            Store::Sparse($inner) => $body,
            Store::Dynamic($inner) => $body,
            Store::Bits($inner) => $body,
            Store::Symmetric($inner) => $body,
        }
    };
}

macro_rules! rewrap {
    ($store:expr, $inner:ident => $body:expr) => {
        match $store {
            Store::DenseNumbers($inner) => Store::DenseNumbers($body),
            Store::DenseText($inner) => Store::DenseText($body),
            Store::DenseMixed($inner) => Store::DenseMixed($body),
            Store::Sparse($inner) => Store::Sparse($body),
            Store::Dynamic($inner) => Store::Dynamic($body),
            Store::Bits($inner) => Store::Bits($body),
            Store::Symmetric($inner) => Store::Symmetric($body),
        }
    };
}

macro_rules! impl_from_backend {
    ($($variant:ident($backend:ty)),* $(,)?) => {
        $(
            impl From<$backend> for Store {
                fn from(store: $backend) -> Self {
                    Store::$variant(store)
                }
            }
        )*
    };
}

impl_from_backend!(
    DenseNumbers(DenseNumbers),
    DenseText(DenseText),
    DenseMixed(DenseMixed),
    Sparse(SparseNumbers),
    Dynamic(DynamicStore),
    Bits(BitStore),
    Symmetric(SymmetricStore),
);

impl Store {
    /// Allocate an empty store of `kind`
    ///
    /// Symmetric storage requires `rows == cols`.
    pub fn create(kind: StoreKind, rows: usize, cols: usize) -> Result<Self> {
        debug!(%kind, rows, cols, "Creating store");
        let store = match kind {
            StoreKind::DenseNumbers => DenseNumbers::new(rows, cols)?.into(),
            StoreKind::DenseText => DenseText::new(rows, cols)?.into(),
            StoreKind::DenseMixed => DenseMixed::new(rows, cols)?.into(),
            StoreKind::Sparse => SparseNumbers::new(rows, cols)?.into(),
            StoreKind::Dynamic => DynamicStore::with_shape(rows, cols).into(),
            StoreKind::Bits => BitStore::new(rows, cols)?.into(),
            StoreKind::Symmetric => {
                if rows != cols {
                    return Err(MatrixError::NotSquare {
                        kind: kind.name(),
                        rows,
                        cols,
                    });
                }
                SymmetricStore::new(rows)?.into()
            }
        };
        Ok(store)
    }

    /// Allocate an empty store of the same kind, sized `rows x cols`
    ///
    /// A square-only kind asked for a non-square shape falls back to dense
    /// numeric storage.
    pub fn of_same_type(&self, rows: usize, cols: usize) -> Result<Self> {
        let kind = self.kind();
        if kind.is_square_only() && rows != cols {
            warn!(%kind, rows, cols, "Shape is not square, falling back to dense numbers");
            return Store::create(StoreKind::DenseNumbers, rows, cols);
        }
        self.blank(rows, cols)
    }

    /// Copy row `src_row` of `from` into row `dst_row`
    ///
    /// Copies the shorter of the two row lengths. Stores of the same dense
    /// kind move slots directly, anything else goes cell by cell.
    pub fn copy_row_from(&mut self, from: &Store, src_row: usize, dst_row: usize) {
        match (self, from) {
            (Store::DenseNumbers(to), Store::DenseNumbers(from)) => {
                copy_row_slots(from, src_row, to, dst_row)
            }
            (Store::DenseText(to), Store::DenseText(from)) => {
                copy_row_slots(from, src_row, to, dst_row)
            }
            (Store::DenseMixed(to), Store::DenseMixed(from)) => {
                copy_row_slots(from, src_row, to, dst_row)
            }
            (to, from) => copy_row_cells(from, src_row, to, dst_row),
        }
    }

    /// Copy column `src_col` of `from` into column `dst_col`
    pub fn copy_column_from(&mut self, from: &Store, src_col: usize, dst_col: usize) {
        match (self, from) {
            (Store::DenseNumbers(to), Store::DenseNumbers(from)) => {
                copy_column_slots(from, src_col, to, dst_col)
            }
            (Store::DenseText(to), Store::DenseText(from)) => {
                copy_column_slots(from, src_col, to, dst_col)
            }
            (Store::DenseMixed(to), Store::DenseMixed(from)) => {
                copy_column_slots(from, src_col, to, dst_col)
            }
            (to, from) => copy_column_cells(from, src_col, to, dst_col),
        }
    }
}

/// Copy a row cell by cell through the generic contract
///
/// Works between any two backends. Copies the shorter of the two row
/// lengths and keeps each cell's own type where the target allows it.
pub fn copy_row_cells<A, B>(from: &A, src_row: usize, to: &mut B, dst_row: usize)
where
    A: CellStore + ?Sized,
    B: CellStore + ?Sized,
{
    let n = from.cols().min(to.cols());
    for col in 0..n {
        let cell = from.cell(src_row, col);
        to.put_cell(dst_row, col, &cell);
    }
}

/// Copy a column cell by cell through the generic contract
pub fn copy_column_cells<A, B>(from: &A, src_col: usize, to: &mut B, dst_col: usize)
where
    A: CellStore + ?Sized,
    B: CellStore + ?Sized,
{
    let n = from.rows().min(to.rows());
    for row in 0..n {
        let cell = from.cell(row, src_col);
        to.put_cell(row, dst_col, &cell);
    }
}

impl CellStore for Store {
    fn kind(&self) -> StoreKind {
        dispatch!(self, s => s.kind())
    }

    fn rows(&self) -> usize {
        dispatch!(self, s => s.rows())
    }

    fn cols(&self) -> usize {
        dispatch!(self, s => s.cols())
    }

    fn cell_kind(&self, row: usize, col: usize) -> CellKind {
        dispatch!(self, s => s.cell_kind(row, col))
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        dispatch!(self, s => s.number(row, col))
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        dispatch!(self, s => s.text(row, col))
    }

    fn cell(&self, row: usize, col: usize) -> Cell {
        dispatch!(self, s => s.cell(row, col))
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        dispatch!(self, s => s.update_number(row, col, value))
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        dispatch!(self, s => s.update_text(row, col, value))
    }

    fn update_cell(&mut self, row: usize, col: usize, cell: &Cell) {
        dispatch!(self, s => s.update_cell(row, col, cell))
    }

    fn put_cell(&mut self, row: usize, col: usize, cell: &Cell) {
        dispatch!(self, s => s.put_cell(row, col, cell))
    }

    fn to_null(&mut self, row: usize, col: usize) {
        dispatch!(self, s => s.to_null(row, col))
    }

    fn make_room(&mut self, row: usize, col: usize) -> bool {
        dispatch!(self, s => s.make_room(row, col))
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        Ok(rewrap!(self, s => s.blank(rows, cols)?))
    }

    fn transposed(&self) -> Result<Self> {
        Ok(rewrap!(self, s => s.transposed()?))
    }
}
