//! Storage backend contract
//!
//! This module defines the interface every cell storage strategy
//! implements. Coordinates passed to a store are always in range; bounds
//! checks and growth decisions happen one layer up, in the matrix.

use alloc::string::String;

use crate::cell::{Cell, CellKind};
use crate::validation::parse_number;
use crate::{Result, StoreKind};

/// Cell storage strategy for a two dimensional grid
///
/// Reads coerce between numbers and text: numbers are formatted when read
/// as text and text is parsed when read as a number. Writes come in three
/// flavours: the typed `update_number` and `update_text` paths and the
/// generic [`update_cell`](CellStore::update_cell) dispatch.
pub trait CellStore {
    /// Tag of the concrete representation
    fn kind(&self) -> StoreKind;

    /// Number of rows
    fn rows(&self) -> usize;

    /// Number of columns
    fn cols(&self) -> usize;

    /// Type tag of a cell
    fn cell_kind(&self, row: usize, col: usize) -> CellKind;

    /// Numeric value of a cell, `None` for null or non-numeric text
    fn number(&self, row: usize, col: usize) -> Option<f64>;

    /// Text value of a cell, `None` for null
    fn text(&self, row: usize, col: usize) -> Option<String>;

    /// Store a number; `NaN` stores the null sentinel
    fn update_number(&mut self, row: usize, col: usize, value: f64);

    /// Store a text value verbatim where the representation allows it
    fn update_text(&mut self, row: usize, col: usize, value: &str);

    /// Reset a cell to the null sentinel
    fn to_null(&mut self, row: usize, col: usize);

    /// Allocate an empty store of the same kind
    fn blank(&self, rows: usize, cols: usize) -> Result<Self>
    where
        Self: Sized;

    /// Tagged value of a cell
    fn cell(&self, row: usize, col: usize) -> Cell {
        match self.cell_kind(row, col) {
            CellKind::Null => Cell::Null,
            CellKind::Number => self.number(row, col).map_or(Cell::Null, Cell::Number),
            CellKind::Text => self.text(row, col).map_or(Cell::Null, Cell::Text),
        }
    }

    /// Generic write
    ///
    /// Numbers take the numeric path, text that parses as a number also
    /// takes the numeric path, any other text takes the text path.
    fn update_cell(&mut self, row: usize, col: usize, cell: &Cell) {
        match cell {
            Cell::Null => self.to_null(row, col),
            Cell::Number(value) => self.update_number(row, col, *value),
            Cell::Text(text) => match parse_number(text) {
                Some(value) => self.update_number(row, col, value),
                None => self.update_text(row, col, text),
            },
        }
    }

    /// Typed write that keeps the cell's own type
    ///
    /// Used by copies, where text such as `"007"` must stay text.
    fn put_cell(&mut self, row: usize, col: usize, cell: &Cell) {
        match cell {
            Cell::Null => self.to_null(row, col),
            Cell::Number(value) => self.update_number(row, col, *value),
            Cell::Text(text) => self.update_text(row, col, text),
        }
    }

    /// Prepare the store for a write at `(row, col)`
    ///
    /// Fixed-shape stores report whether the coordinate is in range;
    /// growable stores extend their reported shape and return `true`.
    fn make_room(&mut self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols()
    }

    /// Copy with rows and columns swapped
    ///
    /// The default allocates a blank store of the same kind and copies every
    /// cell through the generic contract.
    fn transposed(&self) -> Result<Self>
    where
        Self: Sized,
    {
        let mut out = self.blank(self.cols(), self.rows())?;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let cell = self.cell(row, col);
                if !cell.is_null() {
                    out.put_cell(col, row, &cell);
                }
            }
        }
        Ok(out)
    }
}

/// Capability of stores that keep each row in one contiguous slice
///
/// Only the dense backends implement this. Copies between two stores of
/// the same dense kind move slots directly instead of dispatching through
/// [`CellStore`] for every cell.
pub trait ContiguousRows: CellStore {
    /// Raw element type of the backing buffer
    type Slot: Clone;

    /// Slots of one row
    fn row_slice(&self, row: usize) -> &[Self::Slot];

    /// Mutable slots of one row
    fn row_slice_mut(&mut self, row: usize) -> &mut [Self::Slot];

    /// One slot
    fn slot(&self, row: usize, col: usize) -> &Self::Slot {
        &self.row_slice(row)[col]
    }

    /// One mutable slot
    fn slot_mut(&mut self, row: usize, col: usize) -> &mut Self::Slot {
        &mut self.row_slice_mut(row)[col]
    }
}

/// Copy a row between two stores of the same dense kind
///
/// Copies the shorter of the two row lengths.
pub fn copy_row_slots<S: ContiguousRows>(from: &S, src_row: usize, to: &mut S, dst_row: usize) {
    let source = from.row_slice(src_row);
    let target = to.row_slice_mut(dst_row);
    let n = source.len().min(target.len());
    target[..n].clone_from_slice(&source[..n]);
}

/// Copy a column between two stores of the same dense kind
///
/// Copies the shorter of the two column lengths.
pub fn copy_column_slots<S: ContiguousRows>(from: &S, src_col: usize, to: &mut S, dst_col: usize) {
    let n = from.rows().min(to.rows());
    for row in 0..n {
        *to.slot_mut(row, dst_col) = from.slot(row, src_col).clone();
    }
}
