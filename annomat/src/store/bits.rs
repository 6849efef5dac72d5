//! Bit-packed boolean storage
//!
//! One bit per cell, packed most significant bit first into bytes. Only 0
//! and 1 are representable; writes truncate toward zero and any non-zero
//! integer part stores 1. Null writes store 0.

use annomat_core::{format_number, parse_number, CellKind, CellStore, Result, RowLayout, StoreKind};

/// Packed boolean matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStore {
    layout: RowLayout,
    bits: Vec<u8>,
}

impl BitStore {
    /// Create a matrix with every bit cleared
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        let layout = RowLayout::new(rows, cols)?;
        let bits = vec![0; layout.len().div_ceil(8)];
        Ok(Self { layout, bits })
    }

    /// Read a bit by linear index
    pub fn bit(&self, index: usize) -> bool {
        let byte_index = index / 8;
        let bit_offset = 7 - index % 8;
        (self.bits[byte_index] >> bit_offset) & 1 == 1
    }

    /// Write a bit by linear index
    pub fn set_bit(&mut self, index: usize, on: bool) {
        let byte_index = index / 8;
        let mask = 1u8 << (7 - index % 8);
        if on {
            self.bits[byte_index] |= mask;
        } else {
            self.bits[byte_index] &= !mask;
        }
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.iter().map(|byte| byte.count_ones() as usize).sum()
    }

    /// Packed backing bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}

fn truncates_to_one(value: f64) -> bool {
    !value.is_nan() && value.trunc() != 0.0
}

impl CellStore for BitStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Bits
    }

    fn rows(&self) -> usize {
        self.layout.rows()
    }

    fn cols(&self) -> usize {
        self.layout.cols()
    }

    fn cell_kind(&self, _row: usize, _col: usize) -> CellKind {
        CellKind::Number
    }

    fn number(&self, row: usize, col: usize) -> Option<f64> {
        let on = self.bit(self.layout.index(row, col));
        Some(if on { 1.0 } else { 0.0 })
    }

    fn text(&self, row: usize, col: usize) -> Option<String> {
        self.number(row, col).map(format_number)
    }

    fn update_number(&mut self, row: usize, col: usize, value: f64) {
        let index = self.layout.index(row, col);
        self.set_bit(index, truncates_to_one(value));
    }

    fn update_text(&mut self, row: usize, col: usize, value: &str) {
        let parsed = parse_number(value).unwrap_or(f64::NAN);
        self.update_number(row, col, parsed);
    }

    fn to_null(&mut self, row: usize, col: usize) {
        let index = self.layout.index(row, col);
        self.set_bit(index, false);
    }

    fn blank(&self, rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols)
    }
}
