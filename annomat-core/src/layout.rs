//! Linear index layouts
//!
//! Storage backends address cells through a single linear offset. Dense,
//! sparse and bit-packed backends use [`RowLayout`]; the compressed
//! symmetric backend uses [`SymmetricLayout`], which folds `(row, col)` and
//! `(col, row)` onto the same offset.

use alloc::vec::Vec;
use core::ops::Range;

use crate::validation::checked_area;
use crate::{MatrixError, Result};

/// Row-major layout with per-row offsets computed once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLayout {
    rows: usize,
    cols: usize,
    row_offsets: Vec<usize>,
}

impl RowLayout {
    /// Create a layout for a `rows` x `cols` matrix
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        checked_area(rows, cols)?;
        let row_offsets = (0..rows).map(|row| row * cols).collect();
        Ok(Self {
            rows,
            cols,
            row_offsets,
        })
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Whether the layout holds no cells
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear offset of an in-range cell: `row * cols + col`
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        self.row_offsets[row] + col
    }

    /// Linear offsets spanned by one row
    #[inline]
    pub fn row_range(&self, row: usize) -> Range<usize> {
        let start = self.row_offsets[row];
        start..start + self.cols
    }

    /// Coordinate of a linear offset
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Whether the coordinate lies inside the layout
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Upper-triangle layout of a square symmetric matrix
///
/// Only cells with `col >= row` are stored. Row `i` of the triangle starts
/// after `n + (n - 1) + ... + (n - i + 1) = i * (2n - i + 1) / 2` cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymmetricLayout {
    size: usize,
}

impl SymmetricLayout {
    /// Create a layout for a `size` x `size` matrix
    pub fn new(size: usize) -> Result<Self> {
        let side = size.checked_add(1).ok_or(MatrixError::SizeOverflow {
            rows: size,
            cols: size,
        })?;
        checked_area(size, side)?;
        Ok(Self { size })
    }

    /// Side length of the square matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of stored cells: `n * (n + 1) / 2`
    pub fn len(&self) -> usize {
        self.size * (self.size + 1) / 2
    }

    /// Whether the layout holds no cells
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Folded linear offset; `index(r, c) == index(c, r)`
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        let (i, j) = if row <= col { (row, col) } else { (col, row) };
        i * (2 * self.size - i + 1) / 2 + (j - i)
    }

    /// Whether the coordinate lies inside the layout
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_row_layout() {
        let layout = RowLayout::new(3, 4).unwrap();
        assert_eq!(layout.index(0, 0), 0);
        assert_eq!(layout.index(1, 0), 4);
        assert_eq!(layout.index(2, 3), 11);
        assert_eq!(layout.row_range(1), 4..8);
        assert_eq!(layout.position(7), (1, 3));
        assert!(layout.contains(2, 3));
        assert!(!layout.contains(3, 0));
    }

    #[test]
    fn test_symmetric_layout_folds() {
        let layout = SymmetricLayout::new(42).unwrap();
        assert_eq!(layout.len(), 42 * 43 / 2);
        for row in 0..42 {
            for col in 0..42 {
                assert_eq!(layout.index(row, col), layout.index(col, row));
                assert!(layout.index(row, col) < layout.len());
            }
        }
    }

    #[test]
    fn test_symmetric_layout_rejects_overflow() {
        assert_eq!(
            SymmetricLayout::new(usize::MAX),
            Err(MatrixError::SizeOverflow {
                rows: usize::MAX,
                cols: usize::MAX
            })
        );
        assert!(SymmetricLayout::new(usize::MAX / 2).is_err());
    }

    #[test]
    fn test_symmetric_layout_is_dense() {
        // Every stored offset is used exactly once by the upper triangle
        let layout = SymmetricLayout::new(5).unwrap();
        let mut seen = vec![false; layout.len()];
        for row in 0..5 {
            for col in row..5 {
                let index = layout.index(row, col);
                assert!(!seen[index]);
                seen[index] = true;
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }
}
