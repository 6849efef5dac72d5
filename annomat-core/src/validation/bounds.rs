//! Coordinate and extent validation
//!
//! Pure arithmetic helpers shared by the storage backends and the
//! extended coordinate space.

use crate::{MatrixError, Result};

/// Fold a signed annotation offset onto an annotation position
///
/// Negative offsets count back from the most recently registered
/// annotation: with three annotations `-1` addresses position 2 and `-3`
/// addresses position 0. Offsets beyond `-size` keep wrapping. Returns
/// `None` when there is nothing to address.
pub const fn alt_index_modulo(index: isize, size: usize) -> Option<usize> {
    if size == 0 || size > isize::MAX as usize {
        return None;
    }
    Some(index.rem_euclid(size as isize) as usize)
}

/// Validate a cell coordinate against a fixed shape
pub fn check_cell(row: usize, col: usize, rows: usize, cols: usize) -> Result<()> {
    if row >= rows || col >= cols {
        return Err(MatrixError::OutOfBounds {
            row,
            col,
            rows,
            cols,
        });
    }
    Ok(())
}

/// Number of cells in a `rows` x `cols` matrix with overflow protection
pub fn checked_area(rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(area) => Ok(area),
        None => Err(MatrixError::SizeOverflow { rows, cols }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_index_modulo() {
        assert_eq!(alt_index_modulo(-1, 3), Some(2));
        assert_eq!(alt_index_modulo(-2, 3), Some(1));
        assert_eq!(alt_index_modulo(-3, 3), Some(0));
        assert_eq!(alt_index_modulo(-4, 3), Some(2));
        assert_eq!(alt_index_modulo(-1, 1), Some(0));
        assert_eq!(alt_index_modulo(-2, 2), Some(0));

        // Nothing to address
        assert_eq!(alt_index_modulo(-1, 0), None);
    }

    #[test]
    fn test_check_cell() {
        assert_eq!(check_cell(0, 0, 1, 1), Ok(()));
        assert_eq!(check_cell(2, 4, 3, 5), Ok(()));
        assert_eq!(
            check_cell(3, 0, 3, 5),
            Err(MatrixError::OutOfBounds {
                row: 3,
                col: 0,
                rows: 3,
                cols: 5
            })
        );
        assert!(check_cell(0, 0, 0, 0).is_err());
    }

    #[test]
    fn test_checked_area() {
        assert_eq!(checked_area(3, 4), Ok(12));
        assert_eq!(checked_area(0, 4), Ok(0));
        assert_eq!(
            checked_area(usize::MAX, 2),
            Err(MatrixError::SizeOverflow {
                rows: usize::MAX,
                cols: 2
            })
        );
    }
}
