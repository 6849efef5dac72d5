//! Extended coordinate resolution
//!
//! Signed `(row, col)` pairs address the whole annotated table:
//!
//! | row | col | target |
//! |-----|-----|--------|
//! | >= 0 | >= 0 | inner matrix cell |
//! | < 0 | >= 0 | column annotation `alt_index_modulo(row)`, entry `col` |
//! | >= 0 | < 0 | row annotation `alt_index_modulo(col)`, entry `row` |
//! | < 0 | < 0 | corner: name of row annotation `alt_index_modulo(col)` |

use annomat_core::alt_index_modulo;

/// A resolved extended coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coord {
    /// Cell of the inner matrix
    Inner { row: usize, col: usize },
    /// Entry `row` of the row annotation at position `which`
    RowAnnotation { row: usize, which: usize },
    /// Entry `col` of the column annotation at position `which`
    ColumnAnnotation { col: usize, which: usize },
    /// Name slot of the row annotation at position `which`
    Corner { which: usize },
}

impl Coord {
    /// Resolve a signed coordinate against the current annotation counts
    ///
    /// Returns `None` when a negative component has no annotation to
    /// address. Inner coordinates are not bounds checked here.
    pub fn resolve(
        row: isize,
        col: isize,
        row_annotations: usize,
        column_annotations: usize,
    ) -> Option<Coord> {
        match (row < 0, col < 0) {
            (false, false) => Some(Coord::Inner {
                row: row.unsigned_abs(),
                col: col.unsigned_abs(),
            }),
            (true, false) => Some(Coord::ColumnAnnotation {
                col: col.unsigned_abs(),
                which: alt_index_modulo(row, column_annotations)?,
            }),
            (false, true) => Some(Coord::RowAnnotation {
                row: row.unsigned_abs(),
                which: alt_index_modulo(col, row_annotations)?,
            }),
            (true, true) => Some(Coord::Corner {
                which: alt_index_modulo(col, row_annotations)?,
            }),
        }
    }

    /// Whether the coordinate addresses the inner matrix
    pub fn is_inner(&self) -> bool {
        matches!(self, Coord::Inner { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_table() {
        // Two row annotations, one column annotation
        assert_eq!(
            Coord::resolve(0, 0, 2, 1),
            Some(Coord::Inner { row: 0, col: 0 })
        );
        assert_eq!(
            Coord::resolve(-1, 3, 2, 1),
            Some(Coord::ColumnAnnotation { col: 3, which: 0 })
        );
        assert_eq!(
            Coord::resolve(2, -2, 2, 1),
            Some(Coord::RowAnnotation { row: 2, which: 0 })
        );
        assert_eq!(
            Coord::resolve(2, -1, 2, 1),
            Some(Coord::RowAnnotation { row: 2, which: 1 })
        );
        assert_eq!(Coord::resolve(-1, -1, 2, 1), Some(Coord::Corner { which: 1 }));
    }

    #[test]
    fn test_unaddressable_annotation() {
        assert_eq!(Coord::resolve(-1, 0, 2, 0), None);
        assert_eq!(Coord::resolve(0, -1, 0, 1), None);
        assert_eq!(Coord::resolve(-1, -1, 0, 1), None);
    }
}
