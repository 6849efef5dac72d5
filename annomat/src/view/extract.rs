//! Numeric and text sub-block extraction
//!
//! A column belongs to the block when its first non-null cell has the
//! block's type; a column with no values counts as numeric only in a
//! numeric store. The first selected column then decides which rows
//! belong. Numbers accept null cells as missing values, text accepts only
//! text.

use annomat_core::{CellKind, Result, StoreKind};
use tracing::debug;

use super::AnnotatedMatrix;
use crate::matrix::Matrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Numbers,
    Text,
}

impl Block {
    fn accepts(self, kind: CellKind) -> bool {
        match self {
            Block::Numbers => matches!(kind, CellKind::Number | CellKind::Null),
            Block::Text => kind == CellKind::Text,
        }
    }

    fn store_kind(self) -> StoreKind {
        match self {
            Block::Numbers => StoreKind::DenseNumbers,
            Block::Text => StoreKind::DenseText,
        }
    }
}

impl AnnotatedMatrix {
    /// Numeric sub-block with its sliced annotations
    ///
    /// Returns `None` when no row or column qualifies.
    pub fn extract_numbers(&self) -> Result<Option<AnnotatedMatrix>> {
        self.extract(Block::Numbers)
    }

    /// Text sub-block with its sliced annotations
    ///
    /// Returns `None` when no row or column qualifies.
    pub fn extract_text(&self) -> Result<Option<AnnotatedMatrix>> {
        self.extract(Block::Text)
    }

    fn extract(&self, block: Block) -> Result<Option<AnnotatedMatrix>> {
        let inner = self.inner.borrow();
        let matches = |row: usize, col: usize| {
            inner
                .cell_kind(row, col)
                .is_some_and(|kind| block.accepts(kind))
        };

        let numeric_store = inner.kind().is_numeric() && inner.rows() > 0;
        let column_kind = |col: usize| {
            (0..inner.rows())
                .filter_map(|row| inner.cell_kind(row, col))
                .find(|&kind| kind != CellKind::Null)
                .or_else(|| numeric_store.then_some(CellKind::Number))
        };
        let cols: Vec<usize> = (0..inner.cols())
            .filter(|&col| column_kind(col).is_some_and(|kind| block.accepts(kind)))
            .collect();
        let Some(&first) = cols.first() else {
            return Ok(None);
        };
        let rows: Vec<usize> = (0..inner.rows()).filter(|&row| matches(row, first)).collect();
        if rows.is_empty() {
            return Ok(None);
        }

        let mut matrix = Matrix::new(block.store_kind(), rows.len(), cols.len())?;
        for (target_row, &row) in rows.iter().enumerate() {
            for (target_col, &col) in cols.iter().enumerate() {
                match block {
                    Block::Numbers => {
                        if let Some(value) = inner.number(row, col) {
                            matrix.update_number(target_row, target_col, value)?;
                        }
                    }
                    Block::Text => {
                        if let Some(text) = inner.text(row, col) {
                            matrix.update_text(target_row, target_col, &text)?;
                        }
                    }
                }
            }
        }

        let row_annotations = self.row_annotations.select(&rows)?;
        let column_annotations = self.column_annotations.select(&cols)?;
        debug!(
            ?block,
            rows = rows.len(),
            cols = cols.len(),
            from_rows = inner.rows(),
            from_cols = inner.cols(),
            "Extracted sub-block"
        );
        Ok(Some(AnnotatedMatrix::assemble(
            matrix.into_shared(),
            row_annotations,
            column_annotations,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annomat_core::Cell;

    fn mixed() -> AnnotatedMatrix {
        // id   label  score  weight
        // 1    "x"    0.5    n/a
        // 2    "y"    1.5    3
        let mut view = AnnotatedMatrix::new(StoreKind::DenseMixed, 2, 4).unwrap();
        view.set_column_names(["id", "label", "score", "weight"]).unwrap();
        view.set_row_names(["r1", "r2"]).unwrap();
        let rows: [[Cell; 4]; 2] = [
            [1.0.into(), "x".into(), 0.5.into(), Cell::Null],
            [2.0.into(), "y".into(), 1.5.into(), 3.0.into()],
        ];
        for (row, cells) in (0..).zip(rows) {
            for (col, cell) in (0..).zip(cells) {
                view.set(row, col, cell).unwrap();
            }
        }
        view
    }

    #[test]
    fn test_extract_numbers() {
        let view = mixed();
        let numbers = view.extract_numbers().unwrap().unwrap();
        assert_eq!(numbers.kind(), StoreKind::DenseNumbers);
        assert_eq!((numbers.rows(), numbers.cols()), (2, 3));
        assert_eq!(numbers.column_names(), vec!["id", "score", "weight"]);
        assert_eq!(numbers.row_names(), vec!["r1", "r2"]);
        assert_eq!(numbers.number(1, 2), Some(3.0));
        assert_eq!(numbers.get(0, 2), Some(Cell::Null));
    }

    #[test]
    fn test_extract_text() {
        let view = mixed();
        let text = view.extract_text().unwrap().unwrap();
        assert_eq!(text.kind(), StoreKind::DenseText);
        assert_eq!(text.column_names(), vec!["label"]);
        assert_eq!(text.text(1, 0).as_deref(), Some("y"));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let numbers = mixed().extract_numbers().unwrap().unwrap();
        let again = numbers.extract_numbers().unwrap().unwrap();
        assert_eq!(again, numbers);
    }

    #[test]
    fn test_null_headed_text_column_is_text() {
        let mut view = AnnotatedMatrix::new(StoreKind::DenseMixed, 3, 2).unwrap();
        view.set_column_names(["value", "note"]).unwrap();
        for row in 0..3 {
            view.set(row, 0, row as f64).unwrap();
        }
        view.set(1, 1, "bad").unwrap();
        view.set(2, 1, "ok").unwrap();

        let numbers = view.extract_numbers().unwrap().unwrap();
        assert_eq!(numbers.column_names(), vec!["value"]);
        assert_eq!(numbers.rows(), 3);

        let text = view.extract_text().unwrap().unwrap();
        assert_eq!(text.column_names(), vec!["note"]);
        assert_eq!(text.row_names(), Vec::<String>::new());
        assert_eq!(text.text(0, 0).as_deref(), Some("bad"));
        assert_eq!(text.rows(), 2);
    }

    #[test]
    fn test_empty_numeric_column_stays_numeric() {
        let mut view = AnnotatedMatrix::new(StoreKind::DenseNumbers, 2, 2).unwrap();
        view.set(0, 0, 1.0).unwrap();
        let numbers = view.extract_numbers().unwrap().unwrap();
        assert_eq!(numbers.cols(), 2);
    }

    #[test]
    fn test_no_matching_block_is_none() {
        let numbers = mixed().extract_numbers().unwrap().unwrap();
        assert!(numbers.extract_text().unwrap().is_none());

        let empty = AnnotatedMatrix::new(StoreKind::DenseMixed, 0, 3).unwrap();
        assert!(empty.extract_numbers().unwrap().is_none());
    }
}
