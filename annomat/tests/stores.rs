//! Tests for the storage backends through the matrix contract.

use annomat::{AnnotatedMatrix, Cell, CellKind, Matrix, StoreKind, SymmetricLayout};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn symmetric_write_reads_back_mirrored() {
    let mut matrix = Matrix::new(StoreKind::Symmetric, 42, 42).expect("create symmetric");
    matrix.set_number(32, 16, 4.0).expect("write");
    assert_eq!(matrix.number(16, 32), Some(4.0));

    let layout = SymmetricLayout::new(42).expect("layout");
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let (row, col) = (rng.gen_range(0..42), rng.gen_range(0..42));
        assert_eq!(layout.index(row, col), layout.index(col, row));
    }
}

#[test]
fn symmetric_requires_square_shape() {
    assert!(Matrix::new(StoreKind::Symmetric, 3, 4).is_err());
}

#[test]
fn dynamic_grows_on_write() {
    let mut matrix = Matrix::dynamic();
    assert_eq!((matrix.rows(), matrix.cols()), (0, 0));
    matrix.set_number(10, 10, 1.0).expect("grow");
    assert_eq!((matrix.rows(), matrix.cols()), (11, 11));
    assert_eq!(matrix.cell(3, 7), Some(Cell::Null));
    assert_eq!(matrix.cell(10, 10), Some(Cell::Number(1.0)));
}

#[test]
fn dynamic_view_grows_on_write() {
    let mut view = AnnotatedMatrix::dynamic();
    view.set(10, 10, "x").expect("grow");
    assert_eq!((view.rows(), view.cols()), (11, 11));
    assert_eq!(view.get(0, 0), Some(Cell::Null));
}

#[test]
fn bits_truncate_to_zero_or_one() {
    let mut matrix = Matrix::new(StoreKind::Bits, 3, 9).expect("create bits");
    matrix.set_number(1, 4, 2.7).expect("write");
    matrix.set_number(1, 5, 0.4).expect("write");
    matrix.set_text(2, 8, "1").expect("write");
    assert_eq!(matrix.number(1, 4), Some(1.0));
    assert_eq!(matrix.number(1, 5), Some(0.0));
    assert_eq!(matrix.number(2, 8), Some(1.0));
    assert_eq!(matrix.cell_kind(0, 0), Some(CellKind::Number));
}

#[test]
fn mixed_store_keeps_cell_kinds() {
    let mut matrix = Matrix::new(StoreKind::DenseMixed, 1, 3).expect("create mixed");
    matrix.set_cell(0, 0, &Cell::Number(1.5)).expect("write");
    matrix.set_cell(0, 1, &Cell::text("abc")).expect("write");
    assert_eq!(matrix.cell_kind(0, 0), Some(CellKind::Number));
    assert_eq!(matrix.cell_kind(0, 1), Some(CellKind::Text));
    assert_eq!(matrix.cell_kind(0, 2), Some(CellKind::Null));
    assert_eq!(matrix.text(0, 0).as_deref(), Some("1.5"));
    assert_eq!(matrix.number(0, 1), None);
}

#[test]
fn dense_and_sparse_agree() {
    let (rows, cols) = (20, 30);
    let mut dense = Matrix::new(StoreKind::DenseNumbers, rows, cols).expect("create dense");
    let mut sparse = Matrix::new(StoreKind::Sparse, rows, cols).expect("create sparse");
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let (row, col) = (rng.gen_range(0..rows), rng.gen_range(0..cols));
        let value: f64 = rng.gen_range(-100.0..100.0);
        dense.set_number(row, col, value).expect("dense write");
        sparse.set_number(row, col, value).expect("sparse write");
    }
    for row in 0..rows {
        for col in 0..cols {
            assert_eq!(dense.number_or(row, col, 0.0), sparse.number_or(row, col, 0.0));
        }
    }

    let (dense_t, sparse_t) = (dense.transpose().expect("t"), sparse.transpose().expect("t"));
    assert_eq!((dense_t.rows(), dense_t.cols()), (cols, rows));
    for row in 0..cols {
        for col in 0..rows {
            assert_eq!(dense_t.number_or(row, col, 0.0), sparse_t.number_or(row, col, 0.0));
        }
    }
}

#[test]
fn row_copy_across_kinds() {
    let mut from = Matrix::new(StoreKind::DenseNumbers, 2, 4).expect("create");
    for col in 0..4 {
        from.set_number(1, col, col as f64 + 0.5).expect("write");
    }
    for kind in [StoreKind::DenseNumbers, StoreKind::DenseMixed, StoreKind::Sparse] {
        let mut to = Matrix::new(kind, 3, 4).expect("create");
        to.copy_row(&from, 1, 2).expect("copy row");
        let copied: Vec<f64> = to.numbers_in_row(2).collect();
        assert_eq!(copied, vec![0.5, 1.5, 2.5, 3.5], "kind {kind}");
    }
}
