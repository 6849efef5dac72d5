use annomat::{copy_row_cells, CellStore, Store, StoreKind};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

fn filled(kind: StoreKind, rows: usize, cols: usize) -> Store {
    let mut store = Store::create(kind, rows, cols).expect("create store");
    for row in 0..rows {
        for col in 0..cols {
            store.update_number(row, col, (row * cols + col) as f64);
        }
    }
    store
}

/// Same-kind contiguous row copy against the cell-by-cell fallback
fn bench_row_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_copy");

    for cols in [64, 1024, 16384] {
        group.throughput(Throughput::Elements(cols as u64));
        let from = filled(StoreKind::DenseNumbers, 4, cols);

        group.bench_with_input(BenchmarkId::new("contiguous", cols), &cols, |b, &cols| {
            let mut to = Store::create(StoreKind::DenseNumbers, 4, cols).expect("create store");
            b.iter(|| to.copy_row_from(black_box(&from), black_box(1), black_box(2)))
        });

        group.bench_with_input(BenchmarkId::new("generic", cols), &cols, |b, &cols| {
            let mut to = Store::create(StoreKind::DenseNumbers, 4, cols).expect("create store");
            b.iter(|| copy_row_cells(black_box(&from), black_box(1), &mut to, black_box(2)))
        });

        group.bench_with_input(BenchmarkId::new("into_sparse", cols), &cols, |b, &cols| {
            let mut to = Store::create(StoreKind::Sparse, 4, cols).expect("create store");
            b.iter(|| to.copy_row_from(black_box(&from), black_box(1), black_box(2)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_row_copy);
criterion_main!(benches);
