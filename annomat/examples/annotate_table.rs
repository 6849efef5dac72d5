//! Build a small expression table, annotate it, pull out its numeric block
//! and print both layouts.
//!
//! Run with `RUST_LOG=annomat=debug cargo run --example annotate_table`.

use std::io::{self, Write};

use annomat::{write_annotated, write_plain, AnnotatedMatrix, SearchOptions, StoreKind, TextFormat};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut table = AnnotatedMatrix::new(StoreKind::DenseMixed, 4, 4)?;
    table.set_column_names(["Gene", "Control", "Treated", "Note"])?;
    table.set_row_names(["p1", "p2", "p3", "p4"])?;
    table
        .column_annotations_mut()?
        .set_texts("Condition", ["", "baseline", "drug", ""])?;

    let rows = [
        ("BRCA1", 12.5, 30.1, "up"),
        ("TP53", 8.0, 7.5, ""),
        ("MYC", 40.2, 90.0, "up"),
        ("EGFR", 3.3, 2.9, ""),
    ];
    for (row, (gene, control, treated, note)) in (0..).zip(rows) {
        table.update(row, 0, gene)?;
        table.update(row, 1, control)?;
        table.update(row, 2, treated)?;
        if !note.is_empty() {
            table.update(row, 3, note)?;
        }
    }
    table.inner_mut().notify_changed();

    let format = TextFormat::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "== annotated layout")?;
    write_annotated(&table, &mut out, &format)?;

    if let Some(numbers) = table.extract_numbers()? {
        writeln!(out, "\n== numeric block")?;
        write_plain(&numbers, &mut out, &format)?;
    }

    if let Some(hit) = table.find("^myc$", &SearchOptions::new())? {
        let label = table.text(hit.row, -1).unwrap_or_default();
        writeln!(out, "\nMYC found at ({}, {}) in row {label}", hit.row, hit.col)?;
    }
    if let Some(col) = table.find_column("treated|drug") {
        writeln!(out, "Treated values are in column {col}")?;
    }
    Ok(())
}
