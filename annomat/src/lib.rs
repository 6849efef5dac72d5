//! Annomat - annotated matrices with pluggable cell storage
//!
//! An [`AnnotatedMatrix`] holds a grid of numbers, text and nulls together
//! with named row and column annotations (row names, group labels,
//! per-column statistics) and addresses all of them through one signed
//! coordinate space.
//!
//! ## Architecture
//!
//! Annomat follows a definitions/implementation split:
//!
//! - **annomat-core**: cells, the `CellStore` contract, index layouts,
//!   header definitions and validation (no I/O)
//! - **annomat**: storage backends, matrices, annotations, the annotated
//!   view and the text adapters
//!
//! ## Quick Start
//!
//! ```rust
//! use annomat::{AnnotatedMatrix, Cell, StoreKind};
//!
//! fn example() -> annomat::Result<()> {
//!     let mut view = AnnotatedMatrix::new(StoreKind::DenseMixed, 3, 2)?;
//!     view.set_row_names(["a", "b", "c"])?;
//!     view.set_column_names(["X", "Y"])?;
//!     view.set(1, 1, "hello")?;
//!
//!     assert_eq!(view.get(1, 1), Some(Cell::text("hello")));
//!     assert_eq!(view.text(-1, 1).as_deref(), Some("Y"));
//!     assert_eq!(view.text(1, -1).as_deref(), Some("b"));
//!     assert_eq!((view.ext_rows(), view.ext_cols()), (4, 3));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Seven storage kinds**: dense numbers, dense text, dense mixed,
//!   sparse, dynamically growing, bit-packed and compressed symmetric
//! - **Signed addressing**: negative rows reach column annotations,
//!   negative columns reach row annotations
//! - **Same-kind fast paths**: contiguous row copies between dense stores
//! - **Text adapters**: tab-delimited annotated and plain layouts
//! - **serde** (default feature): serialisation of cells, kinds and headers

// Re-export core abstractions and format definitions
pub use annomat_core::{
    // Cells
    format_number, Cell, CellKind,
    // Storage contract
    copy_column_slots, copy_row_slots, CellStore, ContiguousRows, StoreKind,
    // Layouts
    RowLayout, SymmetricLayout,
    // Format definitions
    TableHeader, DEFAULT_NULL_TOKEN,
    // Error handling
    MatrixError, Result,
    // Validation utilities
    alt_index_modulo, parse_number, validate_label,
};

// Implementation modules
pub mod annotations;
pub mod io;
pub mod matrix;
pub mod notify;
pub mod store;
pub mod view;

// Public exports
pub use annotations::AnnotationSet;
pub use io::{
    read_annotated, read_plain, write_annotated, write_plain, MatrixBuilder, TableError,
    TableResult, TextFormat,
};
pub use matrix::{Matrix, SharedMatrix};
pub use notify::{ChangeEvent, ListenerId, Listeners};
pub use store::{copy_column_cells, copy_row_cells, Store};
pub use view::{AnnotatedMatrix, Coord, Hit, InnerMode, SearchOptions};
