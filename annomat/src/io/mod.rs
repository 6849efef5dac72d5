//! Tab-delimited text adapters
//!
//! Two layouts are supported. The annotated layout carries a keyword
//! header (see [`TableHeader`](annomat_core::TableHeader)), the column
//! annotation lines and a `#matrix` marker before the rows, and restores
//! the storage kind and every annotation vector. The plain layout is a
//! column-name line followed by data lines with optional leading row names.

pub mod error;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::{TableError, TableResult};
pub use format::{MatrixBuilder, TextFormat};
pub use reader::{read_annotated, read_plain};
pub use writer::{write_annotated, write_plain};
