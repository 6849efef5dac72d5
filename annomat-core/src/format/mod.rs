//! Text layout definitions
//!
//! Pure data structure definitions for the tab-delimited table layout. No
//! I/O happens here; readers and writers live in the implementation crate.

pub mod constants;
pub mod header;

pub use constants::{
    keys, COLUMN_NAMES, DEFAULT_DELIMITER, DEFAULT_NULL_TOKEN, HEADER_PREFIX, ROW_NAMES,
};
pub use header::{HeaderLine, TableHeader};
