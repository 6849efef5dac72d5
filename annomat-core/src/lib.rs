#![no_std]

//! annomat core - cell, storage and layout definitions
//!
//! This crate provides the pure definitions shared by every annotated matrix
//! implementation: the cell model, the storage backend contract, linear index
//! layouts, the persisted text header and validation helpers. It performs no
//! I/O. Owned text needs `alloc`; nothing here needs `std`.

extern crate alloc;

pub mod cell;
pub mod error;
pub mod format;
pub mod layout;
pub mod traits;
pub mod validation;

pub use cell::{format_number, Cell, CellKind};
pub use error::*;
pub use format::{TableHeader, DEFAULT_NULL_TOKEN};
pub use layout::{RowLayout, SymmetricLayout};
pub use traits::*;
pub use validation::{alt_index_modulo, check_cell, parse_number, validate_label};
