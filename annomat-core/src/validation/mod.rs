//! Validation utilities
//!
//! Pure functions for coordinate arithmetic and token classification with
//! no I/O dependencies.

pub mod bounds;
pub mod parsing;

pub use bounds::{alt_index_modulo, check_cell, checked_area};
pub use parsing::{parse_number, validate_label};
