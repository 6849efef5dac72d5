//! Abstract interfaces for cell storage
//!
//! Traits are pure interfaces; the concrete backends live in the
//! implementation crate.

pub mod kind;
pub mod store;

pub use kind::StoreKind;
pub use store::{copy_column_slots, copy_row_slots, CellStore, ContiguousRows};
