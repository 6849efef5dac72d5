//! Keywords and defaults of the tab-delimited text layout

/// Token written for null cells and read back as null
pub const DEFAULT_NULL_TOKEN: &str = "n/a";

/// Default field delimiter
pub const DEFAULT_DELIMITER: u8 = b'\t';

/// Prefix shared by every header keyword
pub const HEADER_PREFIX: char = '#';

/// Header keywords
pub mod keys {
    /// Format marker and version
    pub const FORMAT: &str = "#annomat";
    /// Storage kind name
    pub const STORAGE: &str = "#storage";
    /// Inner row count
    pub const ROWS: &str = "#rows";
    /// Inner column count
    pub const COLS: &str = "#cols";
    /// Count and names of the row annotations
    pub const ROW_ANNOTATIONS: &str = "#rowAnnotations";
    /// Count and names of the column annotations
    pub const COLUMN_ANNOTATIONS: &str = "#columnAnnotations";
    /// Marks the start of the inner rows
    pub const MATRIX: &str = "#matrix";
}

/// Current format version
pub const FORMAT_VERSION: u32 = 1;

/// Name of the first row annotation, holding one label per row
pub const ROW_NAMES: &str = "Row Names";

/// Name of the first column annotation, holding one label per column
pub const COLUMN_NAMES: &str = "Column Names";
