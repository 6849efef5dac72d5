//! Text adapter configuration and the matrix builder hook
//!
//! Readers never construct matrices directly for the plain layout; they go
//! through a [`MatrixBuilder`], which chooses the storage kind and decides
//! how tokens become cells. [`TextFormat`] is the stock builder.

use annomat_core::format::{DEFAULT_DELIMITER, DEFAULT_NULL_TOKEN};
use annomat_core::{Cell, Result, StoreKind};

use crate::view::AnnotatedMatrix;

/// Hooks a reader uses to build an annotated matrix
pub trait MatrixBuilder {
    /// Create the matrix that will receive the parsed cells
    fn create_matrix(&mut self, rows: usize, cols: usize) -> Result<AnnotatedMatrix>;

    /// Token that stands for a null cell
    fn null_token(&self) -> &str {
        DEFAULT_NULL_TOKEN
    }

    /// Field delimiter
    fn delimiter(&self) -> u8 {
        DEFAULT_DELIMITER
    }

    /// Install the column names
    fn set_column_names(&mut self, view: &mut AnnotatedMatrix, names: &[String]) -> Result<()> {
        view.set_column_names(names)
    }

    /// Store one token
    ///
    /// Lexically numeric tokens are stored as numbers, the null token as
    /// null, anything else as text. No notification is fired; readers
    /// notify once when the table is complete.
    fn set_cell_from_token(
        &mut self,
        view: &mut AnnotatedMatrix,
        row: usize,
        col: usize,
        token: &str,
    ) -> Result<()> {
        let cell = Cell::from_token(token, self.null_token());
        view.update(row as isize, col as isize, cell)
    }
}

/// Layout options for the tab-delimited adapters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextFormat {
    /// Token written for null cells and read back as null
    pub null_token: String,
    /// Field delimiter byte
    pub delimiter: u8,
    /// Storage kind for matrices read from the plain layout
    pub store_kind: StoreKind,
}

impl TextFormat {
    /// Set the null token
    pub fn with_null_token(mut self, null_token: impl Into<String>) -> Self {
        self.null_token = null_token.into();
        self
    }

    /// Set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the storage kind used by [`MatrixBuilder::create_matrix`]
    pub fn with_store_kind(mut self, store_kind: StoreKind) -> Self {
        self.store_kind = store_kind;
        self
    }

    pub(crate) fn csv_reader<R: std::io::Read>(delimiter: u8, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .quoting(false)
            .flexible(true)
            .from_reader(reader)
    }

    pub(crate) fn csv_writer<W: std::io::Write>(&self, writer: W) -> csv::Writer<W> {
        csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .flexible(true)
            .from_writer(writer)
    }
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            null_token: DEFAULT_NULL_TOKEN.to_string(),
            delimiter: DEFAULT_DELIMITER,
            store_kind: StoreKind::default(),
        }
    }
}

impl MatrixBuilder for TextFormat {
    fn create_matrix(&mut self, rows: usize, cols: usize) -> Result<AnnotatedMatrix> {
        AnnotatedMatrix::new(self.store_kind, rows, cols)
    }

    fn null_token(&self) -> &str {
        &self.null_token
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_setters() {
        let format = TextFormat::default();
        assert_eq!(format.null_token, "n/a");
        assert_eq!(format.delimiter, b'\t');
        assert_eq!(format.store_kind, StoreKind::DenseMixed);

        let format = format
            .with_null_token("NA")
            .with_delimiter(b',')
            .with_store_kind(StoreKind::Dynamic);
        assert_eq!(MatrixBuilder::null_token(&format), "NA");
        assert_eq!(MatrixBuilder::delimiter(&format), b',');
    }

    #[test]
    fn test_tokens_become_typed_cells() {
        let mut format = TextFormat::default();
        let mut view = format.create_matrix(1, 3).unwrap();
        format.set_cell_from_token(&mut view, 0, 0, "1e3").unwrap();
        format.set_cell_from_token(&mut view, 0, 1, "n/a").unwrap();
        format.set_cell_from_token(&mut view, 0, 2, "gene").unwrap();
        assert_eq!(view.get(0, 0), Some(Cell::Number(1000.0)));
        assert_eq!(view.get(0, 1), Some(Cell::Null));
        assert_eq!(view.get(0, 2), Some(Cell::text("gene")));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let format = TextFormat::default().with_store_kind(StoreKind::Sparse);
        let json = serde_json::to_string(&format).unwrap();
        let back: TextFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, format);
    }
}
