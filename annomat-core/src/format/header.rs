//! Header block of the annotated text layout
//!
//! The annotated layout opens with keyword lines describing the shape of
//! the table and the names of its annotation vectors:
//!
//! ```text
//! #annomat        1
//! #storage        mixed
//! #rows           3
//! #cols           2
//! #rowAnnotations 2   Row Names   Group
//! #columnAnnotations  1   Column Names
//! ```
//!
//! Column-annotation value lines follow, then the `#matrix` marker.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use super::constants::{keys, FORMAT_VERSION};
use crate::validation::validate_label;
use crate::StoreKind;

/// Parsed or to-be-written header of an annotated table
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableHeader {
    /// Storage kind to rebuild
    pub storage: StoreKind,
    /// Inner row count
    pub rows: usize,
    /// Inner column count
    pub cols: usize,
    /// Row annotation names in registration order
    pub row_annotations: Vec<String>,
    /// Column annotation names in registration order
    pub column_annotations: Vec<String>,
}

/// Classification of one header-block line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine {
    /// A keyword line that was absorbed into the header
    Keyword,
    /// The `#matrix` marker ending the header block
    MatrixMarker,
    /// Not a header line
    Other,
}

impl TableHeader {
    /// Create a header for a table without annotations
    pub fn new(storage: StoreKind, rows: usize, cols: usize) -> Self {
        Self {
            storage,
            rows,
            cols,
            row_annotations: Vec::new(),
            column_annotations: Vec::new(),
        }
    }

    /// Absorb one line of the header block
    ///
    /// `fields` is the delimiter-split line. Lines that do not start with a
    /// known keyword are reported as [`HeaderLine::Other`].
    pub fn parse_line(&mut self, fields: &[&str]) -> Result<HeaderLine, &'static str> {
        let Some((&key, values)) = fields.split_first() else {
            return Ok(HeaderLine::Other);
        };

        match key {
            keys::MATRIX => Ok(HeaderLine::MatrixMarker),
            keys::FORMAT => {
                let version = parse_count(values.first())?;
                if version as u32 > FORMAT_VERSION {
                    return Err("Unsupported format version");
                }
                Ok(HeaderLine::Keyword)
            }
            keys::STORAGE => {
                let name = values.first().ok_or("Missing storage kind")?;
                self.storage = StoreKind::from_name(name).ok_or("Unknown storage kind")?;
                Ok(HeaderLine::Keyword)
            }
            keys::ROWS => {
                self.rows = parse_count(values.first())?;
                Ok(HeaderLine::Keyword)
            }
            keys::COLS => {
                self.cols = parse_count(values.first())?;
                Ok(HeaderLine::Keyword)
            }
            keys::ROW_ANNOTATIONS => {
                self.row_annotations = parse_names(values)?;
                Ok(HeaderLine::Keyword)
            }
            keys::COLUMN_ANNOTATIONS => {
                self.column_annotations = parse_names(values)?;
                Ok(HeaderLine::Keyword)
            }
            _ => Ok(HeaderLine::Other),
        }
    }

    /// Header block as field lists, one per line, without the `#matrix` marker
    pub fn to_records(&self) -> Vec<Vec<String>> {
        vec![
            vec![keys::FORMAT.to_string(), FORMAT_VERSION.to_string()],
            vec![keys::STORAGE.to_string(), self.storage.name().to_string()],
            vec![keys::ROWS.to_string(), self.rows.to_string()],
            vec![keys::COLS.to_string(), self.cols.to_string()],
            names_record(keys::ROW_ANNOTATIONS, &self.row_annotations),
            names_record(keys::COLUMN_ANNOTATIONS, &self.column_annotations),
        ]
    }

    /// Header block as delimiter-joined lines
    pub fn to_lines(&self, delimiter: char) -> Vec<String> {
        self.to_records()
            .iter()
            .map(|fields| fields.join(&delimiter.to_string()))
            .collect()
    }
}

fn names_record(key: &str, names: &[String]) -> Vec<String> {
    let mut record = Vec::with_capacity(names.len() + 2);
    record.push(key.to_string());
    record.push(names.len().to_string());
    record.extend(names.iter().cloned());
    record
}

fn parse_count(field: Option<&&str>) -> Result<usize, &'static str> {
    field
        .ok_or("Missing count")?
        .trim()
        .parse::<usize>()
        .map_err(|_| "Invalid count")
}

fn parse_names(values: &[&str]) -> Result<Vec<String>, &'static str> {
    let count = parse_count(values.first())?;
    let names = &values[1..];
    if names.len() != count {
        return Err("Annotation count does not match the listed names");
    }
    let mut out = Vec::with_capacity(count);
    for name in names {
        validate_label(name).map_err(|_| "Invalid annotation name")?;
        if out.iter().any(|existing: &String| existing == name) {
            return Err("Duplicate annotation name");
        }
        out.push((*name).to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str) -> Vec<&str> {
        line.split('\t').collect()
    }

    #[test]
    fn test_header_lines_parse_back() {
        let mut header = TableHeader::new(StoreKind::Sparse, 3, 2);
        header.row_annotations = vec!["Row Names".into(), "Group".into()];
        header.column_annotations = vec!["Column Names".into()];

        let mut parsed = TableHeader::default();
        for line in header.to_lines('\t') {
            assert_eq!(parsed.parse_line(&split(&line)), Ok(HeaderLine::Keyword));
        }
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_header_rejects_bad_lines() {
        let mut header = TableHeader::default();
        assert_eq!(
            header.parse_line(&["#rows", "x"]),
            Err("Invalid count")
        );
        assert_eq!(
            header.parse_line(&["#rowAnnotations", "2", "Row Names"]),
            Err("Annotation count does not match the listed names")
        );
        assert_eq!(
            header.parse_line(&["#columnAnnotations", "2", "A", "A"]),
            Err("Duplicate annotation name")
        );
        assert_eq!(
            header.parse_line(&["#storage", "csr"]),
            Err("Unknown storage kind")
        );
        assert_eq!(header.parse_line(&["#annomat", "9"]), Err("Unsupported format version"));
    }

    #[test]
    fn test_marker_and_other_lines() {
        let mut header = TableHeader::default();
        assert_eq!(header.parse_line(&["#matrix"]), Ok(HeaderLine::MatrixMarker));
        assert_eq!(header.parse_line(&["Column Names", "X"]), Ok(HeaderLine::Other));
        assert_eq!(header.parse_line(&[]), Ok(HeaderLine::Other));
    }
}
