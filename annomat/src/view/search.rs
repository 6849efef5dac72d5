//! Column lookup and pattern search over an annotated view

use annomat_core::{MatrixError, Result};
use regex::{Regex, RegexBuilder};

use super::AnnotatedMatrix;

/// Extended coordinate of a search hit
///
/// Annotation hits use negative indices the same way [`AnnotatedMatrix::get`]
/// reads them: `-1` is the most recently registered annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hit {
    pub row: isize,
    pub col: isize,
}

/// Options for [`AnnotatedMatrix::find`] and [`AnnotatedMatrix::find_all`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// The pattern must match the whole cell text
    pub whole_cell: bool,
    /// Match case exactly
    pub case_sensitive: bool,
    /// Inner row the scan starts from, wrapping around
    pub start_row: usize,
    /// Inner column the scan starts from, wrapping around
    pub start_col: usize,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_whole_cell(mut self, whole_cell: bool) -> Self {
        self.whole_cell = whole_cell;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn with_start(mut self, row: usize, col: usize) -> Self {
        self.start_row = row;
        self.start_col = col;
        self
    }

    fn compile(&self, pattern: &str) -> Result<Regex> {
        let pattern = if self.whole_cell {
            format!("^(?:{pattern})$")
        } else {
            pattern.to_string()
        };
        RegexBuilder::new(&pattern)
            .case_insensitive(!self.case_sensitive)
            .build()
            .map_err(|e| MatrixError::InvalidPattern(format!("'{pattern}': {e}")))
    }
}

/// Visit `0..extent` starting at `start`, wrapping around
fn wrapped(extent: usize, start: usize) -> impl Iterator<Item = usize> {
    (0..extent).map(move |i| (i + start) % extent)
}

/// Annotation coordinate for the `k`-th scanned vector
fn annotation_index(k: usize) -> isize {
    -(k as isize) - 1
}

impl AnnotatedMatrix {
    /// Index of the first column whose name matches one of `terms`
    ///
    /// `terms` holds `|`-separated alternatives compared case-insensitively
    /// against the whole column name.
    pub fn find_column(&self, terms: &str) -> Option<usize> {
        let alternatives: Vec<String> = terms
            .split('|')
            .map(|term| term.trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        self.column_names()
            .iter()
            .position(|name| alternatives.contains(&name.trim().to_lowercase()))
    }

    /// [`find_column`](Self::find_column) for several term lists
    pub fn find_columns(&self, terms: &[&str]) -> Vec<Option<usize>> {
        terms.iter().map(|terms| self.find_column(terms)).collect()
    }

    /// First cell whose text matches `pattern`
    ///
    /// Scans row annotations, then column annotations, then inner cells.
    pub fn find(&self, pattern: &str, options: &SearchOptions) -> Result<Option<Hit>> {
        let regex = options.compile(pattern)?;
        Ok(self.scan(&regex, options, Some(1)).into_iter().next())
    }

    /// Every cell whose text matches `pattern`, in scan order
    pub fn find_all(&self, pattern: &str, options: &SearchOptions) -> Result<Vec<Hit>> {
        let regex = options.compile(pattern)?;
        Ok(self.scan(&regex, options, None))
    }

    fn scan(&self, regex: &Regex, options: &SearchOptions, limit: Option<usize>) -> Vec<Hit> {
        let mut hits = Vec::new();
        let full = |hits: &Vec<Hit>| limit.is_some_and(|limit| hits.len() >= limit);
        let is_match = |text: Option<String>| text.is_some_and(|text| regex.is_match(&text));
        let (rows, cols) = (self.rows(), self.cols());

        let count = self.row_annotations.len();
        for k in 0..count {
            let position = count - 1 - k;
            for row in wrapped(rows, options.start_row) {
                let text = self
                    .row_annotations
                    .value_at(position, row)
                    .and_then(|cell| cell.to_text());
                if is_match(text) {
                    hits.push(Hit {
                        row: row as isize,
                        col: annotation_index(k),
                    });
                    if full(&hits) {
                        return hits;
                    }
                }
            }
        }

        let count = self.column_annotations.len();
        for k in 0..count {
            let position = count - 1 - k;
            for col in wrapped(cols, options.start_col) {
                let text = self
                    .column_annotations
                    .value_at(position, col)
                    .and_then(|cell| cell.to_text());
                if is_match(text) {
                    hits.push(Hit {
                        row: annotation_index(k),
                        col: col as isize,
                    });
                    if full(&hits) {
                        return hits;
                    }
                }
            }
        }

        let inner = self.inner.borrow();
        for row in wrapped(rows, options.start_row) {
            for col in wrapped(cols, options.start_col) {
                if is_match(inner.text(row, col)) {
                    hits.push(Hit {
                        row: row as isize,
                        col: col as isize,
                    });
                    if full(&hits) {
                        return hits;
                    }
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annomat_core::StoreKind;

    fn view() -> AnnotatedMatrix {
        let mut view = AnnotatedMatrix::new(StoreKind::DenseMixed, 2, 3).unwrap();
        view.set_row_names(["alpha", "beta"]).unwrap();
        view.row_annotations_mut()
            .unwrap()
            .set_texts("Group", ["control", "treated"])
            .unwrap();
        view.set_column_names(["Gene", "Sample A", "Sample B"]).unwrap();
        view.set(0, 0, "BRCA1").unwrap();
        view.set(1, 0, "TP53").unwrap();
        view.set(1, 2, "brca2").unwrap();
        view
    }

    #[test]
    fn test_find_column_alternatives() {
        let view = view();
        assert_eq!(view.find_column("gene"), Some(0));
        assert_eq!(view.find_column("symbol | SAMPLE B"), Some(2));
        assert_eq!(view.find_column("sample"), None);
        assert_eq!(
            view.find_columns(&["Sample A", "missing"]),
            vec![Some(1), None]
        );
    }

    #[test]
    fn test_hits_use_read_coordinates() {
        let view = view();
        let options = SearchOptions::new();

        // Most recent row annotation ("Group") is scanned first, at -1
        let hit = view.find("treated", &options).unwrap().unwrap();
        assert_eq!(hit, Hit { row: 1, col: -1 });
        assert_eq!(view.text(hit.row, hit.col).as_deref(), Some("treated"));

        let hit = view.find("^beta$", &options).unwrap().unwrap();
        assert_eq!(hit, Hit { row: 1, col: -2 });
        assert_eq!(view.text(hit.row, hit.col).as_deref(), Some("beta"));

        let hit = view.find("sample b", &options).unwrap().unwrap();
        assert_eq!(hit, Hit { row: -1, col: 2 });
    }

    #[test]
    fn test_find_all_case_and_whole_cell() {
        let view = view();
        let loose = view.find_all("brca", &SearchOptions::new()).unwrap();
        assert_eq!(loose, vec![Hit { row: 0, col: 0 }, Hit { row: 1, col: 2 }]);

        let strict = SearchOptions::new().with_case_sensitive(true);
        assert_eq!(view.find_all("brca", &strict).unwrap(), vec![Hit { row: 1, col: 2 }]);

        let whole = SearchOptions::new().with_whole_cell(true);
        assert!(view.find("BRCA", &whole).unwrap().is_none());
        assert!(view.find("BRCA.", &whole).unwrap().is_some());
    }

    #[test]
    fn test_start_cell_wraps() {
        let view = view();
        let options = SearchOptions::new().with_start(1, 0);
        let hit = view.find("brca", &options).unwrap().unwrap();
        assert_eq!(hit, Hit { row: 1, col: 2 });
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(
            view().find("(", &SearchOptions::new()),
            Err(MatrixError::InvalidPattern(_))
        ));
    }
}
