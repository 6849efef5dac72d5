//! Cell values stored in annotated matrices
//!
//! A cell is a tagged union of a double precision number, a text value or
//! nothing. `NaN` is the absent-number sentinel, so a number cell holding
//! `NaN` is indistinguishable from [`Cell::Null`] and is normalised to it.

use alloc::format;
use alloc::string::{String, ToString};

use crate::validation::parse_number;

/// Type tag of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// No value
    Null,
    /// Double precision number
    Number,
    /// Free text
    Text,
}

impl core::fmt::Display for CellKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CellKind::Null => write!(f, "null"),
            CellKind::Number => write!(f, "number"),
            CellKind::Text => write!(f, "text"),
        }
    }
}

/// A single matrix or annotation cell
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Build a number cell, mapping the `NaN` sentinel to `Null`
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Cell::Null
        } else {
            Cell::Number(value)
        }
    }

    /// Build a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Classify a token the way the text adapters do
    ///
    /// The null token maps to `Null`, lexically numeric tokens become
    /// numbers and everything else is kept verbatim as text.
    pub fn from_token(token: &str, null_token: &str) -> Self {
        if token == null_token || token.is_empty() {
            return Cell::Null;
        }
        match parse_number(token) {
            Some(value) => Cell::number(value),
            None => Cell::Text(token.to_string()),
        }
    }

    /// Type tag of this cell
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Null => CellKind::Null,
            Cell::Number(value) if value.is_nan() => CellKind::Null,
            Cell::Number(_) => CellKind::Number,
            Cell::Text(_) => CellKind::Text,
        }
    }

    /// Whether the cell holds no value
    pub fn is_null(&self) -> bool {
        self.kind() == CellKind::Null
    }

    /// Numeric view of the cell
    ///
    /// Text is parsed; text that is not numeric yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Null => None,
            Cell::Number(value) if value.is_nan() => None,
            Cell::Number(value) => Some(*value),
            Cell::Text(text) => parse_number(text),
        }
    }

    /// Text view of the cell, formatting numbers
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(value) if value.is_nan() => None,
            Cell::Number(value) => Some(format_number(*value)),
            Cell::Text(text) => Some(text.clone()),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

impl core::fmt::Display for Cell {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

/// Format a number for text output
///
/// Integral values print without a fractional part, so `4.0` becomes `"4"`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_null() {
        assert_eq!(Cell::number(f64::NAN), Cell::Null);
        assert_eq!(Cell::Number(f64::NAN).kind(), CellKind::Null);
        assert!(Cell::Number(f64::NAN).as_number().is_none());
    }

    #[test]
    fn test_coercion() {
        assert_eq!(Cell::number(4.0).to_text().as_deref(), Some("4"));
        assert_eq!(Cell::number(1.25).to_text().as_deref(), Some("1.25"));
        assert_eq!(Cell::text("2.5").as_number(), Some(2.5));
        assert_eq!(Cell::text("abc").as_number(), None);
        assert_eq!(Cell::Null.to_text(), None);
    }

    #[test]
    fn test_from_token() {
        assert_eq!(Cell::from_token("n/a", "n/a"), Cell::Null);
        assert_eq!(Cell::from_token("", "n/a"), Cell::Null);
        assert_eq!(Cell::from_token("-3e2", "n/a"), Cell::Number(-300.0));
        assert_eq!(Cell::from_token("NaN", "n/a"), Cell::text("NaN"));
        assert_eq!(Cell::from_token("gene1", "n/a"), Cell::text("gene1"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Cell::text("x")).unwrap();
        assert_eq!(json, r#"{"Text":"x"}"#);
        let back: Cell = serde_json::from_str(r#"{"Number":2.0}"#).unwrap();
        assert_eq!(back, Cell::Number(2.0));
    }
}
