//! Token parsing for cell values and annotation labels
//!
//! These functions decide whether a text token is lexically numeric and
//! whether a string is usable as an annotation name in the text layout.

use alloc::string::ToString;

use crate::{MatrixError, Result};

/// Parse a token as a number if it is lexically numeric
///
/// Accepts optional sign, digits, an optional fraction and an optional
/// exponent, surrounded by optional whitespace. Words such as `NaN`, `inf`
/// or `infinity` are text, not numbers, so gene or sample names that happen
/// to spell them survive a round trip.
pub fn parse_number(token: &str) -> Option<f64> {
    let trimmed = token.trim();
    if !is_numeric_literal(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Check the `[+-]digits[.digits][(e|E)[+-]digits]` shape
fn is_numeric_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

/// Validate an annotation name
///
/// Names must be non-empty, at most 1024 bytes, and free of tabs, line
/// breaks and other control characters since they are written as single
/// cells of the text layout.
pub fn validate_label(label: &str) -> Result<()> {
    if label.trim().is_empty() || label.len() > 1024 {
        return Err(MatrixError::InvalidLabel(label.to_string()));
    }

    if label.chars().any(char::is_control) {
        return Err(MatrixError::InvalidLabel(label.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0"), Some(0.0));
        assert_eq!(parse_number("-12"), Some(-12.0));
        assert_eq!(parse_number("+3.5"), Some(3.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("5."), Some(5.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("2.5E-1"), Some(0.25));
        assert_eq!(parse_number(" 7 "), Some(7.0));

        // Not numeric
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("."), None);
        assert_eq!(parse_number("1e"), None);
        assert_eq!(parse_number("12a"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1,5"), None);
    }

    #[test]
    fn test_validate_label() {
        assert_eq!(validate_label("Row Names"), Ok(()));
        assert_eq!(validate_label("group_1"), Ok(()));

        assert!(validate_label("").is_err());
        assert!(validate_label("   ").is_err());
        assert!(validate_label("a\tb").is_err());
        assert!(validate_label("a\nb").is_err());
        assert!(validate_label(&"x".repeat(2000)).is_err());
    }
}
