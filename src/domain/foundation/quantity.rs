//! Tolerant numeric parsing and formatting for spreadsheet cells.
//!
//! Cells arrive as text: possibly padded, possibly with thousands separators,
//! often empty. The parsing path used by aggregation is total: it never fails,
//! it degrades to zero.

/// Characters stripped from a cell before parsing.
const THOUSANDS_SEPARATORS: &[char] = &[',', '\u{00a0}', '\u{202f}'];

/// Parses a cell as a finite number.
///
/// Returns `None` for empty, unparseable, or non-finite (`NaN`, `inf`) text.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !THOUSANDS_SEPARATORS.contains(c))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses a cell, treating anything that is not a finite number as zero.
pub fn parse_numeric_or_zero(text: &str) -> f64 {
    parse_numeric(text).unwrap_or(0.0)
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a quantity for writing back into a cell.
///
/// Integral values carry no decimal point (`5`, not `5.0`).
pub fn format_quantity(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_thousands_separated_text() {
        assert_eq!(parse_numeric_or_zero("1,250"), 1250.0);
        assert_eq!(parse_numeric_or_zero(" 12,345.5 "), 12345.5);
    }

    #[test]
    fn empty_and_garbage_parse_to_zero() {
        assert_eq!(parse_numeric_or_zero(""), 0.0);
        assert_eq!(parse_numeric_or_zero("   "), 0.0);
        assert_eq!(parse_numeric_or_zero("abc"), 0.0);
        assert_eq!(parse_numeric_or_zero("12abc"), 0.0);
    }

    #[test]
    fn non_finite_text_parses_to_zero() {
        assert_eq!(parse_numeric_or_zero("NaN"), 0.0);
        assert_eq!(parse_numeric_or_zero("inf"), 0.0);
        assert_eq!(parse_numeric_or_zero("-infinity"), 0.0);
    }

    #[test]
    fn parse_numeric_distinguishes_missing_from_zero() {
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("0"), Some(0.0));
        assert_eq!(parse_numeric("-3.5"), Some(-3.5));
    }

    #[test]
    fn round2_rounds_to_cents() {
        assert_eq!(round2(5.0), 5.0);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert_eq!(round2(2.678), 2.68);
    }

    #[test]
    fn format_quantity_drops_trailing_zero_fraction() {
        assert_eq!(format_quantity(5.0), "5");
        assert_eq!(format_quantity(250.0), "250");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_quantity(-0.0), "0");
        assert_eq!(format_quantity(0.33), "0.33");
    }

    proptest! {
        #[test]
        fn parse_numeric_or_zero_is_total_and_finite(text in ".*") {
            let value = parse_numeric_or_zero(&text);
            prop_assert!(value.is_finite());
        }

        #[test]
        fn formatted_quantities_parse_back(value in -1.0e9f64..1.0e9f64) {
            let rounded = round2(value);
            let parsed = parse_numeric_or_zero(&format_quantity(rounded));
            prop_assert_eq!(parsed, if rounded == 0.0 { 0.0 } else { rounded });
        }
    }
}
