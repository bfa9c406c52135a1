//! Polars AnyValue utility functions.
//!
//! Helpers for reading cells out of ingested frames and for numeric parsing
//! of spreadsheet text.

use polars::prelude::*;

/// Converts a Polars AnyValue to a String representation.
/// Returns empty string for Null, properly formats numeric types.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts AnyValue to String, returning None if the result is empty.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    if s.trim().is_empty() { None } else { Some(s) }
}

/// Formats a number the way spreadsheets display it: integral values
/// without a fractional part.
pub fn format_numeric(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Converts an AnyValue to f64, returning None for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)).filter(|v| v.is_finite()),
        AnyValue::Float64(v) => Some(v).filter(|v| v.is_finite()),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as a finite f64, returning None for invalid or empty strings.
///
/// Thousands separators are accepted (`1,234.5`); `NaN` and infinities are
/// rejected so they can never leak into sums.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = if trimmed.contains(',') {
        trimmed.replace(',', "").parse::<f64>().ok()
    } else {
        trimmed.parse::<f64>().ok()
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_leniently() {
        assert_eq!(parse_f64(" 100 "), Some(100.0));
        assert_eq!(parse_f64("1,234.5"), Some(1234.5));
        assert_eq!(parse_f64("00123"), Some(123.0));
        assert_eq!(parse_f64("N/A"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("inf"), None);
        assert_eq!(parse_f64(""), None);
    }

    #[test]
    fn formats_integral_floats_without_fraction() {
        assert_eq!(format_numeric(123.0), "123");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(12.5), "12.5");
        assert_eq!(any_to_string(AnyValue::Float64(7.0)), "7");
    }

    #[test]
    fn any_to_f64_reads_strings_and_numbers() {
        assert_eq!(any_to_f64(AnyValue::String("3.5")), Some(3.5));
        assert_eq!(any_to_f64(AnyValue::Int64(4)), Some(4.0));
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);
    }
}
