//! Polars `AnyValue` utility functions.
//!
//! Source files encode missing cells as `-` or an empty string, and numeric
//! columns may carry `NaN` after coercion. All of those are treated as missing
//! here so that merge, filter and association code agree on one policy.

use polars::prelude::AnyValue;

/// Tokens that mark a cell as missing in the delimited sources.
const MISSING_TOKENS: &[&str] = &["", "-", "nan", "NaN", "NA", "null"];

/// Returns true when a raw text cell should be read as missing.
///
/// # Examples
///
/// ```
/// use hipp_common::is_missing_token;
///
/// assert!(is_missing_token(" - "));
/// assert!(is_missing_token(""));
/// assert!(!is_missing_token("female"));
/// ```
pub fn is_missing_token(value: &str) -> bool {
    let trimmed = value.trim();
    MISSING_TOKENS.contains(&trimmed)
}

/// Returns true when the value is null, a missing token or a floating `NaN`.
pub fn any_is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(s) => is_missing_token(s),
        AnyValue::StringOwned(s) => is_missing_token(s),
        _ => false,
    }
}

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for missing values. Booleans render as
/// `true`/`false` so that group labels stay readable.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use hipp_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
/// assert_eq!(any_to_string(AnyValue::String("male")), "male");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    if any_is_missing(&value) {
        return String::new();
    }
    match value {
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts `AnyValue` to `String`, returning `None` for missing values.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let s = any_to_string(value);
    if s.is_empty() { None } else { Some(s) }
}

/// Formats a floating-point number without a trailing `.0` for integral values.
pub fn format_numeric(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Converts an `AnyValue` to `f64`.
///
/// Integers, floats and numeric text coerce; booleans map to `1.0`/`0.0`.
/// Missing values and non-numeric text return `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    if any_is_missing(&value) {
        return None;
    }
    match value {
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Converts an `AnyValue` to `bool` when it carries an unambiguous boolean.
pub fn any_to_bool(value: AnyValue<'_>) -> Option<bool> {
    match value {
        AnyValue::Boolean(b) => Some(b),
        AnyValue::String(s) => parse_bool(s),
        AnyValue::StringOwned(s) => parse_bool(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid, missing or non-finite text.
pub fn parse_f64(value: &str) -> Option<f64> {
    if is_missing_token(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses the `TRUE`/`FALSE` encodings used by the donor and biosample sources.
pub fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing_token("-"));
        assert!(is_missing_token("  "));
        assert!(is_missing_token("nan"));
        assert!(!is_missing_token("0"));
        assert!(any_is_missing(&AnyValue::Null));
        assert!(any_is_missing(&AnyValue::Float64(f64::NAN)));
        assert!(!any_is_missing(&AnyValue::Float64(0.0)));
    }

    #[test]
    fn test_any_to_string_numbers() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
    }

    #[test]
    fn test_any_to_string_trims_and_blanks_missing() {
        assert_eq!(any_to_string(AnyValue::String("  female ")), "female");
        assert_eq!(any_to_string(AnyValue::String("-")), "");
        assert_eq!(any_to_string_non_empty(AnyValue::String("-")), None);
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
    }

    #[test]
    fn test_any_to_f64() {
        assert_eq!(any_to_f64(AnyValue::Null), None);
        assert_eq!(any_to_f64(AnyValue::Int32(42)), Some(42.0));
        assert_eq!(any_to_f64(AnyValue::String("2.5")), Some(2.5));
        assert_eq!(any_to_f64(AnyValue::String("male")), None);
        assert_eq!(any_to_f64(AnyValue::Boolean(true)), Some(1.0));
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
    }

    #[test]
    fn test_bool_parsing() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(any_to_bool(AnyValue::Boolean(false)), Some(false));
        assert_eq!(any_to_bool(AnyValue::Int32(1)), None);
    }
}
