//! Lenient numeric parsing for dataset cells.
//!
//! Source cells hold values such as `"120+"` (super-heavyweight classes),
//! `"100-110"` (ranges) or `"NaN"`. Parsing never fails: callers get a
//! [`NumericField`] and decide whether to count the miss.

/// Outcome of parsing one numeric cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericField {
    /// A usable number.
    Parsed(f64),
    /// Empty cell or an explicit null marker.
    Absent,
    /// Non-empty text that could not be read as a number.
    Malformed,
}

impl NumericField {
    /// The parsed value, or `0.0` for absent and malformed cells.
    pub fn or_zero(self) -> f64 {
        match self {
            Self::Parsed(v) => v,
            Self::Absent | Self::Malformed => 0.0,
        }
    }

    pub fn is_malformed(self) -> bool {
        matches!(self, Self::Malformed)
    }
}

/// Parse an optional cell value.
///
/// # Examples
///
/// ```
/// use opl_common::{NumericField, parse_numeric};
///
/// assert_eq!(parse_numeric(Some("120+")), NumericField::Parsed(120.0));
/// assert_eq!(parse_numeric(Some("nan")), NumericField::Absent);
/// assert_eq!(parse_numeric(Some("DQ")), NumericField::Malformed);
/// assert_eq!(parse_numeric(None), NumericField::Absent);
/// ```
pub fn parse_numeric(value: Option<&str>) -> NumericField {
    let Some(raw) = value else {
        return NumericField::Absent;
    };
    let trimmed = raw.trim();
    if is_null_marker(trimmed) {
        return NumericField::Absent;
    }
    match parse_lenient_f64(trimmed) {
        Some(v) => NumericField::Parsed(v),
        None => NumericField::Malformed,
    }
}

/// Parse a number, tolerating `+` suffixes and `a-b` ranges (lower bound).
///
/// Returns `None` for empty, null-like, non-finite or unparsable input.
pub fn parse_lenient_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if is_null_marker(trimmed) {
        return None;
    }

    let cleaned = trimmed.replace('+', "");
    let candidate = if !cleaned.starts_with('-') && cleaned.contains('-') {
        cleaned.split('-').next().unwrap_or_default()
    } else {
        cleaned.as_str()
    };

    candidate
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn is_null_marker(value: &str) -> bool {
    value.is_empty()
        || value.eq_ignore_ascii_case("nan")
        || value.eq_ignore_ascii_case("none")
        || value.eq_ignore_ascii_case("null")
}
