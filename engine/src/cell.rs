//! FILENAME: engine/src/cell.rs
//! PURPOSE: Defines the value a single result cell can hold.
//! CONTEXT: Report rows arrive as loosely-typed JSON. Every cell is narrowed to
//! `CellValue` on the way in, and all numeric coercion goes through the two
//! explicit, total functions below so aggregation code can rely on `Option`
//! instead of NaN checks.

use serde::{Deserialize, Serialize};

/// Represents the raw data within a result cell.
///
/// Serialized untagged so it maps 1:1 onto JSON scalars:
/// `null`, booleans, numbers and strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Strict numeric conversion (the whole value must be numeric).
    ///
    /// - Number: passes through, NaN -> None
    /// - Boolean: 1 / 0
    /// - Text: trimmed; empty -> 0; otherwise the entire string must be a
    ///   numeric literal (decimal, `Infinity`, or 0x/0o/0b integer)
    /// - Empty: None (callers decide whether a missing value is a gap or a zero)
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => (!n.is_nan()).then_some(*n),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Some(0.0)
                } else {
                    parse_numeric_literal(trimmed)
                }
            }
        }
    }

    /// Lenient numeric conversion used by aggregation.
    ///
    /// Text is parsed from its longest leading float prefix ("12.5kg" -> 12.5).
    /// Booleans and empty cells never count as numbers.
    pub fn parse_float(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => (!n.is_nan()).then_some(*n),
            CellValue::Text(s) => parse_float_prefix(s),
            CellValue::Boolean(_) | CellValue::Empty => None,
        }
    }

    /// Returns the display value of the cell as a String.
    /// Used for axis labels, pivot grouping keys and pivot column names.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Formats a number without unnecessary decimal places.
///
/// Magnitudes of 1e21 and above, or below 1e-6, use exponent notation with
/// an explicit sign (`1e+21`, `1.5e-7`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Also folds -0 into "0"
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        format_exponent(n)
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn format_exponent(n: f64) -> String {
    let formatted = format!("{:e}", n);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

fn parse_numeric_literal(s: &str) -> Option<f64> {
    match s {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return u64::from_str_radix(digits, radix).ok().map(|v| v as f64);
        }
    }

    // f64::from_str also accepts "inf"/"nan" spellings, which are not numbers here.
    let literal_chars = s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !literal_chars {
        return None;
    }
    s.parse::<f64>().ok()
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let mut mantissa_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        mantissa_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    // Exponent only counts if at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
