//! Cell values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value in a table cell.
///
/// In JSON, `null` maps to [`CellValue::Missing`], numbers to
/// [`CellValue::Number`] and strings to [`CellValue::Text`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// No value
    #[default]
    Missing,
    /// A numeric value (NaN counts as missing)
    Number(f64),
    /// Anything else, kept verbatim
    Text(String),
}

impl CellValue {
    /// True for null-equivalent values: `Missing` and NaN.
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Missing => true,
            CellValue::Number(n) => n.is_nan(),
            CellValue::Text(_) => false,
        }
    }

    /// The numeric value, if this cell holds a non-missing number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            // Debug keeps the trailing ".0" on integral floats
            CellValue::Number(n) => write!(f, "{:?}", n),
            CellValue::Text(s) => f.write_str(s),
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

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Missing, CellValue::Number)
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
