//! Error types for orgtbllib

use thiserror::Error;

use crate::input::ScalarType;

/// Errors that can occur while building, encoding or decoding tables
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrgtblError {
    /// Bonus stats supply more leading cells than the index has levels
    #[error("bonus stats for row '{row}' supply {found} values but the index has only {levels} levels")]
    BonusStatsShape {
        row: String,
        found: usize,
        levels: usize,
    },

    /// Float format string could not be parsed
    #[error("invalid float format '{format}': {message}")]
    InvalidFloatFormat { format: String, message: String },

    /// A key has a different number of levels than its axis
    #[error("key {key} has {found} levels, expected {expected}")]
    KeyDepth {
        key: String,
        expected: usize,
        found: usize,
    },

    /// Cell grid dimensions disagree with the row or column axis
    #[error("cell grid is {found} but the axes describe {expected}")]
    CellShape { expected: String, found: String },

    /// A decoded data row is wider than the header
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A decoded cell could not be coerced to the requested type
    #[error("cannot coerce '{value}' to {target}")]
    Coercion { value: String, target: ScalarType },
}
