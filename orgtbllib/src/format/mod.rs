//! Formatting helpers: numbers, significance stars and labels.
//!
//! - **FloatFormat**: a printf-style format with one numeric placeholder
//! - **Thresholds**: |t| cut-offs that decide how many stars a cell gets
//! - **labels**: canonical tuple labels and repeated-label suppression

pub mod float_format;
pub mod labels;
pub mod stars;

pub use float_format::FloatFormat;
pub use labels::{suppress_repeats, tuple_label};
pub use stars::{star_markup, Thresholds};
