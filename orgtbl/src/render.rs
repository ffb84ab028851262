//! View data and styling for CLI output using outstanding

use console::Style;
use orgtbllib::{encode, AnnotationMode, EncodeOptions, FloatFormat, TableModel};
use outstanding::Theme;
use serde::Serialize;

/// Include templates at compile time
pub const ENCODE_TEMPLATE: &str = include_str!("../templates/encode.jinja");
pub const DECODE_TEMPLATE: &str = include_str!("../templates/decode.jinja");

/// Data context for the encode template
#[derive(Debug, Serialize)]
pub struct EncodeView {
    /// Number of panels stacked into the table
    pub panels: usize,
    /// The rendered org-table
    pub table: String,
}

/// Data context for the decode template
#[derive(Debug, Serialize)]
pub struct DecodeView {
    /// One-line summary of the decoded table
    pub caption: String,
    /// The decoded table, re-encoded in plain form
    pub table: String,
}

impl DecodeView {
    /// Summarize a decoded table and re-encode it without delimiters.
    pub fn new(table: &TableModel, float_format: FloatFormat) -> orgtbllib::Result<Self> {
        let (rows, columns) = table.shape();
        let levels = table.index().levels();
        let caption = format!(
            "{} {} x {} {} ({} index {})",
            rows,
            plural(rows, "row", "rows"),
            columns,
            plural(columns, "column", "columns"),
            levels,
            plural(levels, "level", "levels"),
        );

        let options = EncodeOptions::new().float_format(float_format).plain();
        let table = encode(table, &AnnotationMode::PointOnly, None, &options)?;

        Ok(DecodeView { caption, table })
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// Create the theme with styles
pub fn create_theme() -> Theme {
    Theme::new().add("caption", Style::new().bold())
}
