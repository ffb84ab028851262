//! # orgtbllib
//!
//! Encode statistical tables as org-mode pipe tables and decode them back.
//!
//! ## Overview
//!
//! Regression output is usually a grid of point estimates with something
//! underneath each one. This library renders such grids as plain-text
//! org-tables, handling:
//!
//! - **Hierarchical keys**: multi-level row and column keys, with repeated
//!   labels blanked out the way a typeset table would show them
//! - **Significance stars**: from a t-statistics grid, or derived from
//!   estimate / standard error
//! - **Secondary rows**: standard errors `(0.50)` or confidence intervals
//!   `[0.80,1.20]` beneath each data row, with optional bonus stats in the
//!   leading cells
//! - **Stacking**: several panels in one document, sharing a heading
//! - **Decoding**: tokenized rows back into a table, with optional type
//!   coercion and index promotion
//!
//! The library does no I/O. Callers hand in tables and text and get
//! tables and text back.
//!
//! ## Example
//!
//! ```rust
//! use orgtbllib::{encode, AnnotationMode, Axis, EncodeOptions, FloatFormat, TableModel};
//!
//! let index = Axis::flat("", ["x"]);
//! let beta = TableModel::from_columns(index.clone(), vec![("beta", vec![2.0.into()])]).unwrap();
//! let se = TableModel::from_columns(index, vec![("beta", vec![0.5.into()])]).unwrap();
//!
//! let options = EncodeOptions::new().float_format(FloatFormat::parse("%.2f").unwrap());
//! let out = encode(&beta, &AnnotationMode::standard_errors(se), None, &options).unwrap();
//!
//! assert_eq!(out, "|  | beta |\n|-\n| x | \\(2.00^{***}\\) |\n|  | \\((0.50)\\) |\n");
//! ```

pub mod data;
pub mod error;
pub mod format;
pub mod input;
pub mod output;

pub use data::{
    AnnotationMode, Axis, BonusRow, BonusStats, CellValue, DuplicateKeys, Key, Panel, StarSource,
    TableModel,
};
pub use error::OrgtblError;
pub use format::{FloatFormat, Thresholds};
pub use input::{decode, named_table_rows, tokenize_rows, DecodeOptions, ScalarType};
pub use output::{encode, encode_panel, encode_stack, EncodeOptions};

/// Result type for orgtbllib operations
pub type Result<T> = std::result::Result<T, OrgtblError>;
