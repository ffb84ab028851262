//! Output: render tables as org-tables.
//!
//! This module turns tables and their overlays into pipe-delimited text:
//!
//! - **EncodeOptions**: number format, math delimiters, heading, star cut-offs
//! - **encode**: one table with an annotation mode and optional bonus stats
//! - **encode_stack**: several panels in one document, sharing a heading
//!
//! ## Example
//!
//! ```rust
//! use orgtbllib::output::{encode_stack, EncodeOptions};
//! use orgtbllib::{Axis, Panel, TableModel};
//!
//! let first = TableModel::from_columns(Axis::flat("", ["a"]), vec![("A", vec![1.0.into()])]).unwrap();
//! let second = TableModel::from_columns(Axis::flat("", ["b"]), vec![("A", vec![2.0.into()])]).unwrap();
//!
//! let doc = encode_stack(&[Panel::new(first), Panel::new(second)], &EncodeOptions::new()).unwrap();
//! assert_eq!(doc.matches("|  | A |").count(), 1);
//! ```

pub mod encoder;
pub mod options;
pub mod stack;

pub use encoder::{encode, MISSING, RULE};
pub use options::EncodeOptions;
pub use stack::{encode_panel, encode_stack};
