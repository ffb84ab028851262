//! Data model: tables, keys and overlay grids.
//!
//! This module holds the values the encoder and decoder work on:
//!
//! - **Values**: `CellValue`, a missing/number/text cell
//! - **Keys**: `Key` and `Axis`, single- or multi-level row and column keys
//! - **Tables**: `TableModel`, cells addressed by (row key, column key)
//! - **Overlays**: `AnnotationMode`, `BonusStats` and `Panel`, the
//!   annotation layers attached to a table for encoding
//!
//! ## Example
//!
//! ```rust
//! use orgtbllib::data::{AnnotationMode, Axis, Panel, TableModel};
//!
//! let index = Axis::flat("", ["x"]);
//! let beta = TableModel::from_columns(index.clone(), vec![("beta", vec![2.0.into()])]).unwrap();
//! let se = TableModel::from_columns(index, vec![("beta", vec![0.5.into()])]).unwrap();
//!
//! let panel = Panel::new(beta).annotation(AnnotationMode::standard_errors(se));
//! assert!(panel.annotation.has_secondary_row());
//! ```

pub mod axis;
pub mod model;
pub mod overlay;
pub mod value;

pub use axis::{Axis, Key};
pub use model::{DuplicateKeys, TableModel};
pub use overlay::{AnnotationMode, BonusRow, BonusStats, Panel, StarSource};
pub use value::CellValue;
