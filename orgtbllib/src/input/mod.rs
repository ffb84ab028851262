//! Input: turn pipe-delimited rows back into tables.
//!
//! - **tokenize_rows** / **named_table_rows**: split table lines into cells
//! - **decode**: build a `TableModel` from those cells
//!
//! ## Example
//!
//! ```rust
//! use orgtbllib::input::{decode, named_table_rows, DecodeOptions, ScalarType};
//!
//! let text = "#+name: coefs\n| var | beta |\n|-\n| x | 0.5 |\n";
//! let rows = named_table_rows(text, "coefs").unwrap();
//! let options = DecodeOptions::new().index_column("var").coerce(ScalarType::Float);
//!
//! let table = decode(&rows, &options).unwrap();
//! assert_eq!(table.shape(), (1, 1));
//! ```

pub mod decoder;
pub mod options;
pub mod tokenize;

pub use decoder::decode;
pub use options::{DecodeOptions, ScalarType};
pub use tokenize::{named_table_rows, tokenize_rows};
