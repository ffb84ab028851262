//! Options controlling how tokenized rows are decoded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Scalar type every data cell is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    /// Keep cells as text
    Text,
    /// Parse cells as floating-point numbers
    Float,
    /// Parse cells as integers
    Integer,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScalarType::Text => "text",
            ScalarType::Float => "float",
            ScalarType::Integer => "integer",
        };
        f.write_str(name)
    }
}

impl FromStr for ScalarType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "str" | "string" => Ok(ScalarType::Text),
            "float" | "f64" | "number" => Ok(ScalarType::Float),
            "integer" | "int" | "i64" => Ok(ScalarType::Integer),
            _ => Err(format!("Unknown scalar type: {}", s)),
        }
    }
}

/// Options for decoding tokenized rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Number of leading rows that hold column labels
    pub header_rows: usize,
    /// Column-name template; `{}` or `{N}` stand for header labels
    pub name_template: Option<String>,
    /// Columns to move into the row index, outermost first
    pub index: Vec<String>,
    /// Coerce every data cell to this type
    pub coerce: Option<ScalarType>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            header_rows: 1,
            name_template: None,
            index: Vec::new(),
            coerce: None,
        }
    }
}

impl DecodeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of header rows.
    pub fn header_rows(mut self, rows: usize) -> Self {
        self.header_rows = rows;
        self
    }

    /// Set the column-name template.
    pub fn name_template(mut self, template: impl Into<String>) -> Self {
        self.name_template = Some(template.into());
        self
    }

    /// Add a column to promote into the row index.
    pub fn index_column(mut self, name: impl Into<String>) -> Self {
        self.index.push(name.into());
        self
    }

    /// Set the columns to promote into the row index.
    pub fn index_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index = names.into_iter().map(Into::into).collect();
        self
    }

    /// Coerce data cells to a scalar type.
    pub fn coerce(mut self, target: ScalarType) -> Self {
        self.coerce = Some(target);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_type_from_str() {
        assert_eq!("float".parse::<ScalarType>(), Ok(ScalarType::Float));
        assert_eq!("INT".parse::<ScalarType>(), Ok(ScalarType::Integer));
        assert_eq!("str".parse::<ScalarType>(), Ok(ScalarType::Text));
        assert!("complex".parse::<ScalarType>().is_err());
    }

    #[test]
    fn test_scalar_type_display() {
        assert_eq!(ScalarType::Integer.to_string(), "integer");
    }

    #[test]
    fn test_builder() {
        let options = DecodeOptions::new()
            .header_rows(2)
            .name_template("{}_{}")
            .index_column("var")
            .coerce(ScalarType::Float);
        assert_eq!(options.header_rows, 2);
        assert_eq!(options.name_template.as_deref(), Some("{}_{}"));
        assert_eq!(options.index, vec!["var".to_string()]);
        assert_eq!(options.coerce, Some(ScalarType::Float));
    }

    #[test]
    fn test_defaults() {
        let options = DecodeOptions::default();
        assert_eq!(options.header_rows, 1);
        assert!(options.index.is_empty());
        assert!(options.coerce.is_none());
    }
}
