//! The in-memory table.

use serde::{Deserialize, Serialize};

use super::axis::{Axis, Key};
use super::value::CellValue;
use crate::error::OrgtblError;
use crate::Result;

/// A rectangular table addressed by (row key, column key).
///
/// Cells are stored row-major. Tables are immutable once built; encoding
/// and decoding never modify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableRepr")]
pub struct TableModel {
    index: Axis,
    columns: Axis,
    cells: Vec<Vec<CellValue>>,
}

#[derive(Deserialize)]
struct TableRepr {
    index: Axis,
    columns: Axis,
    cells: Vec<Vec<CellValue>>,
}

impl TryFrom<TableRepr> for TableModel {
    type Error = OrgtblError;

    fn try_from(repr: TableRepr) -> Result<Self> {
        TableModel::new(repr.index, repr.columns, repr.cells)
    }
}

/// Keys that occur more than once on either axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DuplicateKeys {
    /// Repeated row keys
    pub rows: Vec<Key>,
    /// Repeated column keys
    pub columns: Vec<Key>,
}

impl DuplicateKeys {
    /// True if neither axis has repeated keys.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }
}

impl TableModel {
    /// Create a table from row-major cells.
    pub fn new(index: Axis, columns: Axis, cells: Vec<Vec<CellValue>>) -> Result<Self> {
        let width_ok = cells.iter().all(|row| row.len() == columns.len());
        if cells.len() != index.len() || !width_ok {
            let found_width = cells
                .iter()
                .map(Vec::len)
                .find(|w| *w != columns.len())
                .unwrap_or(columns.len());
            return Err(OrgtblError::CellShape {
                expected: format!("{}x{}", index.len(), columns.len()),
                found: format!("{}x{}", cells.len(), found_width),
            });
        }

        Ok(TableModel {
            index,
            columns,
            cells,
        })
    }

    /// Create a table from named columns sharing one row index.
    ///
    /// ```rust
    /// use orgtbllib::{Axis, TableModel};
    ///
    /// let table = TableModel::from_columns(
    ///     Axis::flat("", ["row1", "row2"]),
    ///     vec![("A", vec![1.0.into(), 2.0.into()]), ("B", vec![3.0.into(), 4.0.into()])],
    /// )
    /// .unwrap();
    /// assert_eq!(table.shape(), (2, 2));
    /// ```
    pub fn from_columns<K>(index: Axis, columns: Vec<(K, Vec<CellValue>)>) -> Result<Self>
    where
        K: Into<Key>,
    {
        let mut keys = Vec::with_capacity(columns.len());
        let mut data = Vec::with_capacity(columns.len());
        for (key, values) in columns {
            keys.push(key.into());
            data.push(values);
        }

        let levels = keys.first().map_or(1, Key::depth);
        let column_axis = Axis::new(vec![String::new(); levels], keys)?;

        if let Some(bad) = data.iter().find(|col| col.len() != index.len()) {
            return Err(OrgtblError::CellShape {
                expected: format!("{}x{}", index.len(), column_axis.len()),
                found: format!("{}x{}", bad.len(), column_axis.len()),
            });
        }

        let cells = (0..index.len())
            .map(|r| data.iter().map(|col| col[r].clone()).collect())
            .collect();

        TableModel::new(index, column_axis, cells)
    }

    /// Promote a one-dimensional series to a single-column table.
    pub fn from_series(
        name: impl Into<String>,
        index: Axis,
        values: Vec<CellValue>,
    ) -> Result<Self> {
        let columns = Axis::flat("", [name.into()]);
        let cells = values.into_iter().map(|v| vec![v]).collect();
        TableModel::new(index, columns, cells)
    }

    /// Row keys.
    pub fn index(&self) -> &Axis {
        &self.index
    }

    /// Column keys.
    pub fn columns(&self) -> &Axis {
        &self.columns
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.index.len(), self.columns.len())
    }

    /// Rows of cells, in index order.
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.cells
    }

    /// Cell at a row/column position.
    pub fn value_at(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Cell at (row key, column key). When keys repeat, the first
    /// occurrence wins.
    pub fn get(&self, row: &Key, col: &Key) -> Option<&CellValue> {
        let r = self.index.position(row)?;
        let c = self.columns.position(col)?;
        self.value_at(r, c)
    }

    /// Values of one column, in index order.
    pub fn column(&self, col: usize) -> Vec<&CellValue> {
        self.cells.iter().filter_map(|row| row.get(col)).collect()
    }

    /// Repeated keys on either axis.
    pub fn duplicate_keys(&self) -> DuplicateKeys {
        DuplicateKeys {
            rows: self.index.duplicates(),
            columns: self.columns.duplicates(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableModel {
        TableModel::from_columns(
            Axis::flat("", ["row1", "row2"]),
            vec![
                ("A", vec![1.0.into(), 2.0.into()]),
                ("B", vec![3.0.into(), 4.0.into()]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_columns_is_row_major() {
        let table = sample();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.rows()[0], vec![CellValue::from(1.0), CellValue::from(3.0)]);
        assert_eq!(table.value_at(1, 0), Some(&CellValue::from(2.0)));
    }

    #[test]
    fn test_get_by_key() {
        let table = sample();
        assert_eq!(
            table.get(&Key::single("row2"), &Key::single("B")),
            Some(&CellValue::from(4.0))
        );
        assert_eq!(table.get(&Key::single("row3"), &Key::single("B")), None);
        assert_eq!(table.get(&Key::single("row1"), &Key::single("C")), None);
    }

    #[test]
    fn test_get_first_duplicate_wins() {
        let table = TableModel::from_columns(
            Axis::flat("", ["x", "x"]),
            vec![("A", vec![1.0.into(), 2.0.into()])],
        )
        .unwrap();
        assert_eq!(
            table.get(&Key::single("x"), &Key::single("A")),
            Some(&CellValue::from(1.0))
        );
        assert_eq!(table.duplicate_keys().rows, vec![Key::single("x")]);
        assert!(table.duplicate_keys().columns.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_shape() {
        let err = TableModel::new(
            Axis::flat("", ["r1", "r2"]),
            Axis::flat("", ["A"]),
            vec![vec![1.0.into()]],
        )
        .unwrap_err();
        assert!(matches!(err, OrgtblError::CellShape { .. }));

        let err = TableModel::new(
            Axis::flat("", ["r1"]),
            Axis::flat("", ["A"]),
            vec![vec![1.0.into(), 2.0.into()]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            OrgtblError::CellShape {
                expected: "1x1".to_string(),
                found: "1x2".to_string(),
            }
        );
    }

    #[test]
    fn test_from_columns_rejects_short_column() {
        let err = TableModel::from_columns(
            Axis::flat("", ["r1", "r2"]),
            vec![("A", vec![1.0.into()])],
        )
        .unwrap_err();
        assert!(matches!(err, OrgtblError::CellShape { .. }));
    }

    #[test]
    fn test_from_series() {
        let table = TableModel::from_series(
            "beta",
            Axis::flat("var", ["x", "y"]),
            vec![0.5.into(), CellValue::Missing],
        )
        .unwrap();
        assert_eq!(table.shape(), (2, 1));
        assert_eq!(table.columns().keys()[0], Key::single("beta"));
        assert!(table.value_at(1, 0).unwrap().is_missing());
    }

    #[test]
    fn test_multilevel_columns() {
        let table = TableModel::from_columns(
            Axis::flat("", ["r"]),
            vec![
                (("Y1", "b"), vec![1.0.into()]),
                (("Y1", "se"), vec![0.1.into()]),
            ],
        )
        .unwrap();
        assert_eq!(table.columns().levels(), 2);
        assert_eq!(table.column(1), vec![&CellValue::from(0.1)]);
    }

    #[test]
    fn test_json_validates_shape() {
        let ok = r#"{
            "index": {"names": [""], "keys": ["r1"]},
            "columns": {"names": [""], "keys": ["A", "B"]},
            "cells": [[1.0, null]]
        }"#;
        let table: TableModel = serde_json::from_str(ok).unwrap();
        assert!(table.value_at(0, 1).unwrap().is_missing());

        let bad = r#"{
            "index": {"names": [""], "keys": ["r1", "r2"]},
            "columns": {"names": [""], "keys": ["A"]},
            "cells": [[1.0]]
        }"#;
        assert!(serde_json::from_str::<TableModel>(bad).is_err());
    }
}
