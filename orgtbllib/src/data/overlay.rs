//! Overlay grids attached to a table for encoding.
//!
//! Overlays share the primary table's (row key, column key) addressing.
//! They may cover only part of the primary table; cells without an
//! overlay entry render blank instead of failing.

use serde::{Deserialize, Serialize};

use super::axis::Key;
use super::model::TableModel;
use super::value::CellValue;

/// Where significance stars come from when standard errors are shown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum StarSource {
    /// t = point estimate / standard error, per cell
    #[default]
    Derived,
    /// Use an explicit t-statistics grid
    Explicit { tstats: TableModel },
    /// No stars at all
    Suppressed,
}

/// The annotation layer for one encode call.
///
/// Chosen once per table; each variant carries exactly the grids it needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AnnotationMode {
    /// Point estimates only
    #[default]
    PointOnly,
    /// Point estimates with stars from a t-statistics grid
    TStats { tstats: TableModel },
    /// Point estimates plus a row of standard errors beneath each row
    StandardErrors {
        se: TableModel,
        #[serde(default)]
        stars: StarSource,
    },
    /// Point estimates plus a row of confidence intervals beneath each row
    ConfidenceIntervals {
        lower: TableModel,
        upper: TableModel,
        #[serde(default)]
        tstats: Option<TableModel>,
    },
}

impl AnnotationMode {
    /// Standard errors with stars derived from estimate / error.
    pub fn standard_errors(se: TableModel) -> Self {
        AnnotationMode::StandardErrors {
            se,
            stars: StarSource::Derived,
        }
    }

    /// Confidence intervals without stars.
    pub fn confidence_intervals(lower: TableModel, upper: TableModel) -> Self {
        AnnotationMode::ConfidenceIntervals {
            lower,
            upper,
            tstats: None,
        }
    }

    /// True if this mode emits a secondary row under every data row.
    pub fn has_secondary_row(&self) -> bool {
        matches!(
            self,
            AnnotationMode::StandardErrors { .. } | AnnotationMode::ConfidenceIntervals { .. }
        )
    }
}

/// Leading-cell content for one row's secondary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRow {
    /// Row this entry applies to
    pub key: Key,
    /// Values placed in the leading index cells, right-aligned
    pub values: Vec<CellValue>,
}

/// Extra per-row statistics shown in the leading cells of secondary rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BonusStats {
    rows: Vec<BonusRow>,
}

impl BonusStats {
    /// Create an empty set of bonus stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add values for a row.
    pub fn row(mut self, key: impl Into<Key>, values: Vec<CellValue>) -> Self {
        self.rows.push(BonusRow {
            key: key.into(),
            values,
        });
        self
    }

    /// All entries, in insertion order.
    pub fn rows(&self) -> &[BonusRow] {
        &self.rows
    }

    /// Values for a row. When a key repeats, the first entry wins.
    pub fn get(&self, key: &Key) -> Option<&[CellValue]> {
        self.rows
            .iter()
            .find(|r| &r.key == key)
            .map(|r| r.values.as_slice())
    }
}

/// One table with everything needed to encode it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Point estimates
    pub table: TableModel,
    /// Annotation layer
    #[serde(default)]
    pub annotation: AnnotationMode,
    /// Optional bonus stats for the secondary rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<BonusStats>,
}

impl Panel {
    /// A panel with no annotations.
    pub fn new(table: TableModel) -> Self {
        Panel {
            table,
            annotation: AnnotationMode::PointOnly,
            bonus: None,
        }
    }

    /// Builder: set the annotation mode.
    pub fn annotation(mut self, annotation: AnnotationMode) -> Self {
        self.annotation = annotation;
        self
    }

    /// Builder: set bonus stats.
    pub fn bonus(mut self, bonus: BonusStats) -> Self {
        self.bonus = Some(bonus);
        self
    }
}

impl From<TableModel> for Panel {
    fn from(table: TableModel) -> Self {
        Panel::new(table)
    }
}
