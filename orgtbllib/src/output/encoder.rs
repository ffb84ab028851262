//! Render a table and its overlays as an org-table.
//!
//! Output is a sequence of newline-terminated `| cell | cell |` rows:
//!
//! ```text
//! |  | beta |
//! |-
//! | x | \(2.00^{**}\) |
//! |  | \((0.50)\) |
//! ```
//!
//! Point estimates come from the table itself, position by position.
//! Overlay grids are looked up by (row key, column key); a key missing from
//! an overlay renders as an empty cell.

use std::collections::HashMap;

use crate::data::{AnnotationMode, BonusStats, CellValue, Key, StarSource, TableModel};
use crate::error::OrgtblError;
use crate::format::{star_markup, suppress_repeats};
use crate::Result;

use super::options::EncodeOptions;

/// Sentinel for missing values.
pub const MISSING: &str = "---";

/// Rule row separating the heading from the body, and stacked blocks.
pub const RULE: &str = "|-\n";

/// Encode one table.
///
/// Fails only when `bonus` supplies more values for a row than the index
/// has levels.
///
/// ```rust
/// use orgtbllib::{encode, AnnotationMode, Axis, EncodeOptions, FloatFormat, TableModel};
///
/// let table = TableModel::from_columns(
///     Axis::flat("", ["row1", "row2"]),
///     vec![("A", vec![1.0.into(), 2.0.into()]), ("B", vec![3.0.into(), 4.0.into()])],
/// )
/// .unwrap();
/// let options = EncodeOptions::new()
///     .float_format(FloatFormat::parse("%.1f").unwrap())
///     .plain();
///
/// let out = encode(&table, &AnnotationMode::PointOnly, None, &options).unwrap();
/// assert!(out.contains("| row1 | 1.0 | 3.0 |\n"));
/// ```
pub fn encode(
    table: &TableModel,
    annotation: &AnnotationMode,
    bonus: Option<&BonusStats>,
    options: &EncodeOptions,
) -> Result<String> {
    encode_block(table, annotation, bonus, options, options.heading)
}

/// Encode one table, with the heading decided by the caller.
pub(crate) fn encode_block(
    table: &TableModel,
    annotation: &AnnotationMode,
    bonus: Option<&BonusStats>,
    options: &EncodeOptions,
    heading: bool,
) -> Result<String> {
    let levels = table.index().levels();
    if let Some(bonus) = bonus {
        check_bonus_shape(bonus, levels)?;
    }
    warn_duplicates(table);

    let mut out = String::new();
    if heading {
        out.push_str(&render_heading(table));
    }

    let layers = Layers::new(annotation);
    let leading = if levels > 1 {
        suppress_repeats(table.index().keys(), levels)
    } else {
        table.index().keys().iter().map(|k| vec![k.level(0)]).collect()
    };
    let column_keys = table.columns().keys();

    for ((row_key, values), labels) in table.index().keys().iter().zip(table.rows()).zip(&leading)
    {
        let mut cells: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        for (col_key, value) in column_keys.iter().zip(values) {
            let t = layers.t_stat(row_key, col_key, value);
            cells.push(render_point(value, t, options));
        }
        push_row(&mut out, &cells);

        if annotation.has_secondary_row() {
            let mut cells = bonus_cells(bonus, row_key, levels, options);
            for (col_key, value) in column_keys.iter().zip(values) {
                cells.push(layers.secondary(row_key, col_key, value, options));
            }
            push_row(&mut out, &cells);
        }
    }

    Ok(out)
}

/// Heading rows followed by the rule row.
///
/// With hierarchical columns there is one row per column level; a label
/// equal to the previous column's label at the same level is blanked. Index
/// level names fill the leading cells of the last heading row only.
fn render_heading(table: &TableModel) -> String {
    let index_names = table.index().names();
    let columns = table.columns();
    let mut out = String::new();

    if columns.levels() == 1 {
        let cells: Vec<&str> = index_names
            .iter()
            .map(String::as_str)
            .chain(columns.keys().iter().map(|k| k.level(0)))
            .collect();
        push_row(&mut out, &cells);
    } else {
        let labels = suppress_repeats(columns.keys(), columns.levels());
        for level in 0..columns.levels() {
            let mut cells: Vec<&str> = if level + 1 == columns.levels() {
                index_names.iter().map(String::as_str).collect()
            } else {
                vec![""; index_names.len()]
            };
            cells.extend(labels.iter().map(|l| l[level]));
            push_row(&mut out, &cells);
        }
    }

    out.push_str(RULE);
    out
}

fn push_row<S: AsRef<str>>(out: &mut String, cells: &[S]) {
    out.push_str("| ");
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        out.push_str(cell.as_ref());
    }
    out.push_str(" |\n");
}

fn delimit(text: String, options: &EncodeOptions) -> String {
    if options.math_delimiters {
        format!("\\({}\\)", text)
    } else {
        text
    }
}

fn render_point(value: &CellValue, t: Option<f64>, options: &EncodeOptions) -> String {
    if value.is_missing() {
        return MISSING.to_string();
    }
    let stars = t.map_or(0, |t| options.thresholds.stars(t));
    let text = format!(
        "{}{}",
        options.float_format.format_cell(value),
        star_markup(stars)
    );
    delimit(text, options)
}

/// Leading cells of a secondary row: blank, except for bonus values, which
/// fill the rightmost leading cells.
fn bonus_cells(
    bonus: Option<&BonusStats>,
    row_key: &Key,
    levels: usize,
    options: &EncodeOptions,
) -> Vec<String> {
    let mut cells = vec![String::new(); levels];
    if let Some(values) = bonus.and_then(|b| b.get(row_key)) {
        let offset = levels.saturating_sub(values.len());
        for (cell, value) in cells[offset..].iter_mut().zip(values) {
            if !value.is_missing() {
                *cell = options.float_format.format_cell(value);
            }
        }
    }
    cells
}

fn check_bonus_shape(bonus: &BonusStats, levels: usize) -> Result<()> {
    match bonus.rows().iter().find(|r| r.values.len() > levels) {
        Some(row) => Err(OrgtblError::BonusStatsShape {
            row: row.key.to_string(),
            found: row.values.len(),
            levels,
        }),
        None => Ok(()),
    }
}

fn warn_duplicates(table: &TableModel) {
    let duplicates = table.duplicate_keys();
    if !duplicates.rows.is_empty() {
        log::warn!(
            "row keys are not unique ({}); overlays resolve to the first occurrence",
            join_keys(&duplicates.rows)
        );
    }
    if !duplicates.columns.is_empty() {
        log::warn!(
            "column keys are not unique ({}); overlays resolve to the first occurrence",
            join_keys(&duplicates.columns)
        );
    }
}

fn join_keys(keys: &[Key]) -> String {
    keys.iter()
        .map(Key::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Key-based lookup into an overlay grid. First occurrence wins.
struct Lookup<'a> {
    table: &'a TableModel,
    rows: HashMap<&'a Key, usize>,
    columns: HashMap<&'a Key, usize>,
}

impl<'a> Lookup<'a> {
    fn new(table: &'a TableModel) -> Self {
        let mut rows = HashMap::new();
        for (i, key) in table.index().keys().iter().enumerate() {
            rows.entry(key).or_insert(i);
        }
        let mut columns = HashMap::new();
        for (i, key) in table.columns().keys().iter().enumerate() {
            columns.entry(key).or_insert(i);
        }
        Lookup {
            table,
            rows,
            columns,
        }
    }

    fn get(&self, row: &Key, col: &Key) -> Option<&'a CellValue> {
        let r = *self.rows.get(row)?;
        let c = *self.columns.get(col)?;
        self.table.value_at(r, c)
    }
}

/// The annotation mode resolved into lookups.
struct Layers<'a> {
    tstats: Option<Lookup<'a>>,
    derive_t: bool,
    se: Option<Lookup<'a>>,
    bounds: Option<(Lookup<'a>, Lookup<'a>)>,
}

impl<'a> Layers<'a> {
    fn new(annotation: &'a AnnotationMode) -> Self {
        let mut layers = Layers {
            tstats: None,
            derive_t: false,
            se: None,
            bounds: None,
        };

        match annotation {
            AnnotationMode::PointOnly => {}
            AnnotationMode::TStats { tstats } => layers.tstats = Some(Lookup::new(tstats)),
            AnnotationMode::StandardErrors { se, stars } => {
                layers.se = Some(Lookup::new(se));
                match stars {
                    StarSource::Derived => layers.derive_t = true,
                    StarSource::Explicit { tstats } => layers.tstats = Some(Lookup::new(tstats)),
                    StarSource::Suppressed => {}
                }
            }
            AnnotationMode::ConfidenceIntervals {
                lower,
                upper,
                tstats,
            } => {
                layers.bounds = Some((Lookup::new(lower), Lookup::new(upper)));
                layers.tstats = tstats.as_ref().map(Lookup::new);
            }
        }

        layers
    }

    /// t-statistic for a cell, from the explicit grid or as estimate / error.
    fn t_stat(&self, row: &Key, col: &Key, estimate: &CellValue) -> Option<f64> {
        if let Some(tstats) = &self.tstats {
            return tstats.get(row, col).and_then(CellValue::as_f64);
        }
        if self.derive_t {
            let se = self.se.as_ref()?.get(row, col)?.as_f64()?;
            let estimate = estimate.as_f64()?;
            if se != 0.0 {
                return Some(estimate / se);
            }
        }
        None
    }

    /// Content of a secondary-row cell.
    fn secondary(
        &self,
        row: &Key,
        col: &Key,
        estimate: &CellValue,
        options: &EncodeOptions,
    ) -> String {
        if let Some(se) = &self.se {
            return match se.get(row, col) {
                None => String::new(),
                Some(error) if estimate.is_missing() || error.is_missing() => {
                    format!("({})", MISSING)
                }
                Some(error) => delimit(
                    format!("({})", options.float_format.format_cell(error)),
                    options,
                ),
            };
        }

        if let Some((lower, upper)) = &self.bounds {
            return match (lower.get(row, col), upper.get(row, col)) {
                (Some(lo), Some(hi)) if lo.is_missing() || hi.is_missing() => MISSING.to_string(),
                (Some(lo), Some(hi)) => delimit(
                    format!(
                        "[{},{}]",
                        options.float_format.format_cell(lo),
                        options.float_format.format_cell(hi)
                    ),
                    options,
                ),
                _ => String::new(),
            };
        }

        String::new()
    }
}
