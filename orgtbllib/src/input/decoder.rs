//! Rebuild a table from tokenized rows.
//!
//! The first `header_rows` rows name the columns; every remaining row is a
//! data row. Cells stay text unless a coercion type is requested. Decoding
//! recovers plain tables only: stars, delimiters and secondary rows are
//! kept as text like anything else.

use log::{debug, warn};

use crate::data::{Axis, CellValue, Key, TableModel};
use crate::error::OrgtblError;
use crate::format::tuple_label;
use crate::output::MISSING;
use crate::Result;

use super::options::{DecodeOptions, ScalarType};

/// Decode tokenized rows into a table.
///
/// ```rust
/// use orgtbllib::input::{decode, DecodeOptions};
/// use orgtbllib::{CellValue, Key};
///
/// let rows = vec![
///     vec!["var".to_string(), "beta".to_string()],
///     vec!["x".to_string(), "0.500".to_string()],
/// ];
/// let table = decode(&rows, &DecodeOptions::new().index_column("var")).unwrap();
/// assert_eq!(
///     table.get(&Key::single("x"), &Key::single("beta")),
///     Some(&CellValue::from("0.500"))
/// );
/// ```
pub fn decode(rows: &[Vec<String>], options: &DecodeOptions) -> Result<TableModel> {
    let split = options.header_rows.min(rows.len());
    let (header, body) = rows.split_at(split);

    let width = if header.is_empty() {
        body.iter().map(Vec::len).max().unwrap_or(0)
    } else {
        header.iter().map(Vec::len).max().unwrap_or(0)
    };

    let names = column_names(header, width, options.name_template.as_deref());
    let body = pad_rows(body, width)?;

    let promoted: Vec<(usize, &str)> = options
        .index
        .iter()
        .filter_map(|wanted| match names.iter().position(|n| n == wanted) {
            Some(col) => Some((col, wanted.as_str())),
            None => {
                warn!("index column '{}' not found; ignoring", wanted);
                None
            }
        })
        .collect();

    let index = if promoted.is_empty() {
        Axis::range(body.len())
    } else {
        let keys = body
            .iter()
            .map(|row| Key::new(promoted.iter().map(|(col, _)| row[*col].clone())))
            .collect();
        Axis::new(promoted.iter().map(|(_, name)| *name), keys)?
    };

    let kept: Vec<usize> = (0..width)
        .filter(|col| !promoted.iter().any(|(p, _)| p == col))
        .collect();

    let columns = Axis::flat("", kept.iter().map(|col| names[*col].clone()));
    // Headerless input stays raw text
    let target = if header.is_empty() {
        if options.coerce.is_some() {
            debug!("no header rows; leaving cells uncoerced");
        }
        None
    } else {
        options.coerce
    };

    let cells = body
        .iter()
        .map(|row| {
            kept.iter()
                .map(|col| coerce(&row[*col], target))
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    TableModel::new(index, columns, cells)
}

/// One name per column position.
fn column_names(header: &[Vec<String>], width: usize, template: Option<&str>) -> Vec<String> {
    if header.is_empty() {
        return (0..width).map(|col| col.to_string()).collect();
    }

    (0..width)
        .map(|col| {
            let parts: Vec<&str> = header
                .iter()
                .map(|row| row.get(col).map_or("", String::as_str))
                .collect();
            match (template, parts.as_slice()) {
                (Some(template), _) => fill_template(template, &parts),
                (None, [single]) => single.to_string(),
                (None, _) => tuple_label(&parts),
            }
        })
        .collect()
}

/// Substitute `{}` (next label) and `{N}` (label N) in a template.
/// `{{` and `}}` produce literal braces.
fn fill_template(template: &str, parts: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                let slot = if field.is_empty() {
                    next += 1;
                    Some(next - 1)
                } else {
                    field.parse::<usize>().ok()
                };
                match slot.and_then(|i| parts.get(i)) {
                    Some(label) if closed => out.push_str(label),
                    _ => {
                        out.push('{');
                        out.push_str(&field);
                        if closed {
                            out.push('}');
                        }
                    }
                }
            }
            c => out.push(c),
        }
    }

    out
}

/// Pad short rows with empty cells; rows wider than the table are an error.
fn pad_rows(body: &[Vec<String>], width: usize) -> Result<Vec<Vec<String>>> {
    body.iter()
        .enumerate()
        .map(|(i, row)| {
            if row.len() > width {
                return Err(OrgtblError::RaggedRow {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            let mut row = row.clone();
            row.resize(width, String::new());
            Ok(row)
        })
        .collect()
}

fn coerce(cell: &str, target: Option<ScalarType>) -> Result<CellValue> {
    let numeric = match target {
        None | Some(ScalarType::Text) => return Ok(CellValue::Text(cell.to_string())),
        Some(numeric) => numeric,
    };

    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == MISSING {
        return Ok(CellValue::Missing);
    }

    let parsed = match numeric {
        ScalarType::Integer => trimmed.parse::<i64>().ok().map(CellValue::from),
        _ => trimmed.parse::<f64>().ok().map(CellValue::from),
    };
    parsed.ok_or_else(|| OrgtblError::Coercion {
        value: cell.to_string(),
        target: numeric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::AnnotationMode;
    use crate::format::FloatFormat;
    use crate::input::tokenize_rows;
    use crate::output::{encode, EncodeOptions};

    fn rows(lines: &[&[&str]]) -> Vec<Vec<String>> {
        lines
            .iter()
            .map(|line| line.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn labels(axis: &Axis) -> Vec<String> {
        axis.keys().iter().map(Key::to_string).collect()
    }

    #[test]
    fn test_single_header() {
        let table = decode(
            &rows(&[&["A", "B"], &["1", "2"], &["3", "4"]]),
            &DecodeOptions::new(),
        )
        .unwrap();
        assert_eq!(labels(table.columns()), vec!["A", "B"]);
        assert_eq!(labels(table.index()), vec!["0", "1"]);
        assert_eq!(table.value_at(1, 1), Some(&CellValue::from("4")));
    }

    #[test]
    fn test_no_header() {
        let table = decode(
            &rows(&[&["a", "b"], &["c"]]),
            &DecodeOptions::new().header_rows(0),
        )
        .unwrap();
        assert_eq!(labels(table.columns()), vec!["0", "1"]);
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.value_at(1, 1), Some(&CellValue::from("")));
    }

    #[test]
    fn test_no_header_stays_raw() {
        let table = decode(
            &rows(&[&["1.5", "x"]]),
            &DecodeOptions::new().header_rows(0).coerce(ScalarType::Float),
        )
        .unwrap();
        assert_eq!(table.value_at(0, 0), Some(&CellValue::from("1.5")));
        assert_eq!(table.value_at(0, 1), Some(&CellValue::from("x")));
    }

    #[test]
    fn test_template_single_header() {
        let table = decode(
            &rows(&[&["A", "B"], &["1", "2"]]),
            &DecodeOptions::new().name_template("col_{}"),
        )
        .unwrap();
        assert_eq!(labels(table.columns()), vec!["col_A", "col_B"]);
    }

    #[test]
    fn test_multi_header_columnwise_tuples() {
        let data = rows(&[&["Y1", "Y2"], &["ols", "iv"], &["1", "2"]]);

        let table = decode(&data, &DecodeOptions::new().header_rows(2)).unwrap();
        assert_eq!(
            labels(table.columns()),
            vec!["('Y1', 'ols')", "('Y2', 'iv')"]
        );
        assert_eq!(table.shape(), (1, 2));

        let table = decode(
            &data,
            &DecodeOptions::new().header_rows(2).name_template("{}_{}"),
        )
        .unwrap();
        assert_eq!(labels(table.columns()), vec!["Y1_ols", "Y2_iv"]);

        let table = decode(
            &data,
            &DecodeOptions::new().header_rows(2).name_template("{1}:{0}"),
        )
        .unwrap();
        assert_eq!(labels(table.columns()), vec!["ols:Y1", "iv:Y2"]);
    }

    #[test]
    fn test_fill_template_literals() {
        assert_eq!(fill_template("{{{}}}", &["a"]), "{a}");
        assert_eq!(fill_template("{5}", &["a"]), "{5}");
        assert_eq!(fill_template("{}-{}", &["a"]), "a-{}");
        assert_eq!(fill_template("open {", &["a"]), "open {");
    }

    #[test]
    fn test_index_promotion() {
        let table = decode(
            &rows(&[&["dep", "var", "beta"], &["y", "x1", "1"], &["y", "x2", "2"]]),
            &DecodeOptions::new().index_columns(["dep", "var", "nope"]),
        )
        .unwrap();
        assert_eq!(table.index().names(), &["dep".to_string(), "var".to_string()]);
        assert_eq!(table.index().keys()[1], Key::new(["y", "x2"]));
        assert_eq!(labels(table.columns()), vec!["beta"]);
        assert_eq!(table.shape(), (2, 1));
    }

    #[test]
    fn test_coercion() {
        let data = rows(&[&["A", "B"], &["1.5", "---"], &["", "2"]]);

        let table = decode(&data, &DecodeOptions::new().coerce(ScalarType::Float)).unwrap();
        assert_eq!(table.value_at(0, 0), Some(&CellValue::from(1.5)));
        assert!(table.value_at(0, 1).unwrap().is_missing());
        assert!(table.value_at(1, 0).unwrap().is_missing());

        let table = decode(&data, &DecodeOptions::new().coerce(ScalarType::Text)).unwrap();
        assert_eq!(table.value_at(0, 1), Some(&CellValue::from("---")));
    }

    #[test]
    fn test_coercion_error() {
        let err = decode(
            &rows(&[&["A"], &["1.5"]]),
            &DecodeOptions::new().coerce(ScalarType::Integer),
        )
        .unwrap_err();
        assert_eq!(
            err,
            OrgtblError::Coercion {
                value: "1.5".to_string(),
                target: ScalarType::Integer,
            }
        );
    }

    #[test]
    fn test_ragged_rows() {
        let table = decode(&rows(&[&["A", "B"], &["1"]]), &DecodeOptions::new()).unwrap();
        assert_eq!(table.value_at(0, 1), Some(&CellValue::from("")));

        let err = decode(&rows(&[&["A"], &["1", "2"]]), &DecodeOptions::new()).unwrap_err();
        assert!(matches!(err, OrgtblError::RaggedRow { row: 0, expected: 1, found: 2 }));
    }

    #[test]
    fn test_empty_input() {
        let table = decode(&[], &DecodeOptions::new()).unwrap();
        assert_eq!(table.shape(), (0, 0));

        let table = decode(&rows(&[&["A", "B"]]), &DecodeOptions::new()).unwrap();
        assert_eq!(table.shape(), (0, 2));
    }

    #[test]
    fn test_round_trip_keeps_repeated_flat_keys() {
        let source = TableModel::from_columns(
            Axis::flat("var", ["x", "x"]),
            vec![("b", vec![1.0.into(), 2.0.into()])],
        )
        .unwrap();
        let options = EncodeOptions::new()
            .float_format(FloatFormat::parse("%.1f").unwrap())
            .plain();
        let text = encode(&source, &AnnotationMode::PointOnly, None, &options).unwrap();
        assert!(text.contains("| x | 2.0 |"));

        let decoded = decode(&tokenize_rows(&text), &DecodeOptions::new().index_column("var"))
            .unwrap();
        assert_eq!(decoded.index(), source.index());
    }

    #[test]
    fn test_round_trip_plain_encoding() {
        let source = TableModel::from_columns(
            Axis::flat("var", ["x", "y"]),
            vec![
                ("A", vec![1.0.into(), 2.5.into()]),
                ("B", vec![3.0.into(), CellValue::Missing]),
            ],
        )
        .unwrap();
        let options = EncodeOptions::new()
            .float_format(FloatFormat::parse("%.1f").unwrap())
            .plain();
        let text = encode(&source, &AnnotationMode::PointOnly, None, &options).unwrap();

        let decoded = decode(&tokenize_rows(&text), &DecodeOptions::new().index_column("var"))
            .unwrap();
        assert_eq!(decoded.index(), source.index());
        assert_eq!(labels(decoded.columns()), vec!["A", "B"]);
        assert_eq!(decoded.value_at(0, 0), Some(&CellValue::from("1.0")));
        assert_eq!(decoded.value_at(1, 0), Some(&CellValue::from("2.5")));
        assert_eq!(decoded.value_at(1, 1), Some(&CellValue::from("---")));

        let typed = decode(
            &tokenize_rows(&text),
            &DecodeOptions::new().index_column("var").coerce(ScalarType::Float),
        )
        .unwrap();
        assert_eq!(typed.value_at(1, 0), Some(&CellValue::from(2.5)));
        assert!(typed.value_at(1, 1).unwrap().is_missing());
    }
}
