//! Stack several tables into one org-table.
//!
//! Blocks are joined by a rule row. The first block carries the heading;
//! a later block repeats it only when its columns differ from the first
//! table's, so panels sharing one set of columns read as a single table.

use crate::data::Panel;
use crate::Result;

use super::encoder::{encode_block, RULE};
use super::options::EncodeOptions;

/// Encode a single panel.
pub fn encode_panel(panel: &Panel, options: &EncodeOptions) -> Result<String> {
    encode_block(
        &panel.table,
        &panel.annotation,
        panel.bonus.as_ref(),
        options,
        options.heading,
    )
}

/// Encode panels in order as one document.
///
/// With `options.heading` off no block gets a heading. An empty slice
/// encodes to an empty string.
pub fn encode_stack(panels: &[Panel], options: &EncodeOptions) -> Result<String> {
    let Some((first, rest)) = panels.split_first() else {
        return Ok(String::new());
    };

    let head = encode_panel(first, options)?;
    let first_columns = first.table.columns().keys();

    rest.iter().try_fold(head, |mut doc, panel| {
        let heading = options.heading && panel.table.columns().keys() != first_columns;
        let block = encode_block(
            &panel.table,
            &panel.annotation,
            panel.bonus.as_ref(),
            options,
            heading,
        )?;
        doc.push_str(RULE);
        doc.push_str(&block);
        Ok(doc)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{AnnotationMode, Axis, BonusStats, TableModel};
    use crate::error::OrgtblError;
    use crate::format::FloatFormat;
    use indoc::indoc;

    fn options() -> EncodeOptions {
        EncodeOptions::new()
            .float_format(FloatFormat::parse("%.1f").unwrap())
            .plain()
    }

    fn panel(rows: &[&str], columns: &[&str], value: f64) -> Panel {
        let cols = columns
            .iter()
            .map(|c| (*c, vec![value.into(); rows.len()]))
            .collect();
        Panel::new(TableModel::from_columns(Axis::flat("", rows.iter().copied()), cols).unwrap())
    }

    #[test]
    fn test_shared_columns_single_heading() {
        let panels = vec![
            panel(&["a"], &["A", "B"], 1.0),
            panel(&["b"], &["A", "B"], 2.0),
            panel(&["c"], &["A", "B"], 3.0),
        ];
        let out = encode_stack(&panels, &options()).unwrap();
        assert_eq!(
            out,
            indoc! {"
                |  | A | B |
                |-
                | a | 1.0 | 1.0 |
                |-
                | b | 2.0 | 2.0 |
                |-
                | c | 3.0 | 3.0 |
            "}
        );
        assert_eq!(out.matches("|  | A | B |").count(), 1);
        assert_eq!(out.matches("|-\n").count(), 3);
    }

    #[test]
    fn test_different_columns_repeat_heading() {
        let panels = vec![panel(&["a"], &["A"], 1.0), panel(&["b"], &["Z"], 2.0)];
        let out = encode_stack(&panels, &options()).unwrap();
        assert_eq!(
            out,
            indoc! {"
                |  | A |
                |-
                | a | 1.0 |
                |-
                |  | Z |
                |-
                | b | 2.0 |
            "}
        );
    }

    #[test]
    fn test_heading_off() {
        let panels = vec![panel(&["a"], &["A"], 1.0), panel(&["b"], &["Z"], 2.0)];
        let out = encode_stack(&panels, &options().heading(false)).unwrap();
        assert_eq!(out, "| a | 1.0 |\n|-\n| b | 2.0 |\n");
    }

    #[test]
    fn test_single_and_empty() {
        let out = encode_stack(&[panel(&["a"], &["A"], 1.0)], &options()).unwrap();
        assert_eq!(out, "|  | A |\n|-\n| a | 1.0 |\n");
        assert_eq!(encode_stack(&[], &options()).unwrap(), "");
    }

    #[test]
    fn test_each_panel_keeps_its_annotation() {
        let se = TableModel::from_columns(Axis::flat("", ["b"]), vec![("A", vec![0.5.into()])])
            .unwrap();
        let panels = vec![
            panel(&["a"], &["A"], 1.0),
            panel(&["b"], &["A"], 2.0).annotation(AnnotationMode::standard_errors(se)),
        ];
        let out = encode_stack(&panels, &options()).unwrap();
        assert!(out.ends_with("| b | 2.0^{***} |\n|  | (0.5) |\n"));
    }

    #[test]
    fn test_shape_error_propagates() {
        let bonus = BonusStats::new().row("b", vec!["x".into(), "y".into()]);
        let bad = panel(&["b"], &["A"], 2.0).bonus(bonus);
        let panels = vec![panel(&["a"], &["A"], 1.0), bad];
        let err = encode_stack(&panels, &options()).unwrap_err();
        assert!(matches!(err, OrgtblError::BonusStatsShape { .. }));
    }
}
