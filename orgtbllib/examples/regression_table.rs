//! Print a two-panel regression table with standard errors and bonus stats.
//!
//! Run with `cargo run -p orgtbllib --example regression_table`.

use orgtbllib::{
    encode_stack, AnnotationMode, Axis, BonusStats, CellValue, EncodeOptions, FloatFormat, Key,
    Panel, TableModel,
};

fn grid(
    index: &Axis,
    columns: &[(&str, &str)],
    values: &[[f64; 2]],
) -> orgtbllib::Result<TableModel> {
    let columns = columns
        .iter()
        .enumerate()
        .map(|(c, key)| {
            let col: Vec<CellValue> = values.iter().map(|row| row[c].into()).collect();
            (*key, col)
        })
        .collect();
    TableModel::from_columns(index.clone(), columns)
}

fn main() -> orgtbllib::Result<()> {
    let columns = [("wage", "ols"), ("wage", "iv")];

    let index = Axis::new(
        ["sample", "var"],
        vec![Key::new(["men", "educ"]), Key::new(["men", "exper"])],
    )?;
    let men = Panel::new(grid(&index, &columns, &[[0.081, 0.094], [0.012, f64::NAN]])?)
        .annotation(AnnotationMode::standard_errors(grid(
            &index,
            &columns,
            &[[0.021, 0.048], [0.004, 0.006]],
        )?))
        .bonus(BonusStats::new().row(("men", "exper"), vec!["N=428".into()]));

    let index = Axis::new(
        ["sample", "var"],
        vec![Key::new(["women", "educ"]), Key::new(["women", "exper"])],
    )?;
    let women = Panel::new(grid(&index, &columns, &[[0.101, 0.070], [0.017, 0.015]])?)
        .annotation(AnnotationMode::standard_errors(grid(
            &index,
            &columns,
            &[[0.014, 0.040], [0.009, 0.011]],
        )?));

    let options = EncodeOptions::new().float_format(FloatFormat::parse("%.3f")?);
    print!("{}", encode_stack(&[men, women], &options)?);
    Ok(())
}
