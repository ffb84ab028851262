//! Line-level splitting of pipe-delimited rows.
//!
//! This is not a document parser. A line is a table row when it starts with
//! `|` after leading whitespace; rule rows (`|-...`) are skipped.

/// Rows of every table line in `text`, in order.
///
/// ```rust
/// use orgtbllib::input::tokenize_rows;
///
/// let rows = tokenize_rows("| a | b |\n|-\n| 1 | 2 |\n");
/// assert_eq!(rows, vec![vec!["a", "b"], vec!["1", "2"]]);
/// ```
pub fn tokenize_rows(text: &str) -> Vec<Vec<String>> {
    text.lines().filter_map(split_row).collect()
}

/// Rows of the table that follows a `#+name: <name>` line.
///
/// Other `#+` keyword lines between the name and the table are allowed.
/// Returns `None` if the name never appears or no table follows it.
pub fn named_table_rows(text: &str, name: &str) -> Option<Vec<Vec<String>>> {
    let mut lines = text.lines().map(str::trim);
    lines.find(|line| names_table(line, name))?;

    let mut lines = lines.skip_while(|line| line.starts_with("#+")).peekable();
    if !lines.peek().is_some_and(|line| line.starts_with('|')) {
        return None;
    }

    Some(
        lines
            .take_while(|line| line.starts_with('|'))
            .filter_map(split_row)
            .collect(),
    )
}

fn names_table(line: &str, name: &str) -> bool {
    let Some((keyword, value)) = line.split_once(':') else {
        return false;
    };
    keyword.eq_ignore_ascii_case("#+name") && value.trim() == name
}

/// Cells of one line, or `None` for rule rows and non-table lines.
fn split_row(line: &str) -> Option<Vec<String>> {
    let line = line.trim();
    let body = line.strip_prefix('|')?;
    if body.starts_with('-') {
        return None;
    }
    let body = body.strip_suffix('|').unwrap_or(body);
    Some(body.split('|').map(|cell| cell.trim().to_string()).collect())
}
