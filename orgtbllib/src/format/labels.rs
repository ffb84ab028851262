//! Label helpers shared by the encoder and decoder.

use crate::data::Key;

/// Canonical tuple form of a multi-level label, e.g. `('A1', 'B1')`.
pub fn tuple_label<S: AsRef<str>>(labels: &[S]) -> String {
    let parts: Vec<String> = labels.iter().map(|l| quote_label(l.as_ref())).collect();
    if parts.len() == 1 {
        format!("({},)", parts[0])
    } else {
        format!("({})", parts.join(", "))
    }
}

/// Quote a label: single quotes unless the label itself contains one
/// and no double quote.
fn quote_label(label: &str) -> String {
    if label.contains('\'') && !label.contains('"') {
        format!("\"{}\"", label.replace('\\', "\\\\"))
    } else {
        format!("'{}'", label.replace('\\', "\\\\").replace('\'', "\\'"))
    }
}

/// Labels of each key, level by level, with a label blanked when it equals
/// the previous key's label at the same level.
///
/// Returns one vector per key, each with `levels` entries.
pub fn suppress_repeats(keys: &[Key], levels: usize) -> Vec<Vec<&str>> {
    let mut last: Vec<Option<&str>> = vec![None; levels];

    keys.iter()
        .map(|key| {
            (0..levels)
                .map(|level| {
                    let label = key.level(level);
                    let repeated = last[level] == Some(label);
                    last[level] = Some(label);
                    if repeated {
                        ""
                    } else {
                        label
                    }
                })
                .collect()
        })
        .collect()
}
