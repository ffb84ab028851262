//! Significance stars.

use serde::{Deserialize, Serialize};

/// Ascending |t| cut-offs; each one exceeded adds a star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Thresholds(Vec<f64>);

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds(vec![1.65, 1.96, 2.577])
    }
}

impl Thresholds {
    /// Custom cut-offs. They are sorted ascending; NaNs are dropped.
    pub fn new(mut cutoffs: Vec<f64>) -> Self {
        cutoffs.retain(|c| !c.is_nan());
        cutoffs.sort_by(f64::total_cmp);
        Thresholds(cutoffs)
    }

    /// The cut-offs, ascending.
    pub fn cutoffs(&self) -> &[f64] {
        &self.0
    }

    /// Number of cut-offs strictly below |t|. NaN earns no stars.
    pub fn stars(&self, t: f64) -> usize {
        let t = t.abs();
        self.0.iter().take_while(|&&c| t > c).count()
    }
}

impl From<Vec<f64>> for Thresholds {
    fn from(cutoffs: Vec<f64>) -> Self {
        Thresholds::new(cutoffs)
    }
}

impl From<Thresholds> for Vec<f64> {
    fn from(thresholds: Thresholds) -> Self {
        thresholds.0
    }
}

/// Superscript marker for a star count: `^{**}` for 2, empty for 0.
pub fn star_markup(count: usize) -> String {
    if count == 0 {
        String::new()
    } else {
        format!("^{{{}}}", "*".repeat(count))
    }
}
