//! Options controlling how tables are encoded.

use serde::{Deserialize, Serialize};

use crate::format::{FloatFormat, Thresholds};

/// Options for encoding tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Number format for point estimates, errors and bounds
    pub float_format: FloatFormat,
    /// Wrap numeric entries in `\(` ... `\)`
    pub math_delimiters: bool,
    /// Emit the heading block
    pub heading: bool,
    /// |t| cut-offs for significance stars
    pub thresholds: Thresholds,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            float_format: FloatFormat::default(),
            math_delimiters: true,
            heading: true,
            thresholds: Thresholds::default(),
        }
    }
}

impl EncodeOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number format.
    pub fn float_format(mut self, format: FloatFormat) -> Self {
        self.float_format = format;
        self
    }

    /// Turn math delimiters on or off.
    pub fn math_delimiters(mut self, enabled: bool) -> Self {
        self.math_delimiters = enabled;
        self
    }

    /// Plain numbers: no math delimiters.
    pub fn plain(self) -> Self {
        self.math_delimiters(false)
    }

    /// Turn the heading block on or off.
    pub fn heading(mut self, enabled: bool) -> Self {
        self.heading = enabled;
        self
    }

    /// Set the significance cut-offs.
    pub fn thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}
