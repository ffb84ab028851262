//! printf-style number formatting.
//!
//! A [`FloatFormat`] holds exactly one numeric placeholder, optionally
//! surrounded by literal text. Supported placeholder syntax:
//!
//! ```text
//! %[flags][width][.precision]conversion
//!
//! flags:       -  left-align      +  always sign
//!              ' ' space for sign  0  zero-pad
//! conversion:  f F  fixed          e E  exponent
//!              g G  shortest of f/e d i  integer (truncated)
//! ```
//!
//! `%%` is a literal percent sign.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::CellValue;
use crate::error::OrgtblError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed { upper: bool },
    Exponent { upper: bool },
    General { upper: bool },
    Integer,
}

impl Conversion {
    fn is_upper(self) -> bool {
        match self {
            Conversion::Fixed { upper }
            | Conversion::Exponent { upper }
            | Conversion::General { upper } => upper,
            Conversion::Integer => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    left_align: bool,
    plus: bool,
    space: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

/// A printf-style format with a single numeric placeholder, e.g. `%.2f`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FloatFormat {
    source: String,
    prefix: String,
    suffix: String,
    placeholder: Placeholder,
}

impl Default for FloatFormat {
    fn default() -> Self {
        FloatFormat {
            source: "%5.3f".to_string(),
            prefix: String::new(),
            suffix: String::new(),
            placeholder: Placeholder {
                left_align: false,
                plus: false,
                space: false,
                zero_pad: false,
                width: 5,
                precision: Some(3),
                conversion: Conversion::Fixed { upper: false },
            },
        }
    }
}

impl FloatFormat {
    /// Parse a format string.
    pub fn parse(format: &str) -> Result<Self> {
        let invalid = |message: &str| OrgtblError::InvalidFloatFormat {
            format: format.to_string(),
            message: message.to_string(),
        };

        let chars: Vec<char> = format.chars().collect();
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholder = None;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c != '%' {
                if placeholder.is_none() {
                    prefix.push(c);
                } else {
                    suffix.push(c);
                }
                i += 1;
                continue;
            }

            if chars.get(i + 1) == Some(&'%') {
                if placeholder.is_none() {
                    prefix.push('%');
                } else {
                    suffix.push('%');
                }
                i += 2;
                continue;
            }

            if placeholder.is_some() {
                return Err(invalid("more than one placeholder"));
            }

            let (parsed, next) = parse_placeholder(&chars, i + 1).map_err(|m| invalid(&m))?;
            placeholder = Some(parsed);
            i = next;
        }

        let placeholder = placeholder.ok_or_else(|| invalid("no numeric placeholder"))?;

        Ok(FloatFormat {
            source: format.to_string(),
            prefix,
            suffix,
            placeholder,
        })
    }

    /// The format string this was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Format a number.
    pub fn format_f64(&self, value: f64) -> String {
        let p = &self.placeholder;
        let upper = p.conversion.is_upper();
        let magnitude = value.abs();

        let (negative, body) = if value.is_nan() {
            (false, if upper { "NAN" } else { "nan" }.to_string())
        } else if value.is_infinite() {
            (value < 0.0, if upper { "INF" } else { "inf" }.to_string())
        } else {
            match p.conversion {
                Conversion::Fixed { .. } => (
                    value.is_sign_negative(),
                    format!("{:.*}", p.precision.unwrap_or(6), magnitude),
                ),
                Conversion::Exponent { upper } => (
                    value.is_sign_negative(),
                    exponent_body(magnitude, p.precision.unwrap_or(6), upper),
                ),
                Conversion::General { upper } => (
                    value.is_sign_negative(),
                    general_body(magnitude, p.precision.unwrap_or(6), upper),
                ),
                Conversion::Integer => (value.trunc() < 0.0, format!("{}", magnitude.trunc())),
            }
        };

        let sign = if negative {
            "-"
        } else if p.plus {
            "+"
        } else if p.space {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.chars().count();
        let fill = p.width.saturating_sub(len);
        let number = if fill == 0 {
            format!("{}{}", sign, body)
        } else if p.left_align {
            format!("{}{}{}", sign, body, " ".repeat(fill))
        } else if p.zero_pad && value.is_finite() {
            format!("{}{}{}", sign, "0".repeat(fill), body)
        } else {
            format!("{}{}{}", " ".repeat(fill), sign, body)
        };

        format!("{}{}{}", self.prefix, number, self.suffix)
    }

    /// Format a cell. Non-numeric cells fall back to their plain text.
    pub fn format_cell(&self, value: &CellValue) -> String {
        match value {
            CellValue::Number(n) => self.format_f64(*n),
            other => {
                log::debug!("'{}' is not numeric; using its plain form", other);
                other.to_string()
            }
        }
    }
}

/// Parse flags, width, precision and conversion starting just after `%`.
/// Returns the placeholder and the index after the conversion character.
fn parse_placeholder(chars: &[char], mut i: usize) -> std::result::Result<(Placeholder, usize), String> {
    let mut left_align = false;
    let mut plus = false;
    let mut space = false;
    let mut zero_pad = false;

    while let Some(&c) = chars.get(i) {
        match c {
            '-' => left_align = true,
            '+' => plus = true,
            ' ' => space = true,
            '0' => zero_pad = true,
            _ => break,
        }
        i += 1;
    }

    let mut width = 0usize;
    while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
        width = width * 10 + d as usize;
        i += 1;
    }

    let mut precision = None;
    if chars.get(i) == Some(&'.') {
        i += 1;
        let mut digits = 0usize;
        while let Some(d) = chars.get(i).and_then(|c| c.to_digit(10)) {
            digits = digits * 10 + d as usize;
            i += 1;
        }
        precision = Some(digits);
    }

    let conversion = match chars.get(i) {
        Some('f') => Conversion::Fixed { upper: false },
        Some('F') => Conversion::Fixed { upper: true },
        Some('e') => Conversion::Exponent { upper: false },
        Some('E') => Conversion::Exponent { upper: true },
        Some('g') => Conversion::General { upper: false },
        Some('G') => Conversion::General { upper: true },
        Some('d') | Some('i') => Conversion::Integer,
        Some(c) => return Err(format!("unsupported conversion '{}'", c)),
        None => return Err("incomplete placeholder".to_string()),
    };

    Ok((
        Placeholder {
            left_align,
            plus,
            space,
            zero_pad,
            width,
            precision,
            conversion,
        },
        i + 1,
    ))
}

/// `1.5e2` -> `1.50e+02` style exponent formatting of a non-negative number.
fn exponent_body(magnitude: f64, precision: usize, upper: bool) -> String {
    let raw = format!("{:.*e}", precision, magnitude);
    let (mantissa, exponent) = split_exponent(&raw);
    join_exponent(mantissa, exponent, upper)
}

/// `%g`: exponent form for very small or large magnitudes, fixed otherwise,
/// with trailing zeros removed.
fn general_body(magnitude: f64, precision: usize, upper: bool) -> String {
    let precision = precision.max(1);
    let raw = format!("{:.*e}", precision - 1, magnitude);
    let (mantissa, exponent) = split_exponent(&raw);

    if exponent < -4 || exponent >= precision as i32 {
        join_exponent(strip_zeros(mantissa), exponent, upper)
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        strip_zeros(&format!("{:.*}", decimals, magnitude)).to_string()
    }
}

fn split_exponent(raw: &str) -> (&str, i32) {
    match raw.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse().unwrap_or(0)),
        None => (raw, 0),
    }
}

fn join_exponent(mantissa: &str, exponent: i32, upper: bool) -> String {
    format!(
        "{}{}{}{:02}",
        mantissa,
        if upper { 'E' } else { 'e' },
        if exponent < 0 { '-' } else { '+' },
        exponent.abs()
    )
}

fn strip_zeros(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

impl fmt::Display for FloatFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for FloatFormat {
    type Err = OrgtblError;

    fn from_str(s: &str) -> Result<Self> {
        FloatFormat::parse(s)
    }
}

impl TryFrom<String> for FloatFormat {
    type Error = OrgtblError;

    fn try_from(s: String) -> Result<Self> {
        FloatFormat::parse(&s)
    }
}

impl From<FloatFormat> for String {
    fn from(format: FloatFormat) -> Self {
        format.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(format: &str, value: f64) -> String {
        FloatFormat::parse(format).unwrap().format_f64(value)
    }

    #[test]
    fn test_default_matches_parsed() {
        assert_eq!(FloatFormat::default(), FloatFormat::parse("%5.3f").unwrap());
        assert_eq!(FloatFormat::default().format_f64(0.5), "0.500");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fmt("%.1f", 1.0), "1.0");
        assert_eq!(fmt("%.2f", 0.5), "0.50");
        assert_eq!(fmt("%.2f", -1.234), "-1.23");
        assert_eq!(fmt("%f", 1.5), "1.500000");
        assert_eq!(fmt("%.0f", 2.4), "2");
    }

    #[test]
    fn test_width_and_flags() {
        assert_eq!(fmt("%8.3f", 1.5), "   1.500");
        assert_eq!(fmt("%-8.3f", 1.5), "1.500   ");
        assert_eq!(fmt("%08.3f", -1.5), "-001.500");
        assert_eq!(fmt("%+.1f", 1.5), "+1.5");
        assert_eq!(fmt("% .1f", 1.5), " 1.5");
        assert_eq!(fmt("%3.1f", 123.24), "123.2");
    }

    #[test]
    fn test_exponent() {
        assert_eq!(fmt("%.2e", 150.0), "1.50e+02");
        assert_eq!(fmt("%.1E", 0.00123), "1.2E-03");
        assert_eq!(fmt("%e", 0.0), "0.000000e+00");
    }

    #[test]
    fn test_general() {
        assert_eq!(fmt("%g", 0.5), "0.5");
        assert_eq!(fmt("%g", 100000.0), "100000");
        assert_eq!(fmt("%g", 1000000.0), "1e+06");
        assert_eq!(fmt("%g", 0.0001), "0.0001");
        assert_eq!(fmt("%g", 0.00001), "1e-05");
        assert_eq!(fmt("%.3g", 3.14159), "3.14");
        assert_eq!(fmt("%g", 0.0), "0");
        assert_eq!(fmt("%G", 1.5e-10), "1.5E-10");
    }

    #[test]
    fn test_integer() {
        assert_eq!(fmt("%d", 2.7), "2");
        assert_eq!(fmt("%d", -2.7), "-2");
        assert_eq!(fmt("%d", -0.4), "0");
        assert_eq!(fmt("%5d", 42.0), "   42");
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(fmt("$%.2f", 3.0), "$3.00");
        assert_eq!(fmt("%.0f%%", 45.0), "45%");
        assert_eq!(fmt("%%%.1f", 1.0), "%1.0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(fmt("%.2f", f64::INFINITY), "inf");
        assert_eq!(fmt("%.2f", f64::NEG_INFINITY), "-inf");
        assert_eq!(fmt("%.2F", f64::INFINITY), "INF");
        assert_eq!(fmt("%06.2f", f64::INFINITY), "   inf");
    }

    #[test]
    fn test_invalid_formats() {
        for bad in ["", "abc", "%", "%.2", "%s", "%.2f %.2f", "%#x"] {
            let err = FloatFormat::parse(bad).unwrap_err();
            assert!(
                matches!(err, OrgtblError::InvalidFloatFormat { .. }),
                "expected error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_format_cell_fallback() {
        let format = FloatFormat::parse("%.1f").unwrap();
        assert_eq!(format.format_cell(&CellValue::from(2.0)), "2.0");
        assert_eq!(format.format_cell(&CellValue::from("n/a")), "n/a");
    }

    #[test]
    fn test_serde_as_string() {
        let format: FloatFormat = serde_json::from_str(r#""%.2f""#).unwrap();
        assert_eq!(format.as_str(), "%.2f");
        assert_eq!(serde_json::to_string(&format).unwrap(), r#""%.2f""#);
        assert!(serde_json::from_str::<FloatFormat>(r#""%q""#).is_err());
    }
}
