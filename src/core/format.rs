//! Pure arithmetic and display formatting.
//!
//! Everything here is deterministic and locale independent: the same
//! input always renders to the same string. Rounding shifts the decimal
//! point through the textual exponent instead of multiplying by a power
//! of ten, so values such as `1.005` round the way they read.

use super::error::CalcError;
use super::event::Operator;
use serde::{Deserialize, Serialize};

/// Literal shown whenever a value cannot be rendered.
pub const ERROR_DISPLAY: &str = "Error";

pub const DEFAULT_DECIMAL_PLACES: u32 = 10;
pub const DEFAULT_MAX_DISPLAY_LEN: usize = 14;
pub const DEFAULT_EXPONENT_DIGITS: usize = 6;

/// Apply a binary operator to two operands.
///
/// Division by an exact zero (either sign) is reported as
/// [`CalcError::DivisionByZero`]; every other case is plain IEEE-754
/// arithmetic.
///
/// # Example
///
/// ```rust
/// use tally::core::{compute, CalcError, Operator};
///
/// assert_eq!(compute(2.0, 3.0, Operator::Add), Ok(5.0));
/// assert_eq!(compute(5.0, 0.0, Operator::Divide), Err(CalcError::DivisionByZero));
/// ```
pub fn compute(a: f64, b: f64, op: Operator) -> Result<f64, CalcError> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Subtract => Ok(a - b),
        Operator::Multiply => Ok(a * b),
        Operator::Divide if b == 0.0 => Err(CalcError::DivisionByZero),
        Operator::Divide => Ok(a / b),
    }
}

/// Render a number with the default display profile.
///
/// # Example
///
/// ```rust
/// use tally::core::format_number;
///
/// assert_eq!(format_number(0.1 + 0.2), "0.3");
/// assert_eq!(format_number(f64::NAN), "Error");
/// assert_eq!(format_number(123_456_789_012_345.0), "1.234568e+14");
/// ```
pub fn format_number(n: f64) -> String {
    Formatter::default().format(n)
}

/// Map a raw operator code to its display glyph.
///
/// Codes outside `+ - * /` are returned unchanged.
pub fn symbol_for_op(code: &str) -> &str {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Operator::try_from(c).map_or(code, |op| op.symbol()),
        _ => code,
    }
}

/// Round half away from zero to `places` decimal places.
///
/// The shift is done on the shortest decimal representation of `value`,
/// so `round_to(1.005, 2)` is `1.01` even though `1.005 * 100.0` is
/// `100.49999999999999`.
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = places as i32;
    let shifted = shift_decimal(value, places);
    if !shifted.is_finite() {
        return value;
    }
    shift_decimal(shifted.round(), -places)
}

fn shift_decimal(value: f64, by: i32) -> f64 {
    let repr = format!("{value:e}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return value;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value;
    };
    format!("{mantissa}e{}", exponent + by)
        .parse()
        .unwrap_or(value)
}

/// Parse the longest numeric prefix of a display string.
///
/// Display text is always built by the calculator itself, but it can be
/// mid-edit: `"12."` or an exponent with its digits deleted (`"1.5e-"`)
/// still read as the number they start with. Returns `None` when no
/// prefix is numeric, e.g. for `"Error"`.
pub fn parse_display(text: &str) -> Option<f64> {
    let text = text.trim_start();
    (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|value| !value.is_nan())
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

/// Display profile for numeric values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatter {
    /// Fractional digits kept after rounding.
    pub decimal_places: u32,
    /// Longest fixed-notation string (sign excluded) before switching to
    /// exponential notation.
    pub max_display_len: usize,
    /// Mantissa fraction digits in exponential notation.
    pub exponent_digits: usize,
}

impl Default for Formatter {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            max_display_len: DEFAULT_MAX_DISPLAY_LEN,
            exponent_digits: DEFAULT_EXPONENT_DIGITS,
        }
    }
}

impl Formatter {
    /// Render `n` as a canonical display string.
    ///
    /// Non-finite values render as [`ERROR_DISPLAY`].
    pub fn format(&self, n: f64) -> String {
        if !n.is_finite() {
            return ERROR_DISPLAY.to_string();
        }

        let mut rounded = round_to(n, self.decimal_places);
        if rounded == 0.0 {
            // -0.0 compares equal; render it without a sign
            rounded = 0.0;
        }

        let fixed = format!("{:.*}", self.decimal_places as usize, rounded);
        let fixed = trim_fraction(&fixed);
        let unsigned = fixed.strip_prefix('-').unwrap_or(fixed);
        if unsigned.len() <= self.max_display_len {
            return fixed.to_string();
        }

        self.exponential(rounded)
    }

    fn exponential(&self, value: f64) -> String {
        let repr = format!("{:.*e}", self.exponent_digits, value);
        let Some((mantissa, exponent)) = repr.split_once('e') else {
            return repr;
        };
        let mantissa = trim_fraction(mantissa);
        match exponent.strip_prefix('-') {
            Some(magnitude) => format!("{mantissa}e-{magnitude}"),
            None => format!("{mantissa}e+{exponent}"),
        }
    }
}
