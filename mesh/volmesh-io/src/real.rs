//! `%g`-style formatting of real numbers with shortest round-trip digits.
//!
//! Text mesh formats are traditionally written with the C `%lg`
//! conversion. [`Real`] keeps its look (integral values without a decimal
//! point, scientific notation for very large and very small magnitudes,
//! `e±dd` exponents) but always emits the shortest digit string that
//! parses back to the same `f64`, so no precision is lost.

use std::fmt;

/// Decimal exponents below this switch to scientific notation.
const MIN_FIXED_EXPONENT: i32 = -4;

/// Decimal exponents at or above this switch to scientific notation.
///
/// An `f64` carries at most 17 significant decimal digits.
const MAX_FIXED_EXPONENT: i32 = 17;

/// Display adapter for an `f64` in `%g` style with round-trip precision.
///
/// # Example
///
/// ```
/// use volmesh_io::Real;
///
/// assert_eq!(Real(2.0).to_string(), "2");
/// assert_eq!(Real(1.5).to_string(), "1.5");
/// assert_eq!(Real(0.1).to_string(), "0.1");
/// assert_eq!(Real(1.0e-7).to_string(), "1e-07");
/// assert_eq!(Real(6.02214076e23).to_string(), "6.02214076e+23");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Real(pub f64);

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;

        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
        }
        if v == 0.0 {
            return f.write_str(if v.is_sign_negative() { "-0" } else { "0" });
        }

        // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-7".
        let sci = format!("{v:e}");
        let Some((mantissa, exponent)) = sci.split_once('e') else {
            return write!(f, "{v}");
        };
        let Ok(exponent) = exponent.parse::<i32>() else {
            return write!(f, "{v}");
        };

        if (MIN_FIXED_EXPONENT..MAX_FIXED_EXPONENT).contains(&exponent) {
            write!(f, "{v}")
        } else {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
    }
}
