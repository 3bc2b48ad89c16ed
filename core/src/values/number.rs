use core::cmp::Ordering;
use core::fmt;

/// Largest magnitude below which every whole `f64` is exactly an integer.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

/// A double-precision number, optionally flagged as integral.
///
/// The flag only affects rendering: arithmetic always happens on the `f64`.
/// Equality and ordering ignore it.
#[derive(Debug, Clone, Copy)]
pub struct Number {
    value: f64,
    integral: bool,
}

impl Number {
    pub fn float(value: f64) -> Self {
        Self {
            value,
            integral: false,
        }
    }

    pub fn int(value: i64) -> Self {
        Self {
            value: value as f64,
            integral: true,
        }
    }

    /// Builds a number from literal source text and its parsed value.
    ///
    /// Literals without a `.` or exponent that denote a whole number are
    /// integral.
    pub fn from_literal(text: &str, value: f64) -> Self {
        let integral = !text.contains(['.', 'e', 'E']) && is_whole(value);
        Self { value, integral }
    }

    /// Result of an arithmetic operation: integral only when every operand
    /// was and the result is still whole.
    pub fn computed(value: f64, operands_integral: bool) -> Self {
        Self {
            value,
            integral: operands_integral && is_whole(value),
        }
    }

    pub fn value(self) -> f64 {
        self.value
    }

    pub fn is_integral(self) -> bool {
        self.integral
    }

    pub fn as_int(self) -> Option<i64> {
        self.integral.then_some(self.value as i64)
    }
}

fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::float(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::int(value)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_int() {
            Some(int) => write!(f, "{}", int),
            None => write!(f, "{}", self.value),
        }
    }
}
