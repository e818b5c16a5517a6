use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Currency value with two-decimal display semantics.
///
/// Contributions are accumulated with plain floating point addition; rounding
/// only happens when the value is presented.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("'{0}' is not a number")]
    NotANumber(String),
    #[error("'{0}' is not a finite amount")]
    NotFinite(String),
}

impl Amount {
    pub const ZERO: Amount = Amount(0.0);

    pub const fn new(value: f64) -> Self {
        Amount(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }

    /// Split into whole units and cents, rounding the cents half-up.
    pub fn split(self) -> (i64, i64) {
        let whole = self.0.trunc();
        let cents = ((self.0 - whole) * 100.0).round();
        (whole as i64, cents as i64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| AmountError::NotANumber(trimmed.to_string()))?;
        if !value.is_finite() {
            return Err(AmountError::NotFinite(trimmed.to_string()));
        }
        Ok(Amount(value))
    }
}

impl std::ops::Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Amount(self.0 - rhs.0)
    }
}

impl std::ops::AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl std::ops::SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}
