use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Not a monetary amount: '{0}'")]
    Invalid(String),
}

/// A monetary amount held as a two-decimal fixed-point value.
///
/// Serialises as a plain JSON number so extracted receipts drop straight
/// into a record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, 2))
    }

    pub fn from_decimal(decimal: Decimal) -> Self {
        Money(decimal.round_dp(2))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Distance between two amounts; `None` if it does not fit in a `Decimal`.
    pub fn checked_abs_diff(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(|d| Money(d.abs()))
    }
}

/// Parses amounts the way receipts print them: `12.34`, `12,34`, `$12.34`.
impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches(['$', '€', '£']).trim();
        let normalized = trimmed.replace(',', ".");
        Decimal::from_str(&normalized)
            .map(Money::from_decimal)
            .map_err(|_| MoneyError::Invalid(s.to_string()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}
