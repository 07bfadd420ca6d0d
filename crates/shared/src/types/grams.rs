//! Integer gram quantities for ledger amounts.
//!
//! CRITICAL: Never use floating-point for ledger amounts.
//! FuelEU balances accumulate many small operations over multi-year horizons,
//! so they are held as whole grams CO2e in an `i64` and every arithmetic step
//! is overflow-checked.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A signed amount of CO2-equivalent, in whole grams.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GramsCo2e(i64);

impl GramsCo2e {
    /// Zero grams.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from whole grams.
    #[must_use]
    pub const fn new(grams: i64) -> Self {
        Self(grams)
    }

    /// Converts a decimal gram figure to whole grams using Banker's Rounding.
    ///
    /// Returns `None` if the value does not fit in an `i64`.
    #[must_use]
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        value
            .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
            .to_i64()
            .map(Self)
    }

    /// Returns the raw gram count.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Returns the amount as a decimal.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked subtraction. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Absolute value. Returns `None` for `i64::MIN`.
    #[must_use]
    pub const fn checked_abs(self) -> Option<Self> {
        match self.0.checked_abs() {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<i64> for GramsCo2e {
    fn from(grams: i64) -> Self {
        Self(grams)
    }
}

impl std::fmt::Display for GramsCo2e {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} gCO2e", self.0)
    }
}
