//! Overflow-checked decimal steps.
//!
//! `Decimal`'s operators panic on overflow; every step of the pipeline goes
//! through these instead and names the quantity it was computing.

use rust_decimal::Decimal;

use super::error::CalculationError;

pub(crate) fn mul(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_mul(b).ok_or(CalculationError::Overflow(quantity))
}

pub(crate) fn add(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::Overflow(quantity))
}

pub(crate) fn sub(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_sub(b).ok_or(CalculationError::Overflow(quantity))
}

/// Callers guarantee a non-zero divisor.
pub(crate) fn div(
    a: Decimal,
    b: Decimal,
    quantity: &'static str,
) -> Result<Decimal, CalculationError> {
    a.checked_div(b).ok_or(CalculationError::Overflow(quantity))
}

/// `a × b / 100`.
pub(crate) fn pct_of(
    a: Decimal,
    pct: Decimal,
    quantity: &'static str,
) -> Result<Decimal, CalculationError> {
    div(mul(a, pct, quantity)?, Decimal::ONE_HUNDRED, quantity)
}
