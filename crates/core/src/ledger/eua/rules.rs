//! Pure pre-commit checks for allowance operations.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::types::{EuaOperation, EuaOperationKind, EuaOperationRequest, EuaPeriodSummary};
use crate::ledger::error::LedgerError;
use crate::policy::CompliancePolicy;

/// Allowances that must be surrendered for `emissions_t` at `coverage_rate`.
///
/// `ceil(emissions_t × coverage_rate)`. Returns `None` if the product does
/// not fit an `i64`.
#[must_use]
pub fn required_euas(emissions_t: Decimal, coverage_rate: Decimal) -> Option<i64> {
    emissions_t.checked_mul(coverage_rate)?.ceil().to_i64()
}

/// Checks `request` against the period's history and returns the signed
/// count to store.
///
/// # Errors
///
/// Returns the rule the request violates.
pub fn check_operation(
    history: &[EuaOperation],
    period_year: i32,
    request: &EuaOperationRequest,
    policy: &CompliancePolicy,
) -> Result<i64, LedgerError> {
    let count = request.euas_count;
    if count < 0 {
        return Err(LedgerError::NegativeCount(count));
    }

    match request.kind {
        EuaOperationKind::Forecast => Ok(count),
        EuaOperationKind::Hedge => {
            if !request.price_per_eua.is_some_and(|p| p > Decimal::ZERO) {
                return Err(LedgerError::MissingHedgePrice);
            }
            if !history.iter().any(|op| op.kind == EuaOperationKind::Forecast) {
                return Err(LedgerError::OutOfOrderOperation {
                    operation: EuaOperationKind::Hedge,
                    reason: "no FORECAST in period",
                });
            }
            // the period's hedge cost must stay representable
            let price = request.price_per_eua.unwrap_or_default();
            let total = hedge_cost(history)?;
            price
                .checked_mul(Decimal::from(count))
                .and_then(|cost| total.checked_add(cost))
                .ok_or(LedgerError::AmountOverflow)?;
            Ok(count)
        }
        EuaOperationKind::Surrender => {
            let emissions = request
                .realized_emissions_t
                .filter(|e| *e > Decimal::ZERO)
                .ok_or(LedgerError::NoRealizedEmissions)?;
            let rate = policy
                .coverage_rate(period_year)
                .ok_or(LedgerError::CoverageRateUnavailable(period_year))?;
            let required = required_euas(emissions, rate).ok_or(LedgerError::AmountOverflow)?;
            if count == 0 || count < required {
                return Err(LedgerError::InsufficientSurrender {
                    requested: count,
                    required,
                });
            }
            Ok(-count)
        }
        EuaOperationKind::Reconcile => {
            let magnitude = count.unsigned_abs();
            let entries_of = |kind: EuaOperationKind| {
                history
                    .iter()
                    .filter(|op| op.kind == kind && op.euas_count.unsigned_abs() == magnitude)
                    .count()
            };
            // each SURRENDER is reconciled at most once
            if entries_of(EuaOperationKind::Surrender) <= entries_of(EuaOperationKind::Reconcile) {
                return Err(LedgerError::OutOfOrderOperation {
                    operation: EuaOperationKind::Reconcile,
                    reason: "no unreconciled SURRENDER of equal magnitude in period",
                });
            }
            Ok(count)
        }
    }
}

/// Summed `price × count` over the period's hedges.
fn hedge_cost(history: &[EuaOperation]) -> Result<Decimal, LedgerError> {
    history
        .iter()
        .filter(|op| op.kind == EuaOperationKind::Hedge)
        .filter_map(|op| op.price_per_eua.map(|price| (price, op.euas_count)))
        .try_fold(Decimal::ZERO, |total, (price, count)| {
            price
                .checked_mul(Decimal::from(count))
                .and_then(|cost| total.checked_add(cost))
                .ok_or(LedgerError::AmountOverflow)
        })
}

/// Totals for one period's history.
///
/// # Errors
///
/// Returns `LedgerError::AmountOverflow` if the hedge cost is not
/// representable.
pub fn summarize(history: &[EuaOperation]) -> Result<EuaPeriodSummary, LedgerError> {
    let mut summary = EuaPeriodSummary {
        operation_count: history.len(),
        total_hedge_cost: hedge_cost(history)?,
        ..EuaPeriodSummary::default()
    };

    for op in history {
        match op.kind {
            EuaOperationKind::Forecast => {
                summary.forecast_euas = summary.forecast_euas.saturating_add(op.euas_count);
            }
            EuaOperationKind::Hedge => {
                summary.hedged_euas = summary.hedged_euas.saturating_add(op.euas_count);
            }
            EuaOperationKind::Surrender => {
                summary.surrendered_euas =
                    summary.surrendered_euas.saturating_add(op.euas_count.saturating_abs());
            }
            EuaOperationKind::Reconcile => {
                summary.reconciled_euas = summary.reconciled_euas.saturating_add(op.euas_count);
            }
        }
    }

    if summary.hedged_euas > 0 {
        summary.average_hedge_price = summary
            .total_hedge_cost
            .checked_div(Decimal::from(summary.hedged_euas));
    }
    if summary.forecast_euas > 0 {
        let forecast = Decimal::from(summary.forecast_euas);
        let miss = (Decimal::from(summary.surrendered_euas) - forecast).abs() / forecast;
        summary.forecast_accuracy = Some((Decimal::ONE - miss).clamp(Decimal::ZERO, Decimal::ONE));
    }

    Ok(summary)
}
