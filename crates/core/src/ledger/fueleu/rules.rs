//! Pure pre-commit checks for FuelEU balance mutations.
//!
//! Every function takes the loaded state, returns the new state with bumped
//! versions, and never touches storage. A rejected mutation returns an error
//! and no state.

use tidemark_shared::types::{GramsCo2e, PoolId};

use super::types::{FuelEuPeriodBalance, PeriodStatus};
use crate::ledger::error::LedgerError;
use crate::ledger::pool::{AllocationType, PoolAllocation};
use crate::policy::CompliancePolicy;

fn ensure_open(balance: &FuelEuPeriodBalance) -> Result<(), LedgerError> {
    if balance.is_closed() {
        return Err(LedgerError::PeriodClosed {
            vessel_id: balance.vessel_id,
            period: balance.period_year,
        });
    }
    Ok(())
}

fn ensure_positive(amount: GramsCo2e) -> Result<(), LedgerError> {
    if !amount.is_positive() {
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    Ok(())
}

fn ensure_covers(balance: &FuelEuPeriodBalance, amount: GramsCo2e) -> Result<(), LedgerError> {
    if balance.balance_gco2e < amount {
        return Err(LedgerError::InsufficientBalance {
            available: balance.balance_gco2e,
            requested: amount,
        });
    }
    Ok(())
}

fn next_version(balance: &FuelEuPeriodBalance) -> FuelEuPeriodBalance {
    FuelEuPeriodBalance {
        version: balance.version + 1,
        ..balance.clone()
    }
}

/// Books a calculated compliance balance.
///
/// # Errors
///
/// `PeriodClosed`, `NonPositiveAmount` for zero, or `AmountOverflow`.
pub fn record_compliance(
    current: &FuelEuPeriodBalance,
    amount: GramsCo2e,
) -> Result<FuelEuPeriodBalance, LedgerError> {
    ensure_open(current)?;
    if amount.is_zero() {
        return Err(LedgerError::NonPositiveAmount(amount));
    }

    let mut updated = next_version(current);
    if amount.is_positive() {
        updated.credit(amount)?;
    } else {
        updated.debit(amount.checked_abs().ok_or(LedgerError::AmountOverflow)?)?;
    }
    Ok(updated)
}

/// Moves `amount` of surplus from `current` into `target`.
///
/// Returns the updated (current, target) pair.
///
/// # Errors
///
/// `NonPositiveAmount`, `PeriodClosed`, `BankingHorizonExceeded`,
/// `InsufficientBalance`, or `AmountOverflow`.
pub fn bank(
    policy: &CompliancePolicy,
    current: &FuelEuPeriodBalance,
    target: &FuelEuPeriodBalance,
    amount: GramsCo2e,
) -> Result<(FuelEuPeriodBalance, FuelEuPeriodBalance), LedgerError> {
    ensure_positive(amount)?;
    ensure_open(current)?;

    let horizon = policy.banking_horizon_years();
    let ahead = i64::from(target.period_year) - i64::from(current.period_year);
    if ahead <= 0 || ahead > i64::from(horizon) {
        return Err(LedgerError::BankingHorizonExceeded {
            current: current.period_year,
            target: target.period_year,
            horizon,
        });
    }
    ensure_open(target)?;
    ensure_covers(current, amount)?;

    let mut source = next_version(current);
    source.debit(amount)?;
    let mut destination = next_version(target);
    destination.credit(amount)?;
    Ok((source, destination))
}

/// Takes an advance of `amount` against `from_period`.
///
/// # Errors
///
/// `NonPositiveAmount`, `PeriodClosed`, `BorrowingHorizonExceeded`,
/// `PooledVesselBorrow`, or `AmountOverflow`.
pub fn borrow(
    policy: &CompliancePolicy,
    current: &FuelEuPeriodBalance,
    from_period: i32,
    allocation: Option<&PoolAllocation>,
    amount: GramsCo2e,
) -> Result<FuelEuPeriodBalance, LedgerError> {
    ensure_positive(amount)?;
    ensure_open(current)?;

    let horizon = policy.borrowing_horizon_years();
    let ahead = i64::from(from_period) - i64::from(current.period_year);
    if ahead <= 0 || ahead > i64::from(horizon) {
        return Err(LedgerError::BorrowingHorizonExceeded {
            current: current.period_year,
            from: from_period,
            horizon,
        });
    }
    if allocation.is_some() || current.pool_id.is_some() {
        return Err(LedgerError::PooledVesselBorrow {
            vessel_id: current.vessel_id,
            period: current.period_year,
        });
    }

    let mut updated = next_version(current);
    updated.debit(amount)?;
    Ok(updated)
}

/// Joins `pool_id` for the current period.
///
/// Outflow amounts are stored negative, inflow amounts positive, whatever
/// sign the caller used.
///
/// # Errors
///
/// `NonPositiveAmount` for zero, `PeriodClosed`, `DuplicatePoolAllocation`,
/// `InsufficientBalance` for an uncovered outflow, or `AmountOverflow`.
pub fn join_pool(
    current: &FuelEuPeriodBalance,
    existing: Option<&PoolAllocation>,
    pool_id: PoolId,
    allocation_type: AllocationType,
    amount: GramsCo2e,
) -> Result<(FuelEuPeriodBalance, PoolAllocation), LedgerError> {
    let magnitude = amount.checked_abs().ok_or(LedgerError::AmountOverflow)?;
    ensure_positive(magnitude)?;
    ensure_open(current)?;

    if existing.is_some() || current.pool_id.is_some() {
        return Err(LedgerError::DuplicatePoolAllocation {
            vessel_id: current.vessel_id,
            period: current.period_year,
        });
    }

    let signed = match allocation_type {
        AllocationType::Inflow => magnitude,
        AllocationType::Outflow => {
            ensure_covers(current, magnitude)?;
            GramsCo2e::ZERO
                .checked_sub(magnitude)
                .ok_or(LedgerError::AmountOverflow)?
        }
    };

    let mut updated = next_version(current);
    updated.pool_id = Some(pool_id);
    let allocation = PoolAllocation {
        pool_id,
        vessel_id: current.vessel_id,
        period_year: current.period_year,
        allocation_type,
        amount_gco2e: signed,
    };
    Ok((updated, allocation))
}

/// Closes `current` and carries any surplus into `next`.
///
/// Returns the updated (closed, next) pair and the carried amount.
///
/// # Errors
///
/// `PeriodClosed` if either period is closed, `ClosureDeficit` for a
/// negative balance, or `AmountOverflow`.
pub fn close(
    current: &FuelEuPeriodBalance,
    next: &FuelEuPeriodBalance,
) -> Result<(FuelEuPeriodBalance, FuelEuPeriodBalance, GramsCo2e), LedgerError> {
    ensure_open(current)?;
    if current.balance_gco2e.is_negative() {
        return Err(LedgerError::ClosureDeficit {
            vessel_id: current.vessel_id,
            period: current.period_year,
            balance: current.balance_gco2e,
        });
    }
    ensure_open(next)?;

    let mut closed = next_version(current);
    closed.status = PeriodStatus::Closed;

    let carried = current.balance_gco2e;
    let mut opening = next.clone();
    if carried.is_positive() {
        opening = next_version(next);
        opening.credit(carried)?;
    }
    Ok((closed, opening, carried))
}
