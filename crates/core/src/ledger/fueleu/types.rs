//! FuelEU balance ledger types.

use serde::{Deserialize, Serialize};
use tidemark_shared::types::{GramsCo2e, PoolId, VesselId};

use crate::ledger::error::LedgerError;
use crate::ledger::pool::AllocationType;

/// Whether a period still accepts mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    /// Accepts mutations.
    #[default]
    Open,
    /// Final; immutable.
    Closed,
}

/// Compliance position of one vessel in one period.
///
/// `balance_gco2e == banked_gco2e - borrowed_gco2e` after every mutation;
/// both components only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelEuPeriodBalance {
    /// The vessel.
    pub vessel_id: VesselId,
    /// The period.
    pub period_year: i32,
    /// Credits received (surpluses and banked carry-over).
    pub banked_gco2e: GramsCo2e,
    /// Debits taken (deficits, borrowings and banked outflows).
    pub borrowed_gco2e: GramsCo2e,
    /// Banked minus borrowed.
    pub balance_gco2e: GramsCo2e,
    /// Pool the vessel joined for the period.
    pub pool_id: Option<PoolId>,
    /// Open or closed.
    pub status: PeriodStatus,
    /// Optimistic concurrency counter; 0 means never written.
    pub version: u64,
}

impl FuelEuPeriodBalance {
    /// The empty, unwritten balance of a period.
    #[must_use]
    pub fn opening(vessel_id: VesselId, period_year: i32) -> Self {
        Self {
            vessel_id,
            period_year,
            banked_gco2e: GramsCo2e::ZERO,
            borrowed_gco2e: GramsCo2e::ZERO,
            balance_gco2e: GramsCo2e::ZERO,
            pool_id: None,
            status: PeriodStatus::Open,
            version: 0,
        }
    }

    /// True once the period is closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == PeriodStatus::Closed
    }

    pub(crate) fn credit(&mut self, amount: GramsCo2e) -> Result<(), LedgerError> {
        self.banked_gco2e = self
            .banked_gco2e
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        self.rebalance()
    }

    pub(crate) fn debit(&mut self, amount: GramsCo2e) -> Result<(), LedgerError> {
        self.borrowed_gco2e = self
            .borrowed_gco2e
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        self.rebalance()
    }

    fn rebalance(&mut self) -> Result<(), LedgerError> {
        self.balance_gco2e = self
            .banked_gco2e
            .checked_sub(self.borrowed_gco2e)
            .ok_or(LedgerError::AmountOverflow)?;
        Ok(())
    }
}

/// A mutation of a vessel's period balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelEuOperation {
    /// Books a calculated compliance balance: surplus credits, deficit debits.
    RecordCompliance {
        /// Signed compliance balance.
        amount: GramsCo2e,
    },
    /// Moves surplus into a later period.
    Bank {
        /// Amount to move.
        amount: GramsCo2e,
        /// Receiving period.
        target_period: i32,
    },
    /// Takes an advance against the next period.
    Borrow {
        /// Amount to borrow.
        amount: GramsCo2e,
        /// Period the advance is drawn from.
        from_period: i32,
    },
    /// Joins a compliance pool for the period.
    JoinPool {
        /// The pool.
        pool_id: PoolId,
        /// Direction of the contribution.
        allocation_type: AllocationType,
        /// Amount contributed or received; the sign follows `allocation_type`.
        amount: GramsCo2e,
    },
}

impl FuelEuOperation {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RecordCompliance { .. } => "RECORD_COMPLIANCE",
            Self::Bank { .. } => "BANK",
            Self::Borrow { .. } => "BORROW",
            Self::JoinPool { .. } => "JOIN_POOL",
        }
    }
}

/// Result of closing a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodClosure {
    /// The closed period's final state.
    pub closed: FuelEuPeriodBalance,
    /// Surplus credited to the next period.
    pub carried_forward_gco2e: GramsCo2e,
    /// The next period after the carry-over.
    pub next: FuelEuPeriodBalance,
}
