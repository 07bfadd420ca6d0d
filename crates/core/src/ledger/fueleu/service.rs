//! FuelEU balance ledger service.

use std::sync::Arc;

use tidemark_shared::config::LedgerConfig;
use tidemark_shared::types::VesselId;

use super::repository::{BalanceWrite, FuelEuCommit, FuelEuRepository};
use super::rules;
use super::types::{FuelEuOperation, FuelEuPeriodBalance, PeriodClosure};
use crate::ledger::error::LedgerError;
use crate::ledger::pool::PoolAllocationRegistry;
use crate::ledger::retry::commit_with_retries;
use crate::policy::CompliancePolicy;

/// Per (vessel, period) compliance balance ledger with banking, borrowing
/// and pooling.
#[derive(Debug)]
pub struct FuelEuLedger<R> {
    repository: R,
    policy: Arc<CompliancePolicy>,
    max_commit_retries: u32,
}

fn write(loaded: &FuelEuPeriodBalance, updated: FuelEuPeriodBalance) -> BalanceWrite {
    BalanceWrite {
        expected_version: loaded.version,
        balance: updated,
    }
}

impl<R: FuelEuRepository> FuelEuLedger<R> {
    /// Creates a ledger over `repository`.
    #[must_use]
    pub fn new(repository: R, policy: Arc<CompliancePolicy>, config: &LedgerConfig) -> Self {
        Self {
            repository,
            policy,
            max_commit_retries: config.max_commit_retries,
        }
    }

    /// Current balance of a period; an unwritten period reads as empty.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn balance(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<FuelEuPeriodBalance, LedgerError> {
        Ok(self
            .repository
            .balance(vessel_id, period_year)?
            .unwrap_or_else(|| FuelEuPeriodBalance::opening(vessel_id, period_year)))
    }

    /// Pool allocation queries over the same store.
    #[must_use]
    pub fn pools(&self) -> PoolAllocationRegistry<'_, R> {
        PoolAllocationRegistry::new(&self.repository)
    }

    /// Applies one mutation to the vessel's `period_year` balance.
    ///
    /// Returns the updated balance of `period_year`. A BANK also credits the
    /// target period in the same commit.
    ///
    /// # Errors
    ///
    /// Returns the violated rule, `ConcurrentModification` once retries are
    /// exhausted, or a storage error. Nothing is written on error.
    pub fn apply(
        &self,
        vessel_id: VesselId,
        period_year: i32,
        operation: FuelEuOperation,
    ) -> Result<FuelEuPeriodBalance, LedgerError> {
        let result = commit_with_retries(self.max_commit_retries, operation.name(), || {
            self.try_apply(vessel_id, period_year, &operation)
        });

        match &result {
            Ok(balance) => tracing::info!(
                vessel_id = %vessel_id,
                period_year,
                operation = operation.name(),
                balance_gco2e = balance.balance_gco2e.get(),
                version = balance.version,
                "FuelEU operation committed"
            ),
            Err(err) => tracing::warn!(
                vessel_id = %vessel_id,
                period_year,
                operation = operation.name(),
                code = err.error_code(),
                error = %err,
                "FuelEU operation rejected"
            ),
        }
        result
    }

    fn try_apply(
        &self,
        vessel_id: VesselId,
        period_year: i32,
        operation: &FuelEuOperation,
    ) -> Result<FuelEuPeriodBalance, LedgerError> {
        let current = self.balance(vessel_id, period_year)?;

        let (updated, commit) = match *operation {
            FuelEuOperation::RecordCompliance { amount } => {
                let updated = rules::record_compliance(&current, amount)?;
                let commit = FuelEuCommit {
                    balances: vec![write(&current, updated.clone())],
                    allocation: None,
                };
                (updated, commit)
            }
            FuelEuOperation::Bank {
                amount,
                target_period,
            } => {
                let target = self.balance(vessel_id, target_period)?;
                let (source, destination) = rules::bank(&self.policy, &current, &target, amount)?;
                let commit = FuelEuCommit {
                    balances: vec![
                        write(&current, source.clone()),
                        write(&target, destination),
                    ],
                    allocation: None,
                };
                (source, commit)
            }
            FuelEuOperation::Borrow {
                amount,
                from_period,
            } => {
                let allocation = self.repository.allocation(vessel_id, period_year)?;
                let updated = rules::borrow(
                    &self.policy,
                    &current,
                    from_period,
                    allocation.as_ref(),
                    amount,
                )?;
                let commit = FuelEuCommit {
                    balances: vec![write(&current, updated.clone())],
                    allocation: None,
                };
                (updated, commit)
            }
            FuelEuOperation::JoinPool {
                pool_id,
                allocation_type,
                amount,
            } => {
                let existing = self.repository.allocation(vessel_id, period_year)?;
                let (updated, allocation) = rules::join_pool(
                    &current,
                    existing.as_ref(),
                    pool_id,
                    allocation_type,
                    amount,
                )?;
                let commit = FuelEuCommit {
                    balances: vec![write(&current, updated.clone())],
                    allocation: Some(allocation),
                };
                (updated, commit)
            }
        };

        self.repository.commit(commit)?;
        Ok(updated)
    }

    /// Closes a period and carries a surplus into the next one.
    ///
    /// # Errors
    ///
    /// `ClosureDeficit` for a negative balance, `PeriodClosed` if already
    /// closed, `ConcurrentModification` once retries are exhausted, or a
    /// storage error.
    pub fn close_period(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<PeriodClosure, LedgerError> {
        let result = commit_with_retries(self.max_commit_retries, "CLOSE_PERIOD", || {
            self.try_close(vessel_id, period_year)
        });

        match &result {
            Ok(closure) => tracing::info!(
                vessel_id = %vessel_id,
                period_year,
                carried_forward_gco2e = closure.carried_forward_gco2e.get(),
                "FuelEU period closed"
            ),
            Err(err) => tracing::warn!(
                vessel_id = %vessel_id,
                period_year,
                code = err.error_code(),
                error = %err,
                "FuelEU period closure rejected"
            ),
        }
        result
    }

    fn try_close(&self, vessel_id: VesselId, period_year: i32) -> Result<PeriodClosure, LedgerError> {
        let next_year = period_year.checked_add(1).ok_or(LedgerError::AmountOverflow)?;
        let current = self.balance(vessel_id, period_year)?;
        let next = self.balance(vessel_id, next_year)?;

        let (closed, opening, carried) = rules::close(&current, &next)?;

        let mut balances = vec![write(&current, closed.clone())];
        if carried.is_positive() {
            balances.push(write(&next, opening.clone()));
        }
        self.repository.commit(FuelEuCommit {
            balances,
            allocation: None,
        })?;

        Ok(PeriodClosure {
            closed,
            carried_forward_gco2e: carried,
            next: opening,
        })
    }
}
