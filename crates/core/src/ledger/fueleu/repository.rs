//! Storage seam for FuelEU balances and pool allocations.
//!
//! [`InMemoryFuelEuRepository`] shards state per vessel. Every commit the
//! ledger produces concerns one vessel, so it is applied atomically under
//! that vessel's shard lock while other vessels proceed independently.

use std::collections::HashMap;

use dashmap::DashMap;
use tidemark_shared::types::{PoolId, VesselId};

use super::types::FuelEuPeriodBalance;
use crate::ledger::error::LedgerError;
use crate::ledger::pool::PoolAllocation;

/// A balance to write, guarded by the version it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceWrite {
    /// Version the caller loaded (0 if the balance did not exist).
    pub expected_version: u64,
    /// New state to store.
    pub balance: FuelEuPeriodBalance,
}

/// An all-or-nothing change set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuelEuCommit {
    /// Balances to write.
    pub balances: Vec<BalanceWrite>,
    /// Pool allocation to insert, unique per (vessel, period).
    pub allocation: Option<PoolAllocation>,
}

/// Versioned store of period balances and pool allocations.
pub trait FuelEuRepository: Send + Sync {
    /// The stored balance, if it was ever written.
    fn balance(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<Option<FuelEuPeriodBalance>, LedgerError>;

    /// The pool allocation of a vessel in a period.
    fn allocation(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<Option<PoolAllocation>, LedgerError>;

    /// All allocations to a pool in a period.
    fn allocations_for_pool(
        &self,
        pool_id: PoolId,
        period_year: i32,
    ) -> Result<Vec<PoolAllocation>, LedgerError>;

    /// Applies `commit` if every expected version still matches and the
    /// allocation slot is free; otherwise applies nothing.
    ///
    /// # Errors
    ///
    /// `ConcurrentModification` on a version mismatch,
    /// `DuplicatePoolAllocation` if the slot is taken, or a storage error.
    fn commit(&self, commit: FuelEuCommit) -> Result<(), LedgerError>;
}

/// Period balances and allocations of one vessel.
#[derive(Debug, Default)]
struct VesselState {
    balances: HashMap<i32, FuelEuPeriodBalance>,
    allocations: HashMap<i32, PoolAllocation>,
}

/// An in-memory [`FuelEuRepository`] sharded per vessel.
#[derive(Debug, Default)]
pub struct InMemoryFuelEuRepository {
    vessels: DashMap<VesselId, VesselState>,
}

impl InMemoryFuelEuRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// The single vessel a commit concerns, `None` for an empty commit.
fn commit_vessel(commit: &FuelEuCommit) -> Result<Option<VesselId>, LedgerError> {
    let mut vessels = commit
        .balances
        .iter()
        .map(|w| w.balance.vessel_id)
        .chain(commit.allocation.iter().map(|a| a.vessel_id));
    let Some(first) = vessels.next() else {
        return Ok(None);
    };
    if vessels.any(|v| v != first) {
        return Err(LedgerError::Storage(
            "a commit must not span several vessels".to_owned(),
        ));
    }
    Ok(Some(first))
}

impl FuelEuRepository for InMemoryFuelEuRepository {
    fn balance(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<Option<FuelEuPeriodBalance>, LedgerError> {
        Ok(self
            .vessels
            .get(&vessel_id)
            .and_then(|state| state.balances.get(&period_year).cloned()))
    }

    fn allocation(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<Option<PoolAllocation>, LedgerError> {
        Ok(self
            .vessels
            .get(&vessel_id)
            .and_then(|state| state.allocations.get(&period_year).cloned()))
    }

    fn allocations_for_pool(
        &self,
        pool_id: PoolId,
        period_year: i32,
    ) -> Result<Vec<PoolAllocation>, LedgerError> {
        let mut result: Vec<_> = self
            .vessels
            .iter()
            .filter_map(|state| {
                state
                    .allocations
                    .get(&period_year)
                    .filter(|a| a.pool_id == pool_id)
                    .cloned()
            })
            .collect();
        result.sort_by_key(|a| a.vessel_id);
        Ok(result)
    }

    fn commit(&self, commit: FuelEuCommit) -> Result<(), LedgerError> {
        let Some(vessel_id) = commit_vessel(&commit)? else {
            return Ok(());
        };
        let mut state = self.vessels.entry(vessel_id).or_default();

        for write in &commit.balances {
            let stored = state
                .balances
                .get(&write.balance.period_year)
                .map_or(0, |b| b.version);
            if stored != write.expected_version {
                return Err(LedgerError::ConcurrentModification);
            }
        }
        if let Some(allocation) = &commit.allocation {
            if state.allocations.contains_key(&allocation.period_year) {
                return Err(LedgerError::DuplicatePoolAllocation {
                    vessel_id,
                    period: allocation.period_year,
                });
            }
        }

        for write in commit.balances {
            state.balances.insert(write.balance.period_year, write.balance);
        }
        if let Some(allocation) = commit.allocation {
            state.allocations.insert(allocation.period_year, allocation);
        }
        Ok(())
    }
}
