//! FuelEU pool allocations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tidemark_shared::types::{GramsCo2e, PoolId, VesselId};

use super::error::LedgerError;
use super::fueleu::FuelEuRepository;

/// Direction of a vessel's contribution to a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationType {
    /// The vessel receives compliance from the pool.
    Inflow,
    /// The vessel gives compliance to the pool.
    Outflow,
}

/// One vessel's membership of a pool for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAllocation {
    /// The pool.
    pub pool_id: PoolId,
    /// The member vessel.
    pub vessel_id: VesselId,
    /// The period.
    pub period_year: i32,
    /// Direction of the allocation.
    pub allocation_type: AllocationType,
    /// Signed amount: positive for inflow, negative for outflow.
    pub amount_gco2e: GramsCo2e,
}

/// Aggregate figures for one pool and period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolPerformance {
    /// Sum of inflows.
    pub total_inflow_gco2e: GramsCo2e,
    /// Sum of outflow magnitudes.
    pub total_outflow_gco2e: GramsCo2e,
    /// Inflow minus outflow magnitude; negative when members give away
    /// more than they take in.
    pub net_benefit_gco2e: GramsCo2e,
    /// Number of distinct member vessels.
    pub vessel_count: usize,
}

/// Read-side view over the pool allocations of a FuelEU repository.
#[derive(Debug)]
pub struct PoolAllocationRegistry<'a, R: ?Sized> {
    repository: &'a R,
}

impl<'a, R: FuelEuRepository + ?Sized> PoolAllocationRegistry<'a, R> {
    /// Wraps `repository`.
    #[must_use]
    pub fn new(repository: &'a R) -> Self {
        Self { repository }
    }

    /// The allocation of `vessel_id` in `period_year`, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn allocation(
        &self,
        vessel_id: VesselId,
        period_year: i32,
    ) -> Result<Option<PoolAllocation>, LedgerError> {
        self.repository.allocation(vessel_id, period_year)
    }

    /// All allocations to `pool_id` in `period_year`.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn allocations_for_pool(
        &self,
        pool_id: PoolId,
        period_year: i32,
    ) -> Result<Vec<PoolAllocation>, LedgerError> {
        self.repository.allocations_for_pool(pool_id, period_year)
    }

    /// Inflow, outflow and net benefit of a pool.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or `AmountOverflow` if the totals overflow.
    pub fn performance(
        &self,
        pool_id: PoolId,
        period_year: i32,
    ) -> Result<PoolPerformance, LedgerError> {
        let allocations = self.allocations_for_pool(pool_id, period_year)?;
        summarize(&allocations)
    }
}

fn summarize(allocations: &[PoolAllocation]) -> Result<PoolPerformance, LedgerError> {
    let mut inflow = GramsCo2e::ZERO;
    let mut outflow = GramsCo2e::ZERO;
    for allocation in allocations {
        let magnitude = allocation
            .amount_gco2e
            .checked_abs()
            .ok_or(LedgerError::AmountOverflow)?;
        let total = match allocation.allocation_type {
            AllocationType::Inflow => &mut inflow,
            AllocationType::Outflow => &mut outflow,
        };
        *total = total
            .checked_add(magnitude)
            .ok_or(LedgerError::AmountOverflow)?;
    }

    let vessels: HashSet<_> = allocations.iter().map(|a| a.vessel_id).collect();
    Ok(PoolPerformance {
        total_inflow_gco2e: inflow,
        total_outflow_gco2e: outflow,
        net_benefit_gco2e: inflow
            .checked_sub(outflow)
            .ok_or(LedgerError::AmountOverflow)?,
        vessel_count: vessels.len(),
    })
}
