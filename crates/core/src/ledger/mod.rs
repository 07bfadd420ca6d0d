//! Emissions allowance and compliance ledgers.
//!
//! Both ledgers are services over injectable repositories. Invariants are
//! checked by pure rule functions before a commit, and commits are
//! optimistic: a conflicting writer causes a reload and re-check, up to
//! `ledger.max_commit_retries` times.
//!
//! # Ledgers
//!
//! - [`eua`] - EU ETS allowance history per organization and period
//! - [`fueleu`] - FuelEU balances per vessel and period
//! - [`pool`] - FuelEU pool allocations

pub mod error;
pub mod eua;
pub mod fueleu;
pub mod pool;
mod retry;

pub use error::LedgerError;
pub use eua::{EuaLedger, EuaOperation, EuaOperationKind, EuaOperationRequest, EuaRepository};
pub use fueleu::{FuelEuLedger, FuelEuOperation, FuelEuPeriodBalance, FuelEuRepository, PeriodClosure};
pub use pool::{AllocationType, PoolAllocation, PoolAllocationRegistry, PoolPerformance};
