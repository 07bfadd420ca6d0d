//! FuelEU Maritime compliance balance ledger.

pub mod repository;
pub mod rules;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use repository::{BalanceWrite, FuelEuCommit, FuelEuRepository, InMemoryFuelEuRepository};
pub use service::FuelEuLedger;
pub use types::{FuelEuOperation, FuelEuPeriodBalance, PeriodClosure, PeriodStatus};
