//! EU ETS allowance ledger.
//!
//! Per (organization, period-year) append-only sequence of FORECAST, HEDGE,
//! SURRENDER and RECONCILE entries.

pub mod repository;
pub mod rules;
pub mod service;
pub mod types;

#[cfg(test)]
mod rules_props;

pub use repository::{EuaRepository, InMemoryEuaRepository};
pub use rules::required_euas;
pub use service::EuaLedger;
pub use types::{EuaOperation, EuaOperationKind, EuaOperationRequest, EuaPeriodSummary};
