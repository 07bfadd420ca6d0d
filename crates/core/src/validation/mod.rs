//! Compliance validation for fuel records and period reports.
//!
//! Validation never fails: every finding is returned as a
//! [`ValidationIssue`], and a record is valid when it carries no errors.
//! `REGULATORY_VIOLATION` is the only hard regulatory stop.

pub mod batch;
pub mod consistency;
pub mod record;
pub mod reports;
pub mod types;

#[cfg(test)]
mod validator_props;

pub use batch::{BatchValidation, ValidationMode, validate_batch};
pub use consistency::{ReportedTotals, validate_consistency};
pub use record::{ComplianceValidator, validate};
pub use reports::{EtsReport, FuelEuReport, PoolingStatus, validate_ets_report, validate_fueleu_report};
pub use types::{Severity, ValidationCode, ValidationIssue, ValidationOutcome};
