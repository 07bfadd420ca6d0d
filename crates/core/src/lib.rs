//! Core compliance logic for Tidemark.
//!
//! This crate contains pure domain logic with ZERO transport or database
//! dependencies. Fuel records come in, emissions figures, validation
//! findings and ledger states come out.
//!
//! # Modules
//!
//! - `catalog` - Versioned standard fuel properties
//! - `policy` - Year-dependent regulatory inputs
//! - `record` - Fuel consumption records
//! - `emissions` - Energy, CO2 and well-to-wake calculation
//! - `validation` - Compliance rules for records and reports
//! - `ledger` - EU ETS allowance and FuelEU balance ledgers

pub mod catalog;
pub mod emissions;
pub mod ledger;
pub mod policy;
pub mod record;
pub mod validation;

pub use catalog::FuelCatalog;
pub use emissions::{CalculationError, EmissionsCalculator, EmissionsResult, compute_emissions};
pub use ledger::LedgerError;
pub use policy::CompliancePolicy;
pub use record::FuelRecord;
pub use validation::{ComplianceValidator, ValidationOutcome, validate};
