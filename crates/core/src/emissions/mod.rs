//! Fuel-to-emissions calculation.
//!
//! This module implements the emissions engine:
//! - Energy and CO2 from consumption, calorific value and carbon content
//! - Well-to-wake, tank-to-wake and well-to-tank legs per fuel category
//! - Efficiency-technology adjustments and shore power accounting
//! - FuelEU compliance balance contribution
//! - Period aggregation and efficiency indicators

pub mod calculator;
mod checked;
pub mod efficiency;
pub mod error;
pub mod summary;
pub mod types;

#[cfg(test)]
mod calculator_props;

pub use calculator::{EmissionsCalculator, compute_emissions};
pub use efficiency::{efficiency_gains, shore_power_impact};
pub use error::CalculationError;
pub use summary::{EmissionsSummary, FuelEfficiencyMetrics};
pub use types::{EfficiencyGains, EmissionsResult, ShorePowerImpact};
