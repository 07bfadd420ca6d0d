//! Cross-record plausibility against reported period totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{IssueCollector, ValidationCode, ValidationOutcome};
use crate::record::FuelRecord;

/// Rule-of-thumb CO2 per tonne of marine fuel (t/t).
const CO2_PER_TONNE: Decimal = Decimal::from_parts(31, 0, 0, false, 1);
/// Rule-of-thumb energy per tonne of marine fuel (GJ/t).
const ENERGY_PER_TONNE_GJ: Decimal = Decimal::from_parts(42, 0, 0, false, 0);
/// Tolerance band as a percentage of the reported value.
const TOLERANCE_PCT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Totals declared in a period report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedTotals {
    /// Reported CO2 emissions (t).
    pub total_co2_emissions_t: Option<Decimal>,
    /// Reported energy in scope (GJ).
    pub energy_in_scope_gj: Option<Decimal>,
}

/// Compares fuel-mass estimates with the reported totals.
///
/// Only produces warnings; the outcome is always valid. Totals that are
/// absent or zero are skipped.
#[must_use]
pub fn validate_consistency(records: &[FuelRecord], reported: &ReportedTotals) -> ValidationOutcome {
    let mut issues = IssueCollector::default();
    // None once the fuel total leaves the decimal range
    let total_fuel = records
        .iter()
        .try_fold(Decimal::ZERO, |total, r| total.checked_add(r.consumption_tonnes));

    if let Some(co2) = reported.total_co2_emissions_t.filter(|v| !v.is_zero()) {
        let estimated = total_fuel.and_then(|t| t.checked_mul(CO2_PER_TONNE));
        if exceeds_tolerance(estimated, co2) {
            issues.warning(
                "total_co2_emissions_t",
                ValidationCode::EstimationMismatch,
                format!(
                    "Reported CO2 ({co2} t) differs significantly from fuel-based estimate ({} t)",
                    describe(estimated)
                ),
            );
        }
    }

    if let Some(energy) = reported.energy_in_scope_gj.filter(|v| !v.is_zero()) {
        let estimated = total_fuel.and_then(|t| t.checked_mul(ENERGY_PER_TONNE_GJ));
        if exceeds_tolerance(estimated, energy) {
            issues.warning(
                "energy_in_scope_gj",
                ValidationCode::EstimationMismatch,
                format!(
                    "Reported energy ({energy} GJ) differs significantly from fuel-based estimate ({} GJ)",
                    describe(estimated)
                ),
            );
        }
    }

    issues.finish()
}

/// An estimate that cannot be represented is always out of tolerance.
fn exceeds_tolerance(estimated: Option<Decimal>, reported: Decimal) -> bool {
    estimated
        .and_then(|e| e.checked_sub(reported))
        .and_then(|d| d.abs().checked_div(reported.abs()))
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .is_none_or(|pct| pct > TOLERANCE_PCT)
}

fn describe(estimated: Option<Decimal>) -> String {
    estimated.map_or_else(|| "out of range".to_owned(), |e| e.round_dp(1).to_string())
}
