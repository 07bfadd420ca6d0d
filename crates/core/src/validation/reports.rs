//! Checks for submitted EU ETS and FuelEU period reports.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{IssueCollector, ValidationCode, ValidationOutcome};

/// First reporting year in which shipping is covered by the EU ETS.
const ETS_FIRST_YEAR: i32 = 2024;
/// Allowed gap between derived and reported covered emissions (t).
const COVERED_EMISSIONS_TOLERANCE_T: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
const INTENSITY_MIN: Decimal = Decimal::from_parts(50, 0, 0, false, 0);
const INTENSITY_MAX: Decimal = Decimal::from_parts(120, 0, 0, false, 0);

/// An EU ETS annual emissions report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtsReport {
    /// Reporting year.
    pub reporting_year: Option<i32>,
    /// Total CO2 emissions (t).
    pub total_co2_emissions_t: Option<Decimal>,
    /// Share of emissions in scope (%).
    pub ets_covered_percentage: Option<Decimal>,
    /// Emissions in scope (t).
    pub ets_covered_emissions_t: Option<Decimal>,
}

/// Whether a vessel reports alone or inside a compliance pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PoolingStatus {
    /// Reports alone.
    #[default]
    Standalone,
    /// Member of a pool.
    InPool,
    /// Leads a pool.
    PoolLeader,
}

/// A FuelEU Maritime annual report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelEuReport {
    /// Reporting year.
    pub reporting_year: Option<i32>,
    /// Energy used on board (GJ).
    pub total_energy_used_gj: Option<Decimal>,
    /// Well-to-wake intensity (gCO2e/MJ).
    pub ghg_intensity_gco2e_mj: Option<Decimal>,
    /// Compliance balance (gCO2e).
    pub compliance_balance_gco2e: Option<Decimal>,
    /// Pooling status for the year.
    pub pooling_status: PoolingStatus,
}

/// Validates an EU ETS report.
#[must_use]
pub fn validate_ets_report(report: &EtsReport) -> ValidationOutcome {
    let mut issues = IssueCollector::default();

    match report.reporting_year {
        None => issues.error(
            "reporting_year",
            ValidationCode::RequiredField,
            "Reporting year is required",
        ),
        Some(year) if year < ETS_FIRST_YEAR => issues.warning(
            "reporting_year",
            ValidationCode::UnusualValue,
            "EU ETS for shipping starts in 2024",
        ),
        Some(_) => {}
    }

    if report
        .total_co2_emissions_t
        .is_none_or(|v| v <= Decimal::ZERO)
    {
        issues.error(
            "total_co2_emissions_t",
            ValidationCode::InvalidValue,
            "Total CO2 emissions must be greater than 0",
        );
    }

    match report.ets_covered_percentage {
        None => issues.error(
            "ets_covered_percentage",
            ValidationCode::RequiredField,
            "ETS covered percentage is required",
        ),
        Some(pct) if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED => issues.error(
            "ets_covered_percentage",
            ValidationCode::InvalidRange,
            "ETS covered percentage must be between 0 and 100",
        ),
        Some(_) => {}
    }

    if report
        .ets_covered_emissions_t
        .is_none_or(|v| v <= Decimal::ZERO)
    {
        issues.error(
            "ets_covered_emissions_t",
            ValidationCode::InvalidValue,
            "ETS covered emissions must be greater than 0",
        );
    }

    if let (Some(total), Some(pct), Some(covered)) = (
        report.total_co2_emissions_t,
        report.ets_covered_percentage,
        report.ets_covered_emissions_t,
    ) {
        let expected = total
            .checked_mul(pct)
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED));
        let within_tolerance = expected
            .and_then(|e| e.checked_sub(covered))
            .is_some_and(|d| d.abs() <= COVERED_EMISSIONS_TOLERANCE_T);
        if !within_tolerance {
            let message = expected.map_or_else(
                || "ETS covered emissions cannot be derived from the reported total".to_owned(),
                |e| format!("ETS covered emissions should be {} t", e.round_dp(2)),
            );
            issues.error(
                "ets_covered_emissions_t",
                ValidationCode::CalculationMismatch,
                message,
            );
        }
    }

    issues.finish()
}

/// Validates a FuelEU Maritime report.
#[must_use]
pub fn validate_fueleu_report(report: &FuelEuReport) -> ValidationOutcome {
    let mut issues = IssueCollector::default();

    if report.reporting_year.is_none() {
        issues.error(
            "reporting_year",
            ValidationCode::RequiredField,
            "Reporting year is required",
        );
    }

    if report.total_energy_used_gj.is_none_or(|v| v <= Decimal::ZERO) {
        issues.error(
            "total_energy_used_gj",
            ValidationCode::InvalidValue,
            "Total energy used must be greater than 0",
        );
    }

    match report.ghg_intensity_gco2e_mj {
        Some(v) if v > Decimal::ZERO => {
            if v < INTENSITY_MIN {
                issues.warning(
                    "ghg_intensity_gco2e_mj",
                    ValidationCode::UnusualValue,
                    "GHG intensity seems unusually low",
                );
            } else if v > INTENSITY_MAX {
                issues.warning(
                    "ghg_intensity_gco2e_mj",
                    ValidationCode::UnusualValue,
                    "GHG intensity seems unusually high",
                );
            }
        }
        _ => issues.error(
            "ghg_intensity_gco2e_mj",
            ValidationCode::InvalidValue,
            "GHG intensity must be greater than 0",
        ),
    }

    if report.compliance_balance_gco2e.is_none() {
        issues.error(
            "compliance_balance_gco2e",
            ValidationCode::RequiredField,
            "Compliance balance is required",
        );
    }

    issues.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn ets() -> EtsReport {
        EtsReport {
            reporting_year: Some(2025),
            total_co2_emissions_t: Some(dec!(1000)),
            ets_covered_percentage: Some(dec!(50)),
            ets_covered_emissions_t: Some(dec!(500)),
        }
    }

    fn fueleu() -> FuelEuReport {
        FuelEuReport {
            reporting_year: Some(2025),
            total_energy_used_gj: Some(dec!(42700)),
            ghg_intensity_gco2e_mj: Some(dec!(89.1)),
            compliance_balance_gco2e: Some(dec!(-4270)),
            pooling_status: PoolingStatus::InPool,
        }
    }

    #[test]
    fn test_valid_ets_report() {
        let outcome = validate_ets_report(&ets());
        assert!(outcome.is_valid, "{:?}", outcome.errors);
        assert!(outcome.warnings.is_empty());
    }

    #[rstest]
    #[case(dec!(500.01), false)]
    #[case(dec!(500.02), true)]
    #[case(dec!(450), true)]
    fn test_ets_covered_emissions_consistency(#[case] covered: Decimal, #[case] mismatch: bool) {
        let report = EtsReport {
            ets_covered_emissions_t: Some(covered),
            ..ets()
        };
        let outcome = validate_ets_report(&report);
        assert_eq!(outcome.has_error(ValidationCode::CalculationMismatch), mismatch);
    }

    #[test]
    fn test_ets_unrepresentable_total_is_a_mismatch() {
        let report = EtsReport {
            total_co2_emissions_t: Some(Decimal::MAX),
            ets_covered_percentage: Some(dec!(100)),
            ..ets()
        };
        let outcome = validate_ets_report(&report);
        assert!(outcome.has_error(ValidationCode::CalculationMismatch));
    }

    #[test]
    fn test_ets_range_and_missing_fields() {
        let outcome = validate_ets_report(&EtsReport {
            ets_covered_percentage: Some(dec!(101)),
            ..ets()
        });
        assert!(outcome.has_error(ValidationCode::InvalidRange));

        let outcome = validate_ets_report(&EtsReport::default());
        let codes: Vec<_> = outcome.errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            [
                ValidationCode::RequiredField,
                ValidationCode::InvalidValue,
                ValidationCode::RequiredField,
                ValidationCode::InvalidValue,
            ]
        );
    }

    #[test]
    fn test_ets_early_year_warns() {
        let outcome = validate_ets_report(&EtsReport {
            reporting_year: Some(2023),
            ..ets()
        });
        assert!(outcome.is_valid);
        assert!(outcome.has_warning(ValidationCode::UnusualValue));
    }

    #[test]
    fn test_ets_report_from_json() {
        let report: EtsReport = serde_json::from_str(
            r#"{"reporting_year": 2025, "total_co2_emissions_t": "800", "ets_covered_percentage": "70", "ets_covered_emissions_t": "560"}"#,
        )
        .unwrap();
        assert!(validate_ets_report(&report).is_valid);
    }

    #[test]
    fn test_valid_fueleu_report() {
        let outcome = validate_fueleu_report(&fueleu());
        assert!(outcome.is_valid);
        assert!(outcome.warnings.is_empty());
    }

    #[rstest]
    #[case(dec!(49.9))]
    #[case(dec!(120.5))]
    fn test_fueleu_unusual_intensity(#[case] intensity: Decimal) {
        let outcome = validate_fueleu_report(&FuelEuReport {
            ghg_intensity_gco2e_mj: Some(intensity),
            ..fueleu()
        });
        assert!(outcome.is_valid);
        assert!(outcome.has_warning(ValidationCode::UnusualValue));
    }

    #[test]
    fn test_fueleu_required_values() {
        let outcome = validate_fueleu_report(&FuelEuReport {
            total_energy_used_gj: Some(Decimal::ZERO),
            ghg_intensity_gco2e_mj: None,
            compliance_balance_gco2e: None,
            ..fueleu()
        });
        assert_eq!(outcome.errors.len(), 3);
        assert!(outcome.has_error(ValidationCode::InvalidValue));
        assert!(outcome.has_error(ValidationCode::RequiredField));
    }

    #[test]
    fn test_pooling_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&PoolingStatus::PoolLeader).unwrap(),
            "\"POOL_LEADER\""
        );
    }
}
