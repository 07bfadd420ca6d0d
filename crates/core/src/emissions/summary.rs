//! Period aggregation and fleet efficiency indicators.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tidemark_shared::types::GramsCo2e;

use super::calculator::EmissionsCalculator;
use super::checked::{add, div, mul};
use super::error::CalculationError;
use super::types::EmissionsResult;
use crate::record::FuelRecord;

/// Totals over a set of calculation results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsSummary {
    /// Number of results aggregated.
    pub record_count: usize,
    /// Energy (GJ).
    pub total_energy_gj: Decimal,
    /// CO2 (t).
    pub total_co2_t: Decimal,
    /// Well-to-wake GHG (gCO2e).
    pub total_well_to_wake_gco2e: Decimal,
    /// Tank-to-wake GHG (gCO2e).
    pub total_tank_to_wake_gco2e: Decimal,
    /// Well-to-tank GHG (gCO2e).
    pub total_well_to_tank_gco2e: Decimal,
    /// Summed FuelEU compliance contribution (gCO2e).
    pub total_compliance_balance_gco2e: Decimal,
    /// Energy-weighted well-to-wake intensity (gCO2e/MJ).
    pub average_intensity_gco2e_mj: Decimal,
}

impl EmissionsSummary {
    /// Sums the results of one reporting period.
    ///
    /// # Errors
    ///
    /// Returns `CalculationError::Overflow` if a total is not representable.
    pub fn aggregate(results: &[EmissionsResult]) -> Result<Self, CalculationError> {
        let mut summary = results.iter().try_fold(Self::default(), |mut acc, r| {
            acc.record_count += 1;
            acc.total_energy_gj = add(acc.total_energy_gj, r.energy_gj, "total energy")?;
            acc.total_co2_t = add(acc.total_co2_t, r.co2_t, "total CO2")?;
            acc.total_well_to_wake_gco2e = add(
                acc.total_well_to_wake_gco2e,
                r.well_to_wake_gco2e,
                "total well-to-wake",
            )?;
            acc.total_tank_to_wake_gco2e = add(
                acc.total_tank_to_wake_gco2e,
                r.tank_to_wake_gco2e,
                "total tank-to-wake",
            )?;
            acc.total_well_to_tank_gco2e = add(
                acc.total_well_to_tank_gco2e,
                r.well_to_tank_gco2e,
                "total well-to-tank",
            )?;
            acc.total_compliance_balance_gco2e = add(
                acc.total_compliance_balance_gco2e,
                r.compliance_balance_gco2e,
                "total compliance balance",
            )?;
            Ok::<_, CalculationError>(acc)
        })?;

        if !summary.total_energy_gj.is_zero() {
            summary.average_intensity_gco2e_mj = div(
                summary.total_well_to_wake_gco2e,
                summary.total_energy_gj,
                "average intensity",
            )?;
        }
        Ok(summary)
    }

    /// Compliance balance in whole grams, rounded with Banker's Rounding.
    ///
    /// Returns `None` if the total does not fit the ledger's integer range.
    #[must_use]
    pub fn compliance_balance_grams(&self) -> Option<GramsCo2e> {
        GramsCo2e::from_decimal(self.total_compliance_balance_gco2e)
    }
}

/// Operational efficiency indicators over a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelEfficiencyMetrics {
    /// Specific fuel consumption (g/kWh).
    pub specific_fuel_consumption_g_kwh: Decimal,
    /// Energy efficiency operational indicator (GJ per tonne-nautical-mile).
    pub energy_efficiency_index: Decimal,
    /// Carbon intensity indicator (gCO2e per tonne-nautical-mile).
    pub carbon_intensity_indicator: Decimal,
    /// Transport work per tonne of fuel.
    pub fuel_efficiency_ratio: Decimal,
}

impl FuelEfficiencyMetrics {
    /// Computes SFC, EEOI, CII and FER.
    ///
    /// SFC and FER use the consumption as recorded; EEOI and CII use the
    /// calculator's adjusted energy and well-to-wake totals.
    ///
    /// # Errors
    ///
    /// Returns `CalculationError::ZeroDenominator` when engine output,
    /// transport work or total consumption is zero, or any calculation error
    /// for the records themselves.
    pub fn compute(
        calculator: &EmissionsCalculator,
        records: &[FuelRecord],
        engine_power_kw: Decimal,
        operating_hours: Decimal,
        transport_work_tnm: Decimal,
    ) -> Result<Self, CalculationError> {
        let engine_output_kwh = mul(engine_power_kw, operating_hours, "engine output")?;
        if engine_output_kwh.is_zero() {
            return Err(CalculationError::ZeroDenominator {
                metric: "specific fuel consumption",
                denominator: "engine output",
            });
        }
        if transport_work_tnm.is_zero() {
            return Err(CalculationError::ZeroDenominator {
                metric: "energy efficiency index",
                denominator: "transport work",
            });
        }
        let total_consumption = records
            .iter()
            .try_fold(Decimal::ZERO, |total, r| {
                add(total, r.consumption_tonnes, "total consumption")
            })?;
        if total_consumption.is_zero() {
            return Err(CalculationError::ZeroDenominator {
                metric: "fuel efficiency ratio",
                denominator: "total consumption",
            });
        }

        let results = records
            .iter()
            .map(|record| calculator.compute(record, None))
            .collect::<Result<Vec<_>, _>>()?;
        let summary = EmissionsSummary::aggregate(&results)?;

        Ok(Self {
            specific_fuel_consumption_g_kwh: div(
                mul(total_consumption, Decimal::from(1_000_000), "fuel consumption")?,
                engine_output_kwh,
                "specific fuel consumption",
            )?,
            energy_efficiency_index: div(
                summary.total_energy_gj,
                transport_work_tnm,
                "energy efficiency index",
            )?,
            carbon_intensity_indicator: div(
                summary.total_well_to_wake_gco2e,
                transport_work_tnm,
                "carbon intensity indicator",
            )?,
            fuel_efficiency_ratio: div(
                transport_work_tnm,
                total_consumption,
                "fuel efficiency ratio",
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tidemark_shared::types::{FuelCategory, FuelType};

    fn mgo(tonnes: Decimal) -> FuelRecord {
        FuelRecord::new(
            FuelType::Mgo,
            FuelCategory::Fossil,
            tonnes,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        )
    }

    #[test]
    fn test_aggregate_sums_and_weights_intensity() {
        let calculator = EmissionsCalculator::default();
        let results: Vec<_> = [mgo(dec!(10)), mgo(dec!(30))]
            .iter()
            .map(|r| calculator.compute(r, None).unwrap())
            .collect();

        let summary = EmissionsSummary::aggregate(&results).unwrap();
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.total_energy_gj, dec!(1708));
        assert_eq!(summary.total_well_to_wake_gco2e, dec!(1708) * dec!(89));
        assert_eq!(summary.average_intensity_gco2e_mj, dec!(89));
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = EmissionsSummary::aggregate(&[]).unwrap();
        assert_eq!(summary, EmissionsSummary::default());
        assert_eq!(summary.compliance_balance_grams(), Some(GramsCo2e::ZERO));
    }

    #[test]
    fn test_aggregate_reports_total_overflow() {
        let mut result = EmissionsCalculator::default()
            .compute(&mgo(dec!(1)), None)
            .unwrap();
        result.well_to_wake_gco2e = Decimal::MAX;

        assert_eq!(
            EmissionsSummary::aggregate(&[result.clone(), result]),
            Err(CalculationError::Overflow("total well-to-wake"))
        );
    }

    #[test]
    fn test_compliance_balance_grams_rounds_half_even() {
        let summary = EmissionsSummary {
            total_compliance_balance_gco2e: dec!(1234.5),
            ..EmissionsSummary::default()
        };
        assert_eq!(summary.compliance_balance_grams(), Some(GramsCo2e::new(1234)));

        let summary = EmissionsSummary {
            total_compliance_balance_gco2e: dec!(-7.51),
            ..EmissionsSummary::default()
        };
        assert_eq!(summary.compliance_balance_grams(), Some(GramsCo2e::new(-8)));
    }

    #[test]
    fn test_efficiency_metrics() {
        let calculator = EmissionsCalculator::default();
        let metrics = FuelEfficiencyMetrics::compute(
            &calculator,
            &[mgo(dec!(20))],
            dec!(10000),
            dec!(10),
            dec!(1000),
        )
        .unwrap();

        // 20 t x 1e6 g / 100_000 kWh
        assert_eq!(metrics.specific_fuel_consumption_g_kwh, dec!(200));
        assert_eq!(metrics.energy_efficiency_index, dec!(0.854));
        assert_eq!(metrics.carbon_intensity_indicator, dec!(76.006));
        assert_eq!(metrics.fuel_efficiency_ratio, dec!(50));
    }

    #[test]
    fn test_efficiency_metrics_zero_transport_work() {
        let err = FuelEfficiencyMetrics::compute(
            &EmissionsCalculator::default(),
            &[mgo(dec!(20))],
            dec!(10000),
            dec!(10),
            Decimal::ZERO,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "ZERO_DENOMINATOR");
    }
}
