//! Fuel-to-emissions calculation engine.

use std::sync::Arc;

use rayon::prelude::*;
use rust_decimal::Decimal;
use tidemark_shared::types::FuelCategory;

use super::checked::{add, div, mul, pct_of, sub};
use super::efficiency::{apply_gain, efficiency_gains, shore_power_impact};
use super::error::CalculationError;
use super::types::{EmissionsResult, ShorePowerImpact};
use crate::catalog::{FuelCatalog, FuelPropertySpec};
use crate::policy::CompliancePolicy;
use crate::record::FuelRecord;

/// LCV used when neither record, override nor catalog has one (MJ/kg).
pub const FALLBACK_LCV_MJ_KG: Decimal = Decimal::from_parts(42, 0, 0, false, 0);
/// Carbon content used when nothing else provides one (%).
pub const FALLBACK_CARBON_PCT: Decimal = Decimal::from_parts(86, 0, 0, false, 0);
/// Fossil well-to-wake fallback (gCO2e/MJ).
pub const FALLBACK_FOSSIL_WTW: Decimal = Decimal::from_parts(90, 0, 0, false, 0);
/// Fossil tank-to-wake fallback (gCO2e/MJ).
pub const FALLBACK_FOSSIL_TTW: Decimal = Decimal::from_parts(78, 0, 0, false, 0);
/// Fossil well-to-tank fallback (gCO2e/MJ).
pub const FALLBACK_FOSSIL_WTT: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
/// Tank-to-wake fallback for biofuels and hybrids (gCO2e/MJ).
pub const FALLBACK_BIO_TTW: Decimal = Decimal::from_parts(77, 0, 0, false, 0);
/// Blend ratio assumed for a biofuel without one (%).
pub const DEFAULT_BIOFUEL_BLEND_PCT: Decimal = Decimal::ONE_HUNDRED;
/// Blend ratio assumed for a hybrid without one (%).
pub const DEFAULT_HYBRID_BLEND_PCT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// The three lifecycle legs, in gCO2e.
#[derive(Debug, Clone, Copy, Default)]
struct Legs {
    well_to_wake: Decimal,
    tank_to_wake: Decimal,
    well_to_tank: Decimal,
}

/// Computes emissions for fuel records.
///
/// Pure and stateless apart from the shared, read-only catalog and policy;
/// cloning is cheap and instances can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct EmissionsCalculator {
    catalog: Arc<FuelCatalog>,
    policy: Arc<CompliancePolicy>,
}

impl EmissionsCalculator {
    /// Creates a calculator over a catalog and a policy.
    #[must_use]
    pub fn new(catalog: FuelCatalog, policy: CompliancePolicy) -> Self {
        Self {
            catalog: Arc::new(catalog),
            policy: Arc::new(policy),
        }
    }

    /// The catalog in use.
    #[must_use]
    pub fn catalog(&self) -> &FuelCatalog {
        &self.catalog
    }

    /// The policy in use.
    #[must_use]
    pub fn policy(&self) -> &CompliancePolicy {
        &self.policy
    }

    /// Computes emissions for one record.
    ///
    /// Properties resolve field by field: non-zero record value, then the
    /// override, then the catalog entry, then the built-in fallback.
    ///
    /// # Errors
    ///
    /// Returns `CalculationError::UnknownFuelType` when neither the catalog
    /// nor the override has an entry for the declared fuel type, and
    /// `CalculationError::Overflow` when a quantity derived from the record
    /// is not representable.
    pub fn compute(
        &self,
        record: &FuelRecord,
        spec: Option<&FuelPropertySpec>,
    ) -> Result<EmissionsResult, CalculationError> {
        let standard = self.catalog.properties(record.fuel_type);
        if spec.is_none() && standard.is_none() {
            return Err(CalculationError::UnknownFuelType(record.fuel_type));
        }
        let property = |pick: fn(&FuelPropertySpec) -> Option<Decimal>| {
            spec.and_then(pick).or_else(|| standard.and_then(pick))
        };

        let lcv = non_zero(record.lower_calorific_value_mj_kg)
            .or_else(|| property(|s| s.lower_calorific_value_mj_kg))
            .unwrap_or(FALLBACK_LCV_MJ_KG);
        let carbon_pct = non_zero(record.carbon_content_pct)
            .or_else(|| property(|s| s.carbon_content_pct))
            .unwrap_or(FALLBACK_CARBON_PCT);

        let tonnes = record.consumption_tonnes;
        let energy_gj = mul(tonnes, lcv, "energy")?;
        // CO2 = C x 44/12, with C = carbon_pct / 100
        let co2_t = div(
            mul(mul(tonnes, carbon_pct, "CO2")?, Decimal::from(11), "CO2")?,
            Decimal::from(300),
            "CO2",
        )?;

        let legs = match record.fuel_category {
            FuelCategory::Fossil => Legs {
                well_to_wake: mul(
                    energy_gj,
                    property(|s| s.well_to_wake_gco2e_mj).unwrap_or(FALLBACK_FOSSIL_WTW),
                    "well-to-wake",
                )?,
                tank_to_wake: mul(
                    energy_gj,
                    property(|s| s.tank_to_wake_gco2e_mj).unwrap_or(FALLBACK_FOSSIL_TTW),
                    "tank-to-wake",
                )?,
                well_to_tank: mul(
                    energy_gj,
                    property(|s| s.well_to_tank_gco2e_mj).unwrap_or(FALLBACK_FOSSIL_WTT),
                    "well-to-tank",
                )?,
            },
            FuelCategory::Biofuel => {
                let blend = non_zero(record.biofuel.blend_ratio_pct)
                    .unwrap_or(DEFAULT_BIOFUEL_BLEND_PCT);
                let well_to_wake =
                    pct_of(self.bio_well_to_wake(record, energy_gj)?, blend, "well-to-wake")?;
                let tank_to_wake = mul(
                    energy_gj,
                    property(|s| s.tank_to_wake_gco2e_mj).unwrap_or(FALLBACK_BIO_TTW),
                    "tank-to-wake",
                )?;
                Legs {
                    well_to_wake,
                    tank_to_wake,
                    well_to_tank: sub(well_to_wake, tank_to_wake, "well-to-tank")?,
                }
            }
            FuelCategory::EFuel => Legs::default(),
            FuelCategory::Hybrid => {
                let blend = non_zero(record.biofuel.blend_ratio_pct)
                    .unwrap_or(DEFAULT_HYBRID_BLEND_PCT);
                let bio = self.bio_well_to_wake(record, energy_gj)?;
                let fossil_type = record.fuel_type.fossil_base().unwrap_or(record.fuel_type);
                let fossil_factor = self
                    .catalog
                    .properties(fossil_type)
                    .and_then(|s| s.well_to_wake_gco2e_mj)
                    .unwrap_or(FALLBACK_FOSSIL_WTW);
                let fossil = mul(energy_gj, fossil_factor, "well-to-wake")?;

                let well_to_wake = add(
                    pct_of(bio, blend, "well-to-wake")?,
                    pct_of(
                        fossil,
                        sub(Decimal::ONE_HUNDRED, blend, "blend ratio")?,
                        "well-to-wake",
                    )?,
                    "well-to-wake",
                )?;
                let tank_to_wake = mul(
                    energy_gj,
                    property(|s| s.tank_to_wake_gco2e_mj).unwrap_or(FALLBACK_BIO_TTW),
                    "tank-to-wake",
                )?;
                Legs {
                    well_to_wake,
                    tank_to_wake,
                    well_to_tank: sub(well_to_wake, tank_to_wake, "well-to-tank")?,
                }
            }
        };

        let efficiency = efficiency_gains(&record.efficiency)?;
        let gain = efficiency.applied_total_pct;
        let adjusted_energy = apply_gain(energy_gj, gain)?;
        let adjusted_wtw = apply_gain(legs.well_to_wake, gain)?;

        let carbon_intensity = if adjusted_energy.is_zero() {
            Decimal::ZERO
        } else {
            div(adjusted_wtw, adjusted_energy, "carbon intensity")?
        };

        let period_year = record.period_year();
        let reference = self
            .policy
            .reference_intensity(period_year, record.fuel_type);
        let compliance_balance = mul(
            sub(reference, carbon_intensity, "compliance balance")?,
            adjusted_energy,
            "compliance balance",
        )?;

        Ok(EmissionsResult {
            fuel_type: record.fuel_type,
            fuel_category: record.fuel_category,
            period_year,
            adjusted_consumption_tonnes: apply_gain(tonnes, gain)?,
            energy_gj: adjusted_energy,
            co2_t: apply_gain(co2_t, gain)?,
            well_to_wake_gco2e: adjusted_wtw,
            tank_to_wake_gco2e: apply_gain(legs.tank_to_wake, gain)?,
            well_to_tank_gco2e: apply_gain(legs.well_to_tank, gain)?,
            carbon_intensity_gco2e_mj: carbon_intensity,
            reference_intensity_gco2e_mj: reference,
            compliance_balance_gco2e: compliance_balance,
            efficiency,
        })
    }

    /// Computes every record in parallel against the catalog defaults.
    ///
    /// Results are returned in input order.
    #[must_use]
    pub fn compute_batch(
        &self,
        records: &[FuelRecord],
    ) -> Vec<Result<EmissionsResult, CalculationError>> {
        records
            .par_iter()
            .map(|record| self.compute(record, None))
            .collect()
    }

    /// Grid emissions and fuel savings from the record's shore power connection.
    ///
    /// # Errors
    ///
    /// Returns `CalculationError::Overflow` for connection figures whose
    /// products are not representable.
    pub fn shore_power_emissions(
        &self,
        record: &FuelRecord,
    ) -> Result<ShorePowerImpact, CalculationError> {
        shore_power_impact(&record.efficiency)
    }

    /// Bio share well-to-wake before blending: energy x feedstock x generation.
    fn bio_well_to_wake(
        &self,
        record: &FuelRecord,
        energy_gj: Decimal,
    ) -> Result<Decimal, CalculationError> {
        mul(
            mul(
                energy_gj,
                self.catalog.feedstock_factor(record.biofuel.feedstock),
                "well-to-wake",
            )?,
            self.catalog.generation_multiplier(record.biofuel.generation),
            "well-to-wake",
        )
    }
}

impl Default for EmissionsCalculator {
    fn default() -> Self {
        Self::new(FuelCatalog::standard(), CompliancePolicy::default())
    }
}

/// Computes emissions for one record.
///
/// # Errors
///
/// See [`EmissionsCalculator::compute`].
pub fn compute_emissions(
    calculator: &EmissionsCalculator,
    record: &FuelRecord,
    spec: Option<&FuelPropertySpec>,
) -> Result<EmissionsResult, CalculationError> {
    calculator.compute(record, spec)
}

/// Treats a zero measurement as absent.
fn non_zero(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero())
}
