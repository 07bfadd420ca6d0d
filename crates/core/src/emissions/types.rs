//! Calculation outputs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tidemark_shared::types::{FuelCategory, FuelType};

/// Emissions derived from one fuel record.
///
/// All quantities are after the efficiency adjustment. Recomputing from the
/// same record, override and catalog yields an identical value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmissionsResult {
    /// Fuel type of the source record.
    pub fuel_type: FuelType,
    /// Category of the source record.
    pub fuel_category: FuelCategory,
    /// Reporting year of the source record.
    pub period_year: i32,
    /// Consumption after efficiency gains (t).
    pub adjusted_consumption_tonnes: Decimal,
    /// Energy (GJ).
    pub energy_gj: Decimal,
    /// Tank-to-wake CO2 from carbon content (t).
    pub co2_t: Decimal,
    /// Well-to-wake GHG (gCO2e).
    pub well_to_wake_gco2e: Decimal,
    /// Tank-to-wake GHG (gCO2e).
    pub tank_to_wake_gco2e: Decimal,
    /// Well-to-tank GHG (gCO2e).
    pub well_to_tank_gco2e: Decimal,
    /// Well-to-wake intensity (gCO2e/MJ).
    pub carbon_intensity_gco2e_mj: Decimal,
    /// Reference intensity the balance was measured against (gCO2e/MJ).
    pub reference_intensity_gco2e_mj: Decimal,
    /// FuelEU compliance contribution (gCO2e). Positive is a surplus.
    pub compliance_balance_gco2e: Decimal,
    /// Efficiency gains that were applied.
    pub efficiency: EfficiencyGains,
}

/// Breakdown of efficiency-technology gains, in percent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyGains {
    /// Mewis duct.
    pub mewis_duct_pct: Decimal,
    /// Wind-assisted propulsion.
    pub wind_turbines_pct: Decimal,
    /// Auxiliary-load credit while on shore power.
    pub shore_power_pct: Decimal,
    /// Other technologies.
    pub other_technologies_pct: Decimal,
    /// Sum of the nominal gains before capping.
    pub nominal_total_pct: Decimal,
    /// Gain actually applied, capped at 100.
    pub applied_total_pct: Decimal,
}

/// Emissions and savings from an onshore power connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorePowerImpact {
    /// Grid-side emissions (gCO2e).
    pub grid_emissions_gco2e: Decimal,
    /// Fuel not burnt by auxiliary engines (t, MGO equivalent).
    pub fuel_savings_tonnes: Decimal,
    /// CO2e avoided by the fuel savings (gCO2e-equivalent units).
    pub co2_savings_gco2e: Decimal,
}
