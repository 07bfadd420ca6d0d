//! Physical and emissions properties of a single fuel type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Standard properties for one fuel type.
///
/// Every field is optional so the same shape serves as a partial override
/// supplied alongside a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelPropertySpec {
    /// Density (kg/m³).
    #[serde(default)]
    pub density_kg_m3: Option<Decimal>,
    /// Lower calorific value (MJ/kg).
    #[serde(default)]
    pub lower_calorific_value_mj_kg: Option<Decimal>,
    /// Sulphur content (% m/m).
    #[serde(default)]
    pub sulphur_content_pct: Option<Decimal>,
    /// Carbon content (% m/m).
    #[serde(default)]
    pub carbon_content_pct: Option<Decimal>,
    /// Default well-to-wake factor (gCO2e/MJ).
    #[serde(default)]
    pub well_to_wake_gco2e_mj: Option<Decimal>,
    /// Default tank-to-wake factor (gCO2e/MJ).
    #[serde(default)]
    pub tank_to_wake_gco2e_mj: Option<Decimal>,
    /// Default well-to-tank factor (gCO2e/MJ).
    #[serde(default)]
    pub well_to_tank_gco2e_mj: Option<Decimal>,
}

impl FuelPropertySpec {
    /// Builds a fully populated spec.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        density_kg_m3: Decimal,
        lower_calorific_value_mj_kg: Decimal,
        sulphur_content_pct: Decimal,
        carbon_content_pct: Decimal,
        well_to_wake_gco2e_mj: Decimal,
        tank_to_wake_gco2e_mj: Decimal,
        well_to_tank_gco2e_mj: Decimal,
    ) -> Self {
        Self {
            density_kg_m3: Some(density_kg_m3),
            lower_calorific_value_mj_kg: Some(lower_calorific_value_mj_kg),
            sulphur_content_pct: Some(sulphur_content_pct),
            carbon_content_pct: Some(carbon_content_pct),
            well_to_wake_gco2e_mj: Some(well_to_wake_gco2e_mj),
            tank_to_wake_gco2e_mj: Some(tank_to_wake_gco2e_mj),
            well_to_tank_gco2e_mj: Some(well_to_tank_gco2e_mj),
        }
    }
}
