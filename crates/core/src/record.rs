//! Fuel consumption records as delivered by ingestion.
//!
//! A [`FuelRecord`] is immutable once ingested; the calculator and the
//! validator only ever borrow it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tidemark_shared::types::{
    BiofuelFeedstock, BiofuelGeneration, CarbonSource, EFuelProductionMethod, FuelCategory,
    FuelType, RenewableElectricitySource, VoyageId,
};

/// One fuel consumption observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelRecord {
    /// Declared fuel type.
    pub fuel_type: FuelType,
    /// Declared regulatory category.
    pub fuel_category: FuelCategory,
    /// Mass consumed, in tonnes.
    pub consumption_tonnes: Decimal,
    /// Day the fuel was consumed.
    pub consumption_date: NaiveDate,
    /// Voyage the consumption belongs to.
    #[serde(default)]
    pub voyage_id: Option<VoyageId>,

    /// Measured density (kg/m³).
    #[serde(default)]
    pub density_kg_m3: Option<Decimal>,
    /// Measured lower calorific value (MJ/kg).
    #[serde(default)]
    pub lower_calorific_value_mj_kg: Option<Decimal>,
    /// Measured sulphur content (% m/m).
    #[serde(default)]
    pub sulphur_content_pct: Option<Decimal>,
    /// Measured carbon content (% m/m).
    #[serde(default)]
    pub carbon_content_pct: Option<Decimal>,
    /// Certified well-to-wake factor (gCO2e/MJ).
    #[serde(default)]
    pub well_to_wake_ghg_gco2e_mj: Option<Decimal>,

    /// Biofuel attributes (also used for the bio share of hybrids).
    #[serde(default)]
    pub biofuel: BiofuelAttributes,
    /// E-fuel provenance.
    #[serde(default)]
    pub efuel: EFuelAttributes,

    /// Production date of the batch.
    #[serde(default)]
    pub production_date: Option<NaiveDate>,
    /// Expiry date of the batch.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,

    /// Safety and handling profile.
    #[serde(default)]
    pub handling: HandlingProfile,
    /// Installed efficiency technologies.
    #[serde(default)]
    pub efficiency: EfficiencyTechnologies,
}

impl FuelRecord {
    /// Creates a record with only the mandatory fields set.
    #[must_use]
    pub fn new(
        fuel_type: FuelType,
        fuel_category: FuelCategory,
        consumption_tonnes: Decimal,
        consumption_date: NaiveDate,
    ) -> Self {
        Self {
            fuel_type,
            fuel_category,
            consumption_tonnes,
            consumption_date,
            voyage_id: None,
            density_kg_m3: None,
            lower_calorific_value_mj_kg: None,
            sulphur_content_pct: None,
            carbon_content_pct: None,
            well_to_wake_ghg_gco2e_mj: None,
            biofuel: BiofuelAttributes::default(),
            efuel: EFuelAttributes::default(),
            production_date: None,
            expiry_date: None,
            handling: HandlingProfile::default(),
            efficiency: EfficiencyTechnologies::default(),
        }
    }

    /// Reporting year of the consumption.
    #[must_use]
    pub fn period_year(&self) -> i32 {
        chrono::Datelike::year(&self.consumption_date)
    }
}

/// Biofuel-specific attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiofuelAttributes {
    /// Feedstock the fuel was produced from.
    #[serde(default)]
    pub feedstock: Option<BiofuelFeedstock>,
    /// Bio share of the blend, in percent.
    #[serde(default)]
    pub blend_ratio_pct: Option<Decimal>,
    /// Technology generation.
    #[serde(default)]
    pub generation: Option<BiofuelGeneration>,
    /// Sustainability certificate reference.
    #[serde(default)]
    pub sustainability_certificate: Option<String>,
    /// Whether the batch is certified under EU RED II.
    #[serde(default)]
    pub eu_red_ii_compliant: bool,
}

/// E-fuel provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EFuelAttributes {
    /// Synthesis pathway.
    #[serde(default)]
    pub production_method: Option<EFuelProductionMethod>,
    /// Electricity feeding the plant.
    #[serde(default)]
    pub renewable_electricity_source: Option<RenewableElectricitySource>,
    /// Origin of bound carbon.
    #[serde(default)]
    pub carbon_source: Option<CarbonSource>,
    /// Guarantee-of-origin certificate reference.
    #[serde(default)]
    pub certificate_of_origin: Option<String>,
}

/// Hazard rating used for toxicity and corrosiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HazardLevel {
    /// Low hazard.
    Low,
    /// Medium hazard.
    Medium,
    /// High hazard.
    High,
    /// Very high hazard.
    VeryHigh,
}

impl HazardLevel {
    /// High or very high.
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High | Self::VeryHigh)
    }
}

/// Safety and handling profile of a fuel batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlingProfile {
    /// Toxicity rating.
    #[serde(default)]
    pub toxicity_level: Option<HazardLevel>,
    /// Corrosiveness rating.
    #[serde(default)]
    pub corrosiveness_rating: Option<HazardLevel>,
    /// Crew handling requirements.
    #[serde(default)]
    pub handling_requirements: Vec<String>,
    /// Bunker tank storage requirements.
    #[serde(default)]
    pub storage_requirements: Vec<String>,
    /// Whether the engine needs a retrofit to burn this fuel.
    #[serde(default)]
    pub retrofit_required: bool,
    /// Retrofit approval certificate.
    #[serde(default)]
    pub retrofit_certificate: Option<String>,
}

/// Efficiency technologies installed on the vessel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfficiencyTechnologies {
    /// Mewis duct fitted.
    #[serde(default)]
    pub mewis_duct_installed: bool,
    /// Mewis duct gain, in percent.
    #[serde(default)]
    pub mewis_duct_efficiency_gain_pct: Option<Decimal>,
    /// Wind-assisted propulsion fitted.
    #[serde(default)]
    pub wind_turbines_installed: bool,
    /// Wind-assisted propulsion gain, in percent.
    #[serde(default)]
    pub wind_turbines_efficiency_gain_pct: Option<Decimal>,
    /// Gain from any other technologies, in percent.
    #[serde(default)]
    pub other_efficiency_gain_pct: Option<Decimal>,
    /// Onshore power supply used during the observation.
    #[serde(default)]
    pub shore_power: Option<ShorePowerConnection>,
}

/// Onshore power supply connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShorePowerConnection {
    /// Hours connected.
    pub connection_hours: Decimal,
    /// Average draw (kW).
    #[serde(default)]
    pub power_consumption_kw: Option<Decimal>,
    /// Grid emission factor (gCO2e/kWh).
    #[serde(default)]
    pub grid_emissions_factor_gco2e_kwh: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_minimal_record_deserializes() {
        let json = r#"{
            "fuel_type": "HVO",
            "fuel_category": "BIOFUEL",
            "consumption_tonnes": "120",
            "consumption_date": "2025-03-14",
            "biofuel": { "feedstock": "WASTE_COOKING_OIL", "blend_ratio_pct": "100" }
        }"#;
        let record: FuelRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.fuel_type, FuelType::Hvo);
        assert_eq!(record.consumption_tonnes, dec!(120));
        assert_eq!(record.biofuel.feedstock, Some(BiofuelFeedstock::WasteCookingOil));
        assert!(!record.biofuel.eu_red_ii_compliant);
        assert!(record.efficiency.shore_power.is_none());
        assert_eq!(record.period_year(), 2025);
    }

    #[test]
    fn test_missing_fuel_type_is_rejected() {
        let json = r#"{
            "fuel_category": "FOSSIL",
            "consumption_tonnes": "10",
            "consumption_date": "2025-03-14"
        }"#;
        assert!(serde_json::from_str::<FuelRecord>(json).is_err());
    }

    #[test]
    fn test_hazard_levels() {
        assert!(HazardLevel::VeryHigh.is_high());
        assert!(HazardLevel::High.is_high());
        assert!(!HazardLevel::Medium.is_high());
    }
}
