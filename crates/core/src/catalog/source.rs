//! Versioned catalog document, as read from TOML.

use rust_decimal::Decimal;
use serde::Deserialize;
use tidemark_shared::types::{BiofuelFeedstock, BiofuelGeneration, FuelType};

use super::properties::FuelPropertySpec;

/// A versioned fuel catalog document.
///
/// ```toml
/// version = "standard-2025"
///
/// [[fuels]]
/// fuel_type = "MGO"
/// [fuels.properties]
/// lower_calorific_value_mj_kg = "42.7"
///
/// [[feedstock_factors]]
/// feedstock = "RAPESEED"
/// factor = "25"
///
/// [[generation_multipliers]]
/// generation = "SECOND_GENERATION"
/// multiplier = "0.8"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Version tag, e.g. `"standard-2025"`.
    pub version: String,
    /// Per-fuel properties.
    #[serde(default)]
    pub fuels: Vec<FuelEntry>,
    /// Feedstock lifecycle factors.
    #[serde(default)]
    pub feedstock_factors: Vec<FeedstockFactorEntry>,
    /// Generation multipliers.
    #[serde(default)]
    pub generation_multipliers: Vec<GenerationMultiplierEntry>,
}

/// Properties for one fuel type.
#[derive(Debug, Clone, Deserialize)]
pub struct FuelEntry {
    /// Fuel type the properties describe.
    pub fuel_type: FuelType,
    /// The properties.
    #[serde(default)]
    pub properties: FuelPropertySpec,
}

/// Lifecycle factor for one feedstock.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedstockFactorEntry {
    /// Feedstock.
    pub feedstock: BiofuelFeedstock,
    /// Factor in gCO2e/MJ.
    pub factor: Decimal,
}

/// Multiplier for one biofuel generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationMultiplierEntry {
    /// Generation.
    pub generation: BiofuelGeneration,
    /// Multiplier.
    pub multiplier: Decimal,
}
