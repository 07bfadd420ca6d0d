//! Fuel property catalog.
//!
//! Plain lookup maps keyed by fuel type, feedstock and generation. The
//! built-in table is versioned `standard-2024`; regulatory updates ship as a
//! new catalog TOML rather than a code change.

pub mod error;
pub mod properties;
pub mod source;
mod standard;

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use tidemark_shared::config::CatalogSettings;
use tidemark_shared::types::{BiofuelFeedstock, BiofuelGeneration, FuelType};

pub use error::CatalogError;
pub use properties::FuelPropertySpec;
pub use source::{CatalogConfig, FeedstockFactorEntry, FuelEntry, GenerationMultiplierEntry};
pub use standard::STANDARD_VERSION;

/// Factor used for feedstocks missing from the catalog (gCO2e/MJ).
pub const FALLBACK_FEEDSTOCK_FACTOR: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Multiplier used when no generation is declared or it is missing from the catalog.
pub const FALLBACK_GENERATION_MULTIPLIER: Decimal = Decimal::ONE;

/// Versioned fuel property catalog.
#[derive(Debug, Clone)]
pub struct FuelCatalog {
    version: String,
    fuels: HashMap<FuelType, FuelPropertySpec>,
    feedstock_factors: HashMap<BiofuelFeedstock, Decimal>,
    generation_multipliers: HashMap<BiofuelGeneration, Decimal>,
}

impl FuelCatalog {
    /// The built-in standard table.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            version: STANDARD_VERSION.to_string(),
            fuels: standard::fuels(),
            feedstock_factors: standard::feedstock_factors(),
            generation_multipliers: standard::generation_multipliers(),
        }
    }

    /// Builds a catalog from a parsed catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on a missing version, duplicate entries, or a
    /// non-positive density or calorific value.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        if config.version.trim().is_empty() {
            return Err(CatalogError::MissingVersion);
        }

        let mut fuels = HashMap::with_capacity(config.fuels.len());
        for entry in config.fuels {
            validate_entry(&entry)?;
            if fuels.insert(entry.fuel_type, entry.properties).is_some() {
                return Err(CatalogError::DuplicateFuel(entry.fuel_type));
            }
        }

        let mut feedstock_factors = HashMap::with_capacity(config.feedstock_factors.len());
        for entry in config.feedstock_factors {
            if feedstock_factors.insert(entry.feedstock, entry.factor).is_some() {
                return Err(CatalogError::DuplicateFeedstock(entry.feedstock));
            }
        }

        let mut generation_multipliers =
            HashMap::with_capacity(config.generation_multipliers.len());
        for entry in config.generation_multipliers {
            if generation_multipliers
                .insert(entry.generation, entry.multiplier)
                .is_some()
            {
                return Err(CatalogError::DuplicateGeneration(entry.generation));
            }
        }

        Ok(Self {
            version: config.version,
            fuels,
            feedstock_factors,
            generation_multipliers,
        })
    }

    /// Loads a catalog TOML file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Load` if the file cannot be read or parsed, or
    /// any error from [`FuelCatalog::from_config`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let document: CatalogConfig = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        let catalog = Self::from_config(document)?;
        tracing::info!(
            path = %path.display(),
            version = %catalog.version,
            fuels = catalog.fuels.len(),
            "fuel catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads the catalog named in the settings, or the standard table.
    ///
    /// # Errors
    ///
    /// Returns any error from [`FuelCatalog::load`].
    pub fn from_settings(settings: &CatalogSettings) -> Result<Self, CatalogError> {
        match settings.path.as_deref() {
            Some(path) => Self::load(path),
            None => {
                tracing::debug!(version = STANDARD_VERSION, "using built-in fuel catalog");
                Ok(Self::standard())
            }
        }
    }

    /// Version tag of this catalog.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Standard properties of a fuel type.
    #[must_use]
    pub fn properties(&self, fuel_type: FuelType) -> Option<&FuelPropertySpec> {
        self.fuels.get(&fuel_type)
    }

    /// Lifecycle factor of a feedstock, falling back to 25 gCO2e/MJ.
    #[must_use]
    pub fn feedstock_factor(&self, feedstock: Option<BiofuelFeedstock>) -> Decimal {
        feedstock
            .and_then(|f| self.feedstock_factors.get(&f).copied())
            .unwrap_or(FALLBACK_FEEDSTOCK_FACTOR)
    }

    /// ILUC multiplier of a generation, falling back to 1.0.
    #[must_use]
    pub fn generation_multiplier(&self, generation: Option<BiofuelGeneration>) -> Decimal {
        generation
            .and_then(|g| self.generation_multipliers.get(&g).copied())
            .unwrap_or(FALLBACK_GENERATION_MULTIPLIER)
    }

    /// Fuel types with an entry, in declaration order.
    #[must_use]
    pub fn fuel_types(&self) -> Vec<FuelType> {
        FuelType::ALL
            .into_iter()
            .filter(|fuel| self.fuels.contains_key(fuel))
            .collect()
    }
}

impl Default for FuelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_entry(entry: &FuelEntry) -> Result<(), CatalogError> {
    let checks = [
        ("density_kg_m3", entry.properties.density_kg_m3),
        (
            "lower_calorific_value_mj_kg",
            entry.properties.lower_calorific_value_mj_kg,
        ),
    ];
    for (property, value) in checks {
        if value.is_some_and(|v| v <= Decimal::ZERO) {
            return Err(CatalogError::NonPositiveProperty {
                fuel_type: entry.fuel_type,
                property,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_version_and_coverage() {
        let catalog = FuelCatalog::standard();
        assert_eq!(catalog.version(), "standard-2024");
        assert_eq!(catalog.fuel_types().len(), 22);
        assert!(catalog.properties(FuelType::DimethylEther).is_none());
        assert!(catalog.properties(FuelType::BioHfo).is_none());
    }

    #[rstest]
    #[case(FuelType::Mgo, dec!(42.7), dec!(86.0), dec!(89.0))]
    #[case(FuelType::Hfo, dec!(40.2), dec!(87.0), dec!(94.0))]
    #[case(FuelType::Hvo, dec!(44.0), dec!(85.0), dec!(15.0))]
    #[case(FuelType::EMethanol, dec!(19.9), dec!(37.5), dec!(0))]
    fn test_standard_properties(
        #[case] fuel: FuelType,
        #[case] lcv: Decimal,
        #[case] carbon: Decimal,
        #[case] wtw: Decimal,
    ) {
        let spec = FuelCatalog::standard().properties(fuel).cloned().unwrap();
        assert_eq!(spec.lower_calorific_value_mj_kg, Some(lcv));
        assert_eq!(spec.carbon_content_pct, Some(carbon));
        assert_eq!(spec.well_to_wake_gco2e_mj, Some(wtw));
    }

    #[test]
    fn test_feedstock_factor_fallback() {
        let catalog = FuelCatalog::standard();
        assert_eq!(
            catalog.feedstock_factor(Some(BiofuelFeedstock::WasteCookingOil)),
            dec!(10)
        );
        assert_eq!(catalog.feedstock_factor(Some(BiofuelFeedstock::Palm)), dec!(35));
        assert_eq!(catalog.feedstock_factor(None), dec!(25));
    }

    #[rstest]
    #[case(Some(BiofuelGeneration::FirstGeneration), dec!(1.2))]
    #[case(Some(BiofuelGeneration::SecondGeneration), dec!(0.8))]
    #[case(Some(BiofuelGeneration::ThirdGeneration), dec!(0.5))]
    #[case(Some(BiofuelGeneration::FourthGeneration), dec!(0.2))]
    #[case(None, dec!(1))]
    fn test_generation_multiplier(
        #[case] generation: Option<BiofuelGeneration>,
        #[case] expected: Decimal,
    ) {
        assert_eq!(
            FuelCatalog::standard().generation_multiplier(generation),
            expected
        );
    }

    fn document(fuels: Vec<FuelEntry>) -> CatalogConfig {
        CatalogConfig {
            version: "test-1".to_string(),
            fuels,
            feedstock_factors: vec![],
            generation_multipliers: vec![],
        }
    }

    #[test]
    fn test_from_config_builds_maps() {
        let catalog = FuelCatalog::from_config(CatalogConfig {
            version: "custom-2030".to_string(),
            fuels: vec![FuelEntry {
                fuel_type: FuelType::DimethylEther,
                properties: FuelPropertySpec {
                    lower_calorific_value_mj_kg: Some(dec!(28.8)),
                    ..FuelPropertySpec::default()
                },
            }],
            feedstock_factors: vec![FeedstockFactorEntry {
                feedstock: BiofuelFeedstock::Algae,
                factor: dec!(3),
            }],
            generation_multipliers: vec![],
        })
        .unwrap();

        assert_eq!(catalog.version(), "custom-2030");
        assert_eq!(
            catalog
                .properties(FuelType::DimethylEther)
                .and_then(|s| s.lower_calorific_value_mj_kg),
            Some(dec!(28.8))
        );
        assert!(catalog.properties(FuelType::Mgo).is_none());
        assert_eq!(catalog.feedstock_factor(Some(BiofuelFeedstock::Algae)), dec!(3));
        // Missing entries fall back rather than erroring
        assert_eq!(catalog.feedstock_factor(Some(BiofuelFeedstock::Soy)), dec!(25));
        assert_eq!(
            catalog.generation_multiplier(Some(BiofuelGeneration::FirstGeneration)),
            dec!(1)
        );
    }

    #[test]
    fn test_from_config_rejects_duplicates() {
        let entry = FuelEntry {
            fuel_type: FuelType::Mgo,
            properties: FuelPropertySpec::default(),
        };
        let err = FuelCatalog::from_config(document(vec![entry.clone(), entry])).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateFuel(FuelType::Mgo)));
        assert_eq!(err.error_code(), "CATALOG_DUPLICATE_ENTRY");
    }

    #[test]
    fn test_from_config_rejects_non_positive_lcv() {
        let entry = FuelEntry {
            fuel_type: FuelType::Lng,
            properties: FuelPropertySpec {
                lower_calorific_value_mj_kg: Some(Decimal::ZERO),
                ..FuelPropertySpec::default()
            },
        };
        let err = FuelCatalog::from_config(document(vec![entry])).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::NonPositiveProperty {
                fuel_type: FuelType::Lng,
                property: "lower_calorific_value_mj_kg"
            }
        ));
    }

    #[test]
    fn test_from_config_requires_version() {
        let mut doc = document(vec![]);
        doc.version = "  ".to_string();
        assert!(matches!(
            FuelCatalog::from_config(doc),
            Err(CatalogError::MissingVersion)
        ));
    }

    #[test]
    fn test_shipped_catalog_file_matches_standard_table() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../config/catalog/standard-2024.toml");
        let loaded = FuelCatalog::load(path).unwrap();
        let standard = FuelCatalog::standard();

        assert_eq!(loaded.version(), standard.version());
        assert_eq!(loaded.fuel_types(), standard.fuel_types());
        for fuel in standard.fuel_types() {
            assert_eq!(loaded.properties(fuel), standard.properties(fuel), "{fuel}");
        }
        assert_eq!(loaded.feedstock_factors, standard.feedstock_factors);
        assert_eq!(loaded.generation_multipliers, standard.generation_multipliers);
    }

    #[test]
    fn test_load_missing_file() {
        let err = FuelCatalog::load("does/not/exist.toml").unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_LOAD_FAILED");
    }

    #[test]
    fn test_from_settings_defaults_to_standard() {
        let catalog = FuelCatalog::from_settings(&CatalogSettings::default()).unwrap();
        assert_eq!(catalog.version(), STANDARD_VERSION);
    }
}
