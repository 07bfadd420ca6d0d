//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::FuelType;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger service configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Regulatory policy inputs.
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Fuel property catalog source.
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Ledger service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// How many times a commit is re-validated after a concurrent modification.
    #[serde(default = "default_max_commit_retries")]
    pub max_commit_retries: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: default_max_commit_retries(),
        }
    }
}

fn default_max_commit_retries() -> u32 {
    3
}

/// Year-dependent regulatory inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// EU ETS share of emissions that must be covered by surrendered allowances.
    #[serde(default = "default_coverage_rates")]
    pub coverage_rates: Vec<CoverageRateEntry>,
    /// FuelEU reference intensities (gCO2e/MJ) per fuel type.
    #[serde(default = "default_reference_intensities")]
    pub reference_intensities: Vec<ReferenceIntensityEntry>,
    /// Intensity used for fuel types with no reference entry.
    #[serde(default = "default_fallback_reference_intensity")]
    pub fallback_reference_intensity: Decimal,
    /// Furthest future period a surplus may be banked into.
    #[serde(default = "default_banking_horizon")]
    pub banking_horizon_years: i32,
    /// Furthest future period a deficit may be borrowed from.
    #[serde(default = "default_borrowing_horizon")]
    pub borrowing_horizon_years: i32,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            coverage_rates: default_coverage_rates(),
            reference_intensities: default_reference_intensities(),
            fallback_reference_intensity: default_fallback_reference_intensity(),
            banking_horizon_years: default_banking_horizon(),
            borrowing_horizon_years: default_borrowing_horizon(),
        }
    }
}

/// EU ETS coverage rate for one reporting year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CoverageRateEntry {
    /// Reporting year.
    pub year: i32,
    /// Fraction of emissions to cover, in `[0, 1]`.
    pub rate: Decimal,
}

/// FuelEU reference intensity for one fuel type.
///
/// Entries without a year apply to every year that has no more specific entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceIntensityEntry {
    /// Fuel the intensity applies to.
    pub fuel_type: FuelType,
    /// First year the intensity applies to.
    #[serde(default)]
    pub year: Option<i32>,
    /// Reference intensity in gCO2e/MJ.
    pub intensity: Decimal,
}

fn default_coverage_rates() -> Vec<CoverageRateEntry> {
    // EU ETS maritime phase-in
    [(2024, Decimal::new(40, 2)), (2025, Decimal::new(70, 2)), (2026, Decimal::ONE)]
        .into_iter()
        .map(|(year, rate)| CoverageRateEntry { year, rate })
        .collect()
}

fn default_reference_intensities() -> Vec<ReferenceIntensityEntry> {
    [
        (FuelType::Mgo, 89),
        (FuelType::Mdo, 90),
        (FuelType::Hfo, 94),
        (FuelType::Lng, 85),
        (FuelType::BioMgo, 25),
        (FuelType::BioMdo, 30),
        (FuelType::Fame, 20),
        (FuelType::Hvo, 15),
        (FuelType::EMethanol, 0),
        (FuelType::EAmmonia, 0),
        (FuelType::EHydrogen, 0),
    ]
    .into_iter()
    .map(|(fuel_type, intensity)| ReferenceIntensityEntry {
        fuel_type,
        year: None,
        intensity: Decimal::from(intensity),
    })
    .collect()
}

fn default_fallback_reference_intensity() -> Decimal {
    Decimal::from(90)
}

fn default_banking_horizon() -> i32 {
    10
}

fn default_borrowing_horizon() -> i32 {
    1
}

/// Where the fuel property catalog comes from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// Path to a versioned catalog TOML. The built-in standard table is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `TIDEMARK__SECTION__KEY` environment variables. A `.env` file is
    /// loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("TIDEMARK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Returns the coverage rate configured for `year`, if any.
    #[must_use]
    pub fn coverage_rate(&self, year: i32) -> Option<Decimal> {
        self.policy
            .coverage_rates
            .iter()
            .find(|entry| entry.year == year)
            .map(|entry| entry.rate)
    }
}
