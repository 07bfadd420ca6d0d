//! Year-dependent regulatory inputs.
//!
//! Coverage rates and reference intensities are policy data, not logic; they
//! come from `[policy]` in the application configuration.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tidemark_shared::config::PolicyConfig;
use tidemark_shared::types::FuelType;

/// Regulatory parameters consulted by the calculator and the ledgers.
#[derive(Debug, Clone)]
pub struct CompliancePolicy {
    coverage_rates: BTreeMap<i32, Decimal>,
    dated_intensities: HashMap<FuelType, BTreeMap<i32, Decimal>>,
    default_intensities: HashMap<FuelType, Decimal>,
    fallback_reference_intensity: Decimal,
    banking_horizon_years: i32,
    borrowing_horizon_years: i32,
}

impl CompliancePolicy {
    /// Builds the policy from configuration. Later entries win on repeats.
    #[must_use]
    pub fn from_config(config: &PolicyConfig) -> Self {
        let coverage_rates = config
            .coverage_rates
            .iter()
            .map(|entry| (entry.year, entry.rate))
            .collect();

        let mut dated_intensities: HashMap<FuelType, BTreeMap<i32, Decimal>> = HashMap::new();
        let mut default_intensities = HashMap::new();
        for entry in &config.reference_intensities {
            match entry.year {
                Some(year) => {
                    dated_intensities
                        .entry(entry.fuel_type)
                        .or_default()
                        .insert(year, entry.intensity);
                }
                None => {
                    default_intensities.insert(entry.fuel_type, entry.intensity);
                }
            }
        }

        Self {
            coverage_rates,
            dated_intensities,
            default_intensities,
            fallback_reference_intensity: config.fallback_reference_intensity,
            banking_horizon_years: config.banking_horizon_years,
            borrowing_horizon_years: config.borrowing_horizon_years,
        }
    }

    /// Sets the coverage rate for one year.
    #[must_use]
    pub fn with_coverage_rate(mut self, year: i32, rate: Decimal) -> Self {
        self.coverage_rates.insert(year, rate);
        self
    }

    /// EU ETS coverage rate for a reporting year, if configured.
    #[must_use]
    pub fn coverage_rate(&self, year: i32) -> Option<Decimal> {
        self.coverage_rates.get(&year).copied()
    }

    /// FuelEU reference intensity (gCO2e/MJ) for a fuel in a given year.
    ///
    /// Resolution order: entry for that year, latest earlier dated entry,
    /// undated entry, configured fallback.
    #[must_use]
    pub fn reference_intensity(&self, year: i32, fuel_type: FuelType) -> Decimal {
        self.dated_intensities
            .get(&fuel_type)
            .and_then(|by_year| by_year.range(..=year).next_back())
            .map(|(_, intensity)| *intensity)
            .or_else(|| self.default_intensities.get(&fuel_type).copied())
            .unwrap_or(self.fallback_reference_intensity)
    }

    /// Furthest period, in years ahead, a surplus may be banked into.
    #[must_use]
    pub const fn banking_horizon_years(&self) -> i32 {
        self.banking_horizon_years
    }

    /// Furthest period, in years ahead, a deficit may be borrowed from.
    #[must_use]
    pub const fn borrowing_horizon_years(&self) -> i32 {
        self.borrowing_horizon_years
    }
}

impl Default for CompliancePolicy {
    fn default() -> Self {
        Self::from_config(&PolicyConfig::default())
    }
}
