//! Catalog loading errors.

use thiserror::Error;
use tidemark_shared::AppError;
use tidemark_shared::types::{BiofuelFeedstock, BiofuelGeneration, FuelType};

/// Errors raised while building a fuel catalog from configuration.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read or parsed.
    #[error("Failed to load fuel catalog: {0}")]
    Load(#[from] config::ConfigError),

    /// The catalog document carries no version tag.
    #[error("Fuel catalog version is missing")]
    MissingVersion,

    /// A fuel type appears more than once.
    #[error("Duplicate catalog entry for fuel type {0}")]
    DuplicateFuel(FuelType),

    /// A feedstock appears more than once.
    #[error("Duplicate feedstock factor for {0:?}")]
    DuplicateFeedstock(BiofuelFeedstock),

    /// A generation appears more than once.
    #[error("Duplicate generation multiplier for {0:?}")]
    DuplicateGeneration(BiofuelGeneration),

    /// A physical property that must be positive is not.
    #[error("Invalid {property} for fuel type {fuel_type}: must be greater than 0")]
    NonPositiveProperty {
        /// Fuel type with the bad entry.
        fuel_type: FuelType,
        /// Property name.
        property: &'static str,
    },
}

impl CatalogError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load(_) => "CATALOG_LOAD_FAILED",
            Self::MissingVersion => "CATALOG_VERSION_MISSING",
            Self::DuplicateFuel(_) | Self::DuplicateFeedstock(_) | Self::DuplicateGeneration(_) => {
                "CATALOG_DUPLICATE_ENTRY"
            }
            Self::NonPositiveProperty { .. } => "CATALOG_INVALID_PROPERTY",
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self::Configuration(err.to_string())
    }
}

