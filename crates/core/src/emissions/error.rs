//! Emissions calculation errors.

use thiserror::Error;
use tidemark_shared::AppError;
use tidemark_shared::types::FuelType;

/// Errors that block an emissions calculation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Neither the catalog nor the caller's override has properties for the fuel.
    #[error("No fuel properties found for fuel type: {0}")]
    UnknownFuelType(FuelType),

    /// An aggregate metric was requested with a zero denominator.
    #[error("Cannot compute {metric}: {denominator} is zero")]
    ZeroDenominator {
        /// Metric being computed.
        metric: &'static str,
        /// Input that was zero.
        denominator: &'static str,
    },

    /// An intermediate quantity left the representable decimal range.
    #[error("Arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

impl CalculationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownFuelType(_) => "UNKNOWN_FUEL_TYPE",
            Self::ZeroDenominator { .. } => "ZERO_DENOMINATOR",
            Self::Overflow(_) => "CALCULATION_OVERFLOW",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::UnknownFuelType(_) => 422,
            Self::ZeroDenominator { .. } | Self::Overflow(_) => 400,
        }
    }
}

impl From<CalculationError> for AppError {
    fn from(err: CalculationError) -> Self {
        match err {
            CalculationError::UnknownFuelType(_) => Self::BusinessRule(err.to_string()),
            CalculationError::ZeroDenominator { .. } | CalculationError::Overflow(_) => {
                Self::Validation(err.to_string())
            }
        }
    }
}
