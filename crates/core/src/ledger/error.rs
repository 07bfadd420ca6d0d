//! Ledger error types for rule violations and commit failures.
//!
//! Every rejected mutation surfaces as one of these variants and leaves the
//! ledger unchanged.

use thiserror::Error;
use tidemark_shared::AppError;
use tidemark_shared::types::{GramsCo2e, VesselId};

use super::eua::EuaOperationKind;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // ========== Input Errors ==========
    /// EUA counts must not be negative.
    #[error("EUA count cannot be negative: {0}")]
    NegativeCount(i64),

    /// Ledger amounts must be strictly positive.
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(GramsCo2e),

    /// HEDGE without a positive price.
    #[error("HEDGE requires a positive price per EUA")]
    MissingHedgePrice,

    /// SURRENDER without positive realized emissions.
    #[error("SURRENDER requires realized emissions greater than zero")]
    NoRealizedEmissions,

    // ========== EUA Rule Errors ==========
    /// Operation is not allowed given the period's history.
    #[error("{operation} not allowed: {reason}")]
    OutOfOrderOperation {
        /// The rejected operation kind.
        operation: EuaOperationKind,
        /// What the history is missing.
        reason: &'static str,
    },

    /// Surrendered EUAs do not cover the realized emissions.
    #[error("Insufficient surrender: requested {requested}, required {required}")]
    InsufficientSurrender {
        /// EUAs requested for surrender.
        requested: i64,
        /// EUAs required by the coverage rate.
        required: i64,
    },

    /// No coverage rate is configured for the year.
    #[error("No EU ETS coverage rate configured for {0}")]
    CoverageRateUnavailable(i32),

    // ========== FuelEU Rule Errors ==========
    /// Banking target outside the allowed window.
    #[error("Cannot bank from {current} into {target}: target must be 1 to {horizon} years ahead")]
    BankingHorizonExceeded {
        /// Period the surplus leaves.
        current: i32,
        /// Requested target period.
        target: i32,
        /// Maximum years ahead.
        horizon: i32,
    },

    /// Borrowing source outside the allowed window.
    #[error("Cannot borrow from {from} into {current}: source must be 1 to {horizon} years ahead")]
    BorrowingHorizonExceeded {
        /// Period receiving the advance.
        current: i32,
        /// Requested source period.
        from: i32,
        /// Maximum years ahead.
        horizon: i32,
    },

    /// Balance does not cover the requested amount.
    #[error("Insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Current balance.
        available: GramsCo2e,
        /// Amount requested.
        requested: GramsCo2e,
    },

    /// Pooled vessels cannot borrow.
    #[error("Vessel {vessel_id} is pooled in {period} and cannot borrow")]
    PooledVesselBorrow {
        /// The vessel.
        vessel_id: VesselId,
        /// The pooled period.
        period: i32,
    },

    /// A pool allocation already exists for the vessel and period.
    #[error("Vessel {vessel_id} already has a pool allocation for {period}")]
    DuplicatePoolAllocation {
        /// The vessel.
        vessel_id: VesselId,
        /// The period.
        period: i32,
    },

    /// Period cannot close with a negative balance.
    #[error("Cannot close {period} for vessel {vessel_id}: balance {balance} is negative")]
    ClosureDeficit {
        /// The vessel.
        vessel_id: VesselId,
        /// The period.
        period: i32,
        /// The outstanding balance.
        balance: GramsCo2e,
    },

    /// Closed periods are immutable.
    #[error("Period {period} is closed for vessel {vessel_id}")]
    PeriodClosed {
        /// The vessel.
        vessel_id: VesselId,
        /// The closed period.
        period: i32,
    },

    /// Checked arithmetic overflowed.
    #[error("Amount overflow")]
    AmountOverflow,

    // ========== Concurrency Errors ==========
    /// Another writer committed first.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,

    // ========== Storage Errors ==========
    /// Repository failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeCount(_) => "NEGATIVE_COUNT",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::MissingHedgePrice => "MISSING_HEDGE_PRICE",
            Self::NoRealizedEmissions => "NO_REALIZED_EMISSIONS",
            Self::OutOfOrderOperation { .. } => "OUT_OF_ORDER_OPERATION",
            Self::InsufficientSurrender { .. } => "INSUFFICIENT_SURRENDER",
            Self::CoverageRateUnavailable(_) => "COVERAGE_RATE_UNAVAILABLE",
            Self::BankingHorizonExceeded { .. } => "BANKING_HORIZON_EXCEEDED",
            Self::BorrowingHorizonExceeded { .. } => "BORROWING_HORIZON_EXCEEDED",
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::PooledVesselBorrow { .. } => "POOLED_VESSEL_BORROW",
            Self::DuplicatePoolAllocation { .. } => "DUPLICATE_POOL_ALLOCATION",
            Self::ClosureDeficit { .. } => "CLOSURE_DEFICIT",
            Self::PeriodClosed { .. } => "PERIOD_CLOSED",
            Self::AmountOverflow => "AMOUNT_OVERFLOW",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - malformed operations
            Self::NegativeCount(_)
            | Self::NonPositiveAmount(_)
            | Self::MissingHedgePrice
            | Self::NoRealizedEmissions
            | Self::AmountOverflow => 400,

            // 409 Conflict - state conflicts
            Self::DuplicatePoolAllocation { .. }
            | Self::PeriodClosed { .. }
            | Self::ConcurrentModification => 409,

            // 422 Unprocessable - regulatory rule violations
            Self::OutOfOrderOperation { .. }
            | Self::InsufficientSurrender { .. }
            | Self::BankingHorizonExceeded { .. }
            | Self::BorrowingHorizonExceeded { .. }
            | Self::InsufficientBalance { .. }
            | Self::PooledVesselBorrow { .. }
            | Self::ClosureDeficit { .. } => 422,

            // 500 Internal Server Error
            Self::CoverageRateUnavailable(_) | Self::Storage(_) => 500,
        }
    }

    /// Returns true if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err.http_status_code() {
            400 => Self::Validation(message),
            409 => Self::Conflict(message),
            422 => Self::BusinessRule(message),
            _ => match err {
                LedgerError::CoverageRateUnavailable(_) => Self::Configuration(message),
                LedgerError::Storage(_) => Self::Storage(message),
                _ => Self::Internal(message),
            },
        }
    }
}
