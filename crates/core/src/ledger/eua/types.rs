//! EU ETS allowance operation types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tidemark_shared::types::{EuaOperationId, OrganizationId, VoyageId};

/// Kind of allowance operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EuaOperationKind {
    /// Expected allowance need.
    Forecast,
    /// Allowances bought ahead.
    Hedge,
    /// Allowances handed in for realized emissions.
    Surrender,
    /// Confirmation of a surrender by the registry.
    Reconcile,
}

impl EuaOperationKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forecast => "FORECAST",
            Self::Hedge => "HEDGE",
            Self::Surrender => "SURRENDER",
            Self::Reconcile => "RECONCILE",
        }
    }
}

impl std::fmt::Display for EuaOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requested allowance operation.
///
/// `euas_count` is always a non-negative magnitude here; SURRENDER is stored
/// with a negative sign once accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuaOperationRequest {
    /// Operation kind.
    pub kind: EuaOperationKind,
    /// Number of allowances.
    pub euas_count: i64,
    /// Price per allowance (HEDGE only).
    #[serde(default)]
    pub price_per_eua: Option<Decimal>,
    /// Realized emissions in tonnes CO2 (SURRENDER only).
    #[serde(default)]
    pub realized_emissions_t: Option<Decimal>,
    /// Execution time.
    pub executed_at: DateTime<Utc>,
    /// Voyages the operation relates to.
    #[serde(default)]
    pub reference_voyage_ids: Vec<VoyageId>,
}

impl EuaOperationRequest {
    fn new(kind: EuaOperationKind, euas_count: i64, executed_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            euas_count,
            price_per_eua: None,
            realized_emissions_t: None,
            executed_at,
            reference_voyage_ids: Vec::new(),
        }
    }

    /// A FORECAST of `euas_count` allowances.
    #[must_use]
    pub fn forecast(euas_count: i64, executed_at: DateTime<Utc>) -> Self {
        Self::new(EuaOperationKind::Forecast, euas_count, executed_at)
    }

    /// A HEDGE of `euas_count` allowances at `price_per_eua`.
    #[must_use]
    pub fn hedge(euas_count: i64, price_per_eua: Decimal, executed_at: DateTime<Utc>) -> Self {
        Self {
            price_per_eua: Some(price_per_eua),
            ..Self::new(EuaOperationKind::Hedge, euas_count, executed_at)
        }
    }

    /// A SURRENDER of `euas_count` allowances against realized emissions.
    #[must_use]
    pub fn surrender(
        euas_count: i64,
        realized_emissions_t: Decimal,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            realized_emissions_t: Some(realized_emissions_t),
            ..Self::new(EuaOperationKind::Surrender, euas_count, executed_at)
        }
    }

    /// A RECONCILE of a prior surrender of `euas_count` allowances.
    #[must_use]
    pub fn reconcile(euas_count: i64, executed_at: DateTime<Utc>) -> Self {
        Self::new(EuaOperationKind::Reconcile, euas_count, executed_at)
    }

    /// Attaches voyage references.
    #[must_use]
    pub fn with_voyages(mut self, voyage_ids: Vec<VoyageId>) -> Self {
        self.reference_voyage_ids = voyage_ids;
        self
    }
}

/// An accepted, immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuaOperation {
    /// Entry ID.
    pub id: EuaOperationId,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Reporting year.
    pub period_year: i32,
    /// Operation kind.
    pub kind: EuaOperationKind,
    /// Signed count; negative only for SURRENDER.
    pub euas_count: i64,
    /// Price per allowance (HEDGE only).
    pub price_per_eua: Option<Decimal>,
    /// Realized emissions the surrender covers (SURRENDER only).
    pub realized_emissions_t: Option<Decimal>,
    /// Execution time.
    pub executed_at: DateTime<Utc>,
    /// Voyages the operation relates to.
    pub reference_voyage_ids: Vec<VoyageId>,
}

/// Per-period allowance totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EuaPeriodSummary {
    /// Number of entries in the period.
    pub operation_count: usize,
    /// Sum of FORECAST counts.
    pub forecast_euas: i64,
    /// Sum of HEDGE counts.
    pub hedged_euas: i64,
    /// Sum of SURRENDER magnitudes.
    pub surrendered_euas: i64,
    /// Sum of RECONCILE counts.
    pub reconciled_euas: i64,
    /// Total spent on hedges.
    pub total_hedge_cost: Decimal,
    /// Count-weighted average hedge price.
    pub average_hedge_price: Option<Decimal>,
    /// How close the forecast came to the surrendered amount, in [0, 1].
    pub forecast_accuracy: Option<Decimal>,
}
