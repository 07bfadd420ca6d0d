//! EU ETS allowance ledger service.

use std::sync::Arc;

use tidemark_shared::config::LedgerConfig;
use tidemark_shared::types::{EuaOperationId, OrganizationId};

use super::repository::EuaRepository;
use super::rules;
use super::types::{EuaOperation, EuaOperationRequest, EuaPeriodSummary};
use crate::ledger::error::LedgerError;
use crate::ledger::retry::commit_with_retries;
use crate::policy::CompliancePolicy;

/// Append-only allowance ledger per (organization, period).
///
/// Entries never change once written; corrections are new entries.
#[derive(Debug)]
pub struct EuaLedger<R> {
    repository: R,
    policy: Arc<CompliancePolicy>,
    max_commit_retries: u32,
}

impl<R: EuaRepository> EuaLedger<R> {
    /// Creates a ledger over `repository`.
    #[must_use]
    pub fn new(repository: R, policy: Arc<CompliancePolicy>, config: &LedgerConfig) -> Self {
        Self {
            repository,
            policy,
            max_commit_retries: config.max_commit_retries,
        }
    }

    /// The underlying repository.
    #[must_use]
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validates and appends one operation.
    ///
    /// # Errors
    ///
    /// Returns the violated rule, `ConcurrentModification` once retries are
    /// exhausted, or a storage error. Nothing is written on error.
    pub fn apply(
        &self,
        organization_id: OrganizationId,
        period_year: i32,
        request: EuaOperationRequest,
    ) -> Result<EuaOperation, LedgerError> {
        let result = commit_with_retries(self.max_commit_retries, request.kind.as_str(), || {
            let history = self.repository.history(organization_id, period_year)?;
            let euas_count = rules::check_operation(&history, period_year, &request, &self.policy)?;

            let operation = EuaOperation {
                id: EuaOperationId::new(),
                organization_id,
                period_year,
                kind: request.kind,
                euas_count,
                price_per_eua: request.price_per_eua,
                realized_emissions_t: request.realized_emissions_t,
                executed_at: request.executed_at,
                reference_voyage_ids: request.reference_voyage_ids.clone(),
            };
            self.repository.append(operation.clone(), history.len())?;
            Ok(operation)
        });

        match &result {
            Ok(operation) => tracing::info!(
                organization_id = %organization_id,
                period_year,
                kind = %operation.kind,
                euas_count = operation.euas_count,
                "EUA operation committed"
            ),
            Err(err) => tracing::warn!(
                organization_id = %organization_id,
                period_year,
                kind = %request.kind,
                code = err.error_code(),
                error = %err,
                "EUA operation rejected"
            ),
        }
        result
    }

    /// All entries for the period, in append order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn history(
        &self,
        organization_id: OrganizationId,
        period_year: i32,
    ) -> Result<Vec<EuaOperation>, LedgerError> {
        self.repository.history(organization_id, period_year)
    }

    /// Totals, hedge cost and forecast accuracy for the period.
    ///
    /// # Errors
    ///
    /// Returns a storage error, or `LedgerError::AmountOverflow` if the
    /// period's hedge cost is not representable.
    pub fn summary(
        &self,
        organization_id: OrganizationId,
        period_year: i32,
    ) -> Result<EuaPeriodSummary, LedgerError> {
        let history = self.repository.history(organization_id, period_year)?;
        rules::summarize(&history)
    }
}
