//! Storage seam for allowance history.

use dashmap::DashMap;
use tidemark_shared::types::OrganizationId;

use super::types::EuaOperation;
use crate::ledger::error::LedgerError;

/// Append-only store of allowance operations, keyed by organization and
/// period.
pub trait EuaRepository: Send + Sync {
    /// All entries for the key, in append order.
    fn history(
        &self,
        organization_id: OrganizationId,
        period_year: i32,
    ) -> Result<Vec<EuaOperation>, LedgerError>;

    /// Appends `operation` if the key still holds exactly `expected_len`
    /// entries, otherwise fails with `ConcurrentModification`.
    fn append(&self, operation: EuaOperation, expected_len: usize) -> Result<(), LedgerError>;
}

/// An in-memory [`EuaRepository`] sharded per key.
#[derive(Debug, Default)]
pub struct InMemoryEuaRepository {
    entries: DashMap<(OrganizationId, i32), Vec<EuaOperation>>,
}

impl InMemoryEuaRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EuaRepository for InMemoryEuaRepository {
    fn history(
        &self,
        organization_id: OrganizationId,
        period_year: i32,
    ) -> Result<Vec<EuaOperation>, LedgerError> {
        Ok(self
            .entries
            .get(&(organization_id, period_year))
            .map(|entries| entries.clone())
            .unwrap_or_default())
    }

    fn append(&self, operation: EuaOperation, expected_len: usize) -> Result<(), LedgerError> {
        let key = (operation.organization_id, operation.period_year);
        let mut entries = self.entries.entry(key).or_default();
        if entries.len() != expected_len {
            return Err(LedgerError::ConcurrentModification);
        }
        entries.push(operation);
        Ok(())
    }
}
