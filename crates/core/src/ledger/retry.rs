//! Optimistic commit loop shared by the ledger services.

use super::error::LedgerError;

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` re-runs have been spent.
///
/// Each run must reload state and re-check the rules before committing.
pub(crate) fn commit_with_retries<T, F>(
    max_retries: u32,
    operation: &str,
    mut attempt: F,
) -> Result<T, LedgerError>
where
    F: FnMut() -> Result<T, LedgerError>,
{
    let mut retries = 0;
    loop {
        match attempt() {
            Err(err) if err.is_retryable() && retries < max_retries => {
                retries += 1;
                tracing::debug!(operation, retries, max_retries, "ledger commit conflict, retrying");
            }
            result => return result,
        }
    }
}
