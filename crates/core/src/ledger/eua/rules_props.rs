//! Property-based tests for allowance rules.
//!
//! - Required EUAs are monotonic in emissions
//! - SURRENDER accepted exactly when it covers the requirement
//! - RECONCILE accepted exactly on an equal-magnitude SURRENDER

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use tidemark_shared::types::{EuaOperationId, OrganizationId};

use super::rules::{check_operation, required_euas};
use super::types::{EuaOperation, EuaOperationKind, EuaOperationRequest};
use crate::ledger::error::LedgerError;
use crate::policy::CompliancePolicy;

const YEAR: i32 = 2026;

/// Strategy for realized emissions (0.1 to 1,000,000.0 t).
fn emissions() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|v| Decimal::new(v, 1))
}

/// Strategy for a coverage rate (0.01 to 1.00).
fn rate() -> impl Strategy<Value = Decimal> {
    (1i64..=100i64).prop_map(|v| Decimal::new(v, 2))
}

fn surrender_entry(count: i64) -> EuaOperation {
    EuaOperation {
        id: EuaOperationId::new(),
        organization_id: OrganizationId::new(),
        period_year: YEAR,
        kind: EuaOperationKind::Surrender,
        euas_count: -count,
        price_per_eua: None,
        realized_emissions_t: None,
        executed_at: Utc.with_ymd_and_hms(2026, 4, 30, 0, 0, 0).unwrap(),
        reference_voyage_ids: Vec::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// More emissions never require fewer allowances.
    #[test]
    fn prop_required_euas_monotonic(a in emissions(), b in emissions(), r in rate()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let required_low = required_euas(low, r).unwrap();
        let required_high = required_euas(high, r).unwrap();
        prop_assert!(required_low <= required_high);
        prop_assert!(Decimal::from(required_low) >= low * r);
    }

    /// A surrender is accepted iff it covers ceil(emissions x rate).
    #[test]
    fn prop_surrender_threshold(e in emissions(), r in rate(), offset in -50i64..50i64) {
        let policy = CompliancePolicy::default().with_coverage_rate(YEAR, r);
        let required = required_euas(e, r).unwrap();
        let requested = (required + offset).max(1);
        let request = EuaOperationRequest::surrender(
            requested,
            e,
            Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
        );

        let result = check_operation(&[], YEAR, &request, &policy);
        if requested >= required {
            prop_assert_eq!(result, Ok(-requested));
        } else {
            prop_assert_eq!(
                result,
                Err(LedgerError::InsufficientSurrender { requested, required })
            );
        }
    }

    /// RECONCILE matches only a surrender of the same magnitude.
    #[test]
    fn prop_reconcile_exact_match(surrendered in 1i64..100_000i64, reconciled in 0i64..100_000i64) {
        let history = [surrender_entry(surrendered)];
        let request = EuaOperationRequest::reconcile(
            reconciled,
            Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap(),
        );
        let result = check_operation(&history, YEAR, &request, &CompliancePolicy::default());
        prop_assert_eq!(result.is_ok(), surrendered == reconciled);
    }
}
