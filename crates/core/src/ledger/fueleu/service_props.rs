//! Property-based tests for the FuelEU balance ledger.
//!
//! - Balance identity after every mutation
//! - Banked and borrowed never decrease
//! - Rejected mutations leave no visible change
//! - At most one pool allocation per vessel and period

use std::sync::Arc;

use proptest::prelude::*;
use tidemark_shared::config::LedgerConfig;
use tidemark_shared::types::{GramsCo2e, PoolId, VesselId};

use super::repository::InMemoryFuelEuRepository;
use super::service::FuelEuLedger;
use super::types::{FuelEuOperation, FuelEuPeriodBalance};
use crate::ledger::pool::AllocationType;
use crate::policy::CompliancePolicy;

const BASE_YEAR: i32 = 2025;

fn amount() -> impl Strategy<Value = GramsCo2e> {
    (-1_000_000i64..1_000_000i64).prop_map(GramsCo2e::new)
}

fn operation() -> impl Strategy<Value = (i32, FuelEuOperation)> {
    let period = 0i32..3i32;
    prop_oneof![
        (period.clone(), amount())
            .prop_map(|(p, amount)| (p, FuelEuOperation::RecordCompliance { amount })),
        (period.clone(), amount(), -1i32..12i32).prop_map(|(p, amount, ahead)| (
            p,
            FuelEuOperation::Bank {
                amount,
                target_period: BASE_YEAR + p + ahead,
            }
        )),
        (period.clone(), amount(), -1i32..3i32).prop_map(|(p, amount, ahead)| (
            p,
            FuelEuOperation::Borrow {
                amount,
                from_period: BASE_YEAR + p + ahead,
            }
        )),
        (period, amount(), any::<bool>()).prop_map(|(p, amount, outflow)| (
            p,
            FuelEuOperation::JoinPool {
                pool_id: PoolId::new(),
                allocation_type: if outflow {
                    AllocationType::Outflow
                } else {
                    AllocationType::Inflow
                },
                amount,
            }
        )),
    ]
}

fn snapshot(
    ledger: &FuelEuLedger<InMemoryFuelEuRepository>,
    vessel: VesselId,
) -> Vec<FuelEuPeriodBalance> {
    (BASE_YEAR..BASE_YEAR + 15)
        .map(|year| ledger.balance(vessel, year).unwrap())
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every accepted mutation keeps the identity and monotonic components;
    /// every rejected one leaves the ledger untouched.
    #[test]
    fn prop_balance_invariants(ops in prop::collection::vec(operation(), 1..25)) {
        let ledger = FuelEuLedger::new(
            InMemoryFuelEuRepository::new(),
            Arc::new(CompliancePolicy::default()),
            &LedgerConfig::default(),
        );
        let vessel = VesselId::new();

        for (offset, op) in ops {
            let before = snapshot(&ledger, vessel);
            let result = ledger.apply(vessel, BASE_YEAR + offset, op);
            let after = snapshot(&ledger, vessel);

            if result.is_err() {
                prop_assert_eq!(&before, &after);
            }
            for (old, new) in before.iter().zip(&after) {
                prop_assert_eq!(
                    Some(new.balance_gco2e),
                    new.banked_gco2e.checked_sub(new.borrowed_gco2e)
                );
                prop_assert!(!new.banked_gco2e.is_negative());
                prop_assert!(!new.borrowed_gco2e.is_negative());
                prop_assert!(new.banked_gco2e >= old.banked_gco2e);
                prop_assert!(new.borrowed_gco2e >= old.borrowed_gco2e);
            }
        }
    }

    /// Joining twice in one period always fails, whatever the pools.
    #[test]
    fn prop_pool_uniqueness(first in 1i64..10_000i64, second in 1i64..10_000i64) {
        let ledger = FuelEuLedger::new(
            InMemoryFuelEuRepository::new(),
            Arc::new(CompliancePolicy::default()),
            &LedgerConfig::default(),
        );
        let vessel = VesselId::new();
        let join = |amount| FuelEuOperation::JoinPool {
            pool_id: PoolId::new(),
            allocation_type: AllocationType::Inflow,
            amount: GramsCo2e::new(amount),
        };

        prop_assert!(ledger.apply(vessel, BASE_YEAR, join(first)).is_ok());
        prop_assert!(ledger.apply(vessel, BASE_YEAR, join(second)).is_err());
        prop_assert!(ledger.apply(vessel, BASE_YEAR + 1, join(second)).is_ok());
    }
}
