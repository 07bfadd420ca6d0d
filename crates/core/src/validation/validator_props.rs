//! Property-based tests for record validation.
//!
//! - Validity mirrors the error list
//! - Sulphur thresholds
//! - Collect-all agrees with one-by-one validation

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tidemark_shared::types::{FuelCategory, FuelType};

use super::batch::{ValidationMode, validate_batch};
use super::record::ComplianceValidator;
use super::types::ValidationCode;
use crate::record::FuelRecord;

/// Strategy for signed consumption (-100.000 to 10,000.000 t).
fn tonnes() -> impl Strategy<Value = Decimal> {
    (-100_000i64..10_000_000i64).prop_map(|kg| Decimal::new(kg, 3))
}

/// Strategy for sulphur content (0.00 to 5.00 %).
fn sulphur() -> impl Strategy<Value = Decimal> {
    (0i64..=500i64).prop_map(|v| Decimal::new(v, 2))
}

fn category() -> impl Strategy<Value = (FuelType, FuelCategory)> {
    prop_oneof![
        Just((FuelType::Hfo, FuelCategory::Fossil)),
        Just((FuelType::Fame, FuelCategory::Biofuel)),
        Just((FuelType::EAmmonia, FuelCategory::EFuel)),
        Just((FuelType::HfoBioBlend, FuelCategory::Hybrid)),
    ]
}

fn record(fuel: FuelType, category: FuelCategory, tonnes: Decimal) -> FuelRecord {
    FuelRecord::new(
        fuel,
        category,
        tonnes,
        NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// `is_valid` is exactly "no errors", and consumption drives INVALID_VALUE.
    #[test]
    fn prop_validity_matches_errors(
        (fuel, cat) in category(),
        t in tonnes(),
        s in sulphur(),
    ) {
        let mut rec = record(fuel, cat, t);
        rec.sulphur_content_pct = Some(s);
        let outcome = ComplianceValidator::default().validate(&rec);

        prop_assert_eq!(outcome.is_valid, outcome.errors.is_empty());
        prop_assert_eq!(
            outcome.has_error(ValidationCode::InvalidValue),
            t <= Decimal::ZERO
        );
    }

    /// Sulphur above 3.5 % is a hard stop; above 0.5 % always warns.
    #[test]
    fn prop_sulphur_thresholds(s in sulphur()) {
        let mut rec = record(FuelType::Hfo, FuelCategory::Fossil, Decimal::ONE);
        rec.sulphur_content_pct = Some(s);
        let outcome = ComplianceValidator::default().validate(&rec);

        prop_assert_eq!(outcome.has_regulatory_violation(), s > Decimal::new(35, 1));
        prop_assert_eq!(
            outcome.has_warning(ValidationCode::RegulatoryWarning),
            s > Decimal::new(5, 1)
        );
    }

    /// Parallel collect-all produces the same outcomes as sequential validation.
    #[test]
    fn prop_collect_all_matches_sequential(
        amounts in prop::collection::vec(tonnes(), 0..20),
    ) {
        let validator = ComplianceValidator::default();
        let records: Vec<_> = amounts
            .into_iter()
            .map(|t| record(FuelType::Hfo, FuelCategory::Fossil, t))
            .collect();

        let batch = validate_batch(&validator, &records, ValidationMode::CollectAll);
        let sequential: Vec<_> = records.iter().map(|r| validator.validate(r)).collect();
        prop_assert_eq!(batch.outcomes, sequential);
    }
}
