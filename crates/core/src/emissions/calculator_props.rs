//! Property-based tests for the emissions calculator.
//!
//! - Determinism of repeated computation
//! - E-fuel zero legs
//! - Efficiency gain cap
//! - Leg identity for biofuels and hybrids

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use tidemark_shared::types::{BiofuelFeedstock, BiofuelGeneration, FuelCategory, FuelType};

use super::calculator::EmissionsCalculator;
use crate::record::{EfficiencyTechnologies, FuelRecord};

/// Strategy for consumption in tonnes (0.001 to 10,000.000).
fn tonnes() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|kg| Decimal::new(kg, 3))
}

/// Strategy for a calorific value (10.0 to 120.0 MJ/kg).
fn lcv() -> impl Strategy<Value = Decimal> {
    (100i64..=1200i64).prop_map(|v| Decimal::new(v, 1))
}

/// Strategy for a single technology gain (0.0 to 60.0 %).
fn gain_pct() -> impl Strategy<Value = Decimal> {
    (0i64..=600i64).prop_map(|v| Decimal::new(v, 1))
}

fn feedstock() -> impl Strategy<Value = BiofuelFeedstock> {
    prop_oneof![
        Just(BiofuelFeedstock::Rapeseed),
        Just(BiofuelFeedstock::Palm),
        Just(BiofuelFeedstock::WasteCookingOil),
        Just(BiofuelFeedstock::Algae),
        Just(BiofuelFeedstock::MunicipalWaste),
    ]
}

fn generation() -> impl Strategy<Value = Option<BiofuelGeneration>> {
    prop_oneof![
        Just(None),
        Just(Some(BiofuelGeneration::FirstGeneration)),
        Just(Some(BiofuelGeneration::SecondGeneration)),
        Just(Some(BiofuelGeneration::ThirdGeneration)),
        Just(Some(BiofuelGeneration::FourthGeneration)),
    ]
}

fn fuel_and_category() -> impl Strategy<Value = (FuelType, FuelCategory)> {
    prop_oneof![
        Just((FuelType::Mgo, FuelCategory::Fossil)),
        Just((FuelType::Hfo, FuelCategory::Fossil)),
        Just((FuelType::Lng, FuelCategory::Fossil)),
        Just((FuelType::Hvo, FuelCategory::Biofuel)),
        Just((FuelType::Fame, FuelCategory::Biofuel)),
        Just((FuelType::EMethanol, FuelCategory::EFuel)),
        Just((FuelType::EAmmonia, FuelCategory::EFuel)),
        Just((FuelType::MgoBioBlend, FuelCategory::Hybrid)),
    ]
}

fn record(fuel: FuelType, category: FuelCategory, tonnes: Decimal) -> FuelRecord {
    FuelRecord::new(
        fuel,
        category,
        tonnes,
        NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Computing twice from the same record yields identical results.
    #[test]
    fn prop_compute_is_deterministic(
        (fuel, category) in fuel_and_category(),
        t in tonnes(),
        lcv in lcv(),
        stock in feedstock(),
        generation in generation(),
    ) {
        let calculator = EmissionsCalculator::default();
        let mut rec = record(fuel, category, t);
        rec.lower_calorific_value_mj_kg = Some(lcv);
        rec.biofuel.feedstock = Some(stock);
        rec.biofuel.generation = generation;

        let first = calculator.compute(&rec, None).unwrap();
        let second = calculator.compute(&rec, None).unwrap();
        prop_assert_eq!(first, second);
    }

    /// E-fuel legs are exactly zero whatever the inputs.
    #[test]
    fn prop_efuel_legs_zero(
        t in tonnes(),
        lcv in lcv(),
        mewis in gain_pct(),
    ) {
        let mut rec = record(FuelType::EMethanol, FuelCategory::EFuel, t);
        rec.lower_calorific_value_mj_kg = Some(lcv);
        rec.efficiency.mewis_duct_installed = true;
        rec.efficiency.mewis_duct_efficiency_gain_pct = Some(mewis);

        let result = EmissionsCalculator::default().compute(&rec, None).unwrap();
        prop_assert_eq!(result.well_to_wake_gco2e, Decimal::ZERO);
        prop_assert_eq!(result.tank_to_wake_gco2e, Decimal::ZERO);
        prop_assert_eq!(result.well_to_tank_gco2e, Decimal::ZERO);
    }

    /// Applied gain never exceeds 100 % and equals the nominal sum below it.
    #[test]
    fn prop_gain_capped(
        mewis in gain_pct(),
        wind in gain_pct(),
        other in gain_pct(),
    ) {
        let mut rec = record(FuelType::Mdo, FuelCategory::Fossil, Decimal::TEN);
        rec.efficiency = EfficiencyTechnologies {
            mewis_duct_installed: true,
            mewis_duct_efficiency_gain_pct: Some(mewis),
            wind_turbines_installed: true,
            wind_turbines_efficiency_gain_pct: Some(wind),
            other_efficiency_gain_pct: Some(other),
            shore_power: None,
        };

        let result = EmissionsCalculator::default().compute(&rec, None).unwrap();
        let nominal = mewis + wind + other;
        prop_assert_eq!(result.efficiency.nominal_total_pct, nominal);
        prop_assert!(result.efficiency.applied_total_pct <= Decimal::ONE_HUNDRED);
        if nominal <= Decimal::ONE_HUNDRED {
            prop_assert_eq!(result.efficiency.applied_total_pct, nominal);
        }
        prop_assert!(result.energy_gj >= Decimal::ZERO);
    }

    /// For biofuels and hybrids, WtT is WtW minus TtW.
    #[test]
    fn prop_bio_leg_identity(
        hybrid in any::<bool>(),
        t in tonnes(),
        stock in feedstock(),
        blend in 1i64..=100i64,
    ) {
        let (fuel, category) = if hybrid {
            (FuelType::MgoBioBlend, FuelCategory::Hybrid)
        } else {
            (FuelType::Hvo, FuelCategory::Biofuel)
        };
        let mut rec = record(fuel, category, t);
        rec.biofuel.feedstock = Some(stock);
        rec.biofuel.blend_ratio_pct = Some(Decimal::from(blend));

        let result = EmissionsCalculator::default().compute(&rec, None).unwrap();
        prop_assert_eq!(
            result.well_to_tank_gco2e,
            result.well_to_wake_gco2e - result.tank_to_wake_gco2e
        );
    }
}
