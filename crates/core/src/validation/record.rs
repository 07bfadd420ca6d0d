//! Field-level rules for a single fuel record.

use std::sync::Arc;

use rust_decimal::Decimal;
use tidemark_shared::types::FuelCategory;

use super::types::{IssueCollector, ValidationCode, ValidationOutcome};
use crate::catalog::FuelCatalog;
use crate::record::FuelRecord;

const LCV_MIN: Decimal = Decimal::TEN;
const LCV_MAX: Decimal = Decimal::from_parts(120, 0, 0, false, 0);
const DENSITY_MIN: Decimal = Decimal::from_parts(70, 0, 0, false, 0);
const DENSITY_MAX: Decimal = Decimal::from_parts(1200, 0, 0, false, 0);
/// IMO global sulphur cap (%).
const SULPHUR_GLOBAL_CAP: Decimal = Decimal::from_parts(35, 0, 0, false, 1);
/// Emission control area sulphur limit (%).
const SULPHUR_ECA_LIMIT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
/// Allowed LCV deviation from the catalog standard (%).
const LCV_DEVIATION_LIMIT_PCT: Decimal = Decimal::TEN;

/// Compliance rule validator for fuel records.
#[derive(Debug, Clone)]
pub struct ComplianceValidator {
    catalog: Arc<FuelCatalog>,
}

impl ComplianceValidator {
    /// Creates a validator that compares measurements against `catalog`.
    #[must_use]
    pub fn new(catalog: FuelCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Validates one record. Never fails; findings are returned as data.
    #[must_use]
    pub fn validate(&self, record: &FuelRecord) -> ValidationOutcome {
        let mut issues = IssueCollector::default();

        if record.consumption_tonnes <= Decimal::ZERO {
            issues.error(
                "consumption_tonnes",
                ValidationCode::InvalidValue,
                "Fuel consumption must be greater than 0",
            );
        }

        let expected = record.fuel_type.natural_category();
        if record.fuel_category != expected {
            issues.error(
                "fuel_category",
                ValidationCode::InvalidValue,
                format!(
                    "Fuel type {} must be declared as {expected}, not {}",
                    record.fuel_type, record.fuel_category
                ),
            );
        }

        self.check_physical_properties(record, &mut issues);

        match record.fuel_category {
            FuelCategory::Biofuel => check_biofuel(record, &mut issues),
            FuelCategory::EFuel => check_efuel(record, &mut issues),
            FuelCategory::Hybrid => check_hybrid(record, &mut issues),
            FuelCategory::Fossil => {}
        }

        check_handling(record, &mut issues);

        if let (Some(production), Some(expiry)) = (record.production_date, record.expiry_date) {
            if expiry <= production {
                issues.error(
                    "expiry_date",
                    ValidationCode::InvalidDate,
                    "Expiry date must be after production date",
                );
            }
        }

        issues.finish()
    }

    fn check_physical_properties(&self, record: &FuelRecord, issues: &mut IssueCollector) {
        match record.lower_calorific_value_mj_kg.filter(|v| !v.is_zero()) {
            Some(lcv) => {
                if lcv < LCV_MIN || lcv > LCV_MAX {
                    issues.warning(
                        "lower_calorific_value_mj_kg",
                        ValidationCode::UnusualValue,
                        "Calorific value seems unusual. Please verify.",
                    );
                }
                self.check_lcv_against_standard(record, lcv, issues);
            }
            None => {
                if matches!(
                    record.fuel_category,
                    FuelCategory::Biofuel | FuelCategory::EFuel
                ) {
                    issues.error(
                        "lower_calorific_value_mj_kg",
                        ValidationCode::RequiredField,
                        "Calorific value is required for biofuels and e-fuels",
                    );
                }
            }
        }

        if let Some(density) = record.density_kg_m3.filter(|v| !v.is_zero()) {
            if density < DENSITY_MIN || density > DENSITY_MAX {
                issues.warning(
                    "density_kg_m3",
                    ValidationCode::UnusualValue,
                    "Fuel density seems unusual. Please verify.",
                );
            }
        }

        if let Some(sulphur) = record.sulphur_content_pct {
            if sulphur > SULPHUR_GLOBAL_CAP {
                issues.error(
                    "sulphur_content_pct",
                    ValidationCode::RegulatoryViolation,
                    "Sulphur content exceeds IMO global limit (3.5%)",
                );
            }
            if sulphur > SULPHUR_ECA_LIMIT {
                issues.warning(
                    "sulphur_content_pct",
                    ValidationCode::RegulatoryWarning,
                    "Sulphur content exceeds ECA limit (0.5%)",
                );
            }
        }
    }

    fn check_lcv_against_standard(
        &self,
        record: &FuelRecord,
        lcv: Decimal,
        issues: &mut IssueCollector,
    ) {
        let Some(standard) = self
            .catalog
            .properties(record.fuel_type)
            .and_then(|spec| spec.lower_calorific_value_mj_kg)
            .filter(|v| !v.is_zero())
        else {
            return;
        };

        let deviation_pct = lcv
            .checked_sub(standard)
            .and_then(|d| d.abs().checked_div(standard))
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));
        match deviation_pct {
            Some(pct) if pct <= LCV_DEVIATION_LIMIT_PCT => {}
            Some(pct) => issues.warning(
                "lower_calorific_value_mj_kg",
                ValidationCode::StandardDeviation,
                format!(
                    "Calorific value deviates {}% from standard {} MJ/kg",
                    pct.round_dp(1),
                    standard
                ),
            ),
            None => issues.warning(
                "lower_calorific_value_mj_kg",
                ValidationCode::StandardDeviation,
                format!("Calorific value is far outside standard {standard} MJ/kg"),
            ),
        }
    }
}

impl Default for ComplianceValidator {
    fn default() -> Self {
        Self::new(FuelCatalog::standard())
    }
}

/// Validates one record.
#[must_use]
pub fn validate(validator: &ComplianceValidator, record: &FuelRecord) -> ValidationOutcome {
    validator.validate(record)
}

fn check_biofuel(record: &FuelRecord, issues: &mut IssueCollector) {
    let bio = &record.biofuel;
    if bio.feedstock.is_none() {
        issues.error(
            "biofuel_feedstock",
            ValidationCode::RequiredField,
            "Biofuel feedstock is required",
        );
    }
    if is_blank(bio.sustainability_certificate.as_deref()) {
        issues.error(
            "sustainability_certificate",
            ValidationCode::RequiredField,
            "Sustainability certificate is required for biofuels",
        );
    }
    if bio.blend_ratio_pct.is_some_and(out_of_percent_range) {
        issues.error(
            "biofuel_blend_ratio_pct",
            ValidationCode::InvalidRange,
            "Biofuel blend ratio must be between 0 and 100%",
        );
    }
    if !bio.eu_red_ii_compliant {
        issues.warning(
            "eu_red_ii_compliant",
            ValidationCode::RegulatoryWarning,
            "Biofuels should be EU RED II compliant",
        );
    }
}

fn check_efuel(record: &FuelRecord, issues: &mut IssueCollector) {
    let efuel = &record.efuel;
    if is_blank(efuel.certificate_of_origin.as_deref()) {
        issues.error(
            "certificate_of_origin",
            ValidationCode::RequiredField,
            "Certificate of origin is required for e-fuels",
        );
    }
    if efuel.renewable_electricity_source.is_none() {
        issues.error(
            "renewable_electricity_source",
            ValidationCode::RequiredField,
            "Renewable electricity source must be specified for e-fuels",
        );
    }
    if record.well_to_wake_ghg_gco2e_mj.is_none() {
        issues.warning(
            "well_to_wake_ghg_gco2e_mj",
            ValidationCode::RecommendedField,
            "Well-to-wake GHG emissions should be provided for e-fuels",
        );
    }
}

fn check_hybrid(record: &FuelRecord, issues: &mut IssueCollector) {
    match record.biofuel.blend_ratio_pct {
        None => issues.error(
            "biofuel_blend_ratio_pct",
            ValidationCode::RequiredField,
            "Biofuel blend ratio is required for hybrid fuels",
        ),
        Some(blend) if out_of_percent_range(blend) => issues.error(
            "biofuel_blend_ratio_pct",
            ValidationCode::InvalidRange,
            "Biofuel blend ratio must be between 0 and 100%",
        ),
        Some(_) => {}
    }
}

fn check_handling(record: &FuelRecord, issues: &mut IssueCollector) {
    let handling = &record.handling;
    if handling.toxicity_level.is_some_and(|l| l.is_high())
        && handling.handling_requirements.is_empty()
    {
        issues.warning(
            "handling_requirements",
            ValidationCode::RecommendedField,
            "Handling requirements should be specified for toxic fuels",
        );
    }
    if handling.corrosiveness_rating.is_some_and(|l| l.is_high())
        && handling.storage_requirements.is_empty()
    {
        issues.warning(
            "storage_requirements",
            ValidationCode::RecommendedField,
            "Storage requirements should be specified for corrosive fuels",
        );
    }
    if handling.retrofit_required && is_blank(handling.retrofit_certificate.as_deref()) {
        issues.warning(
            "retrofit_certificate",
            ValidationCode::RecommendedField,
            "Retrofit certificate should be provided when retrofit is required",
        );
    }
}

fn out_of_percent_range(value: Decimal) -> bool {
    value < Decimal::ZERO || value > Decimal::ONE_HUNDRED
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}
