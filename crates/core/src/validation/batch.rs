//! Bulk validation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::record::ComplianceValidator;
use super::types::ValidationOutcome;
use crate::record::FuelRecord;

/// How a batch reacts to the first invalid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationMode {
    /// Stop after the first record with an error.
    FailFast,
    /// Validate every record.
    #[default]
    CollectAll,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchValidation {
    /// One outcome per validated record. In fail-fast mode the last entry is
    /// the first invalid record and later records are absent.
    pub outcomes: Vec<ValidationOutcome>,
    /// Index of the first invalid record, if any.
    pub first_invalid: Option<usize>,
}

impl BatchValidation {
    /// True if every validated record passed.
    #[must_use]
    pub fn all_valid(&self) -> bool {
        self.first_invalid.is_none()
    }

    /// Total warning count across outcomes.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.warnings.len()).sum()
    }
}

/// Validates many records.
#[must_use]
pub fn validate_batch(
    validator: &ComplianceValidator,
    records: &[FuelRecord],
    mode: ValidationMode,
) -> BatchValidation {
    match mode {
        ValidationMode::FailFast => {
            let mut outcomes = Vec::with_capacity(records.len());
            for (index, record) in records.iter().enumerate() {
                let outcome = validator.validate(record);
                let invalid = !outcome.is_valid;
                outcomes.push(outcome);
                if invalid {
                    return BatchValidation {
                        outcomes,
                        first_invalid: Some(index),
                    };
                }
            }
            BatchValidation {
                outcomes,
                first_invalid: None,
            }
        }
        ValidationMode::CollectAll => {
            let outcomes: Vec<_> = records
                .par_iter()
                .map(|record| validator.validate(record))
                .collect();
            let first_invalid = outcomes.iter().position(|o| !o.is_valid);
            BatchValidation {
                outcomes,
                first_invalid,
            }
        }
    }
}
