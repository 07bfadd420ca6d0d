//! Validation outcome types.

use serde::{Deserialize, Serialize};

/// Machine-readable issue code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationCode {
    /// A mandatory field is missing.
    RequiredField,
    /// A value is outside its domain (e.g. non-positive consumption).
    InvalidValue,
    /// A value is plausible but unusual.
    UnusualValue,
    /// A regulatory hard limit is exceeded.
    RegulatoryViolation,
    /// A regulatory soft limit is exceeded.
    RegulatoryWarning,
    /// A percentage or ratio is outside its range.
    InvalidRange,
    /// Dates are inconsistent.
    InvalidDate,
    /// An optional field should be supplied.
    RecommendedField,
    /// A measured property deviates from the catalog standard.
    StandardDeviation,
    /// A fuel-based estimate disagrees with a reported total.
    EstimationMismatch,
    /// A reported figure disagrees with the figure derived from its inputs.
    CalculationMismatch,
}

impl ValidationCode {
    /// The wire code (e.g. `"REQUIRED_FIELD"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidValue => "INVALID_VALUE",
            Self::UnusualValue => "UNUSUAL_VALUE",
            Self::RegulatoryViolation => "REGULATORY_VIOLATION",
            Self::RegulatoryWarning => "REGULATORY_WARNING",
            Self::InvalidRange => "INVALID_RANGE",
            Self::InvalidDate => "INVALID_DATE",
            Self::RecommendedField => "RECOMMENDED_FIELD",
            Self::StandardDeviation => "STANDARD_DEVIATION",
            Self::EstimationMismatch => "ESTIMATION_MISMATCH",
            Self::CalculationMismatch => "CALCULATION_MISMATCH",
        }
    }
}

impl std::fmt::Display for ValidationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an issue blocks the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Blocks ingestion.
    Error,
    /// Informational; the record stays valid.
    Warning,
}

/// One field-level finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Field the finding concerns.
    pub field: String,
    /// Machine-readable code.
    pub code: ValidationCode,
    /// Human-readable message.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
}

/// Result of validating one record or report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// True when there are no errors.
    pub is_valid: bool,
    /// Blocking findings.
    pub errors: Vec<ValidationIssue>,
    /// Non-blocking findings.
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    /// True if any error carries `code`.
    #[must_use]
    pub fn has_error(&self, code: ValidationCode) -> bool {
        self.errors.iter().any(|issue| issue.code == code)
    }

    /// True if any warning carries `code`.
    #[must_use]
    pub fn has_warning(&self, code: ValidationCode) -> bool {
        self.warnings.iter().any(|issue| issue.code == code)
    }

    /// True if a regulatory hard limit was exceeded.
    #[must_use]
    pub fn has_regulatory_violation(&self) -> bool {
        self.has_error(ValidationCode::RegulatoryViolation)
    }
}

/// Accumulates issues while a validator runs.
#[derive(Debug, Default)]
pub(crate) struct IssueCollector {
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl IssueCollector {
    pub(crate) fn error(&mut self, field: &str, code: ValidationCode, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            code,
            message: message.into(),
            severity: Severity::Error,
        });
    }

    pub(crate) fn warning(
        &mut self,
        field: &str,
        code: ValidationCode,
        message: impl Into<String>,
    ) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            code,
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    pub(crate) fn finish(self) -> ValidationOutcome {
        ValidationOutcome {
            is_valid: self.errors.is_empty(),
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}
