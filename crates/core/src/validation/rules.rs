//! Validation error and result types.

use serde::{Deserialize, Serialize};

/// Stable machine-readable code attached to every [`ValidationError`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Required,
    InvalidFormat,
    InvalidInvestorType,
    InvalidAccreditationStatus,
    InvalidCheckSize,
    InvalidCountry,
    InvalidState,
    InvalidAreasOfInterest,
    InvalidMode,
    InvalidVerificationMethod,
    InvalidStage,
    AccreditationRequired,
    BusinessLogicMismatch,
    JurisdictionMismatch,
    RestrictedJurisdiction,
}

impl ErrorCode {
    /// The wire representation, e.g. `"INVALID_STATE"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Required => "REQUIRED",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::InvalidInvestorType => "INVALID_INVESTOR_TYPE",
            ErrorCode::InvalidAccreditationStatus => "INVALID_ACCREDITATION_STATUS",
            ErrorCode::InvalidCheckSize => "INVALID_CHECK_SIZE",
            ErrorCode::InvalidCountry => "INVALID_COUNTRY",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::InvalidAreasOfInterest => "INVALID_AREAS_OF_INTEREST",
            ErrorCode::InvalidMode => "INVALID_MODE",
            ErrorCode::InvalidVerificationMethod => "INVALID_VERIFICATION_METHOD",
            ErrorCode::InvalidStage => "INVALID_STAGE",
            ErrorCode::AccreditationRequired => "ACCREDITATION_REQUIRED",
            ErrorCode::BusinessLogicMismatch => "BUSINESS_LOGIC_MISMATCH",
            ErrorCode::JurisdictionMismatch => "JURISDICTION_MISMATCH",
            ErrorCode::RestrictedJurisdiction => "RESTRICTED_JURISDICTION",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: ErrorCode,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }

    /// `REQUIRED` error using the field's human-readable label.
    pub fn required(field: &str, label: &str) -> Self {
        Self::new(field, ErrorCode::Required, format!("{label} is required"))
    }
}

/// Aggregated outcome of validating one form snapshot.
///
/// `is_valid` is derived from `errors` at construction, so the two can never
/// disagree.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Errors reported against `field`.
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_follows_error_list() {
        assert!(ValidationResult::valid().is_valid());
        let result = ValidationResult::from_errors(vec![ValidationError::required("email", "Email")]);
        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
    }

    #[test]
    fn serializes_with_wire_names() {
        let result = ValidationResult::from_errors(vec![ValidationError::new(
            "state",
            ErrorCode::InvalidState,
            "bad state",
        )]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"][0]["field"], "state");
        assert_eq!(json["errors"][0]["code"], "INVALID_STATE");
        assert_eq!(json["errors"][0]["message"], "bad state");
    }

    #[test]
    fn code_display_matches_serde() {
        for code in [
            ErrorCode::Required,
            ErrorCode::InvalidAreasOfInterest,
            ErrorCode::RestrictedJurisdiction,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
            assert_eq!(code.to_string(), code.as_str());
        }
    }
}
