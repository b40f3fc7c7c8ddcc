//! Cross-field business rules for the investor application.
//!
//! Each rule declares the fields it reads so the real-time validator can
//! re-run only the rules touched by an edit. Rules never short-circuit each
//! other: every applicable rule contributes its errors.
//!
//! Rules only fire on values that pass their own field check (a known
//! accreditation status, a known check-size band, ...). A missing or unknown
//! value is reported once, by the field validator.

use std::collections::BTreeMap;

use crate::error::CoreError;

use super::catalog::{self, accreditation, investor_types, modes};
use super::field::investor_label;
use super::form::{field, text, FieldValue, FormData};
use super::rules::{ErrorCode, ValidationError};

// ---------------------------------------------------------------------------
// Check-size policy
// ---------------------------------------------------------------------------

/// Minimum check-size band per investor type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSizePolicy {
    minimums: BTreeMap<String, String>,
}

/// Band below which institutional and family-office commitments are rejected.
pub const DEFAULT_MINIMUM_BAND: &str = "50k-100k";

impl Default for CheckSizePolicy {
    fn default() -> Self {
        let minimums = [investor_types::INSTITUTIONAL, investor_types::FAMILY_OFFICE]
            .into_iter()
            .map(|t| (t.to_string(), DEFAULT_MINIMUM_BAND.to_string()))
            .collect();
        Self { minimums }
    }
}

impl CheckSizePolicy {
    /// A policy with no minimums.
    pub fn empty() -> Self {
        Self {
            minimums: BTreeMap::new(),
        }
    }

    /// Set the minimum band for an investor type.
    pub fn with_minimum(mut self, investor_type: &str, band: &str) -> Result<Self, CoreError> {
        if !catalog::VALID_INVESTOR_TYPES.contains(&investor_type) {
            return Err(CoreError::Validation(format!(
                "Unknown investor type '{investor_type}' in check-size policy"
            )));
        }
        if catalog::check_size_rank(band).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown check-size band '{band}' in check-size policy"
            )));
        }
        self.minimums
            .insert(investor_type.to_string(), band.to_string());
        Ok(self)
    }

    /// Parse `type=band` pairs separated by commas, e.g.
    /// `institutional=50k-100k,family-office=100k-250k`. An empty string
    /// yields an empty policy.
    pub fn parse(spec: &str) -> Result<Self, CoreError> {
        spec.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .try_fold(Self::empty(), |policy, pair| {
                let (investor_type, band) = pair.split_once('=').ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Expected investor-type=band in check-size policy, got '{pair}'"
                    ))
                })?;
                policy.with_minimum(investor_type.trim(), band.trim())
            })
    }

    pub fn minimum_for(&self, investor_type: &str) -> Option<&str> {
        self.minimums.get(investor_type).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

type RuleFn = fn(&FormData, &CheckSizePolicy) -> Option<ValidationError>;

/// A named business rule spanning several fields.
pub struct CrossFieldRule {
    pub name: &'static str,
    pub references: &'static [&'static str],
    check: RuleFn,
}

impl CrossFieldRule {
    pub fn references_field(&self, field: &str) -> bool {
        self.references.contains(&field)
    }

    pub fn evaluate(&self, form: &FormData, policy: &CheckSizePolicy) -> Option<ValidationError> {
        (self.check)(form, policy)
    }
}

pub const INVESTOR_RULES: &[CrossFieldRule] = &[
    CrossFieldRule {
        name: "506c_requires_verification_method",
        references: &["mode", "verificationMethod"],
        check: require_verification_method,
    },
    CrossFieldRule {
        name: "506c_requires_verification_file",
        references: &["mode", "verificationFileRef"],
        check: require_verification_file,
    },
    CrossFieldRule {
        name: "506c_requires_entity_name",
        references: &["mode", "entityName"],
        check: require_entity_name,
    },
    CrossFieldRule {
        name: "506c_requires_jurisdiction",
        references: &["mode", "jurisdiction"],
        check: require_jurisdiction,
    },
    CrossFieldRule {
        name: "506c_requires_accreditation",
        references: &["mode", "accreditationStatus"],
        check: accreditation_for_506c,
    },
    CrossFieldRule {
        name: "institutional_requires_accreditation",
        references: &["investorType", "accreditationStatus"],
        check: institutional_requires_accreditation,
    },
    CrossFieldRule {
        name: "minimum_check_size",
        references: &["investorType", "checkSize"],
        check: minimum_check_size,
    },
    CrossFieldRule {
        name: "us_state_required",
        references: &["country", "state"],
        check: us_state_required,
    },
    CrossFieldRule {
        name: "us_jurisdiction",
        references: &["mode", "country", "jurisdiction"],
        check: us_jurisdiction,
    },
    CrossFieldRule {
        name: "restricted_jurisdiction",
        references: &["country"],
        check: restricted_jurisdiction,
    },
];

fn is_506c(form: &FormData) -> bool {
    text(form, "mode") == Some(modes::RULE_506C)
}

/// Accreditation status, only when it is one of the known values.
fn known_accreditation(form: &FormData) -> Option<&str> {
    text(form, "accreditationStatus")
        .filter(|status| catalog::VALID_ACCREDITATION_STATUSES.contains(status))
}

fn require_for_506c(form: &FormData, name: &str) -> Option<ValidationError> {
    if is_506c(form) && field(form, name).is_missing() {
        return Some(ValidationError::new(
            name,
            ErrorCode::Required,
            format!("{} is required for 506(c) offerings", investor_label(name)),
        ));
    }
    None
}

fn require_verification_method(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    require_for_506c(form, "verificationMethod")
}

fn require_verification_file(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    require_for_506c(form, "verificationFileRef")
}

fn require_entity_name(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    require_for_506c(form, "entityName")
}

fn require_jurisdiction(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    require_for_506c(form, "jurisdiction")
}

fn accreditation_for_506c(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    let status = known_accreditation(form)?;
    if is_506c(form) && status != accreditation::YES {
        return Some(ValidationError::new(
            "accreditationStatus",
            ErrorCode::AccreditationRequired,
            "Only accredited investors can participate in 506(c) offerings",
        ));
    }
    None
}

fn institutional_requires_accreditation(
    form: &FormData,
    _: &CheckSizePolicy,
) -> Option<ValidationError> {
    let status = known_accreditation(form)?;
    if text(form, "investorType") == Some(investor_types::INSTITUTIONAL)
        && status != accreditation::YES
    {
        return Some(ValidationError::new(
            "investorType",
            ErrorCode::BusinessLogicMismatch,
            "Institutional investors must be accredited",
        ));
    }
    None
}

fn minimum_check_size(form: &FormData, policy: &CheckSizePolicy) -> Option<ValidationError> {
    let investor_type = text(form, "investorType")?;
    let minimum = policy.minimum_for(investor_type)?;
    let band = text(form, "checkSize")?;
    let rank = catalog::check_size_rank(band)?;
    let minimum_rank = catalog::check_size_rank(minimum)?;
    if rank < minimum_rank {
        return Some(ValidationError::new(
            "checkSize",
            ErrorCode::BusinessLogicMismatch,
            format!("Minimum check size for {investor_type} investors is {minimum}"),
        ));
    }
    None
}

fn us_state_required(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    if !text(form, "country").is_some_and(catalog::is_us) {
        return None;
    }
    match field(form, "state") {
        FieldValue::Missing => Some(ValidationError::new(
            "state",
            ErrorCode::Required,
            "State is required for US investors",
        )),
        FieldValue::Text(state) if catalog::is_valid_us_state_code(state) => None,
        FieldValue::Text(state) => Some(ValidationError::new(
            "state",
            ErrorCode::InvalidState,
            format!("'{state}' is not a valid US state or territory code"),
        )),
        FieldValue::Bool(_) | FieldValue::List(_) | FieldValue::Other(_) => Some(
            ValidationError::new("state", ErrorCode::InvalidFormat, "State has an invalid value"),
        ),
    }
}

fn us_jurisdiction(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    if !is_506c(form) || !text(form, "country").is_some_and(catalog::is_us) {
        return None;
    }
    let jurisdiction = text(form, "jurisdiction")?;
    if catalog::names_us_state(jurisdiction) {
        return None;
    }
    Some(ValidationError::new(
        "jurisdiction",
        ErrorCode::JurisdictionMismatch,
        format!("'{jurisdiction}' is not a US state, but the investor is located in the US"),
    ))
}

fn restricted_jurisdiction(form: &FormData, _: &CheckSizePolicy) -> Option<ValidationError> {
    let country = text(form, "country")?;
    if catalog::is_restricted_country(country) {
        return Some(ValidationError::new(
            "country",
            ErrorCode::RestrictedJurisdiction,
            "We are unable to accept investors from this jurisdiction",
        ));
    }
    None
}

/// Run every rule, in declaration order.
pub fn evaluate_all(form: &FormData, policy: &CheckSizePolicy) -> Vec<ValidationError> {
    INVESTOR_RULES
        .iter()
        .filter_map(|rule| rule.evaluate(form, policy))
        .collect()
}

/// Run only the rules that read `field_name`.
pub fn evaluate_referencing(
    field_name: &str,
    form: &FormData,
    policy: &CheckSizePolicy,
) -> Vec<ValidationError> {
    INVESTOR_RULES
        .iter()
        .filter(|rule| rule.references_field(field_name))
        .filter_map(|rule| rule.evaluate(form, policy))
        .collect()
}
