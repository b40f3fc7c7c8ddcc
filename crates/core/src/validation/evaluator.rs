//! Validation entry points, pure logic.

use std::sync::LazyLock;

use serde_json::Value;

use super::cross_field::{self, CheckSizePolicy};
use super::field::{self, check_field, FieldKind, FieldSpec, FOUNDER_FIELDS, INVESTOR_FIELDS};
use super::form::{FieldValue, FormData};
use super::rules::{ErrorCode, ValidationError, ValidationResult};

static DEFAULT_INVESTOR_VALIDATOR: LazyLock<InvestorFormValidator> =
    LazyLock::new(InvestorFormValidator::default);

/// Validate a founder application.
pub fn validate_form_data(form: &FormData) -> ValidationResult {
    ValidationResult::from_errors(check_fields(FOUNDER_FIELDS, form))
}

/// Validate an investor application with the default check-size policy.
pub fn validate_investor_form_data(form: &FormData) -> ValidationResult {
    DEFAULT_INVESTOR_VALIDATOR.validate(form)
}

/// Validate one investor field as if `snapshot[field_name]` were `value`.
pub fn validate_investor_field(
    field_name: &str,
    value: Value,
    snapshot: &FormData,
) -> ValidationResult {
    DEFAULT_INVESTOR_VALIDATOR.validate_field(field_name, value, snapshot)
}

/// Validate a standalone email address (e.g. a newsletter sign-up).
pub fn validate_email(email: &str) -> ValidationResult {
    const SPEC: FieldSpec = FieldSpec {
        name: "email",
        label: "Email",
        kind: FieldKind::Email,
        required: true,
    };
    let errors = check_field(&SPEC, FieldValue::from_text(email))
        .into_iter()
        .collect();
    ValidationResult::from_errors(errors)
}

/// Validate a standalone person name reported against `field_name`.
pub fn validate_name(field_name: &str, name: &str) -> ValidationResult {
    let errors = match FieldValue::from_text(name) {
        FieldValue::Missing => vec![ValidationError::required(field_name, "Name")],
        _ => field::name_problem(name)
            .map(|message| ValidationError::new(field_name, ErrorCode::InvalidFormat, message))
            .into_iter()
            .collect(),
    };
    ValidationResult::from_errors(errors)
}

fn check_fields(fields: &[FieldSpec], form: &FormData) -> Vec<ValidationError> {
    fields
        .iter()
        .filter_map(|spec| check_field(spec, FieldValue::of(form.get(spec.name))))
        .collect()
}

/// Investor-form validation with a configurable check-size policy.
#[derive(Debug, Clone, Default)]
pub struct InvestorFormValidator {
    policy: CheckSizePolicy,
}

impl InvestorFormValidator {
    pub fn new(policy: CheckSizePolicy) -> Self {
        Self { policy }
    }

    /// Run every field validator, then every cross-field rule.
    pub fn validate(&self, form: &FormData) -> ValidationResult {
        let mut errors = check_fields(INVESTOR_FIELDS, form);
        errors.extend(cross_field::evaluate_all(form, &self.policy));
        ValidationResult::from_errors(errors)
    }

    /// Real-time check for a single edit.
    ///
    /// Applies `field_name = value` to a copy of `snapshot`, then runs that
    /// field's own validator and only the cross-field rules that read it. The
    /// result is always a subset of [`Self::validate`] on the updated form.
    pub fn validate_field(
        &self,
        field_name: &str,
        value: Value,
        snapshot: &FormData,
    ) -> ValidationResult {
        let mut form = snapshot.clone();
        form.insert(field_name.to_string(), value);

        let mut errors: Vec<ValidationError> = field::spec_for(INVESTOR_FIELDS, field_name)
            .and_then(|spec| check_field(spec, FieldValue::of(form.get(field_name))))
            .into_iter()
            .collect();
        errors.extend(cross_field::evaluate_referencing(
            field_name,
            &form,
            &self.policy,
        ));
        ValidationResult::from_errors(errors)
    }
}
