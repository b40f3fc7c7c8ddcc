//! Application submissions accepted for persistence.
//!
//! A [`NewSubmission`] can only be built from a form that passed validation,
//! so stores never see an invalid payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::newsletter::normalize_email;
use crate::types::{DbId, Timestamp};
use crate::validation::form::text;
use crate::validation::{validate_form_data, FormData, InvestorFormValidator, ValidationResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    Founder,
    Investor,
}

impl SubmissionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionKind::Founder => "founder",
            SubmissionKind::Investor => "investor",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "founder" => Some(SubmissionKind::Founder),
            "investor" => Some(SubmissionKind::Investor),
            _ => None,
        }
    }
}

/// A validated submission ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    kind: SubmissionKind,
    email: String,
    payload: FormData,
}

impl NewSubmission {
    /// Validate a founder application, returning the full result on failure.
    pub fn founder(form: FormData) -> Result<Self, ValidationResult> {
        let result = validate_form_data(&form);
        Self::accept(SubmissionKind::Founder, form, result)
    }

    /// Validate an investor application, returning the full result on failure.
    pub fn investor(
        form: FormData,
        validator: &InvestorFormValidator,
    ) -> Result<Self, ValidationResult> {
        let result = validator.validate(&form);
        Self::accept(SubmissionKind::Investor, form, result)
    }

    fn accept(
        kind: SubmissionKind,
        payload: FormData,
        result: ValidationResult,
    ) -> Result<Self, ValidationResult> {
        if !result.is_valid() {
            return Err(result);
        }
        let email = text(&payload, "email").map(normalize_email).unwrap_or_default();
        Ok(Self {
            kind,
            email,
            payload,
        })
    }

    pub fn kind(&self) -> SubmissionKind {
        self.kind
    }

    /// Normalised contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn payload(&self) -> &FormData {
        &self.payload
    }

    pub fn payload_json(&self) -> Value {
        Value::Object(self.payload.clone())
    }
}

/// A stored submission.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredSubmission {
    pub id: DbId,
    pub kind: SubmissionKind,
    pub email: String,
    pub payload: Value,
    pub created_at: Timestamp,
}

/// What the submitter gets back once a submission is stored.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub id: DbId,
    pub kind: SubmissionKind,
    pub received_at: Timestamp,
}

impl From<&StoredSubmission> for SubmissionReceipt {
    fn from(stored: &StoredSubmission) -> Self {
        Self {
            id: stored.id,
            kind: stored.kind,
            received_at: stored.created_at,
        }
    }
}
