//! Single-field validators.
//!
//! Each form field is described by a [`FieldSpec`]; [`check_field`] applies
//! a `FieldSpec` to one value in isolation and yields at most one error. Fields
//! whose requirements depend on other answers (the US state, the 506(c)
//! verification block) are declared optional here and enforced by
//! [`super::cross_field`].

use std::sync::LazyLock;

use regex::Regex;

use super::catalog;
use super::form::FieldValue;
use super::rules::{ErrorCode, ValidationError};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 100;

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_EMAIL_LOCAL_LEN: usize = 64;
pub const MAX_EMAIL_DOMAIN_LEN: usize = 255;

pub const MAX_URL_LEN: usize = 2048;
pub const MAX_FILE_REF_LEN: usize = 512;

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static EMAIL_LOCAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+$").expect("valid regex")
});

static DOMAIN_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("valid regex")
});

static TLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,63}$").expect("valid regex"));

/// Letters (including accented and combining marks), spaces, hyphens and
/// apostrophes; must start and end with a letter.
static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}](?:[\p{L}\p{M} '’-]*[\p{L}\p{M}])?$").expect("valid regex")
});

static SQL_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:select\s.+\sfrom|insert\s+into|delete\s+from|drop\s+(?:table|database)|update\s+\S+\s+set|union\s+(?:all\s+)?select|truncate\s+table|alter\s+table)\b",
    )
    .expect("valid regex")
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,63}(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("valid regex")
});

// ---------------------------------------------------------------------------
// Format checks
// ---------------------------------------------------------------------------

/// Syntactic email check. Returns a user-facing reason on failure.
pub fn email_problem(email: &str) -> Option<&'static str> {
    let email = email.trim();
    if email.len() > MAX_EMAIL_LEN {
        return Some("Email address is too long");
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Some("Email address must contain an @ sign");
    };
    if domain.contains('@') {
        return Some("Email address must contain a single @ sign");
    }
    if local.is_empty() || domain.is_empty() {
        return Some("Email address must have text before and after the @ sign");
    }
    if email.contains("..") {
        return Some("Email address cannot contain consecutive dots");
    }
    if local.len() > MAX_EMAIL_LOCAL_LEN || domain.len() > MAX_EMAIL_DOMAIN_LEN {
        return Some("Email address is too long");
    }
    if local.starts_with('.') || local.ends_with('.') || !EMAIL_LOCAL_RE.is_match(local) {
        return Some("Please enter a valid email address");
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Some("Email domain must include a top-level domain");
    }
    if !labels.iter().all(|label| DOMAIN_LABEL_RE.is_match(label)) {
        return Some("Please enter a valid email address");
    }
    match labels.last() {
        Some(tld) if TLD_RE.is_match(tld) => None,
        _ => Some("Email domain must include a top-level domain"),
    }
}

/// Person-name check. Returns a user-facing reason on failure.
pub fn name_problem(name: &str) -> Option<&'static str> {
    let name = name.trim();
    let len = name.chars().count();
    if !(MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len) {
        return Some("Name must be between 2 and 100 characters");
    }
    if SQL_LIKE_RE.is_match(name) {
        return Some("Name contains disallowed content");
    }
    if !NAME_RE.is_match(name) {
        return Some("Name can only contain letters, spaces, hyphens, and apostrophes");
    }
    None
}

pub fn url_problem(url: &str) -> Option<&'static str> {
    if url.len() > MAX_URL_LEN || !URL_RE.is_match(url.trim()) {
        return Some("Please enter a valid URL starting with http:// or https://");
    }
    None
}

// ---------------------------------------------------------------------------
// Field specs
// ---------------------------------------------------------------------------

/// How a field's value is checked.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Email,
    PersonName,
    /// Free text bounded in characters.
    Text { min: usize, max: usize },
    Url,
    /// One value from a closed set; unknown values report `code`.
    Choice {
        options: &'static [&'static str],
        code: ErrorCode,
    },
    Country,
    AreasOfInterest,
    /// Must be boolean `true`.
    Consent,
    /// Reference to an already-uploaded document.
    FileRef,
}

/// Declaration of one form field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }
}

pub const FOUNDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("fullName", "Full name", FieldKind::PersonName),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required(
        "companyName",
        "Company name",
        FieldKind::Text { min: 2, max: 100 },
    ),
    FieldSpec::optional("website", "Website", FieldKind::Url),
    FieldSpec::required(
        "stage",
        "Company stage",
        FieldKind::Choice {
            options: catalog::VALID_STAGES,
            code: ErrorCode::InvalidStage,
        },
    ),
    FieldSpec::required(
        "description",
        "Company description",
        FieldKind::Text { min: 20, max: 2000 },
    ),
    FieldSpec::optional("pitchDeckRef", "Pitch deck", FieldKind::FileRef),
    FieldSpec::required("agreeToTerms", "Agreement to the terms", FieldKind::Consent),
];

pub const INVESTOR_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Name", FieldKind::PersonName),
    FieldSpec::required("email", "Email", FieldKind::Email),
    FieldSpec::required(
        "investorType",
        "Investor type",
        FieldKind::Choice {
            options: catalog::VALID_INVESTOR_TYPES,
            code: ErrorCode::InvalidInvestorType,
        },
    ),
    FieldSpec::required(
        "accreditationStatus",
        "Accreditation status",
        FieldKind::Choice {
            options: catalog::VALID_ACCREDITATION_STATUSES,
            code: ErrorCode::InvalidAccreditationStatus,
        },
    ),
    FieldSpec::required(
        "checkSize",
        "Check size",
        FieldKind::Choice {
            options: catalog::CHECK_SIZE_BANDS,
            code: ErrorCode::InvalidCheckSize,
        },
    ),
    FieldSpec::required("country", "Country", FieldKind::Country),
    FieldSpec::required(
        "areasOfInterest",
        "Areas of interest",
        FieldKind::AreasOfInterest,
    ),
    FieldSpec::optional(
        "mode",
        "Offering type",
        FieldKind::Choice {
            options: catalog::VALID_MODES,
            code: ErrorCode::InvalidMode,
        },
    ),
    FieldSpec::optional(
        "verificationMethod",
        "Verification method",
        FieldKind::Choice {
            options: catalog::VALID_VERIFICATION_METHODS,
            code: ErrorCode::InvalidVerificationMethod,
        },
    ),
    FieldSpec::optional(
        "verificationFileRef",
        "Verification document",
        FieldKind::FileRef,
    ),
    FieldSpec::optional(
        "entityName",
        "Entity name",
        FieldKind::Text { min: 2, max: 200 },
    ),
    FieldSpec::optional(
        "jurisdiction",
        "Jurisdiction",
        FieldKind::Text { min: 2, max: 100 },
    ),
    FieldSpec::optional("message", "Message", FieldKind::Text { min: 0, max: 2000 }),
    FieldSpec::required("agreeToTerms", "Agreement to the terms", FieldKind::Consent),
];

/// Find the spec for `name` in `fields`.
pub fn spec_for(fields: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|spec| spec.name == name)
}

/// Human-readable label for an investor form field.
pub fn investor_label(name: &str) -> &str {
    spec_for(INVESTOR_FIELDS, name).map_or(name, |spec| spec.label)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Check one value against its spec, yielding at most one error.
pub fn check_field(spec: &FieldSpec, value: FieldValue<'_>) -> Option<ValidationError> {
    match spec.kind {
        FieldKind::Consent => check_consent(spec, value),
        FieldKind::AreasOfInterest => check_areas_of_interest(spec, value),
        _ => match value {
            FieldValue::Missing if spec.required => {
                Some(ValidationError::required(spec.name, spec.label))
            }
            FieldValue::Missing => None,
            FieldValue::Text(text) => check_text_value(spec, text),
            _ => Some(wrong_type(spec)),
        },
    }
}

fn check_text_value(spec: &FieldSpec, text: &str) -> Option<ValidationError> {
    let format_error =
        |message: &str| Some(ValidationError::new(spec.name, ErrorCode::InvalidFormat, message));

    match spec.kind {
        FieldKind::Email => email_problem(text).and_then(format_error),
        FieldKind::PersonName => name_problem(text).and_then(format_error),
        FieldKind::Url => url_problem(text).and_then(format_error),
        FieldKind::Text { min, max } => {
            let len = text.chars().count();
            if len < min {
                format_error(&format!("{} must be at least {min} characters", spec.label))
            } else if len > max {
                format_error(&format!("{} must be at most {max} characters", spec.label))
            } else {
                None
            }
        }
        FieldKind::FileRef => {
            if text.len() > MAX_FILE_REF_LEN {
                format_error(&format!("{} reference is too long", spec.label))
            } else {
                None
            }
        }
        FieldKind::Choice { options, code } => {
            if options.contains(&text) {
                None
            } else {
                Some(ValidationError::new(
                    spec.name,
                    code,
                    format!("'{text}' is not a valid {}", spec.label.to_lowercase()),
                ))
            }
        }
        FieldKind::Country => {
            if catalog::is_valid_country(text) {
                None
            } else {
                Some(ValidationError::new(
                    spec.name,
                    ErrorCode::InvalidCountry,
                    format!("'{text}' is not a supported country"),
                ))
            }
        }
        FieldKind::Consent | FieldKind::AreasOfInterest => None,
    }
}

fn check_consent(spec: &FieldSpec, value: FieldValue<'_>) -> Option<ValidationError> {
    match value {
        FieldValue::Bool(true) => None,
        FieldValue::Bool(false) | FieldValue::Missing if spec.required => Some(
            ValidationError::new(spec.name, ErrorCode::Required, "You must agree to the terms"),
        ),
        FieldValue::Bool(false) | FieldValue::Missing => None,
        _ => Some(wrong_type(spec)),
    }
}

fn check_areas_of_interest(spec: &FieldSpec, value: FieldValue<'_>) -> Option<ValidationError> {
    let items = match value {
        FieldValue::List(items) => items,
        FieldValue::Missing if spec.required => {
            return Some(ValidationError::new(
                spec.name,
                ErrorCode::Required,
                "Select at least one area of interest",
            ))
        }
        FieldValue::Missing => return None,
        _ => return Some(wrong_type(spec)),
    };

    if items.is_empty() {
        return Some(ValidationError::new(
            spec.name,
            ErrorCode::Required,
            "Select at least one area of interest",
        ));
    }

    let unknown: Vec<String> = items
        .iter()
        .filter(|item| {
            !item
                .as_str()
                .is_some_and(|s| catalog::VALID_AREAS_OF_INTEREST.contains(&s))
        })
        .map(|item| match item.as_str() {
            Some(s) => s.to_string(),
            None => item.to_string(),
        })
        .collect();

    if unknown.is_empty() {
        None
    } else {
        Some(ValidationError::new(
            spec.name,
            ErrorCode::InvalidAreasOfInterest,
            format!("Unknown areas of interest: {}", unknown.join(", ")),
        ))
    }
}

fn wrong_type(spec: &FieldSpec) -> ValidationError {
    ValidationError::new(
        spec.name,
        ErrorCode::InvalidFormat,
        format!("{} has an invalid value", spec.label),
    )
}
