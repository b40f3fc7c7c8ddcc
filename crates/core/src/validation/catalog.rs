//! Closed value sets for the enumerated form fields.
//!
//! Every select/checkbox field on the application forms draws from one of
//! these lists. Country and US state codes are compared case-insensitively
//! (see [`normalize_code`]); everything else is an exact match.

// ---------------------------------------------------------------------------
// Investor profile
// ---------------------------------------------------------------------------

pub mod investor_types {
    pub const INDIVIDUAL: &str = "individual";
    pub const INSTITUTIONAL: &str = "institutional";
    pub const FAMILY_OFFICE: &str = "family-office";
    pub const VENTURE_FUND: &str = "venture-fund";
    pub const CORPORATE: &str = "corporate";
}

pub const VALID_INVESTOR_TYPES: &[&str] = &[
    investor_types::INDIVIDUAL,
    investor_types::INSTITUTIONAL,
    investor_types::FAMILY_OFFICE,
    investor_types::VENTURE_FUND,
    investor_types::CORPORATE,
];

pub mod accreditation {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
    pub const NOT_SURE: &str = "not-sure";
}

pub const VALID_ACCREDITATION_STATUSES: &[&str] =
    &[accreditation::YES, accreditation::NO, accreditation::NOT_SURE];

/// Check-size bands, smallest first. The position in this list is the band's
/// rank when comparing against a configured minimum.
pub const CHECK_SIZE_BANDS: &[&str] = &[
    "25k-50k",
    "50k-100k",
    "100k-250k",
    "250k-500k",
    "500k-plus",
];

/// Rank of a check-size band, or `None` for an unknown band.
pub fn check_size_rank(band: &str) -> Option<usize> {
    CHECK_SIZE_BANDS.iter().position(|b| *b == band)
}

pub const VALID_AREAS_OF_INTEREST: &[&str] = &[
    "ai-ml",
    "enterprise-saas",
    "fintech",
    "healthtech",
    "climate",
    "developer-tools",
    "cybersecurity",
    "consumer",
];

// ---------------------------------------------------------------------------
// Offering mode (Regulation D exemption)
// ---------------------------------------------------------------------------

pub mod modes {
    pub const RULE_506B: &str = "506b";
    pub const RULE_506C: &str = "506c";
}

pub const VALID_MODES: &[&str] = &[modes::RULE_506B, modes::RULE_506C];

pub const VALID_VERIFICATION_METHODS: &[&str] = &[
    "third-party-letter",
    "tax-documents",
    "bank-statements",
    "brokerage-statements",
];

// ---------------------------------------------------------------------------
// Founder application
// ---------------------------------------------------------------------------

pub const VALID_STAGES: &[&str] = &["pre-seed", "seed", "series-a", "series-b-plus"];

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

pub const US: &str = "US";

/// Supported ISO 3166-1 alpha-2 country codes.
pub const VALID_COUNTRIES: &[&str] = &[
    "AE", "AR", "AT", "AU", "BE", "BR", "BY", "CA", "CH", "CL", "CN", "CO", "CU", "CZ", "DE", "DK",
    "EE", "EG", "ES", "FI", "FR", "GB", "GR", "HK", "HU", "ID", "IE", "IL", "IN", "IR", "IS", "IT",
    "JP", "KE", "KP", "KR", "LT", "LU", "LV", "MX", "MY", "NG", "NL", "NO", "NZ", "PE", "PH", "PL",
    "PT", "QA", "RO", "RU", "SA", "SE", "SG", "SY", "TH", "TR", "TW", "UA", "US", "VN", "ZA",
];

/// Countries whose residents cannot be onboarded regardless of any other
/// answer on the form.
pub const RESTRICTED_COUNTRIES: &[&str] = &["BY", "CU", "IR", "KP", "RU", "SY"];

/// US states, the District of Columbia, and inhabited territories, as
/// `(code, name)` pairs.
pub const US_STATES: &[(&str, &str)] = &[
    ("AL", "Alabama"),
    ("AK", "Alaska"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
    ("DC", "District of Columbia"),
    ("PR", "Puerto Rico"),
    ("GU", "Guam"),
    ("VI", "U.S. Virgin Islands"),
    ("AS", "American Samoa"),
    ("MP", "Northern Mariana Islands"),
];

/// Trim and upper-case a country or state code for comparison.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

pub fn is_valid_country(code: &str) -> bool {
    VALID_COUNTRIES.contains(&normalize_code(code).as_str())
}

pub fn is_restricted_country(code: &str) -> bool {
    RESTRICTED_COUNTRIES.contains(&normalize_code(code).as_str())
}

pub fn is_us(code: &str) -> bool {
    normalize_code(code) == US
}

pub fn is_valid_us_state_code(code: &str) -> bool {
    let code = normalize_code(code);
    US_STATES.iter().any(|(c, _)| *c == code)
}

/// Whether `value` names a US state or territory, either by two-letter code
/// or by full name (case-insensitive).
pub fn names_us_state(value: &str) -> bool {
    let value = value.trim();
    is_valid_us_state_code(value)
        || US_STATES
            .iter()
            .any(|(_, name)| name.eq_ignore_ascii_case(value))
}
