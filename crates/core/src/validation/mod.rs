//! Form validation engine.
//!
//! Field validators, cross-field business rules, and the orchestrator that
//! assembles them into a single [`ValidationResult`] for the founder and
//! investor application forms. Everything here is pure: no I/O, no shared
//! state, and no input is ever mutated.

pub mod catalog;
pub mod cross_field;
pub mod evaluator;
pub mod field;
pub mod form;
pub mod rules;

pub use evaluator::{
    validate_email, validate_form_data, validate_investor_field, validate_investor_form_data,
    validate_name, InvestorFormValidator,
};
pub use form::FormData;
pub use rules::{ErrorCode, ValidationError, ValidationResult};
