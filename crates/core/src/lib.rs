//! Domain logic for the Arena Fund intake service.
//!
//! Pure, dependency-light building blocks shared by the database layer and the
//! HTTP API: the form validation engine, newsletter subscription types, the
//! subscriber lookup cache, submission types, and the store traits.

pub mod error;
pub mod newsletter;
pub mod store;
pub mod submission;
pub mod subscriber_cache;
pub mod types;
pub mod validation;
