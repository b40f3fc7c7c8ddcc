//! Route definitions for investor applications.
//!
//! Mounted at `/investors` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::investors;
use crate::state::AppState;

/// Investor application routes.
///
/// ```text
/// POST   /                  -> submit_investor
/// POST   /validate          -> validate_investor
/// POST   /validate-field    -> validate_investor_field
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(investors::submit_investor))
        .route("/validate", post(investors::validate_investor))
        .route("/validate-field", post(investors::validate_investor_field))
}
