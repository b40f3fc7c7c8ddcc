//! Route definitions for founder applications.
//!
//! Mounted at `/applications` by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::applications;
use crate::state::AppState;

/// Founder application routes.
///
/// ```text
/// POST   /            -> submit_application
/// POST   /validate    -> validate_application
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(applications::submit_application))
        .route("/validate", post(applications::validate_application))
}
