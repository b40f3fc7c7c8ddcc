//! Route definitions for newsletter subscriptions.
//!
//! Mounted at `/newsletter` by `api_routes()`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::newsletter;
use crate::state::AppState;

/// Newsletter routes.
///
/// ```text
/// POST   /subscribe              -> subscribe
/// POST   /unsubscribe            -> unsubscribe
/// GET    /subscribers/{email}    -> get_subscriber
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subscribe", post(newsletter::subscribe))
        .route("/unsubscribe", post(newsletter::unsubscribe))
        .route("/subscribers/{email}", get(newsletter::get_subscriber))
}
