pub mod applications;
pub mod health;
pub mod investors;
pub mod newsletter;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /applications                       submit founder application (POST)
/// /applications/validate              dry-run founder validation (POST)
///
/// /investors                          submit investor application (POST)
/// /investors/validate                 dry-run investor validation (POST)
/// /investors/validate-field           real-time single-field check (POST)
///
/// /newsletter/subscribe               subscribe or reactivate (POST)
/// /newsletter/unsubscribe             unsubscribe (POST)
/// /newsletter/subscribers/{email}     subscription status (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/applications", applications::router())
        .nest("/investors", investors::router())
        .nest("/newsletter", newsletter::router())
}
