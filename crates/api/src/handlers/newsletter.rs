//! Handlers for newsletter subscriptions.
//!
//! Status lookups go through the shared [`SubscriberCache`]; every
//! subscribe/unsubscribe refreshes the cached entry so a lookup never sees a
//! status older than the latest write from this process. A failed write
//! drops the entry so the next lookup reads through to the store.
//!
//! [`SubscriberCache`]: arena_core::subscriber_cache::SubscriberCache

use arena_core::error::CoreError;
use arena_core::newsletter::{normalize_email, normalize_source, SubscribeAction, Subscriber};
use arena_core::validation::validate_email;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /newsletter/subscribe`.
#[derive(Debug, Deserialize, Validate)]
pub struct SubscribeRequest {
    pub email: String,
    /// Where the sign-up came from, e.g. `"footer"`. At most
    /// [`arena_core::newsletter::MAX_SOURCE_LEN`] characters.
    #[validate(length(max = 64))]
    pub source: Option<String>,
}

/// Body for `POST /newsletter/unsubscribe`.
#[derive(Debug, Deserialize)]
pub struct UnsubscribeRequest {
    pub email: String,
}

/// Response for a subscribe request.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub action: SubscribeAction,
    pub subscriber: Subscriber,
}

/// Normalise an email and reject it with the engine's email rules.
fn checked_email(raw: &str) -> AppResult<String> {
    let email = normalize_email(raw);
    let result = validate_email(&email);
    if !result.is_valid() {
        return Err(AppError::InvalidSubmission(result.into_errors()));
    }
    Ok(email)
}

// ---------------------------------------------------------------------------
// POST /newsletter/subscribe
// ---------------------------------------------------------------------------

/// Subscribe an email, or reactivate a previous subscription.
///
/// 201 when a new subscriber is created, 200 otherwise.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(input): Json<SubscribeRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let email = checked_email(&input.email)?;
    let source = normalize_source(input.source.as_deref());

    let outcome = match state.subscribers.subscribe(&email, source).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(drop_cached(&state, &email, e).await),
    };
    state
        .subscriber_cache
        .insert(outcome.subscriber.clone())
        .await;

    tracing::info!(action = ?outcome.action, "Newsletter subscribe");

    let status = match outcome.action {
        SubscribeAction::Created => StatusCode::CREATED,
        SubscribeAction::AlreadyActive | SubscribeAction::Reactivated => StatusCode::OK,
    };

    Ok((
        status,
        Json(DataResponse {
            data: SubscribeResponse {
                action: outcome.action,
                subscriber: outcome.subscriber,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /newsletter/unsubscribe
// ---------------------------------------------------------------------------

/// Unsubscribe an email. Unknown emails are a 404.
pub async fn unsubscribe(
    State(state): State<AppState>,
    Json(input): Json<UnsubscribeRequest>,
) -> AppResult<impl IntoResponse> {
    let email = checked_email(&input.email)?;

    let subscriber = match state.subscribers.unsubscribe(&email).await {
        Ok(found) => found.ok_or_else(|| subscriber_not_found(&email))?,
        Err(e) => return Err(drop_cached(&state, &email, e).await),
    };
    state.subscriber_cache.insert(subscriber.clone()).await;

    tracing::info!("Newsletter unsubscribe");

    Ok(Json(DataResponse { data: subscriber }))
}

// ---------------------------------------------------------------------------
// GET /newsletter/subscribers/{email}
// ---------------------------------------------------------------------------

/// Current subscription status for an email.
pub async fn get_subscriber(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&email);

    if let Some(cached) = state.subscriber_cache.get(&email).await {
        return Ok(Json(DataResponse { data: cached }));
    }

    let subscriber = state
        .subscribers
        .find(&email)
        .await?
        .ok_or_else(|| subscriber_not_found(&email))?;
    state.subscriber_cache.insert(subscriber.clone()).await;

    Ok(Json(DataResponse { data: subscriber }))
}

/// A failed write may still have reached the store, so the cached status
/// can no longer be trusted.
async fn drop_cached(state: &AppState, email: &str, error: CoreError) -> AppError {
    state.subscriber_cache.invalidate(email).await;
    AppError::Core(error)
}

fn subscriber_not_found(email: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Subscriber",
        key: email.to_string(),
    })
}
