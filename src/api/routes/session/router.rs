//! Router for the session API

use std::sync::{Arc, RwLock};
use std::time::Instant;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use super::public;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// The auth gate: capture username and self-declared role. No
/// credential check, a non-empty username is all it takes.
async fn login_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::LoginRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let mut shared = state.write().expect("Unable to write shared state");
    shared.session.check_timeout(Instant::now());

    if !shared.session.login(&payload.username, payload.role) {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            "Please enter your username to proceed.",
        )
            .into_response());
    }

    Ok(axum::Json(public::SessionResponse::from_session(&shared.session)).into_response())
}

/// Current session info
async fn session_handler(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let mut shared = state.write().expect("Unable to write shared state");
    shared.session.check_timeout(Instant::now());
    Ok(axum::Json(public::SessionResponse::from_session(&shared.session)))
}

async fn logout_handler(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let mut shared = state.write().expect("Unable to write shared state");
    shared.session.logout();
    shared.session.touch(Instant::now());
    Ok(StatusCode::OK)
}

/// Toggle the client-side word-by-word reveal
async fn live_typing_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::LiveTypingRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let mut shared = state.write().expect("Unable to write shared state");
    if shared.session.check_timeout(Instant::now()) || !shared.session.logged_in {
        return Ok((StatusCode::UNAUTHORIZED, "Please log in first.").into_response());
    }

    shared.session.live_typing = payload.enabled;
    Ok(axum::Json(public::SessionResponse::from_session(&shared.session)).into_response())
}

/// Create the session router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(session_handler))
        .route("/login", post(login_handler))
        .route("/logout", post(logout_handler))
        .route("/live-typing", post(live_typing_handler))
}
