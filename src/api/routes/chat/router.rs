//! Router for the chat API

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
use crate::chat::{Turn, clear_history};
use crate::openai::{OpenAiBackend, get_response};

type SharedState = Arc<RwLock<AppState>>;

/// Run one chat turn and return the assistant's reply
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    // Record the user turn while holding the lock; the session also
    // runs its idle check here, as it does on every interaction
    let (mut turn, system_message, backend) = {
        let mut shared = state.write().expect("Unable to write shared state");
        if shared.session.check_timeout(Instant::now()) || !shared.session.logged_in {
            return Ok((StatusCode::UNAUTHORIZED, "Please log in first.").into_response());
        }
        let turn = Turn::begin(&mut shared.session, &payload.message);
        (
            turn,
            shared.config.system_message.clone(),
            OpenAiBackend::new(&shared.config),
        )
    };

    // The provider round trip happens with the lock released
    let outcome = get_response(&backend, &system_message, &payload.message).await;

    let response = {
        let mut shared = state.write().expect("Unable to write shared state");
        let AppState { session, store, .. } = &mut *shared;
        turn.resolve(session, outcome);
        turn.persist(session, store)?;
        public::ChatResponse {
            reply: turn
                .assistant_turn()
                .map(|t| t.text.clone())
                .unwrap_or_default(),
            notice: turn.notice().map(|n| n.to_string()),
        }
    };

    Ok(axum::Json(response).into_response())
}

/// Read-only projection of the current transcript
async fn history_handler(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let mut shared = state.write().expect("Unable to write shared state");
    if shared.session.check_timeout(Instant::now()) || !shared.session.logged_in {
        return Ok((StatusCode::UNAUTHORIZED, "Please log in first.").into_response());
    }

    let transcript = shared.session.history.turns().to_vec();
    Ok(axum::Json(public::ChatTranscriptResponse { transcript }).into_response())
}

/// Empty the transcript in memory and on disk
async fn clear_handler(
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let mut shared = state.write().expect("Unable to write shared state");
    if shared.session.check_timeout(Instant::now()) || !shared.session.logged_in {
        return Ok((StatusCode::UNAUTHORIZED, "Please log in first.").into_response());
    }

    let AppState { session, store, .. } = &mut *shared;
    clear_history(session, store)?;
    Ok((StatusCode::OK, "✅ Chat history cleared!").into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/history", get(history_handler))
        .route("/history/clear", post(clear_handler))
}
