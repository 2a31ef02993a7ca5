//! API routes module

pub mod chat;
pub mod session;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Session routes (auth gate, timeout, toggles)
        .nest("/session", session::router())
        // Chat routes
        .nest("/chat", chat::router())
}
