//! Public types for the session API
use serde::{Deserialize, Serialize};

use crate::session::{Session, UserRole};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Deserialize)]
pub struct LiveTypingRequest {
    pub enabled: bool,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub logged_in: bool,
    pub username: Option<String>,
    pub role: UserRole,
    pub live_typing: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
}

impl SessionResponse {
    pub fn from_session(session: &Session) -> Self {
        Self {
            logged_in: session.logged_in,
            username: session.username.clone(),
            role: session.role,
            live_typing: session.live_typing,
            banner: session.role.banner().filter(|_| session.logged_in),
        }
    }
}
