//! Per-session state: identity, activity clock, and the owned transcript.
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::chat::{ChatHistory, HistoryStore};

/// Idle time after which the next interaction forces a re-login.
pub const SESSION_TIMEOUT: Duration = Duration::from_secs(300);

/// Self-declared role. Cosmetic only: Admin and Student get an extra
/// greeting line, nothing is permission-checked against it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    User,
    Admin,
    Student,
    Employee,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::User,
        UserRole::Admin,
        UserRole::Student,
        UserRole::Employee,
    ];

    pub fn banner(&self) -> Option<&'static str> {
        match self {
            UserRole::Admin => Some("📊 Admin Dashboard – You have full access."),
            UserRole::Student => Some("📚 Student Mode – Focus on learning!"),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserRole::User => "User",
            UserRole::Admin => "Admin",
            UserRole::Student => "Student",
            UserRole::Employee => "Employee",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(UserRole::User),
            "admin" => Ok(UserRole::Admin),
            "student" => Ok(UserRole::Student),
            "employee" => Ok(UserRole::Employee),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Mutable state for one interactive context. Owns the in-memory
/// transcript; the store stays a stateless gateway to the file.
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
    pub role: UserRole,
    pub dark_mode: bool,
    pub live_typing: bool,
    pub last_active: Instant,
    pub history: ChatHistory,
}

impl Session {
    /// Build a fresh session with defaults and the persisted transcript
    /// loaded and capped to the retention window. Every field gets a
    /// value here, so there is no partially-initialized state to guard
    /// against later.
    pub fn initialize(store: &HistoryStore) -> Self {
        let mut history = store.load();
        history.truncate_to_recent();

        Self {
            logged_in: false,
            username: None,
            role: UserRole::default(),
            dark_mode: false,
            live_typing: true,
            last_active: Instant::now(),
            history,
        }
    }

    /// Capture identity from the auth gate. Returns false when the
    /// username is blank, leaving the session untouched so the gate
    /// keeps blocking.
    pub fn login(&mut self, username: &str, role: UserRole) -> bool {
        let username = username.trim();
        if username.is_empty() {
            return false;
        }
        self.logged_in = true;
        self.username = Some(username.to_string());
        self.role = role;
        true
    }

    pub fn logout(&mut self) {
        self.logged_in = false;
    }

    /// Run the idle check that guards every interaction. An expired
    /// session is forced back through the auth gate; either way the
    /// activity clock restarts at `now`.
    pub fn check_timeout(&mut self, now: Instant) -> bool {
        let expired = now.duration_since(self.last_active) > SESSION_TIMEOUT;
        if expired {
            self.logged_in = false;
        }
        self.last_active = now;
        expired
    }

    pub fn touch(&mut self, now: Instant) {
        self.last_active = now;
    }
}
