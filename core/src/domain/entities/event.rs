//! Authentication lifecycle events published on the in-process bus.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

/// Kinds of authentication lifecycle events
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuthEventKind {
    Login,
    Logout,
    LogoutAll,
    TokenRotated,
    PasswordChanged,
    CleanupCompleted,
}

impl AuthEventKind {
    /// String representation used for persistence and logging
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::LogoutAll => "logout_all",
            Self::TokenRotated => "token_rotated",
            Self::PasswordChanged => "password_changed",
            Self::CleanupCompleted => "cleanup_completed",
        }
    }
}

/// An authentication lifecycle event
///
/// Events are ephemeral; the core never persists them itself. A
/// subscriber (such as the activity log) may choose to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthEvent {
    /// What happened
    pub kind: AuthEventKind,

    /// The affected user, when one is involved
    pub user_id: Option<i64>,

    /// When it happened
    pub occurred_at: DateTime<Utc>,

    /// Free-form event details
    pub payload: JsonValue,
}

impl AuthEvent {
    /// Creates an event with an empty payload
    pub fn new(kind: AuthEventKind, user_id: Option<i64>) -> Self {
        Self {
            kind,
            user_id,
            occurred_at: Utc::now(),
            payload: JsonValue::Null,
        }
    }

    /// Attaches a payload
    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload = payload;
        self
    }

    /// A user logged in from the given device
    pub fn login(user_id: i64, device: &str) -> Self {
        Self::new(AuthEventKind::Login, Some(user_id)).with_payload(json!({ "device": device }))
    }

    /// A user logged out of a single session
    pub fn logout(user_id: Option<i64>) -> Self {
        Self::new(AuthEventKind::Logout, user_id)
    }

    /// A user logged out everywhere; `count` sessions were revoked
    pub fn logout_all(user_id: i64, count: usize) -> Self {
        Self::new(AuthEventKind::LogoutAll, Some(user_id))
            .with_payload(json!({ "revoked_sessions": count }))
    }

    /// A refresh token was exchanged for a fresh access token
    pub fn token_rotated(user_id: i64) -> Self {
        Self::new(AuthEventKind::TokenRotated, Some(user_id))
    }

    /// A password change revoked `count` sessions
    pub fn password_changed(user_id: i64, count: usize) -> Self {
        Self::new(AuthEventKind::PasswordChanged, Some(user_id))
            .with_payload(json!({ "revoked_sessions": count }))
    }

    /// A cleanup pass finished with the given deletion counts
    pub fn cleanup_completed(refresh_deleted: usize, revoked_deleted: usize) -> Self {
        Self::new(AuthEventKind::CleanupCompleted, None).with_payload(json!({
            "refresh_tokens_deleted": refresh_deleted,
            "revoked_entries_deleted": revoked_deleted,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_labels() {
        assert_eq!(AuthEventKind::Login.as_str(), "login");
        assert_eq!(AuthEventKind::LogoutAll.as_str(), "logout_all");
        assert_eq!(AuthEventKind::CleanupCompleted.as_str(), "cleanup_completed");
    }

    #[test]
    fn test_login_event_payload() {
        let event = AuthEvent::login(42, "firefox-linux");
        assert_eq!(event.kind, AuthEventKind::Login);
        assert_eq!(event.user_id, Some(42));
        assert_eq!(event.payload["device"], "firefox-linux");
    }

    #[test]
    fn test_logout_all_event_counts() {
        let event = AuthEvent::logout_all(42, 3);
        assert_eq!(event.payload["revoked_sessions"], 3);
    }

    #[test]
    fn test_cleanup_event_has_no_user() {
        let event = AuthEvent::cleanup_completed(5, 2);
        assert_eq!(event.user_id, None);
        assert_eq!(event.payload["refresh_tokens_deleted"], 5);
        assert_eq!(event.payload["revoked_entries_deleted"], 2);
    }
}
