//! Activity log entry persisted by the activity-log event subscriber.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::event::AuthEvent;

/// A persisted record of an authentication lifecycle event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityLogEntry {
    /// Unique identifier for the log entry
    pub id: Uuid,

    /// The affected user, when one was involved
    pub user_id: Option<i64>,

    /// Event kind label (see [`super::event::AuthEventKind::as_str`])
    pub action: String,

    /// Event details as recorded at publish time
    pub detail: JsonValue,

    /// When the event occurred
    pub occurred_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Builds a log entry from a published event
    pub fn from_event(event: &AuthEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: event.user_id,
            action: event.kind.as_str().to_string(),
            detail: event.payload.clone(),
            occurred_at: event.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_event() {
        let event = AuthEvent::login(42, "safari-macos");
        let entry = ActivityLogEntry::from_event(&event);

        assert_eq!(entry.user_id, Some(42));
        assert_eq!(entry.action, "login");
        assert_eq!(entry.detail["device"], "safari-macos");
        assert_eq!(entry.occurred_at, event.occurred_at);
    }
}
