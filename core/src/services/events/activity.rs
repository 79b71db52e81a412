//! Event subscriber that persists activity log entries.

use std::sync::Arc;

use crate::domain::entities::activity::ActivityLogEntry;
use crate::domain::entities::event::AuthEvent;
use crate::errors::DomainResult;
use crate::repositories::ActivityLogRepository;

use super::bus::AuthEventSubscriber;

/// Records every published event in the activity log
pub struct ActivityLogSubscriber<A: ActivityLogRepository> {
    repository: Arc<A>,
}

impl<A: ActivityLogRepository> ActivityLogSubscriber<A> {
    /// Creates a subscriber writing to the given repository
    pub fn new(repository: Arc<A>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl<A: ActivityLogRepository> AuthEventSubscriber for ActivityLogSubscriber<A> {
    fn name(&self) -> &'static str {
        "activity_log"
    }

    async fn handle(&self, event: &AuthEvent) -> DomainResult<()> {
        self.repository
            .record(ActivityLogEntry::from_event(event))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::event::AuthEventKind;
    use crate::repositories::MockActivityLogRepository;
    use crate::services::events::AuthEventBus;

    #[tokio::test]
    async fn test_events_are_persisted_in_order() {
        let repository = Arc::new(MockActivityLogRepository::new());
        let bus = AuthEventBus::new();
        bus.subscribe(Arc::new(ActivityLogSubscriber::new(Arc::clone(&repository))))
            .await;

        bus.publish(AuthEvent::login(42, "firefox-linux")).await;
        bus.publish(AuthEvent::logout_all(42, 2)).await;

        let entries = repository.entries().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, AuthEventKind::Login.as_str());
        assert_eq!(entries[1].action, AuthEventKind::LogoutAll.as_str());
        assert_eq!(entries[1].detail["revoked_sessions"], 2);
    }
}
