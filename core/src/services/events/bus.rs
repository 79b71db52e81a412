//! Synchronous in-process event bus.
//!
//! Subscribers run in registration order, awaited one at a time, in
//! the publisher's task. A failing subscriber is logged and skipped;
//! it never stops the fan-out or fails the publisher. Decoupling here
//! is about code structure, not scheduling.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::domain::entities::event::AuthEvent;
use crate::errors::DomainResult;

/// A consumer of authentication lifecycle events
#[async_trait::async_trait]
pub trait AuthEventSubscriber: Send + Sync {
    /// Name used in dispatch logs
    fn name(&self) -> &'static str;

    /// Handles one published event
    async fn handle(&self, event: &AuthEvent) -> DomainResult<()>;
}

/// Registration-ordered publish/subscribe channel
#[derive(Default)]
pub struct AuthEventBus {
    subscribers: RwLock<Vec<Arc<dyn AuthEventSubscriber>>>,
}

impl AuthEventBus {
    /// Creates an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber; dispatch order is registration order
    pub async fn subscribe(&self, subscriber: Arc<dyn AuthEventSubscriber>) {
        self.subscribers.write().await.push(subscriber);
    }

    /// Number of registered subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Publishes an event to every subscriber
    pub async fn publish(&self, event: AuthEvent) {
        // Snapshot under the lock, dispatch outside it: a slow
        // subscriber must not block concurrent registration.
        let subscribers: Vec<Arc<dyn AuthEventSubscriber>> =
            self.subscribers.read().await.clone();

        for subscriber in subscribers {
            if let Err(e) = subscriber.handle(&event).await {
                warn!(
                    subscriber = subscriber.name(),
                    kind = event.kind.as_str(),
                    "event subscriber failed: {}",
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::event::AuthEventKind;
    use crate::errors::DomainError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    struct Recorder {
        label: &'static str,
        order: Arc<Mutex<Vec<&'static str>>>,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl AuthEventSubscriber for Recorder {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn handle(&self, _event: &AuthEvent) -> DomainResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.order.lock().await.push(self.label);
            if self.fail {
                return Err(DomainError::Internal {
                    message: "subscriber failure".to_string(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_subscribers_run_in_registration_order() {
        let bus = AuthEventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for label in ["first", "second", "third"] {
            bus.subscribe(Arc::new(Recorder {
                label,
                order: Arc::clone(&order),
                fail: false,
                calls: AtomicUsize::new(0),
            }))
            .await;
        }

        bus.publish(AuthEvent::logout(Some(1))).await;

        assert_eq!(*order.lock().await, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_failing_subscriber_does_not_stop_fanout() {
        let bus = AuthEventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        bus.subscribe(Arc::new(Recorder {
            label: "failing",
            order: Arc::clone(&order),
            fail: true,
            calls: AtomicUsize::new(0),
        }))
        .await;
        let tail = Arc::new(Recorder {
            label: "tail",
            order: Arc::clone(&order),
            fail: false,
            calls: AtomicUsize::new(0),
        });
        bus.subscribe(tail.clone()).await;

        bus.publish(AuthEvent::new(AuthEventKind::Login, Some(1))).await;

        assert_eq!(tail.calls.load(Ordering::SeqCst), 1);
        assert_eq!(*order.lock().await, vec!["failing", "tail"]);
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers_is_noop() {
        let bus = AuthEventBus::new();
        assert_eq!(bus.subscriber_count().await, 0);
        bus.publish(AuthEvent::logout(None)).await;
    }
}
