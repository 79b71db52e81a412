//! Periodic cleanup of expired refresh tokens and blacklist entries.
//!
//! The pass only deletes rows that are already unusable (expired), so
//! it needs no coordination with in-flight rotations or checks; it
//! never holds a lock a request path waits on. Failures are logged
//! and retried on the next tick.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::{error, info};

use oc_shared::CleanupConfig;

use crate::domain::entities::event::{AuthEvent, AuthEventKind};
use crate::errors::DomainResult;
use crate::repositories::{RefreshTokenRepository, RevokedTokenRepository};
use crate::services::events::{AuthEventBus, AuthEventSubscriber};

use super::refresh_store::RefreshTokenStore;
use super::revocation_store::RevocationStore;

/// Result of one cleanup pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupOutcome {
    /// Expired refresh token rows deleted
    pub refresh_deleted: usize,
    /// Expired blacklist rows deleted
    pub revoked_deleted: usize,
}

impl CleanupOutcome {
    /// Total rows reclaimed by the pass
    pub fn total(&self) -> usize {
        self.refresh_deleted + self.revoked_deleted
    }
}

/// Recurring background task pruning both token stores
pub struct CleanupScheduler<R, V>
where
    R: RefreshTokenRepository + 'static,
    V: RevokedTokenRepository + 'static,
{
    refresh_store: Arc<RefreshTokenStore<R>>,
    revocation_store: Arc<RevocationStore<V>>,
    event_bus: Arc<AuthEventBus>,
    config: CleanupConfig,
    on_demand: Arc<Notify>,
}

impl<R, V> CleanupScheduler<R, V>
where
    R: RefreshTokenRepository + 'static,
    V: RevokedTokenRepository + 'static,
{
    /// Creates a scheduler over the two stores
    pub fn new(
        refresh_store: Arc<RefreshTokenStore<R>>,
        revocation_store: Arc<RevocationStore<V>>,
        event_bus: Arc<AuthEventBus>,
        config: CleanupConfig,
    ) -> Self {
        Self {
            refresh_store,
            revocation_store,
            event_bus,
            config,
            on_demand: Arc::new(Notify::new()),
        }
    }

    /// Event subscriber that requests an extra pass after a mass logout
    ///
    /// Subscribe this on the bus that receives `LogoutAll`; the pass
    /// itself still runs on the scheduler task, not in the publisher.
    pub fn on_logout_all(&self) -> Arc<CleanupTrigger> {
        Arc::new(CleanupTrigger {
            on_demand: Arc::clone(&self.on_demand),
        })
    }

    /// Runs a single cleanup pass
    ///
    /// Idempotent: a second pass right after the first finds nothing
    /// left to delete. Per-store failures are isolated so one store's
    /// outage does not starve the other of compaction.
    pub async fn run_once(&self) -> CleanupOutcome {
        let cutoff = Utc::now();
        let mut outcome = CleanupOutcome::default();

        match self.refresh_store.delete_expired(cutoff).await {
            Ok(count) => {
                outcome.refresh_deleted = count;
            }
            Err(e) => {
                error!("failed to delete expired refresh tokens: {}", e);
            }
        }

        match self.revocation_store.delete_expired(cutoff).await {
            Ok(count) => {
                outcome.revoked_deleted = count;
            }
            Err(e) => {
                error!("failed to delete expired blacklist entries: {}", e);
            }
        }

        info!(
            refresh_deleted = outcome.refresh_deleted,
            revoked_deleted = outcome.revoked_deleted,
            "token cleanup pass completed"
        );

        self.event_bus
            .publish(AuthEvent::cleanup_completed(
                outcome.refresh_deleted,
                outcome.revoked_deleted,
            ))
            .await;

        outcome
    }

    /// Starts the recurring task
    ///
    /// The task ticks at the configured interval, runs an extra pass
    /// whenever one is requested via [`Self::on_logout_all`], and
    /// stops cleanly when the returned handle is shut down.
    pub fn spawn(self: Arc<Self>) -> CleanupHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let scheduler = self;
        let handle = tokio::spawn(async move {
            if !scheduler.config.enabled {
                info!("token cleanup is disabled");
                return;
            }

            info!(
                interval_seconds = scheduler.config.interval_seconds,
                "token cleanup task started"
            );

            let mut ticker =
                tokio::time::interval(Duration::from_secs(scheduler.config.interval_seconds));

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        scheduler.run_once().await;
                    }
                    _ = scheduler.on_demand.notified() => {
                        scheduler.run_once().await;
                    }
                    _ = shutdown_rx.changed() => {
                        info!("token cleanup task stopped");
                        break;
                    }
                }
            }
        });

        CleanupHandle {
            shutdown: shutdown_tx,
            handle,
        }
    }
}

/// Handle to a running cleanup task
pub struct CleanupHandle {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CleanupHandle {
    /// Stops the task and waits for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}

/// Bus subscriber that schedules an on-demand pass after `LogoutAll`
pub struct CleanupTrigger {
    on_demand: Arc<Notify>,
}

#[async_trait::async_trait]
impl AuthEventSubscriber for CleanupTrigger {
    fn name(&self) -> &'static str {
        "cleanup_trigger"
    }

    async fn handle(&self, event: &AuthEvent) -> DomainResult<()> {
        if event.kind == AuthEventKind::LogoutAll {
            self.on_demand.notify_one();
        }
        Ok(())
    }
}
