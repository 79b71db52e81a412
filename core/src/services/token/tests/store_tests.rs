//! Unit tests for the refresh token store and revocation store

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::token::{RefreshToken, RevokedToken};
use crate::repositories::{
    MockRefreshTokenRepository, MockRevokedTokenRepository, RefreshTokenRepository,
    RevokedTokenRepository,
};
use crate::services::token::{hash_token, RefreshTokenStore, RevocationCheck, RevocationStore};

const WEEK_SECONDS: i64 = 7 * 24 * 3600;

fn refresh_store(
    repository: Arc<MockRefreshTokenRepository>,
) -> RefreshTokenStore<MockRefreshTokenRepository> {
    RefreshTokenStore::new(repository, WEEK_SECONDS)
}

#[tokio::test]
async fn test_create_then_find_returns_active_record() {
    let repository = Arc::new(MockRefreshTokenRepository::new());
    let store = refresh_store(Arc::clone(&repository));

    let (opaque, created) = store.create(42, "firefox-linux").await.unwrap();

    let found = store.find(&opaque).await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.user_id, 42);
    assert!(found.is_active());
    assert_eq!(store.cached_len().await, 1);
}

#[tokio::test]
async fn test_find_unknown_token_returns_none() {
    let store = refresh_store(Arc::new(MockRefreshTokenRepository::new()));
    assert!(store.find("no-such-token").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_falls_through_to_storage_after_restart() {
    let repository = Arc::new(MockRefreshTokenRepository::new());
    let store = refresh_store(Arc::clone(&repository));
    let (opaque, _) = store.create(42, "cli").await.unwrap();

    // A fresh store over the same repository models a process restart
    // with a cold cache.
    let restarted = refresh_store(Arc::clone(&repository));
    assert_eq!(restarted.cached_len().await, 0);

    let found = restarted.find(&opaque).await.unwrap().unwrap();
    assert_eq!(found.user_id, 42);
    assert_eq!(restarted.cached_len().await, 1);
}

#[tokio::test]
async fn test_revoke_is_idempotent() {
    let store = refresh_store(Arc::new(MockRefreshTokenRepository::new()));
    let (opaque, _) = store.create(42, "cli").await.unwrap();

    assert!(store.revoke(&opaque).await.unwrap());
    assert!(!store.revoke(&opaque).await.unwrap());
    assert!(!store.revoke("never-issued").await.unwrap());

    // Revocation is terminal; the record stays but is unusable
    let record = store.find(&opaque).await.unwrap().unwrap();
    assert!(record.revoked);
    assert!(record.revoked_at.is_some());
    assert!(!record.is_active());
}

#[tokio::test]
async fn test_touch_last_used_updates_record() {
    let repository = Arc::new(MockRefreshTokenRepository::new());
    let store = refresh_store(Arc::clone(&repository));
    let (opaque, created) = store.create(42, "cli").await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    store.touch_last_used(&opaque).await;

    let record = store.find(&opaque).await.unwrap().unwrap();
    assert!(record.last_used_at > created.last_used_at);

    // Durable row was updated too, not just the cache
    let row = repository
        .find_by_hash(&hash_token(&opaque))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.last_used_at, record.last_used_at);
}

#[tokio::test]
async fn test_revoke_all_for_user_spares_other_users() {
    let store = refresh_store(Arc::new(MockRefreshTokenRepository::new()));
    let (a, _) = store.create(42, "laptop").await.unwrap();
    let (b, _) = store.create(42, "phone").await.unwrap();
    let (other, _) = store.create(7, "laptop").await.unwrap();

    let count = store.revoke_all_for_user(42).await.unwrap();
    assert_eq!(count, 2);

    assert!(!store.find(&a).await.unwrap().unwrap().is_active());
    assert!(!store.find(&b).await.unwrap().unwrap().is_active());
    assert!(store.find(&other).await.unwrap().unwrap().is_active());

    // A second bulk revoke finds nothing left to do
    assert_eq!(store.revoke_all_for_user(42).await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_expired_respects_strict_cutoff() {
    let repository = Arc::new(MockRefreshTokenRepository::new());
    let store = refresh_store(Arc::clone(&repository));
    let cutoff = Utc::now();

    // Seed rows straddling the cutoff
    let mut stale = RefreshToken::new(1, "stale-hash".to_string(), "cli".to_string(), 60);
    stale.expires_at = cutoff - Duration::seconds(1);
    repository.save(stale).await.unwrap();

    let mut boundary = RefreshToken::new(2, "boundary-hash".to_string(), "cli".to_string(), 60);
    boundary.expires_at = cutoff;
    repository.save(boundary).await.unwrap();

    let mut live = RefreshToken::new(3, "live-hash".to_string(), "cli".to_string(), 60);
    live.expires_at = cutoff + Duration::seconds(1);
    repository.save(live).await.unwrap();

    let deleted = store.delete_expired(cutoff).await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(repository.len().await, 2);
    assert!(repository
        .find_by_hash("stale-hash")
        .await
        .unwrap()
        .is_none());
    assert!(repository
        .find_by_hash("boundary-hash")
        .await
        .unwrap()
        .is_some());
    assert!(repository.find_by_hash("live-hash").await.unwrap().is_some());
}

#[tokio::test]
async fn test_sessions_for_user_lists_only_live_tokens() {
    let store = refresh_store(Arc::new(MockRefreshTokenRepository::new()));
    let (revoked, _) = store.create(42, "old-phone").await.unwrap();
    store.create(42, "laptop").await.unwrap();
    store.revoke(&revoked).await.unwrap();

    let sessions = store.sessions_for_user(42).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].device, "laptop");
}

#[tokio::test]
async fn test_revocation_add_then_check_hits_cache() {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let store = RevocationStore::new(Arc::clone(&repository));

    let expires_at = Utc::now() + Duration::minutes(15);
    store.add("some.access.token", Some(42), expires_at).await.unwrap();

    assert_eq!(
        store.check("some.access.token").await,
        RevocationCheck::Revoked
    );
    assert_eq!(store.check("another.token").await, RevocationCheck::Clear);
    assert_eq!(store.cached_len().await, 1);
}

#[tokio::test]
async fn test_revocation_add_is_idempotent() {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let store = RevocationStore::new(Arc::clone(&repository));
    let expires_at = Utc::now() + Duration::minutes(15);

    store.add("token", Some(42), expires_at).await.unwrap();
    store.add("token", Some(42), expires_at).await.unwrap();

    assert_eq!(repository.len().await, 1);
}

#[tokio::test]
async fn test_revocation_check_falls_through_after_restart() {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let store = RevocationStore::new(Arc::clone(&repository));
    store
        .add("token", None, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();

    let restarted = RevocationStore::new(Arc::clone(&repository));
    assert_eq!(restarted.cached_len().await, 0);
    assert_eq!(restarted.check("token").await, RevocationCheck::Revoked);
    // The durable hit was cached for the next request
    assert_eq!(restarted.cached_len().await, 1);
}

#[tokio::test]
async fn test_revocation_check_fails_closed_on_storage_error() {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let store = RevocationStore::new(Arc::clone(&repository));

    repository.set_fail_reads(true);

    // Cold cache + unreachable storage: unknown, never clear
    assert_eq!(store.check("token").await, RevocationCheck::Unknown);
}

#[tokio::test]
async fn test_revocation_cache_hit_survives_storage_outage() {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let store = RevocationStore::new(Arc::clone(&repository));
    store
        .add("token", None, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();

    repository.set_fail_reads(true);

    // The cached entry still answers without touching storage
    assert_eq!(store.check("token").await, RevocationCheck::Revoked);
}

#[tokio::test]
async fn test_revocation_delete_expired_respects_strict_cutoff() {
    let repository = Arc::new(MockRevokedTokenRepository::new());
    let store = RevocationStore::new(Arc::clone(&repository));
    let cutoff = Utc::now();

    repository
        .insert(RevokedToken::new(
            "stale".to_string(),
            None,
            cutoff - Duration::seconds(1),
        ))
        .await
        .unwrap();
    repository
        .insert(RevokedToken::new(
            "live".to_string(),
            None,
            cutoff + Duration::seconds(1),
        ))
        .await
        .unwrap();

    let deleted = store.delete_expired(cutoff).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(repository.contains("live").await.unwrap());
    assert!(!repository.contains("stale").await.unwrap());
}
