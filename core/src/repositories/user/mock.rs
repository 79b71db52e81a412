//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::AuthUser;
use crate::errors::DomainResult;

use super::r#trait::UserRepository;

/// In-memory user directory for tests
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, AuthUser>>>,
}

impl MockUserRepository {
    /// Create a new mock directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user record
    pub async fn insert(&self, user: AuthUser) {
        self.users.write().await.insert(user.id, user);
    }

    /// Flip the active flag on an existing record
    pub async fn set_active(&self, id: i64, is_active: bool) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_active = is_active;
        }
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AuthUser>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<AuthUser>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }
}
