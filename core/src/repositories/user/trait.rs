//! User directory trait: the external user-store collaborator.

use async_trait::async_trait;

use crate::domain::entities::user::AuthUser;
use crate::errors::DomainResult;

/// Read-only lookup into the admin-panel user directory
///
/// User CRUD belongs to the surrounding application. The session core
/// only resolves accounts: by id when rotating a refresh token (to
/// re-check the account is still active), by email on login.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by numeric id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<AuthUser>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<AuthUser>>;
}
