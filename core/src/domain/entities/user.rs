//! User record consumed from the admin-panel user directory.
//!
//! User CRUD lives outside this crate; the session core only reads
//! these records through [`crate::repositories::UserRepository`].

use serde::{Deserialize, Serialize};

/// A user record as the external user directory exposes it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Numeric user id (primary key of the external user table)
    pub id: i64,

    /// Login/display name
    pub username: String,

    /// Email address
    pub email: String,

    /// Role name carried into access-token claims
    pub role: String,

    /// Slow one-way password hash, verified by an external collaborator
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account may authenticate
    pub is_active: bool,
}

impl AuthUser {
    /// Checks if the account is allowed to hold sessions
    pub fn can_authenticate(&self) -> bool {
        self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_user_can_authenticate() {
        let user = AuthUser {
            id: 7,
            username: "auditor".to_string(),
            email: "auditor@example.com".to_string(),
            role: "viewer".to_string(),
            password_hash: "hash".to_string(),
            is_active: true,
        };
        assert!(user.can_authenticate());
    }

    #[test]
    fn test_inactive_user_cannot_authenticate() {
        let user = AuthUser {
            id: 7,
            username: "auditor".to_string(),
            email: "auditor@example.com".to_string(),
            role: "viewer".to_string(),
            password_hash: "hash".to_string(),
            is_active: false,
        };
        assert!(!user.can_authenticate());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = AuthUser {
            id: 7,
            username: "auditor".to_string(),
            email: "auditor@example.com".to_string(),
            role: "viewer".to_string(),
            password_hash: "super-secret-hash".to_string(),
            is_active: true,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("super-secret-hash"));
    }
}
