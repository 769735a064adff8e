//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identifier - a random UUID assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered user
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    username: String,
    email: String,
    /// PHC-format password hash - never exposed in serialization
    #[serde(skip_serializing)]
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated ID
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: UserId::generate(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }

    /// Rebuild a user from persisted state
    pub fn restore(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("test_user", "testuser@mail.com", "hashed_password");

        assert_eq!(user.username(), "test_user");
        assert_eq!(user.email(), "testuser@mail.com");
        assert_eq!(user.password_hash(), "hashed_password");
        assert!(user.created_at() <= Utc::now());
    }

    #[test]
    fn test_user_ids_are_unique() {
        let a = User::new("user1", "a@mail.com", "h");
        let b = User::new("user2", "b@mail.com", "h");

        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_user_restore() {
        let id = UserId::from_uuid(Uuid::nil());
        let created_at = Utc::now();
        let user = User::restore(
            id,
            "test_user".to_string(),
            "testuser@mail.com".to_string(),
            "hash".to_string(),
            created_at,
        );

        assert_eq!(user.id().as_uuid(), &Uuid::nil());
        assert_eq!(user.created_at(), created_at);
    }

    #[test]
    fn test_user_serialization_excludes_password() {
        let user = User::new("test_user", "testuser@mail.com", "hashed_password");

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hashed_password"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("testuser@mail.com"));
    }
}
