//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Name of the storage-level unique constraint on `users.email`
pub const USERS_EMAIL_CONSTRAINT: &str = "users_email_key";

/// Repository trait for user storage
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Persist a new user.
    ///
    /// Fails with [`DomainError::ConstraintViolation`] naming
    /// [`USERS_EMAIL_CONSTRAINT`] when the email is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Get a user by their email (exact match)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by their ID
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// List all users, oldest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Cheap round trip proving the store can answer queries
    async fn ping(&self) -> Result<(), DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository for testing
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<UserId, User>>>,
        should_fail: Arc<RwLock<bool>>,
        hide_existing_emails: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        /// Create a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Set whether operations should fail
        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        /// Make `find_by_email` miss while `create` still enforces uniqueness,
        /// as when a concurrent registration commits between the two calls
        pub async fn set_hide_existing_emails(&self, hide: bool) {
            *self.hide_existing_emails.write().await = hide;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn create(&self, user: User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.values().any(|u| u.email() == user.email()) {
                return Err(DomainError::constraint_violation(
                    USERS_EMAIL_CONSTRAINT,
                    format!("Email '{}' already exists", user.email()),
                ));
            }

            users.insert(*user.id(), user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;

            if *self.hide_existing_emails.read().await {
                return Ok(None);
            }

            let users = self.users.read().await;
            Ok(users.values().find(|u| u.email() == email).cloned())
        }

        async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.get(id).cloned())
        }

        async fn list(&self) -> Result<Vec<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;

            let mut result: Vec<User> = users.values().cloned().collect();
            result.sort_by_key(|u| u.created_at());

            Ok(result)
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.check_should_fail().await?;
            Ok(self.users.read().await.len())
        }

        async fn ping(&self) -> Result<(), DomainError> {
            self.check_should_fail().await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_create_and_find_by_email() {
            let repo = MockUserRepository::new();
            let user = User::new("test_user", "testuser@mail.com", "hash");

            repo.create(user.clone()).await.unwrap();

            let found = repo.find_by_email("testuser@mail.com").await.unwrap();
            assert_eq!(found.unwrap().id(), user.id());
        }

        #[tokio::test]
        async fn test_email_uniqueness() {
            let repo = MockUserRepository::new();

            repo.create(User::new("user1", "same@mail.com", "h"))
                .await
                .unwrap();

            let err = repo
                .create(User::new("user2", "same@mail.com", "h"))
                .await
                .unwrap_err();
            assert_eq!(err.violated_constraint(), Some(USERS_EMAIL_CONSTRAINT));
        }

        #[tokio::test]
        async fn test_hidden_emails_still_enforced_on_create() {
            let repo = MockUserRepository::new();
            repo.create(User::new("user1", "same@mail.com", "h"))
                .await
                .unwrap();
            repo.set_hide_existing_emails(true).await;

            assert!(repo.find_by_email("same@mail.com").await.unwrap().is_none());
            assert!(repo
                .create(User::new("user2", "same@mail.com", "h"))
                .await
                .is_err());
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            assert!(matches!(
                repo.count().await,
                Err(DomainError::Storage { .. })
            ));
            assert!(repo.ping().await.is_err());
        }
    }
}
