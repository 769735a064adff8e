//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{User, UserId, UserRepository, USERS_EMAIL_CONSTRAINT};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    /// Unique index for email -> user ID lookup
    email_index: HashMap<String, UserId>,
}

/// In-memory implementation of UserRepository
///
/// Rows and the email index share one lock, so the uniqueness check and the
/// insert are atomic just like a database unique constraint.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.email_index.contains_key(user.email()) {
            return Err(DomainError::constraint_violation(
                USERS_EMAIL_CONSTRAINT,
                format!("Email '{}' already exists", user.email()),
            ));
        }

        if tables.users.contains_key(user.id()) {
            return Err(DomainError::constraint_violation(
                "users_pkey",
                format!("User with ID '{}' already exists", user.id()),
            ));
        }

        tables.email_index.insert(user.email().to_string(), *user.id());
        tables.users.insert(*user.id(), user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .email_index
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().await;

        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at());

        Ok(users)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.tables.read().await.users.len())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
