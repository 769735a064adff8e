//! Application state for shared services

use std::sync::Arc;

use crate::domain::{DomainError, Locale, MessageCatalog, User, UserRepository};
use crate::infrastructure::user::{
    PasswordHasher, RegisterUserRequest, RegistrationError, UserService,
};

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub catalog: Arc<MessageCatalog>,
    /// Locale used when the request names nothing supported
    pub default_locale: Locale,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserServiceTrait>,
        catalog: Arc<MessageCatalog>,
        default_locale: Locale,
    ) -> Self {
        Self {
            user_service,
            catalog,
            default_locale,
        }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterUserRequest) -> Result<User, RegistrationError>;
    async fn ping(&self) -> Result<(), DomainError>;
}

#[async_trait::async_trait]
impl<R, H> UserServiceTrait for UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterUserRequest) -> Result<User, RegistrationError> {
        UserService::register(self, request).await
    }

    async fn ping(&self) -> Result<(), DomainError> {
        UserService::ping(self).await
    }
}

#[cfg(test)]
impl AppState {
    /// English-default state over `repository` with cheap Argon2 parameters
    pub fn with_repository<R: UserRepository + 'static>(repository: Arc<R>) -> Self {
        use crate::config::PasswordConfig;
        use crate::infrastructure::user::Argon2Hasher;

        let hasher = Argon2Hasher::from_config(&PasswordConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();

        Self::new(
            Arc::new(UserService::new(repository, Arc::new(hasher))),
            Arc::new(MessageCatalog::embedded().unwrap()),
            Locale::En,
        )
    }
}
