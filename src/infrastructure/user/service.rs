//! User service for registration

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::i18n::MessageId;
use crate::domain::user::{
    Candidate, Field, User, UserRepository, UserValidator, ValidationErrors,
    USERS_EMAIL_CONSTRAINT,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new user; any field may be missing
#[derive(Debug, Clone, Default)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl RegisterUserRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: Some(username.into()),
            email: Some(email.into()),
            password: Some(password.into()),
        }
    }

    fn candidate(&self) -> Candidate<'_> {
        Candidate {
            username: self.username.as_deref(),
            email: self.email.as_deref(),
            password: self.password.as_deref(),
        }
    }
}

/// Why a registration did not produce a user
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// One or more fields were rejected; safe to show to the caller
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// User service for registration
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
    validator: UserValidator,
}

impl<R, H> UserService<R, H>
where
    R: UserRepository + 'static,
    H: PasswordHasher + 'static,
{
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            validator: UserValidator::new(),
        }
    }

    /// Validate, hash and persist a new user
    pub async fn register(&self, request: RegisterUserRequest) -> Result<User, RegistrationError> {
        let errors = self
            .validator
            .validate(&request.candidate(), self.repository.as_ref())
            .await?;

        if !errors.is_empty() {
            debug!(fields = %errors, "Registration rejected");
            return Err(RegistrationError::Invalid(errors));
        }

        let (Some(username), Some(email), Some(password)) =
            (request.username, request.email, request.password)
        else {
            return Err(DomainError::internal("Validated request is missing a field").into());
        };

        let password_hash = self.hash_password(password).await?;
        let user = User::new(username, email, password_hash);

        match self.repository.create(user).await {
            Ok(user) => {
                info!(user_id = %user.id(), "User registered");
                Ok(user)
            }
            Err(e) if e.violated_constraint() == Some(USERS_EMAIL_CONSTRAINT) => {
                // Lost the race against a concurrent registration
                warn!(error = %e, "Email claimed between uniqueness check and insert");
                Err(RegistrationError::Invalid(ValidationErrors::single(
                    Field::Email,
                    MessageId::EmailInuse,
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check that the user store is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }

    async fn hash_password(&self, password: String) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }
}
