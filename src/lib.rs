//! User registration service
//!
//! Accepts sign-ups on `POST /api/1.0/users`, validates them field by field
//! with messages localized from `Accept-Language`, hashes passwords with
//! Argon2id and stores users in memory or PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use api::state::{AppState, UserServiceTrait};
use domain::MessageCatalog;
use infrastructure::storage::{self, PostgresConfig, StorageType};
use infrastructure::user::{
    Argon2Hasher, InMemoryUserRepository, PostgresUserRepository, UserService,
};

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let catalog = Arc::new(MessageCatalog::embedded()?);
    let hasher = Arc::new(Argon2Hasher::from_config(&config.password)?);

    let storage_backend = StorageType::from_str(&config.storage.backend).ok_or_else(|| {
        anyhow::anyhow!("Unknown storage backend '{}'", config.storage.backend)
    })?;

    info!("Storage backend: {:?}", storage_backend);

    let user_service: Arc<dyn UserServiceTrait> = match storage_backend {
        StorageType::InMemory => {
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(UserService::new(repository, hasher))
        }
        StorageType::Postgres => {
            let pool = storage::connect(&PostgresConfig::from(&config.storage)).await?;

            if config.storage.run_migrations {
                let applied = storage::run_migrations(&pool).await?;
                info!("Applied {} migration(s)", applied);
            }

            let repository = Arc::new(PostgresUserRepository::new(pool));
            Arc::new(UserService::new(repository, hasher))
        }
    };

    Ok(AppState::new(
        user_service,
        catalog,
        config.i18n.default_locale,
    ))
}

/// Build the HTTP application for `config`
pub async fn create_app(config: &AppConfig) -> anyhow::Result<Router> {
    let state = create_app_state_with_config(config).await?;
    Ok(api::create_router_with_state(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locale;

    #[tokio::test]
    async fn test_create_in_memory_state() {
        let mut config = AppConfig::default();
        config.i18n.default_locale = Locale::Tr;

        let state = create_app_state_with_config(&config).await.unwrap();

        assert_eq!(state.default_locale, Locale::Tr);
        assert!(state.user_service.ping().await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_backend_is_rejected() {
        let mut config = AppConfig::default();
        config.storage.backend = "sqlite".to_string();

        let err = create_app_state_with_config(&config).await.err().unwrap();
        assert!(err.to_string().contains("sqlite"));
    }

    #[tokio::test]
    async fn test_invalid_password_params_are_rejected() {
        let mut config = AppConfig::default();
        config.password.parallelism = 0;

        assert!(create_app_state_with_config(&config).await.is_err());
    }
}
