//! Migrate command - applies the PostgreSQL schema and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::{self, PostgresConfig, PostgresMigrator};

/// Apply pending migrations against `storage.url`
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let pool = storage::connect(&PostgresConfig::from(&config.storage)).await?;
    let applied = storage::run_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool.clone()).current_version().await?;

    info!(
        applied,
        version = version.unwrap_or_default(),
        "Database schema is up to date"
    );

    pool.close().await;

    Ok(())
}
