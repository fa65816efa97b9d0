use std::time::Duration;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Connects the shared pool. Connections are checked out per store call and returned on drop,
/// so a cancelled request never holds one past its own lifetime.
pub async fn create_pool(config: &AppConfig) -> anyhow::Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(config.db_max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(&config.database_url)
    .await
    .context("connect to database")?;

  Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> anyhow::Result<()> {
  sqlx::migrate!("./migrations")
    .run(pool)
    .await
    .context("apply database migrations")?;

  tracing::info!("Database migrations applied successfully");
  Ok(())
}
