//! Schema migration command

use anyhow::{Context, Result};
use clap::Parser;

use hotelhub_server::db::{create_pool_with_options, migrations};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Postgres connection string
    #[arg(long, env = "DB_CONNECTION_STRING", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Create missing tables, columns and indexes, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = args.database_url.with_context(|| {
        format!(
            "{} not set. Set via --database-url, the environment, or .env",
            super::DATABASE_URL_ENV
        )
    })?;

    let pool = create_pool_with_options(&database_url, 1)
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to apply migrations")?;
    pool.close().await;

    tracing::info!("Schema is up to date");
    Ok(())
}
