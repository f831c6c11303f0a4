//! HTTP server command

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use hotelhub_server::db::create_pool_with_options;
use hotelhub_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use hotelhub_server::http::{run_server, ServerConfig};
use hotelhub_server::storage::DEFAULT_UPLOAD_DIR;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Postgres connection string
    #[arg(long, env = "DB_CONNECTION_STRING", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Directory uploaded images are written to and served from
    #[arg(long, value_name = "DIR", default_value = DEFAULT_UPLOAD_DIR)]
    pub upload_dir: PathBuf,

    /// Largest accepted request body, in megabytes
    #[arg(long, default_value_t = 10)]
    pub max_upload_mb: usize,

    /// Maximum pooled database connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = args.database_url.with_context(|| {
        format!(
            "{} not set. Set via --database-url, the environment, or .env",
            super::DATABASE_URL_ENV
        )
    })?;

    tracing::info!("Starting hotelhub server on {}", args.bind);

    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to create database pool")?;

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        upload_dir: args.upload_dir,
        max_upload_bytes: args.max_upload_mb.saturating_mul(1024 * 1024),
    };

    // Blocks until shutdown
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
