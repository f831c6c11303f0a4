//! Database connection pool management
//!
//! A single `PgPool` is opened at startup and handed to handlers through
//! application state. Every query borrows a connection for its own
//! duration; transactions hold one until commit or rollback.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// How long a request waits for a free connection before failing.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Idle connections above the minimum are closed after this long.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// Pool settings shared by the server and the `migrate` command.
///
/// A zero connection limit is raised to one.
pub fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
}

/// Create a PostgreSQL connection pool.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/hotelhub").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a pool capped at `max_connections` and check one connection out.
///
/// # Errors
///
/// Fails on a malformed URL or when the first connection cannot be opened.
pub async fn create_pool_with_options(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    let options = pool_options(max_connections);
    let max = options.get_max_connections();
    let pool = options.connect(database_url).await?;

    tracing::info!(max_connections = max, "Database pool ready");
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_connection_limit_is_raised() {
        assert_eq!(pool_options(0).get_max_connections(), 1);
        assert_eq!(pool_options(4).get_max_connections(), 4);
    }

    #[test]
    fn timeouts_are_applied() {
        let options = pool_options(DEFAULT_MAX_CONNECTIONS);
        assert_eq!(options.get_acquire_timeout(), ACQUIRE_TIMEOUT);
        assert_eq!(options.get_idle_timeout(), Some(IDLE_TIMEOUT));
    }

    #[tokio::test]
    async fn malformed_url_is_an_error() {
        assert!(create_pool("definitely not a url").await.is_err());
    }

    // Run with: DB_CONNECTION_STRING=postgres://... cargo test -p hotelhub-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_serves_queries_up_to_its_limit() {
        let url = std::env::var("DB_CONNECTION_STRING").expect("DB_CONNECTION_STRING required");
        let pool = create_pool_with_options(&url, 2).await.expect("pool creation failed");

        let first = pool.acquire().await.expect("first connection");
        let second = pool.acquire().await.expect("second connection");
        assert_eq!(pool.size(), 2);
        drop((first, second));

        let (one,): (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert_eq!(one, 1);
    }
}
