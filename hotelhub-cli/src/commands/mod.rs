//! Command implementations

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

/// Environment variable holding the Postgres connection string
pub const DATABASE_URL_ENV: &str = "DB_CONNECTION_STRING";
