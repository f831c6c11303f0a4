//! hotelhub-server: HTTP backend for a restaurant and events venue
//!
//! Public users sign up, log in, book tables and send contact messages;
//! staff manage the catalog (services, team, events, occasions, menus,
//! menu displays) through `/admin` endpoints. Postgres holds all data,
//! uploaded images live on local disk.

pub mod db;
pub mod http;
pub mod models;
pub mod password;
pub mod storage;

pub use db::{create_pool, create_pool_with_options};
pub use http::{build_router, run_server, AppState, ServerConfig, ServerError};
pub use storage::FileStore;
