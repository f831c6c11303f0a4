//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - One shared pool, passed in through application state
//! - List operations load children in bulk - no N+1 queries
//! - Transactions for multi-step writes
//! - Partial updates go through `UpdateSet`, never hand-numbered SQL

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod update;

pub use pool::{create_pool, create_pool_with_options};
pub use repos::*;
pub use update::{FieldValue, UpdateSet};
