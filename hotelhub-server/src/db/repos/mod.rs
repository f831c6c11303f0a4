//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Single statements run straight on the pool (one connection per query)
//! - Multi-statement writes use a transaction
//! - Missing rows surface as `DbError::NotFound`, never as empty success

pub mod bookings;
pub mod contacts;
pub mod events;
pub mod menu_displays;
pub mod menus;
pub mod occasions;
pub mod services;
pub mod team_members;
pub mod users;

pub use bookings::{Booking, BookingRepo};
pub use contacts::{ContactMessage, ContactRepo};
pub use events::{Event, EventRepo};
pub use menu_displays::{CascadeReport, MenuDisplay, MenuDisplayRepo, Package, Subpackage};
pub use menus::{Dish, MenuHeading, MenuRepo};
pub use occasions::{Occasion, OccasionRepo};
pub use services::{Service, ServiceRepo};
pub use team_members::{TeamMember, TeamMemberRepo};
pub use users::{User, UserRepo};

use sqlx::PgPool;

use super::update::UpdateSet;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} conflict: {detail}")]
    Conflict { resource: &'static str, detail: String },

    #[error("no fields to update")]
    EmptyUpdate,
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Turn a unique-constraint violation into `Conflict`.
    pub(crate) fn conflict_on_unique(
        err: sqlx::Error,
        resource: &'static str,
        detail: &str,
    ) -> Self {
        match err {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => Self::Conflict {
                resource,
                detail: detail.to_owned(),
            },
            other => Self::Sqlx(other),
        }
    }
}

/// Apply a partial update to the row with the given id.
pub(crate) async fn update_row(
    pool: &PgPool,
    set: UpdateSet,
    resource: &'static str,
    id: i32,
) -> Result<(), DbError> {
    let mut query = set.into_query("id", id).ok_or(DbError::EmptyUpdate)?;
    let result = query.build().execute(pool).await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource, id));
    }
    Ok(())
}

/// Delete the row with the given id.
pub(crate) async fn delete_row(
    pool: &PgPool,
    table: &'static str,
    resource: &'static str,
    id: i32,
) -> Result<(), DbError> {
    let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table))
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::not_found(resource, id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("service", 12);
        assert_eq!(err.to_string(), "not found: service '12'");
    }

    #[test]
    fn non_database_errors_stay_sqlx() {
        let err = DbError::conflict_on_unique(sqlx::Error::RowNotFound, "user", "dup");
        assert!(matches!(err, DbError::Sqlx(sqlx::Error::RowNotFound)));
    }
}
