//! User repository
//!
//! Accounts are created on signup and read on login; never updated.

use sqlx::{FromRow, PgPool};

use crate::models::{Email, NewUser};
use super::DbError;

/// Conflict message for signup, from the pre-check or the unique index
pub const EMAIL_TAKEN: &str = "Email is already registered.";

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub username: String,
    /// argon2 PHC string
    pub password: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            "SELECT user_id, email, username, password FROM users WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a new user.
    ///
    /// A concurrent signup with the same email loses the race on the
    /// unique index and gets `DbError::Conflict`, same as the pre-check.
    pub async fn create(
        &self,
        user_id: &str,
        user: &NewUser,
        password_hash: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO users (user_id, email, username, password) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(user.email.as_str())
        .bind(&user.username)
        .bind(password_hash)
        .execute(self.pool)
        .await
        .map_err(|e| DbError::conflict_on_unique(e, "user", EMAIL_TAKEN))?;

        Ok(())
    }
}
