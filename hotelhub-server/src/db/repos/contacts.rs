//! Contact message repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::models::NewContactMessage;
use super::{delete_row, DbError};

/// Contact message record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ContactMessage {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Contact message repository
pub struct ContactRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ContactRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, contact: &NewContactMessage) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO contact_us (name, email, subject, message)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&contact.name)
        .bind(contact.email.as_str())
        .bind(&contact.subject)
        .bind(&contact.message)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_all(&self) -> Result<Vec<ContactMessage>, DbError> {
        let messages =
            sqlx::query_as("SELECT id, name, email, subject, message FROM contact_us ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(messages)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "contact_us", "contact message", id).await
    }
}
