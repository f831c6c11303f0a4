//! Event repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::update::UpdateSet;
use crate::models::{EventPatch, NewEvent};
use super::{delete_row, update_row, DbError};

/// Event record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub pic_path: String,
}

/// Event repository
pub struct EventRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> EventRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, event: &NewEvent, pic_path: &str) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO events (pic_path, name, description, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(pic_path)
        .bind(&event.name)
        .bind(&event.description)
        .bind(event.price)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_all(&self) -> Result<Vec<Event>, DbError> {
        let events =
            sqlx::query_as("SELECT id, name, description, price, pic_path FROM events ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(events)
    }

    pub async fn update(&self, id: i32, patch: EventPatch) -> Result<(), DbError> {
        let set = UpdateSet::new("events")
            .set("name", patch.name)
            .set("description", patch.description)
            .set("price", patch.price)
            .set("pic_path", patch.pic_path);

        update_row(self.pool, set, "event", id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "events", "event", id).await
    }
}
