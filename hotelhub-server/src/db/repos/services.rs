//! Service repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::update::UpdateSet;
use crate::models::{NewService, ServicePatch};
use super::{delete_row, update_row, DbError};

/// Service record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: i32,
    pub image_path: String,
    pub name: String,
    pub description: String,
}

/// Service repository
pub struct ServiceRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ServiceRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, service: &NewService, image_path: &str) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO services (image_path, name, description)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(image_path)
        .bind(&service.name)
        .bind(&service.description)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_all(&self) -> Result<Vec<Service>, DbError> {
        let services =
            sqlx::query_as("SELECT id, image_path, name, description FROM services ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        Ok(services)
    }

    pub async fn update(&self, id: i32, patch: ServicePatch) -> Result<(), DbError> {
        let set = UpdateSet::new("services")
            .set("name", patch.name)
            .set("description", patch.description)
            .set("image_path", patch.image_path);

        update_row(self.pool, set, "service", id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "services", "service", id).await
    }
}
