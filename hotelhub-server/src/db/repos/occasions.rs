//! Occasion repository
//!
//! Tags and image paths are stored as JSONB arrays.

use serde::Serialize;
use sqlx::{types::Json, FromRow, PgPool};

use crate::db::update::UpdateSet;
use crate::models::{NewOccasion, OccasionPatch};
use super::{delete_row, update_row, DbError};

/// Occasion row as stored
#[derive(Debug, Clone, FromRow)]
struct OccasionRow {
    id: i32,
    name: String,
    heading: String,
    description: String,
    price: f64,
    standard_price: f64,
    outstandard_price: f64,
    tags: Json<Vec<String>>,
    images: Json<Vec<String>>,
}

/// Occasion record
#[derive(Debug, Clone, Serialize)]
pub struct Occasion {
    pub id: i32,
    pub name: String,
    pub heading: String,
    pub description: String,
    pub price: f64,
    pub standard_price: f64,
    pub outstandard_price: f64,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl From<OccasionRow> for Occasion {
    fn from(r: OccasionRow) -> Self {
        Self {
            id: r.id,
            name: r.name,
            heading: r.heading,
            description: r.description,
            price: r.price,
            standard_price: r.standard_price,
            outstandard_price: r.outstandard_price,
            tags: r.tags.0,
            images: r.images.0,
        }
    }
}

const OCCASION_COLUMNS: &str = "id, name, heading, description, price, standard_price, \
                                outstandard_price, tags, images";

/// Occasion repository
pub struct OccasionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> OccasionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, occasion: &NewOccasion, images: &[String]) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO occasions
                (name, heading, description, price, standard_price, outstandard_price, tags, images)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&occasion.name)
        .bind(&occasion.heading)
        .bind(&occasion.description)
        .bind(occasion.pricing.price)
        .bind(occasion.pricing.standard_price)
        .bind(occasion.pricing.outstandard_price)
        .bind(Json(&occasion.tags))
        .bind(Json(images))
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_all(&self) -> Result<Vec<Occasion>, DbError> {
        let rows: Vec<OccasionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM occasions ORDER BY id",
            OCCASION_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Occasion::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Occasion, DbError> {
        let row: OccasionRow = sqlx::query_as(&format!(
            "SELECT {} FROM occasions WHERE id = $1",
            OCCASION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("occasion", id))?;

        Ok(row.into())
    }

    pub async fn update(&self, id: i32, patch: OccasionPatch) -> Result<(), DbError> {
        let set = UpdateSet::new("occasions")
            .set("name", patch.name)
            .set("heading", patch.heading)
            .set("description", patch.description)
            .set("price", patch.price)
            .set("standard_price", patch.standard_price)
            .set("outstandard_price", patch.outstandard_price)
            .set("tags", patch.tags)
            .set("images", patch.images);

        update_row(self.pool, set, "occasion", id).await
    }

    /// Delete an occasion. Its menu display, packages and subpackages go
    /// with it through `ON DELETE CASCADE`.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "occasions", "occasion", id).await
    }
}
