//! Menu repository - headings and their dishes

use std::collections::HashMap;

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::update::UpdateSet;
use crate::models::{MenuHeadingPatch, NewDish, NewMenuHeading};
use super::{delete_row, update_row, DbError};

/// Dish record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Dish {
    pub id: i32,
    #[serde(skip)]
    pub heading_id: i32,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, FromRow)]
struct HeadingRow {
    id: i32,
    heading: String,
    heading_image: String,
}

/// Menu heading with its dishes
#[derive(Debug, Clone, Serialize)]
pub struct MenuHeading {
    pub id: i32,
    pub heading: String,
    pub heading_image: String,
    pub dishes: Vec<Dish>,
}

/// Menu repository
pub struct MenuRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> MenuRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a heading and its dishes (atomic).
    ///
    /// `dish_images[i]` is the stored image for `menu.dish_names[i]`.
    pub async fn create(
        &self,
        menu: &NewMenuHeading,
        heading_image: &str,
        dish_images: &[String],
    ) -> Result<i32, DbError> {
        let mut tx = self.pool.begin().await?;

        let (heading_id,): (i32,) = sqlx::query_as(
            "INSERT INTO menu_headings (heading, heading_image) VALUES ($1, $2) RETURNING id",
        )
        .bind(&menu.heading)
        .bind(heading_image)
        .fetch_one(&mut *tx)
        .await?;

        if !menu.dish_names.is_empty() {
            let mut builder =
                sqlx::QueryBuilder::new("INSERT INTO dishes (heading_id, name, image) ");
            builder.push_values(
                menu.dish_names.iter().zip(dish_images),
                |mut b, (name, image)| {
                    b.push_bind(heading_id).push_bind(name).push_bind(image);
                },
            );
            builder.build().execute(&mut *tx).await?;
        }

        tx.commit().await?;
        Ok(heading_id)
    }

    /// List every heading with its dishes (two queries, no N+1).
    pub async fn list_all(&self) -> Result<Vec<MenuHeading>, DbError> {
        let headings: Vec<HeadingRow> =
            sqlx::query_as("SELECT id, heading, heading_image FROM menu_headings ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        if headings.is_empty() {
            return Ok(Vec::new());
        }

        let dishes: Vec<Dish> =
            sqlx::query_as("SELECT id, heading_id, name, image FROM dishes ORDER BY id")
                .fetch_all(self.pool)
                .await?;

        let mut by_heading: HashMap<i32, Vec<Dish>> = HashMap::new();
        for dish in dishes {
            by_heading.entry(dish.heading_id).or_default().push(dish);
        }

        Ok(headings
            .into_iter()
            .map(|h| MenuHeading {
                dishes: by_heading.remove(&h.id).unwrap_or_default(),
                id: h.id,
                heading: h.heading,
                heading_image: h.heading_image,
            })
            .collect())
    }

    pub async fn update(&self, id: i32, patch: MenuHeadingPatch) -> Result<(), DbError> {
        let set = UpdateSet::new("menu_headings")
            .set("heading", patch.heading)
            .set("heading_image", patch.heading_image);

        update_row(self.pool, set, "menu heading", id).await
    }

    /// Add a dish under an existing heading.
    pub async fn add_dish(
        &self,
        heading_id: i32,
        dish: &NewDish,
        image: &str,
    ) -> Result<i32, DbError> {
        let row: Option<(i32,)> = sqlx::query_as(
            r#"
            INSERT INTO dishes (heading_id, name, image)
            SELECT id, $2, $3 FROM menu_headings WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(heading_id)
        .bind(&dish.name)
        .bind(image)
        .fetch_optional(self.pool)
        .await?;

        row.map(|(id,)| id)
            .ok_or_else(|| DbError::not_found("menu heading", heading_id))
    }

    pub async fn delete_dish(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "dishes", "dish", id).await
    }

    /// Delete a heading together with its dishes (atomic).
    ///
    /// Returns the number of dishes removed.
    pub async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        let dishes = sqlx::query("DELETE FROM dishes WHERE heading_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let headings = sqlx::query("DELETE FROM menu_headings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if headings == 0 {
            // tx rolls back on drop
            return Err(DbError::not_found("menu heading", id));
        }

        tx.commit().await?;
        Ok(dishes)
    }
}
