//! Team member repository

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::update::UpdateSet;
use crate::models::{NewTeamMember, TeamMemberPatch};
use super::{delete_row, update_row, DbError};

/// Team member record from database
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamMember {
    pub id: i32,
    pub image_path: String,
    pub name: String,
    pub designation: String,
    pub description: String,
}

/// Team member repository
pub struct TeamMemberRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamMemberRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, member: &NewTeamMember, image_path: &str) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO team_members (image_path, name, designation, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(image_path)
        .bind(&member.name)
        .bind(&member.designation)
        .bind(&member.description)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_all(&self) -> Result<Vec<TeamMember>, DbError> {
        let members = sqlx::query_as(
            "SELECT id, image_path, name, designation, description FROM team_members ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(members)
    }

    pub async fn update(&self, id: i32, patch: TeamMemberPatch) -> Result<(), DbError> {
        let set = UpdateSet::new("team_members")
            .set("name", patch.name)
            .set("designation", patch.designation)
            .set("description", patch.description)
            .set("image_path", patch.image_path);

        update_row(self.pool, set, "team member", id).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "team_members", "team member", id).await
    }
}
