//! Team member administration

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{TeamMember, TeamMemberRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, MultipartForm};
use crate::http::routes::{non_empty, CreatedResponse, MessageResponse};
use crate::http::server::AppState;
use crate::models::{ensure_changes, NewTeamMember, TeamMemberPatch};

#[derive(Serialize)]
pub struct TeamMemberList {
    pub team_members: Vec<TeamMember>,
}

/// POST /admin/add-team-member/
async fn add_team_member(
    State(state): State<Arc<AppState>>,
    form: MultipartForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let member = NewTeamMember::new(
        form.require_text("name")?,
        form.require_text("designation")?,
        form.require_text("description")?,
    )?;
    let image = form.require_file("image")?;

    let image_path = state.files.save(image).await?;
    let id = TeamMemberRepo::new(&state.pool).create(&member, &image_path).await?;

    Ok(Json(CreatedResponse::new("Team member added successfully!", id)))
}

/// GET /admin/get-all-team-members/
async fn list_team_members(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TeamMemberList>, ApiError> {
    let members = TeamMemberRepo::new(&state.pool).list_all().await?;
    Ok(Json(TeamMemberList {
        team_members: non_empty(members, "team members")?,
    }))
}

/// PATCH /admin/update-team-member/{id}/
async fn update_team_member(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    form: MultipartForm,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut patch = TeamMemberPatch::new(
        form.text("name"),
        form.text("designation"),
        form.text("description"),
    );
    let image = form.file("image");
    ensure_changes(!patch.is_empty(), image.is_some())?;

    if let Some(image) = image {
        patch.image_path = Some(state.files.save(image).await?);
    }
    TeamMemberRepo::new(&state.pool).update(id, patch).await?;

    Ok(Json(MessageResponse::new("Team member updated successfully.")))
}

/// DELETE /admin/delete-team-member/{id}/
async fn delete_team_member(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    TeamMemberRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("Team member deleted successfully.")))
}

/// Team member routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/add-team-member/", post(add_team_member))
        .route("/admin/get-all-team-members/", get(list_team_members))
        .route(
            "/admin/update-team-member/{id}/",
            patch(update_team_member).put(update_team_member),
        )
        .route("/admin/delete-team-member/{id}/", delete(delete_team_member))
}
