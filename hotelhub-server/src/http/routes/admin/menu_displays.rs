//! Occasion menu displays: packages and priced subpackages

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{CascadeReport, MenuDisplay, MenuDisplayRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, JsonBody};
use crate::http::routes::{non_empty, CreatedResponse};
use crate::http::server::AppState;
use crate::models::MenuDisplayRequest;

#[derive(Serialize)]
pub struct MenuDisplayList {
    pub menu_displays: Vec<MenuDisplay>,
}

#[derive(Serialize)]
pub struct MenuDisplayDeletedResponse {
    pub message: &'static str,
    pub deleted: CascadeReport,
}

/// POST /admin/add-menu-display/
async fn add_menu_display(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<MenuDisplayRequest>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let new_display = req.validate()?;
    let id = MenuDisplayRepo::new(&state.pool).create(&new_display).await?;

    let occasion_id = new_display.occasion_id;
    let packages = new_display.packages.len();
    tracing::info!(menu_display_id = id, occasion_id, packages, "menu display added");
    Ok(Json(CreatedResponse::new("Menu display added successfully!", id)))
}

/// GET /admin/get-all-menu-displays/
async fn list_menu_displays(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MenuDisplayList>, ApiError> {
    let displays = MenuDisplayRepo::new(&state.pool).list_all().await?;
    Ok(Json(MenuDisplayList {
        menu_displays: non_empty(displays, "menu displays")?,
    }))
}

/// GET /admin/get-menu-display/{occasion_id}/
async fn get_menu_display(
    State(state): State<Arc<AppState>>,
    IdPath(occasion_id): IdPath,
) -> Result<Json<MenuDisplay>, ApiError> {
    let display = MenuDisplayRepo::new(&state.pool).get(occasion_id).await?;
    Ok(Json(display))
}

/// DELETE /admin/delete-menu-display/{occasion_id}/
///
/// Removes subpackages, packages and the display in one transaction;
/// the occasion itself stays.
async fn delete_menu_display(
    State(state): State<Arc<AppState>>,
    IdPath(occasion_id): IdPath,
) -> Result<Json<MenuDisplayDeletedResponse>, ApiError> {
    let deleted = MenuDisplayRepo::new(&state.pool)
        .delete_for_occasion(occasion_id)
        .await?;

    Ok(Json(MenuDisplayDeletedResponse {
        message: "Menu display deleted successfully.",
        deleted,
    }))
}

/// Menu display routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/add-menu-display/", post(add_menu_display))
        .route("/admin/get-all-menu-displays/", get(list_menu_displays))
        .route("/admin/get-menu-display/{id}/", get(get_menu_display))
        .route("/admin/delete-menu-display/{id}/", delete(delete_menu_display))
}
