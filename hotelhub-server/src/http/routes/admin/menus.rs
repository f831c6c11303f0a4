//! Menu heading and dish administration

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{MenuHeading, MenuRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, MultipartForm};
use crate::http::routes::{non_empty, CreatedResponse, MessageResponse};
use crate::http::server::AppState;
use crate::models::{ensure_changes, MenuHeadingPatch, NewDish, NewMenuHeading};

#[derive(Serialize)]
pub struct MenuList {
    pub menus: Vec<MenuHeading>,
}

#[derive(Serialize)]
pub struct MenuDeletedResponse {
    pub message: &'static str,
    pub dishes_deleted: u64,
}

/// POST /admin/add-menu/
///
/// `dish_names[i]` is paired with `dish_images[i]`.
async fn add_menu(
    State(state): State<Arc<AppState>>,
    form: MultipartForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let dish_images = form.files("dish_images");
    let menu = NewMenuHeading::new(
        form.require_text("heading")?,
        form.texts("dish_names"),
        dish_images.len(),
    )?;
    let heading_image = form.require_file("heading_image")?;

    let heading_image = state.files.save(heading_image).await?;
    let dish_images = state.files.save_all(dish_images).await?;
    let id = MenuRepo::new(&state.pool)
        .create(&menu, &heading_image, &dish_images)
        .await?;

    tracing::info!(heading_id = id, dishes = dish_images.len(), "menu added");
    Ok(Json(CreatedResponse::new("Menu added successfully!", id)))
}

/// GET /admin/get-all-menus/
async fn list_menus(State(state): State<Arc<AppState>>) -> Result<Json<MenuList>, ApiError> {
    let menus = MenuRepo::new(&state.pool).list_all().await?;
    Ok(Json(MenuList {
        menus: non_empty(menus, "menus")?,
    }))
}

/// PATCH /admin/update-menu/{id}/
async fn update_menu(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    form: MultipartForm,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut patch = MenuHeadingPatch::new(form.text("heading"));
    let image = form.file("heading_image");
    ensure_changes(!patch.is_empty(), image.is_some())?;

    if let Some(image) = image {
        patch.heading_image = Some(state.files.save(image).await?);
    }
    MenuRepo::new(&state.pool).update(id, patch).await?;

    Ok(Json(MessageResponse::new("Menu updated successfully.")))
}

/// POST /admin/add-dish/{heading_id}/
async fn add_dish(
    State(state): State<Arc<AppState>>,
    IdPath(heading_id): IdPath,
    form: MultipartForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let dish = NewDish::new(form.require_text("name")?)?;
    let image = form.require_file("image")?;

    let image = state.files.save(image).await?;
    let id = MenuRepo::new(&state.pool)
        .add_dish(heading_id, &dish, &image)
        .await?;

    Ok(Json(CreatedResponse::new("Dish added successfully!", id)))
}

/// DELETE /admin/delete-dish/{id}/
async fn delete_dish(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    MenuRepo::new(&state.pool).delete_dish(id).await?;
    Ok(Json(MessageResponse::new("Dish deleted successfully.")))
}

/// DELETE /admin/delete-menu/{id}/
async fn delete_menu(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MenuDeletedResponse>, ApiError> {
    let dishes_deleted = MenuRepo::new(&state.pool).delete(id).await?;
    tracing::info!(heading_id = id, dishes_deleted, "menu deleted");

    Ok(Json(MenuDeletedResponse {
        message: "Menu deleted successfully.",
        dishes_deleted,
    }))
}

/// Menu routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/add-menu/", post(add_menu))
        .route("/admin/get-all-menus/", get(list_menus))
        .route("/admin/update-menu/{id}/", patch(update_menu).put(update_menu))
        .route("/admin/add-dish/{id}/", post(add_dish))
        .route("/admin/delete-dish/{id}/", delete(delete_dish))
        .route("/admin/delete-menu/{id}/", delete(delete_menu))
}
