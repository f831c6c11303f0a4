//! Occasion (event package) administration
//!
//! `tags` and `images` are repeated multipart fields. On update, any
//! supplied list replaces the stored one wholesale.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Occasion, OccasionRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, MultipartForm};
use crate::http::routes::{non_empty, CreatedResponse, MessageResponse};
use crate::http::server::AppState;
use crate::models::{ensure_changes, NewOccasion, OccasionPatch, OccasionPricing};

#[derive(Serialize)]
pub struct OccasionList {
    pub occasions: Vec<Occasion>,
}

/// POST /admin/add-occasion/
async fn add_occasion(
    State(state): State<Arc<AppState>>,
    form: MultipartForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let pricing = OccasionPricing::new(
        form.require_f64("price")?,
        form.require_f64("standard_price")?,
        form.require_f64("outstandard_price")?,
    )?;
    let occasion = NewOccasion::new(
        form.require_text("name")?,
        form.require_text("heading")?,
        form.require_text("description")?,
        pricing,
        form.texts("tags"),
    )?;

    let images = state.files.save_all(form.files("images")).await?;
    let id = OccasionRepo::new(&state.pool).create(&occasion, &images).await?;

    tracing::info!(occasion_id = id, images = images.len(), "occasion added");
    Ok(Json(CreatedResponse::new("Occasion added successfully!", id)))
}

/// GET /admin/get-all-occasions/
async fn list_occasions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<OccasionList>, ApiError> {
    let occasions = OccasionRepo::new(&state.pool).list_all().await?;
    Ok(Json(OccasionList {
        occasions: non_empty(occasions, "occasions")?,
    }))
}

/// GET /admin/get-occasion/{id}/
async fn get_occasion(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<Occasion>, ApiError> {
    let occasion = OccasionRepo::new(&state.pool).get(id).await?;
    Ok(Json(occasion))
}

/// PATCH /admin/update-occasion/{id}/
async fn update_occasion(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    form: MultipartForm,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut patch = OccasionPatch::default()
        .with_text(form.text("name"), form.text("heading"), form.text("description"))
        .with_prices(
            form.optional_f64("price")?,
            form.optional_f64("standard_price")?,
            form.optional_f64("outstandard_price")?,
        )?
        .with_tags(form.texts("tags"));
    let images = form.files("images");
    ensure_changes(!patch.is_empty(), !images.is_empty())?;

    if !images.is_empty() {
        patch.images = Some(state.files.save_all(images).await?);
    }
    OccasionRepo::new(&state.pool).update(id, patch).await?;

    Ok(Json(MessageResponse::new("Occasion updated successfully.")))
}

/// DELETE /admin/delete-occasion/{id}/
///
/// The occasion's menu display and packages go with it.
async fn delete_occasion(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    OccasionRepo::new(&state.pool).delete(id).await?;
    tracing::info!(occasion_id = id, "occasion deleted");
    Ok(Json(MessageResponse::new("Occasion deleted successfully.")))
}

/// Occasion routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/add-occasion/", post(add_occasion))
        .route("/admin/get-all-occasions/", get(list_occasions))
        .route("/admin/get-occasion/{id}/", get(get_occasion))
        .route(
            "/admin/update-occasion/{id}/",
            patch(update_occasion).put(update_occasion),
        )
        .route("/admin/delete-occasion/{id}/", delete(delete_occasion))
}
