//! Event administration

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Event, EventRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, MultipartForm};
use crate::http::routes::{non_empty, CreatedResponse, MessageResponse};
use crate::http::server::AppState;
use crate::models::{ensure_changes, EventPatch, NewEvent};

#[derive(Serialize)]
pub struct EventList {
    pub events: Vec<Event>,
}

/// POST /admin/add-event/
async fn add_event(
    State(state): State<Arc<AppState>>,
    form: MultipartForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let event = NewEvent::new(
        form.require_text("name")?,
        form.require_text("description")?,
        form.require_f64("price")?,
    )?;
    let image = form.require_file("image")?;

    let pic_path = state.files.save(image).await?;
    let id = EventRepo::new(&state.pool).create(&event, &pic_path).await?;

    Ok(Json(CreatedResponse::new("Event added successfully!", id)))
}

/// GET /admin/get-all-events/
async fn list_events(State(state): State<Arc<AppState>>) -> Result<Json<EventList>, ApiError> {
    let events = EventRepo::new(&state.pool).list_all().await?;
    Ok(Json(EventList {
        events: non_empty(events, "events")?,
    }))
}

/// PATCH /admin/update-event/{id}/
async fn update_event(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    form: MultipartForm,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut patch = EventPatch::new(
        form.text("name"),
        form.text("description"),
        form.optional_f64("price")?,
    )?;
    let image = form.file("image");
    ensure_changes(!patch.is_empty(), image.is_some())?;

    if let Some(image) = image {
        patch.pic_path = Some(state.files.save(image).await?);
    }
    EventRepo::new(&state.pool).update(id, patch).await?;

    Ok(Json(MessageResponse::new("Event updated successfully.")))
}

/// DELETE /admin/delete-event/{id}/
async fn delete_event(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    EventRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("Event deleted successfully.")))
}

/// Event routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/add-event/", post(add_event))
        .route("/admin/get-all-events/", get(list_events))
        .route("/admin/update-event/{id}/", patch(update_event).put(update_event))
        .route("/admin/delete-event/{id}/", delete(delete_event))
}

#[cfg(test)]
mod tests {
    use crate::http::routes::test_support::{expect_validation_error, send_multipart};
    use axum::http::Method;

    #[tokio::test]
    async fn negative_price_rejected() {
        let response = send_multipart(
            Method::POST,
            "/admin/add-event/",
            &[
                ("name", None, "Jazz night"),
                ("description", None, "Live trio"),
                ("price", None, "-5"),
                ("image", Some("jazz.png"), "png"),
            ],
        )
        .await;
        let message = expect_validation_error(response).await;
        assert!(message.starts_with("price"), "{message}");
    }

    #[tokio::test]
    async fn price_must_be_numeric_on_update() {
        let response = send_multipart(
            Method::PATCH,
            "/admin/update-event/2/",
            &[("price", None, "free")],
        )
        .await;
        assert_eq!(
            expect_validation_error(response).await,
            "price: must be a number"
        );
    }
}
