//! Service catalog administration

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, patch, post},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Service, ServiceRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{IdPath, MultipartForm};
use crate::http::routes::{non_empty, CreatedResponse, MessageResponse};
use crate::http::server::AppState;
use crate::models::{ensure_changes, NewService, ServicePatch};

#[derive(Serialize)]
pub struct ServiceList {
    pub services: Vec<Service>,
}

/// POST /admin/add-service/
async fn add_service(
    State(state): State<Arc<AppState>>,
    form: MultipartForm,
) -> Result<Json<CreatedResponse>, ApiError> {
    let service = NewService::new(form.require_text("name")?, form.require_text("description")?)?;
    let image = form.require_file("image")?;

    let image_path = state.files.save(image).await?;
    let id = ServiceRepo::new(&state.pool).create(&service, &image_path).await?;

    Ok(Json(CreatedResponse::new("Service added successfully!", id)))
}

/// GET /admin/get-all-services/
async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServiceList>, ApiError> {
    let services = ServiceRepo::new(&state.pool).list_all().await?;
    Ok(Json(ServiceList {
        services: non_empty(services, "services")?,
    }))
}

/// PATCH /admin/update-service/{id}/
async fn update_service(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
    form: MultipartForm,
) -> Result<Json<MessageResponse>, ApiError> {
    let mut patch = ServicePatch::new(form.text("name"), form.text("description"));
    let image = form.file("image");
    ensure_changes(!patch.is_empty(), image.is_some())?;

    if let Some(image) = image {
        patch.image_path = Some(state.files.save(image).await?);
    }
    ServiceRepo::new(&state.pool).update(id, patch).await?;

    Ok(Json(MessageResponse::new("Service updated successfully.")))
}

/// DELETE /admin/delete-service/{id}/
async fn delete_service(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    ServiceRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("Service deleted successfully.")))
}

/// Service routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/add-service/", post(add_service))
        .route("/admin/get-all-services/", get(list_services))
        .route("/admin/update-service/{id}/", patch(update_service).put(update_service))
        .route("/admin/delete-service/{id}/", delete(delete_service))
}

#[cfg(test)]
mod tests {
    use crate::http::routes::test_support::{expect_validation_error, send_multipart};
    use axum::http::Method;

    #[tokio::test]
    async fn update_without_fields_is_rejected() {
        let response = send_multipart(
            Method::PATCH,
            "/admin/update-service/3/",
            &[("name", None, "  "), ("image", Some(""), "")],
        )
        .await;
        assert_eq!(
            expect_validation_error(response).await,
            "No fields provided to update."
        );
    }

    #[tokio::test]
    async fn add_requires_image() {
        let response = send_multipart(
            Method::POST,
            "/admin/add-service/",
            &[("name", None, "Catering"), ("description", None, "Full service")],
        )
        .await;
        assert_eq!(expect_validation_error(response).await, "image is required");
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected() {
        let response = send_multipart(
            Method::PATCH,
            "/admin/update-service/abc/",
            &[("name", None, "Catering")],
        )
        .await;
        let message = expect_validation_error(response).await;
        assert!(message.starts_with("id"), "{message}");
    }
}
