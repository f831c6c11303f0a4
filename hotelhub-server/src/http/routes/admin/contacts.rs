//! Contact message inbox

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{ContactMessage, ContactRepo};
use crate::http::error::ApiError;
use crate::http::extractors::IdPath;
use crate::http::routes::{non_empty, MessageResponse};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct ContactList {
    pub contacts: Vec<ContactMessage>,
}

/// GET /admin/get-all-contacts/
async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ContactList>, ApiError> {
    let contacts = ContactRepo::new(&state.pool).list_all().await?;
    Ok(Json(ContactList {
        contacts: non_empty(contacts, "contact messages")?,
    }))
}

/// DELETE /admin/delete-contact/{id}/
async fn delete_contact(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    ContactRepo::new(&state.pool).delete(id).await?;
    Ok(Json(MessageResponse::new("Contact message deleted successfully.")))
}

/// Admin contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/get-all-contacts/", get(list_contacts))
        .route("/admin/delete-contact/{id}/", delete(delete_contact))
}
