//! Contact form endpoint

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use super::MessageResponse;
use crate::db::repos::ContactRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::NewContactMessage;

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// POST /contact-us/
async fn contact_us(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<ContactRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let contact = NewContactMessage::new(&req.name, &req.email, &req.subject, &req.message)?;
    let id = ContactRepo::new(&state.pool).create(&contact).await?;
    tracing::info!(contact_id = id, "contact message stored");

    Ok(Json(MessageResponse::new(
        "Thank you for reaching out to us. We will get back to you soon!",
    )))
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/contact-us/", post(contact_us))
}
