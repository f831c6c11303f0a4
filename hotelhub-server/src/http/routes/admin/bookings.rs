//! Booking oversight

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Booking, BookingRepo};
use crate::http::error::ApiError;
use crate::http::extractors::IdPath;
use crate::http::routes::bookings::BookingView;
use crate::http::routes::{non_empty, MessageResponse};
use crate::http::server::AppState;

/// Booking with its owner, as listed to staff
#[derive(Serialize)]
pub struct AdminBookingView {
    pub user_id: String,
    #[serde(flatten)]
    pub booking: BookingView,
}

impl From<Booking> for AdminBookingView {
    fn from(b: Booking) -> Self {
        Self {
            user_id: b.user_id.clone(),
            booking: BookingView::from(b),
        }
    }
}

#[derive(Serialize)]
pub struct BookingList {
    pub bookings: Vec<AdminBookingView>,
}

/// GET /admin/get-all-bookings/
async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BookingList>, ApiError> {
    let bookings = BookingRepo::new(&state.pool).list_all().await?;
    let bookings = non_empty(bookings, "table bookings")?;
    Ok(Json(BookingList {
        bookings: bookings.into_iter().map(AdminBookingView::from).collect(),
    }))
}

/// DELETE /admin/delete-booking/{id}/
async fn delete_booking(
    State(state): State<Arc<AppState>>,
    IdPath(id): IdPath,
) -> Result<Json<MessageResponse>, ApiError> {
    BookingRepo::new(&state.pool).delete(id).await?;
    tracing::info!(booking_id = id, "booking deleted");
    Ok(Json(MessageResponse::new("Booking deleted successfully.")))
}

/// Admin booking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/get-all-bookings/", get(list_bookings))
        .route("/admin/delete-booking/{id}/", delete(delete_booking))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn admin_view_flattens_booking() {
        let booking = Booking {
            id: 7,
            user_id: "u-9".into(),
            name: "Ben".into(),
            email: "ben@example.com".into(),
            phone_no: None,
            datetime: Utc.with_ymd_and_hms(2025, 12, 24, 20, 0, 0).unwrap(),
            no_of_people: 6,
            special_request: Some("window seat".into()),
        };

        let json = serde_json::to_value(AdminBookingView::from(booking)).unwrap();
        assert_eq!(json["user_id"], "u-9");
        assert_eq!(json["id"], 7);
        assert_eq!(json["datetime"], "2025-12-24T20:00:00+00:00");
        assert_eq!(json["special_request"], "window seat");
    }
}
