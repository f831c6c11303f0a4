//! Table booking endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Booking, BookingRepo};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::NewBooking;

/// Book table request
#[derive(Deserialize)]
pub struct BookTableRequest {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone_no: String,
    /// ISO-8601; naive values are taken as UTC
    pub datetime: String,
    pub no_of_people: i64,
    #[serde(default)]
    pub special_request: Option<String>,
}

#[derive(Serialize)]
pub struct BookTableResponse {
    pub message: &'static str,
    pub booking_id: i32,
}

/// Booking as shown to the user who made it
#[derive(Serialize)]
pub struct BookingView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone_no: Option<String>,
    pub datetime: String,
    pub no_of_people: i32,
    pub special_request: Option<String>,
}

impl From<Booking> for BookingView {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            name: b.name,
            email: b.email,
            phone_no: b.phone_no,
            datetime: b.datetime.to_rfc3339(),
            no_of_people: b.no_of_people,
            special_request: b.special_request,
        }
    }
}

#[derive(Serialize)]
pub struct UserBookingsResponse {
    pub user_id: String,
    pub bookings: Vec<BookingView>,
}

/// POST /bookings/book-table/
async fn book_table(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<BookTableRequest>,
) -> Result<Json<BookTableResponse>, ApiError> {
    let booking = NewBooking::new(
        &req.user_id,
        &req.name,
        &req.email,
        &req.phone_no,
        &req.datetime,
        req.no_of_people,
        req.special_request.as_deref(),
    )?;

    let booking_id = BookingRepo::new(&state.pool).create(&booking).await?;
    tracing::info!(booking_id, user_id = %booking.user_id, "table booked");

    Ok(Json(BookTableResponse {
        message: "Table booked successfully.",
        booking_id,
    }))
}

/// GET /bookings/get-bookings/{user_id}
async fn get_bookings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<UserBookingsResponse>, ApiError> {
    let bookings = BookingRepo::new(&state.pool).list_for_user(&user_id).await?;
    if bookings.is_empty() {
        return Err(ApiError::NotFound {
            message: "No bookings found for this user.".to_owned(),
        });
    }

    Ok(Json(UserBookingsResponse {
        user_id,
        bookings: bookings.into_iter().map(BookingView::from).collect(),
    }))
}

/// Booking routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings/book-table/", post(book_table))
        .route("/bookings/get-bookings/{user_id}", get(get_bookings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::routes::test_support::{expect_validation_error, send_json};
    use axum::http::Method;
    use chrono::{TimeZone, Utc};

    fn body(datetime: &str, people: i64) -> String {
        serde_json::json!({
            "user_id": "u-1",
            "name": "Ann",
            "email": "ann@example.com",
            "phone_no": "555-0100",
            "datetime": datetime,
            "no_of_people": people,
        })
        .to_string()
    }

    #[tokio::test]
    async fn rejects_unparseable_datetime() {
        let response = send_json(
            Method::POST,
            "/bookings/book-table/",
            &body("next friday", 2),
        )
        .await;
        let message = expect_validation_error(response).await;
        assert!(message.starts_with("datetime"), "{message}");
    }

    #[tokio::test]
    async fn rejects_empty_party() {
        let response = send_json(
            Method::POST,
            "/bookings/book-table/",
            &body("2025-05-01T19:30:00Z", 0),
        )
        .await;
        let message = expect_validation_error(response).await;
        assert!(message.starts_with("no_of_people"), "{message}");
    }

    #[test]
    fn view_renders_utc() {
        let booking = Booking {
            id: 4,
            user_id: "u-1".into(),
            name: "Ann".into(),
            email: "ann@example.com".into(),
            phone_no: Some("555-0100".into()),
            datetime: Utc.with_ymd_and_hms(2025, 5, 1, 19, 30, 0).unwrap(),
            no_of_people: 2,
            special_request: None,
        };

        let view = BookingView::from(booking);
        assert_eq!(view.datetime, "2025-05-01T19:30:00+00:00");
    }
}
