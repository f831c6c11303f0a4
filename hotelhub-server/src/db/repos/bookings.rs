//! Booking repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::NewBooking;
use super::{delete_row, DbError};

/// Booking record from database
#[derive(Debug, Clone, FromRow)]
pub struct Booking {
    pub id: i32,
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone_no: Option<String>,
    pub datetime: DateTime<Utc>,
    pub no_of_people: i32,
    pub special_request: Option<String>,
}

const BOOKING_COLUMNS: &str =
    "id, user_id, name, email, phone_no, datetime, no_of_people, special_request";

/// Booking repository
pub struct BookingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a booking and return its generated id.
    ///
    /// No dedup key: submitting the same booking twice stores it twice.
    pub async fn create(&self, booking: &NewBooking) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO bookings (user_id, name, email, phone_no, datetime, no_of_people, special_request)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&booking.user_id)
        .bind(&booking.name)
        .bind(booking.email.as_str())
        .bind(&booking.phone_no)
        .bind(booking.datetime.as_utc())
        .bind(booking.no_of_people)
        .bind(&booking.special_request)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>, DbError> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {} FROM bookings WHERE user_id = $1 ORDER BY datetime, id",
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all(&self) -> Result<Vec<Booking>, DbError> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {} FROM bookings ORDER BY datetime, id",
            BOOKING_COLUMNS
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        delete_row(self.pool, "bookings", "booking", id).await
    }
}
