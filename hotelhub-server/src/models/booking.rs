//! Table booking input

use super::validation::{bounded_text, required_text, ValidationError};
use super::{BookingDateTime, Email};

/// Width of the `bookings.phone_no` column
const MAX_PHONE_LEN: usize = 20;

/// Validated booking, datetime already normalized to UTC
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: String,
    pub name: String,
    pub email: Email,
    pub phone_no: String,
    pub datetime: BookingDateTime,
    pub no_of_people: i32,
    pub special_request: Option<String>,
}

impl NewBooking {
    pub fn new(
        user_id: &str,
        name: &str,
        email: &str,
        phone_no: &str,
        datetime: &str,
        no_of_people: i64,
        special_request: Option<&str>,
    ) -> Result<Self, ValidationError> {
        if no_of_people < 1 || no_of_people > i64::from(i32::MAX) {
            return Err(ValidationError::OutOfRange {
                field: "no_of_people",
                reason: "must be at least 1",
            });
        }

        Ok(Self {
            user_id: required_text("user_id", user_id)?,
            name: required_text("name", name)?,
            email: Email::new(email)?,
            phone_no: bounded_text("phone_no", phone_no, MAX_PHONE_LEN)?,
            datetime: BookingDateTime::parse(datetime)?,
            no_of_people: no_of_people as i32,
            special_request: special_request
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned),
        })
    }
}
