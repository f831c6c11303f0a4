//! Route handlers organized by resource

pub mod admin;
pub mod bookings;
pub mod contact;
pub mod health;
pub mod users;

use serde::Serialize;

use super::error::ApiError;

/// `{"message": ...}` acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn new(message: &'static str) -> Self {
        Self { message }
    }
}

/// Acknowledgement for a newly inserted row
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: i32,
}

impl CreatedResponse {
    pub fn new(message: &'static str, id: i32) -> Self {
        Self { message, id }
    }
}

/// Listings answer 404 rather than an empty array.
pub(crate) fn non_empty<T>(items: Vec<T>, what: &str) -> Result<Vec<T>, ApiError> {
    if items.is_empty() {
        return Err(ApiError::none_found(what));
    }
    Ok(items)
}
