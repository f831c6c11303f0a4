//! Account inputs

use super::validation::{bounded_text, ValidationError};
use super::Email;

/// Maximum username length
const MAX_USERNAME_LEN: usize = 64;

/// Validated signup
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub username: String,
    pub password: String,
}

impl NewUser {
    /// Passwords are taken verbatim (no trimming), but must not be empty.
    pub fn new(email: &str, username: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            username: bounded_text("username", username, MAX_USERNAME_LEN)?,
            password: password_field(password)?,
        })
    }
}

/// Validated login attempt
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: password_field(password)?,
        })
    }
}

fn password_field(password: &str) -> Result<String, ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "password" });
    }
    Ok(password.to_owned())
}
