//! Contact form input

use super::validation::{required_text, ValidationError};
use super::Email;

#[derive(Debug, Clone)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
}

impl NewContactMessage {
    pub fn new(
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", name)?,
            email: Email::new(email)?,
            subject: required_text("subject", subject)?,
            message: required_text("message", message)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_fields_required() {
        assert!(NewContactMessage::new("A", "a@x.com", "S", "M").is_ok());
        assert!(NewContactMessage::new("A", "a@x.com", "", "M").is_err());
        assert!(NewContactMessage::new("A", "a@x.com", "S", " ").is_err());
        assert!(NewContactMessage::new("A", "ax.com", "S", "M").is_err());
    }
}
