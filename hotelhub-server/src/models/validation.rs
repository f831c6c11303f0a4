//! Validation error types

use std::fmt;

/// Validation error for request models
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field is missing or blank
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Value doesn't match the required format
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Numeric value outside the accepted range
    OutOfRange { field: &'static str, reason: &'static str },

    /// Two repeated fields that must pair up have different lengths
    Mismatched { left: &'static str, right: &'static str },

    /// Partial update carried no fields at all
    NoFieldsToUpdate,

    /// Request body could not be read
    Malformed(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange { field, reason } => write!(f, "{}: {}", field, reason),
            Self::Mismatched { left, right } => {
                write!(f, "{} and {} must have the same number of entries", left, right)
            }
            Self::NoFieldsToUpdate => write!(f, "No fields provided to update."),
            Self::Malformed(msg) => write!(f, "malformed request: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim a required text field, rejecting blank input.
pub fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

/// Like [`required_text`] with an upper bound on character count.
pub fn bounded_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let text = required_text(field, value)?;
    if text.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(text)
}

/// Prices must be finite and non-negative.
pub fn price(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a finite number",
        });
    }
    if value < 0.0 {
        return Err(ValidationError::OutOfRange {
            field,
            reason: "must not be negative",
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "phone_no",
            max: 20,
        };
        assert_eq!(
            err.to_string(),
            "phone_no exceeds maximum length of 20 characters"
        );
        assert_eq!(
            ValidationError::NoFieldsToUpdate.to_string(),
            "No fields provided to update."
        );
    }

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  Ana ").unwrap(), "Ana");
        assert_eq!(
            required_text("name", "   "),
            Err(ValidationError::Empty { field: "name" })
        );
    }

    #[test]
    fn bounded_text_counts_chars() {
        assert!(bounded_text("phone_no", "+1 555 0100", 20).is_ok());
        assert!(bounded_text("phone_no", "123456789012345678901", 20).is_err());
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert_eq!(price("price", 12.5).unwrap(), 12.5);
        assert!(price("price", -1.0).is_err());
        assert!(price("price", f64::NAN).is_err());
    }
}
