//! Booking timestamp normalization
//!
//! Every booking is stored in UTC. Zone-aware input is converted,
//! naive input is taken to already be UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::ValidationError;

/// Accepted layouts for timestamps that carry no offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Offset forms that are not strict RFC 3339 (e.g. `+0530`)
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

/// Booking timestamp, always UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BookingDateTime(DateTime<Utc>);

impl BookingDateTime {
    /// Parse and normalize a client supplied timestamp.
    ///
    /// # Example
    /// ```
    /// use hotelhub_server::models::BookingDateTime;
    ///
    /// let naive = BookingDateTime::parse("2024-06-01T10:00:00").unwrap();
    /// assert_eq!(naive.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    ///
    /// let aware = BookingDateTime::parse("2024-06-01T12:00:00+02:00").unwrap();
    /// assert_eq!(aware.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "datetime" });
        }

        if let Ok(aware) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(aware.with_timezone(&Utc)));
        }

        for fmt in OFFSET_FORMATS {
            if let Ok(aware) = DateTime::parse_from_str(s, fmt) {
                return Ok(Self(aware.with_timezone(&Utc)));
            }
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(Self(naive.and_utc()));
            }
        }

        Err(ValidationError::InvalidFormat {
            field: "datetime",
            reason: "expected an ISO 8601 date and time",
        })
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }

    /// RFC 3339 rendering with an explicit `+00:00` offset.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }
}

impl From<DateTime<Utc>> for BookingDateTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_input_is_utc() {
        let dt = BookingDateTime::parse("2024-06-01T10:00:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn naive_variants() {
        for input in [
            "2024-06-01T10:00",
            "2024-06-01 10:00:00",
            "2024-06-01 10:00",
            "2024-06-01T10:00:00.000",
        ] {
            let dt = BookingDateTime::parse(input).unwrap();
            assert_eq!(dt.to_rfc3339(), "2024-06-01T10:00:00+00:00", "{input}");
        }
    }

    #[test]
    fn aware_input_is_converted() {
        let cases = [
            ("2024-06-01T10:00:00Z", "2024-06-01T10:00:00+00:00"),
            ("2024-06-01T12:00:00+02:00", "2024-06-01T10:00:00+00:00"),
            ("2024-06-01T05:30:00-04:30", "2024-06-01T10:00:00+00:00"),
            ("2024-06-01T15:30:00+0530", "2024-06-01T10:00:00+00:00"),
        ];
        for (input, expected) in cases {
            let dt = BookingDateTime::parse(input).unwrap();
            assert_eq!(dt.to_rfc3339(), expected, "{input}");
        }
    }

    #[test]
    fn offset_can_cross_midnight() {
        let dt = BookingDateTime::parse("2024-06-01T01:00:00+03:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-31T22:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            BookingDateTime::parse("  "),
            Err(ValidationError::Empty { .. })
        ));
        assert!(BookingDateTime::parse("tomorrow at noon").is_err());
        assert!(BookingDateTime::parse("2024-13-01T10:00:00").is_err());
    }
}
