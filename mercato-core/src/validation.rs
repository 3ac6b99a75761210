//! Validation error types

use std::fmt;

/// Validation error raised while turning client input into domain values
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Required field absent from the request
    Missing { field: &'static str },

    /// Field is empty or whitespace-only
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., email)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Integer outside an inclusive range
    OutOfRange { field: &'static str, min: i64, max: i64, value: i64 },

    /// Amount must be strictly positive
    NotPositive { field: &'static str },

    /// Amount above the largest one the service will price
    TooLarge { field: &'static str },

    /// Partial update carried no fields
    NoChanges,

    /// Request body could not be decoded
    Malformed { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{} is required", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::OutOfRange {
                field,
                min,
                max,
                value,
            } => write!(f, "{} must be between {} and {} (got {})", field, min, max, value),
            Self::NotPositive { field } => write!(f, "{} must be a positive number", field),
            Self::TooLarge { field } => write!(f, "{} exceeds the maximum amount", field),
            Self::NoChanges => write!(f, "no fields to update"),
            Self::Malformed { reason } => write!(f, "malformed request: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Unwrap an optional request field or report it as missing.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Missing { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::OutOfRange {
            field: "score",
            min: 1,
            max: 5,
            value: 6,
        };
        assert_eq!(err.to_string(), "score must be between 1 and 5 (got 6)");
        assert_eq!(ValidationError::NoChanges.to_string(), "no fields to update");
    }

    #[test]
    fn required_reports_field() {
        let err = required::<i64>(None, "userId").unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "userId" });
        assert_eq!(required(Some(3), "userId").unwrap(), 3);
    }
}
