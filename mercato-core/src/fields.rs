//! Validated text fields shared by the request types

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ValidationError;

pub const MAX_NAME_LEN: usize = 200;
pub const MAX_TEXT_LEN: usize = 5000;
pub const MAX_USERNAME_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 254;

/// Loose `local@domain.tld` shape; deliverability is not our concern.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Require a present, non-blank string no longer than `max` characters.
///
/// Surrounding whitespace is trimmed from the stored value.
pub fn non_blank(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_owned())
}

/// Validated email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(value: Option<String>) -> Result<Self, ValidationError> {
        let value = non_blank(value, "email", MAX_EMAIL_LEN)?;
        if !EMAIL_RE.is_match(&value) {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must look like name@domain.tld",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}
