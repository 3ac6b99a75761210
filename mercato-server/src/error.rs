//! Error types for mercato-server

use mercato_core::ValidationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failure inside a store implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored row no longer satisfies a domain invariant
    #[error("corrupt {table} row: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

/// Outcome of a failed request, one variant per reportable kind
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    /// A composite request names entities that do not resolve
    #[error("{resource} reference(s) do not resolve: {}", format_ids(.ids))]
    InvalidReference { resource: &'static str, ids: Vec<i64> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn invalid_reference(resource: &'static str, ids: Vec<i64>) -> Self {
        Self::InvalidReference { resource, ids }
    }
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Self::Store(StoreError::Sqlx(e))
    }
}

fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(Error::not_found("order", 42).to_string(), "order '42' not found");
        assert_eq!(
            Error::invalid_reference("product", vec![3, 9]).to_string(),
            "product reference(s) do not resolve: 3, 9"
        );
        let err: Error = ValidationError::NoChanges.into();
        assert_eq!(err.to_string(), "no fields to update");
    }

    #[test]
    fn corrupt_row_display() {
        let err = StoreError::Corrupt {
            table: "reviews",
            reason: "score 9 out of range".into(),
        };
        assert_eq!(err.to_string(), "corrupt reviews row: score 9 out of range");
    }
}
