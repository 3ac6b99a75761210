//! Error responses
//!
//! Every failure leaves the service as `{"error": <code>, "message": ...}`
//! with the status code of its kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::Error;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidReference { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::InvalidReference { .. } => "invalid_reference",
            Self::Store(_) => "store_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                "an internal error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "error": self.code(),
            "message": message,
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use axum::body::to_bytes;
    use mercato_core::ValidationError;

    async fn body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let err = Error::Validation(ValidationError::Empty { field: "name" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body(response).await;
        assert_eq!(json["error"], "validation_error");
        assert_eq!(json["message"], "name cannot be empty");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = Error::not_found("order", 7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(response).await["error"], "not_found");
    }

    #[tokio::test]
    async fn invalid_reference_is_400() {
        let response = Error::invalid_reference("product", vec![4]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(response).await["error"], "invalid_reference");
    }

    #[tokio::test]
    async fn store_error_is_generic_500() {
        let err = Error::Store(StoreError::Corrupt {
            table: "orders",
            reason: "secret detail".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body(response).await;
        assert_eq!(json["error"], "store_error");
        assert_eq!(json["message"], "an internal error occurred");
    }
}
