//! Review endpoint

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use mercato_core::{NewReview, ProductId, Review, UserId};

use crate::error::Error;
use crate::http::extractors::JsonBody;
use crate::http::server::MarketState;
use crate::workflows::ReviewAggregation;

/// Create review request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<UserId>,
    #[schema(value_type = Option<i64>)]
    pub product_id: Option<ProductId>,
    pub score: Option<i32>,
    pub content: Option<String>,
}

/// POST /reviews
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review stored and product average recomputed"),
        (status = 400, description = "Invalid score or unknown user or product"),
    )
)]
pub(super) async fn create_review(
    State(state): State<MarketState>,
    JsonBody(req): JsonBody<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>), Error> {
    let input = NewReview::new(req.user_id, req.product_id, req.score, req.content)?;
    let review = ReviewAggregation::new(state.store.as_ref())
        .submit(input)
        .await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Review routes
pub fn router() -> Router<MarketState> {
    Router::new().route("/reviews", post(create_review))
}
