//! Product reviews

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::fields::{non_blank, MAX_TEXT_LEN};
use crate::validation::required;
use crate::{ProductId, Score, UserId, ValidationError};

pub type ReviewId = i64;

/// Stored review
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub score: Score,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new review
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub score: Score,
    pub content: String,
}

impl NewReview {
    pub fn new(
        user_id: Option<UserId>,
        product_id: Option<ProductId>,
        score: Option<i32>,
        content: Option<String>,
    ) -> Result<Self, ValidationError> {
        let user_id = required(user_id, "userId")?;
        let product_id = required(product_id, "productId")?;
        let score = Score::new(required(score, "score")?)?;
        let content = non_blank(content, "content", MAX_TEXT_LEN)?;
        Ok(Self {
            user_id,
            product_id,
            score,
            content,
        })
    }
}
