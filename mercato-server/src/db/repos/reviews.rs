//! Review repository

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mercato_core::{NewReview, ProductId, Review, Score};

use crate::error::{StoreError, StoreResult};

/// Review record from database
#[derive(Debug, Clone, FromRow)]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub score: i32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = StoreError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let score = Score::new(row.score).map_err(|e| StoreError::Corrupt {
            table: "reviews",
            reason: e.to_string(),
        })?;
        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            product_id: row.product_id,
            score,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

/// Review repository
pub struct ReviewRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReviewRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &NewReview) -> StoreResult<Review> {
        let row: ReviewRow = sqlx::query_as(
            r#"
            INSERT INTO reviews (user_id, product_id, score, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(input.user_id)
        .bind(input.product_id)
        .bind(input.score.get())
        .bind(&input.content)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Reviews currently pointing at a product, oldest first.
    pub async fn for_product(&self, product_id: ProductId) -> StoreResult<Vec<Review>> {
        let rows: Vec<ReviewRow> =
            sqlx::query_as("SELECT * FROM reviews WHERE product_id = $1 ORDER BY id")
                .bind(product_id)
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(Review::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_row_is_corrupt() {
        let row = ReviewRow {
            id: 1,
            user_id: 1,
            product_id: 1,
            score: 9,
            content: "?".into(),
            created_at: Utc::now(),
        };
        let err = Review::try_from(row).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { table: "reviews", .. }));
    }
}
