//! Product repository
//!
//! - list: one query, optional filters bound as nullable parameters
//! - review references appended with `array_append`, never rewritten

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mercato_core::{Money, NewProduct, Product, ProductFilter, ProductId, ReviewId};

use crate::error::StoreResult;

/// Product record from database
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub about: String,
    pub price_cents: i64,
    pub review_ids: Vec<i64>,
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            about: row.about,
            price: Money::from_cents(row.price_cents),
            review_ids: row.review_ids,
            average_score: row.average_score,
            created_at: row.created_at,
        }
    }
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &NewProduct) -> StoreResult<Product> {
        let row: ProductRow = sqlx::query_as(
            r#"
            INSERT INTO products (name, about, price_cents)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&input.name)
        .bind(&input.about)
        .bind(input.price.cents())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// List products matching every supplied filter, oldest first.
    pub async fn list(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT * FROM products
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%' ESCAPE '\')
              AND ($2::TEXT IS NULL OR about ILIKE '%' || $2 || '%' ESCAPE '\')
              AND ($3::BIGINT IS NULL OR price_cents <= $3)
            ORDER BY id
            "#,
        )
        .bind(filter.name.as_deref().map(escape_like))
        .bind(filter.about.as_deref().map(escape_like))
        .bind(filter.max_price.map(Money::cents))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn get(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Fetch the distinct products behind `ids`. Unknown ids are skipped.
    pub async fn find_many(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as("SELECT * FROM products WHERE id = ANY($1) ORDER BY id")
                .bind(ids)
                .fetch_all(self.pool)
                .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    pub async fn delete(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as("DELETE FROM products WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Append a review id to the product's reference list.
    ///
    /// Returns false when the product does not exist.
    pub async fn append_review(&self, id: ProductId, review_id: ReviewId) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET review_ids = array_append(review_ids, $2) WHERE id = $1",
        )
        .bind(id)
        .bind(review_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_average_score(&self, id: ProductId, average: f64) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE products SET average_score = $2 WHERE id = $1")
            .bind(id)
            .bind(average)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Escape LIKE metacharacters so filters match literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
