//! Order repository
//!
//! The product list and total are always written together (see
//! `PricedProducts`); `updated_at` is refreshed on every update.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use mercato_core::{Money, Order, OrderChanges, OrderId, PricedProducts, UserId};

use crate::error::StoreResult;

/// Order record from database
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub user_id: i64,
    pub product_ids: Vec<i64>,
    pub total_cents: i64,
    pub payment: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            product_ids: row.product_ids,
            total: Money::from_cents(row.total_cents),
            payment: row.payment,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Order repository
pub struct OrderRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: UserId, priced: &PricedProducts) -> StoreResult<Order> {
        let row: OrderRow = sqlx::query_as(
            r#"
            INSERT INTO orders (user_id, product_ids, total_cents)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&priced.product_ids)
        .bind(priced.total.cents())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn list(&self) -> StoreResult<Vec<Order>> {
        let rows: Vec<OrderRow> = sqlx::query_as("SELECT * FROM orders ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }

    pub async fn get(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Order::from))
    }

    pub async fn update(&self, id: OrderId, changes: &OrderChanges) -> StoreResult<Option<Order>> {
        let (product_ids, total) = match &changes.products {
            Some(priced) => (Some(&priced.product_ids), Some(priced.total.cents())),
            None => (None, None),
        };

        let row: Option<OrderRow> = sqlx::query_as(
            r#"
            UPDATE orders SET
                product_ids = COALESCE($2, product_ids),
                total_cents = COALESCE($3, total_cents),
                payment = COALESCE($4, payment),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(product_ids)
        .bind(total)
        .bind(changes.payment)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Order::from))
    }

    pub async fn delete(&self, id: OrderId) -> StoreResult<Option<Order>> {
        let row: Option<OrderRow> = sqlx::query_as("DELETE FROM orders WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Order::from))
    }
}

#[cfg(test)]
mod tests {
    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_refreshes_timestamp() {
        use super::*;

        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool");
        crate::db::migrations::run(&pool).await.expect("migrations");

        let user_id: (i64,) = sqlx::query_as(
            "INSERT INTO users (username, email, password_hash) VALUES ('o', 'o@x.io', 'h') RETURNING id",
        )
        .fetch_one(&pool)
        .await
        .unwrap();

        let repo = OrderRepo::new(&pool);
        let order = repo
            .create(
                user_id.0,
                &PricedProducts {
                    product_ids: vec![],
                    total: Money::ZERO,
                },
            )
            .await
            .unwrap();

        let updated = repo
            .update(order.id, &OrderChanges::default())
            .await
            .unwrap()
            .unwrap();
        assert!(updated.updated_at >= order.updated_at);
        assert_eq!(updated.total, order.total);

        repo.delete(order.id).await.unwrap();
    }
}
