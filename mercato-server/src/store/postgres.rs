//! Postgres-backed store, delegating to the repositories

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use mercato_core::{
    AnalyticsRecord, NewProduct, NewRecord, NewReview, NewUser, Order, OrderChanges, OrderId,
    PricedProducts, Product, ProductFilter, ProductId, RecordKind, Review, ReviewId, User, UserId,
    UserPatch,
};

use super::{AnalyticsStore, OrderStore, ProductStore, ReviewStore, UserStore};
use crate::db::{AnalyticsRepo, OrderRepo, ProductRepo, ReviewRepo, UserRepo};
use crate::error::StoreResult;

/// Store over a shared connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn insert_product(&self, product: &NewProduct) -> StoreResult<Product> {
        ProductRepo::new(&self.pool).create(product).await
    }

    async fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        ProductRepo::new(&self.pool).list(filter).await
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        ProductRepo::new(&self.pool).get(id).await
    }

    async fn find_products(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        ProductRepo::new(&self.pool).find_many(ids).await
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        ProductRepo::new(&self.pool).delete(id).await
    }

    async fn append_review_ref(&self, id: ProductId, review: ReviewId) -> StoreResult<bool> {
        ProductRepo::new(&self.pool).append_review(id, review).await
    }

    async fn set_average_score(&self, id: ProductId, average: f64) -> StoreResult<bool> {
        ProductRepo::new(&self.pool).set_average_score(id, average).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: &NewUser) -> StoreResult<User> {
        UserRepo::new(&self.pool).create(user).await
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        UserRepo::new(&self.pool).get(id).await
    }

    async fn find_users(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        UserRepo::new(&self.pool).find_many(ids).await
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> StoreResult<Option<User>> {
        UserRepo::new(&self.pool).update(id, patch).await
    }
}

#[async_trait]
impl OrderStore for PgStore {
    async fn insert_order(&self, user: UserId, priced: &PricedProducts) -> StoreResult<Order> {
        OrderRepo::new(&self.pool).create(user, priced).await
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        OrderRepo::new(&self.pool).list().await
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        OrderRepo::new(&self.pool).get(id).await
    }

    async fn update_order(&self, id: OrderId, changes: &OrderChanges) -> StoreResult<Option<Order>> {
        OrderRepo::new(&self.pool).update(id, changes).await
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        OrderRepo::new(&self.pool).delete(id).await
    }
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn insert_review(&self, review: &NewReview) -> StoreResult<Review> {
        ReviewRepo::new(&self.pool).create(review).await
    }

    async fn reviews_for_product(&self, product: ProductId) -> StoreResult<Vec<Review>> {
        ReviewRepo::new(&self.pool).for_product(product).await
    }
}

#[async_trait]
impl AnalyticsStore for PgStore {
    async fn insert_record(&self, record: &NewRecord) -> StoreResult<AnalyticsRecord> {
        AnalyticsRepo::new(&self.pool).create(record).await
    }

    async fn list_records(&self, kind: RecordKind) -> StoreResult<Vec<AnalyticsRecord>> {
        AnalyticsRepo::new(&self.pool).list(kind).await
    }

    async fn get_record(&self, kind: RecordKind, id: Uuid) -> StoreResult<Option<AnalyticsRecord>> {
        AnalyticsRepo::new(&self.pool).get(kind, id).await
    }

    async fn records_for_visitor(
        &self,
        kind: RecordKind,
        visitor: &JsonValue,
    ) -> StoreResult<Vec<AnalyticsRecord>> {
        AnalyticsRepo::new(&self.pool).for_visitor(kind, visitor).await
    }
}
