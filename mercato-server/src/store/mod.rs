//! Store capabilities injected into the workflows
//!
//! Workflows see storage only through these traits. `PgStore` backs them
//! with the repositories in `crate::db`; `MemoryStore` keeps everything in
//! process for tests and database-less runs.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use mercato_core::{
    AnalyticsRecord, NewProduct, NewRecord, NewReview, NewUser, Order, OrderChanges, OrderId,
    PricedProducts, Product, ProductFilter, ProductId, RecordKind, Review, ReviewId, User, UserId,
    UserPatch,
};

use crate::error::StoreResult;

pub use memory::{MemoryAnalyticsStore, MemoryStore};
pub use postgres::PgStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: &NewProduct) -> StoreResult<Product>;

    async fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>>;

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Distinct products behind `ids`; unknown ids are left out.
    async fn find_products(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>>;

    async fn delete_product(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Append to the product's review references. False if the product is gone.
    async fn append_review_ref(&self, id: ProductId, review: ReviewId) -> StoreResult<bool>;

    async fn set_average_score(&self, id: ProductId, average: f64) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &NewUser) -> StoreResult<User>;

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;

    async fn find_users(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> StoreResult<Option<User>>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn insert_order(&self, user: UserId, priced: &PricedProducts) -> StoreResult<Order>;

    async fn list_orders(&self) -> StoreResult<Vec<Order>>;

    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>>;

    /// Apply `changes` and refresh `updated_at`. None if the order is gone.
    async fn update_order(&self, id: OrderId, changes: &OrderChanges) -> StoreResult<Option<Order>>;

    async fn delete_order(&self, id: OrderId) -> StoreResult<Option<Order>>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn insert_review(&self, review: &NewReview) -> StoreResult<Review>;

    async fn reviews_for_product(&self, product: ProductId) -> StoreResult<Vec<Review>>;
}

/// Everything the marketplace service needs
pub trait MarketStore: ProductStore + UserStore + OrderStore + ReviewStore {}

impl<T> MarketStore for T where T: ProductStore + UserStore + OrderStore + ReviewStore {}

#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn insert_record(&self, record: &NewRecord) -> StoreResult<AnalyticsRecord>;

    async fn list_records(&self, kind: RecordKind) -> StoreResult<Vec<AnalyticsRecord>>;

    async fn get_record(&self, kind: RecordKind, id: Uuid) -> StoreResult<Option<AnalyticsRecord>>;

    async fn records_for_visitor(
        &self,
        kind: RecordKind,
        visitor: &JsonValue,
    ) -> StoreResult<Vec<AnalyticsRecord>>;
}
