//! In-process stores
//!
//! Same contracts as the Postgres store, held in `BTreeMap`s behind an async
//! `RwLock`. Ids come from per-table sequences and are never reused.
//! Deleting a product drops its reviews, as the foreign key cascade does.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value as JsonValue;
use tokio::sync::RwLock;
use uuid::Uuid;

use mercato_core::{
    AnalyticsRecord, NewProduct, NewRecord, NewReview, NewUser, Order, OrderChanges, OrderId,
    PricedProducts, Product, ProductFilter, ProductId, RecordKind, Review, ReviewId, User, UserId,
    UserPatch,
};

use super::{AnalyticsStore, OrderStore, ProductStore, ReviewStore, UserStore};
use crate::error::StoreResult;

#[derive(Debug, Default)]
struct Sequence(i64);

impl Sequence {
    fn next(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    users: BTreeMap<UserId, User>,
    orders: BTreeMap<OrderId, Order>,
    reviews: BTreeMap<ReviewId, Review>,
    product_seq: Sequence,
    user_seq: Sequence,
    order_seq: Sequence,
    review_seq: Sequence,
}

/// Marketplace store kept in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, input: &NewProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;
        let product = Product {
            id: tables.product_seq.next(),
            name: input.name.clone(),
            about: input.about.clone(),
            price: input.price,
            review_ids: Vec::new(),
            average_score: 0.0,
            created_at: Utc::now(),
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn list_products(&self, filter: &ProductFilter) -> StoreResult<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn find_products(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .values()
            .filter(|p| wanted.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let mut tables = self.tables.write().await;
        let removed = tables.products.remove(&id);
        if removed.is_some() {
            tables.reviews.retain(|_, r| r.product_id != id);
        }
        Ok(removed)
    }

    async fn append_review_ref(&self, id: ProductId, review: ReviewId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.products.get_mut(&id) {
            Some(product) => {
                product.review_ids.push(review);
                true
            }
            None => false,
        })
    }

    async fn set_average_score(&self, id: ProductId, average: f64) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(match tables.products.get_mut(&id) {
            Some(product) => {
                product.average_score = average;
                true
            }
            None => false,
        })
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, input: &NewUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        let user = User {
            id: tables.user_seq.next(),
            username: input.username.clone(),
            email: input.email.as_str().to_owned(),
            password: input.password.clone(),
            created_at: Utc::now(),
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_users(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .collect::<HashSet<_>>()
            .into_iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn update_user(&self, id: UserId, patch: &UserPatch) -> StoreResult<Option<User>> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.get_mut(&id).map(|user| {
            patch.apply(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn insert_order(&self, user: UserId, priced: &PricedProducts) -> StoreResult<Order> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let order = Order {
            id: tables.order_seq.next(),
            user_id: user,
            product_ids: priced.product_ids.clone(),
            total: priced.total,
            payment: false,
            created_at: now,
            updated_at: now,
        };
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        Ok(self.tables.read().await.orders.values().cloned().collect())
    }

    async fn get_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.tables.read().await.orders.get(&id).cloned())
    }

    async fn update_order(&self, id: OrderId, changes: &OrderChanges) -> StoreResult<Option<Order>> {
        let mut tables = self.tables.write().await;
        Ok(tables.orders.get_mut(&id).map(|order| {
            changes.apply(order, Utc::now());
            order.clone()
        }))
    }

    async fn delete_order(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.tables.write().await.orders.remove(&id))
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn insert_review(&self, input: &NewReview) -> StoreResult<Review> {
        let mut tables = self.tables.write().await;
        let review = Review {
            id: tables.review_seq.next(),
            user_id: input.user_id,
            product_id: input.product_id,
            score: input.score,
            content: input.content.clone(),
            created_at: Utc::now(),
        };
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn reviews_for_product(&self, product: ProductId) -> StoreResult<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .values()
            .filter(|r| r.product_id == product)
            .cloned()
            .collect())
    }
}

/// Analytics store kept in memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryAnalyticsStore {
    records: RwLock<Vec<AnalyticsRecord>>,
}

impl MemoryAnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalyticsStore for MemoryAnalyticsStore {
    async fn insert_record(&self, input: &NewRecord) -> StoreResult<AnalyticsRecord> {
        let record = AnalyticsRecord {
            id: Uuid::new_v4(),
            kind: input.kind,
            created_at: Utc::now(),
            fields: input.fields.clone(),
        };
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn list_records(&self, kind: RecordKind) -> StoreResult<Vec<AnalyticsRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.kind == kind).cloned().collect())
    }

    async fn get_record(&self, kind: RecordKind, id: Uuid) -> StoreResult<Option<AnalyticsRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.kind == kind && r.id == id)
            .cloned())
    }

    async fn records_for_visitor(
        &self,
        kind: RecordKind,
        visitor: &JsonValue,
    ) -> StoreResult<Vec<AnalyticsRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.kind == kind && r.visitor() == Some(visitor))
            .cloned()
            .collect())
    }
}
