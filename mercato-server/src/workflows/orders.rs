//! Order pricing workflow
//!
//! An order's total is always derived from the product list stored with it:
//! creation and any product-list update resolve every referenced product
//! and price the full set again, never incrementally.

use std::collections::{HashMap, HashSet};

use mercato_core::{
    order_total, NewOrder, Order, OrderChanges, OrderId, OrderPatch, OrderView, PricedProducts,
    Product, ProductId, PublicUser, UserId,
};

use crate::error::{Error, Result};
use crate::store::MarketStore;

pub struct OrderPricing<'a> {
    store: &'a dyn MarketStore,
}

impl<'a> OrderPricing<'a> {
    pub fn new(store: &'a dyn MarketStore) -> Self {
        Self { store }
    }

    /// Price and persist a new order for an existing user.
    pub async fn create(&self, input: NewOrder) -> Result<OrderView> {
        let user = self
            .store
            .get_user(input.user_id)
            .await?
            .ok_or_else(|| Error::not_found("user", input.user_id))?;

        let (priced, products) = self.price(&input.product_ids).await?;
        let order = self.store.insert_order(user.id, &priced).await?;

        tracing::info!(
            order_id = order.id,
            user_id = user.id,
            items = order.product_ids.len(),
            total = %order.total,
            "order created"
        );

        Ok(OrderView {
            order,
            user: Some(user.public()),
            products,
        })
    }

    /// Apply a partial update. A new product list is re-priced in full.
    ///
    /// A missing order is reported before the requested changes are
    /// validated.
    pub async fn update(
        &self,
        id: OrderId,
        product_ids: Option<Vec<ProductId>>,
        payment: Option<bool>,
    ) -> Result<OrderView> {
        if self.store.get_order(id).await?.is_none() {
            return Err(Error::not_found("order", id));
        }
        let patch = OrderPatch::new(product_ids, payment)?;

        let products = match &patch.product_ids {
            Some(ids) => Some(self.price(ids).await?.0),
            None => None,
        };
        let changes = OrderChanges {
            products,
            payment: patch.payment,
        };

        let order = self
            .store
            .update_order(id, &changes)
            .await?
            .ok_or_else(|| Error::not_found("order", id))?;

        tracing::info!(
            order_id = order.id,
            repriced = changes.products.is_some(),
            payment = order.payment,
            total = %order.total,
            "order updated"
        );

        self.compose_one(order).await
    }

    pub async fn get(&self, id: OrderId) -> Result<OrderView> {
        let order = self
            .store
            .get_order(id)
            .await?
            .ok_or_else(|| Error::not_found("order", id))?;
        self.compose_one(order).await
    }

    pub async fn list(&self) -> Result<Vec<OrderView>> {
        let orders = self.store.list_orders().await?;
        self.compose(orders).await
    }

    /// Remove an order, handing back the deleted record.
    pub async fn delete(&self, id: OrderId) -> Result<Order> {
        let order = self
            .store
            .delete_order(id)
            .await?
            .ok_or_else(|| Error::not_found("order", id))?;
        tracing::info!(order_id = order.id, "order deleted");
        Ok(order)
    }

    /// Resolve every requested product and price the set.
    ///
    /// Each id must resolve to its own product, so unknown ids and repeated
    /// ids are both reported as unresolved.
    async fn price(&self, ids: &[ProductId]) -> Result<(PricedProducts, Vec<Product>)> {
        let found = self.store.find_products(ids).await?;

        let unresolved = unresolved_ids(ids, &found);
        if !unresolved.is_empty() {
            tracing::debug!(?unresolved, "order references unknown products");
            return Err(Error::invalid_reference("product", unresolved));
        }

        let products = in_request_order(ids, found);
        let total = order_total(products.iter().map(|p| p.price))?;

        Ok((
            PricedProducts {
                product_ids: ids.to_vec(),
                total,
            },
            products,
        ))
    }

    async fn compose_one(&self, order: Order) -> Result<OrderView> {
        let mut views = self.compose(vec![order]).await?;
        // compose returns exactly one view per order
        Ok(views.remove(0))
    }

    /// Embed owners and products with one lookup per table.
    async fn compose(&self, orders: Vec<Order>) -> Result<Vec<OrderView>> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<UserId> = orders
            .iter()
            .map(|o| o.user_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let product_ids: Vec<ProductId> = orders
            .iter()
            .flat_map(|o| o.product_ids.iter().copied())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let users: HashMap<UserId, PublicUser> = self
            .store
            .find_users(&user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.into()))
            .collect();
        let products: HashMap<ProductId, Product> = self
            .store
            .find_products(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| OrderView {
                user: users.get(&order.user_id).cloned(),
                products: order
                    .product_ids
                    .iter()
                    .filter_map(|id| products.get(id).cloned())
                    .collect(),
                order,
            })
            .collect())
    }
}

fn unresolved_ids(requested: &[ProductId], found: &[Product]) -> Vec<ProductId> {
    let known: HashSet<ProductId> = found.iter().map(|p| p.id).collect();
    let mut seen = HashSet::new();
    requested
        .iter()
        .copied()
        .filter(|id| !known.contains(id) || !seen.insert(*id))
        .collect()
}

fn in_request_order(ids: &[ProductId], found: Vec<Product>) -> Vec<Product> {
    let mut by_id: HashMap<ProductId, Product> = found.into_iter().map(|p| (p.id, p)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, OrderStore, ProductStore, UserStore};
    use mercato_core::{Money, NewProduct, NewUser, ValidationError};

    async fn seeded() -> (MemoryStore, UserId, ProductId, ProductId) {
        let store = MemoryStore::new();
        let user = store
            .insert_user(
                &NewUser::new(
                    Some("ada".into()),
                    Some("ada@example.org".into()),
                    Some("pw".into()),
                )
                .unwrap(),
            )
            .await
            .unwrap();
        let a = store
            .insert_product(&NewProduct::new(Some("A".into()), Some("a".into()), Some(10.0)).unwrap())
            .await
            .unwrap();
        let b = store
            .insert_product(&NewProduct::new(Some("B".into()), Some("b".into()), Some(5.0)).unwrap())
            .await
            .unwrap();
        (store, user.id, a.id, b.id)
    }

    #[tokio::test]
    async fn create_prices_with_tax() {
        let (store, user, a, b) = seeded().await;
        let view = OrderPricing::new(&store)
            .create(NewOrder::new(Some(user), Some(vec![a, b])).unwrap())
            .await
            .unwrap();

        assert_eq!(view.order.total, Money::from_cents(1800));
        assert_eq!(view.products.len(), 2);
        assert_eq!(view.products[0].id, a);
        assert_eq!(view.user.unwrap().username, "ada");
        assert!(!view.order.payment);
    }

    #[tokio::test]
    async fn create_at_max_price() {
        let (store, user, a, _) = seeded().await;
        assert!(matches!(
            NewProduct::new(Some("Yacht".into()), Some("big".into()), Some(1e16)),
            Err(ValidationError::TooLarge { field: "price" })
        ));
        let max = store
            .insert_product(
                &NewProduct::new(Some("Yacht".into()), Some("big".into()), Some(1e9)).unwrap(),
            )
            .await
            .unwrap();

        let view = OrderPricing::new(&store)
            .create(NewOrder::new(Some(user), Some(vec![max.id, a])).unwrap())
            .await
            .unwrap();
        // (1 000 000 000.00 + 10.00) * 1.2
        assert_eq!(view.order.total, Money::from_cents(120_000_001_200));
    }

    #[tokio::test]
    async fn overflowing_total_persists_nothing() {
        let (store, user, _, _) = seeded().await;
        // stored price beyond what the request path accepts
        let huge = store
            .insert_product(&NewProduct {
                name: "Legacy".into(),
                about: "imported".into(),
                price: Money::from_cents(i64::MAX / 10),
            })
            .await
            .unwrap();

        let err = OrderPricing::new(&store)
            .create(NewOrder::new(Some(user), Some(vec![huge.id])).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::TooLarge { field: "total" })
        ));
        assert!(store.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let (store, _, a, _) = seeded().await;
        let err = OrderPricing::new(&store)
            .create(NewOrder::new(Some(404), Some(vec![a])).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "user", .. }));
    }

    #[tokio::test]
    async fn unknown_product_persists_nothing() {
        let (store, user, a, _) = seeded().await;
        let err = OrderPricing::new(&store)
            .create(NewOrder::new(Some(user), Some(vec![a, 999])).unwrap())
            .await
            .unwrap_err();

        match err {
            Error::InvalidReference { resource, ids } => {
                assert_eq!(resource, "product");
                assert_eq!(ids, vec![999]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(store.list_orders().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn repeated_product_is_rejected() {
        let (store, user, a, _) = seeded().await;
        let err = OrderPricing::new(&store)
            .create(NewOrder::new(Some(user), Some(vec![a, a])).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReference { ids, .. } if ids == vec![a]));
    }

    #[tokio::test]
    async fn update_reprices_from_scratch() {
        let (store, user, a, b) = seeded().await;
        let flow = OrderPricing::new(&store);
        let created = flow
            .create(NewOrder::new(Some(user), Some(vec![a, b])).unwrap())
            .await
            .unwrap();

        let updated = flow
            .update(created.order.id, Some(vec![b]), None)
            .await
            .unwrap();

        assert_eq!(updated.order.product_ids, vec![b]);
        assert_eq!(updated.order.total, Money::from_cents(600));
        assert!(updated.order.updated_at >= created.order.updated_at);
    }

    #[tokio::test]
    async fn payment_update_keeps_total() {
        let (store, user, a, _) = seeded().await;
        let flow = OrderPricing::new(&store);
        let created = flow
            .create(NewOrder::new(Some(user), Some(vec![a])).unwrap())
            .await
            .unwrap();

        let updated = flow
            .update(created.order.id, None, Some(true))
            .await
            .unwrap();

        assert!(updated.order.payment);
        assert_eq!(updated.order.total, created.order.total);
        assert_eq!(updated.order.product_ids, vec![a]);
    }

    #[tokio::test]
    async fn update_with_bad_products_leaves_order() {
        let (store, user, a, _) = seeded().await;
        let flow = OrderPricing::new(&store);
        let created = flow
            .create(NewOrder::new(Some(user), Some(vec![a])).unwrap())
            .await
            .unwrap();

        let err = flow
            .update(created.order.id, Some(vec![77]), Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidReference { .. }));

        let unchanged = flow.get(created.order.id).await.unwrap();
        assert_eq!(unchanged.order, created.order);
    }

    #[tokio::test]
    async fn update_missing_order() {
        let (store, _, _, _) = seeded().await;
        let err = OrderPricing::new(&store)
            .update(5, None, Some(true))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "order", .. }));

        // existence is checked before the changes themselves
        let err = OrderPricing::new(&store)
            .update(999, Some(vec![]), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { resource: "order", .. }));
    }

    #[tokio::test]
    async fn empty_product_patch_is_invalid() {
        let (store, user, a, _) = seeded().await;
        let flow = OrderPricing::new(&store);
        let created = flow
            .create(NewOrder::new(Some(user), Some(vec![a])).unwrap())
            .await
            .unwrap();

        let err = flow.update(created.order.id, Some(vec![]), None).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::Empty {
                field: "productIds"
            })
        ));
        let unchanged = flow.get(created.order.id).await.unwrap();
        assert_eq!(unchanged.order, created.order);
    }

    #[tokio::test]
    async fn empty_patch_touches_timestamp() {
        let (store, user, a, _) = seeded().await;
        let flow = OrderPricing::new(&store);
        let created = flow
            .create(NewOrder::new(Some(user), Some(vec![a])).unwrap())
            .await
            .unwrap();

        let touched = flow.update(created.order.id, None, None).await.unwrap();
        assert_eq!(touched.order.total, created.order.total);
        assert_eq!(touched.order.product_ids, created.order.product_ids);
        assert!(touched.order.updated_at >= created.order.updated_at);
    }

    #[tokio::test]
    async fn list_embeds_users_and_products() {
        let (store, user, a, b) = seeded().await;
        let flow = OrderPricing::new(&store);
        flow.create(NewOrder::new(Some(user), Some(vec![a])).unwrap())
            .await
            .unwrap();
        flow.create(NewOrder::new(Some(user), Some(vec![b, a])).unwrap())
            .await
            .unwrap();

        let views = flow.list().await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![b, a]);
        assert!(views.iter().all(|v| v.user.as_ref().map(|u| u.id) == Some(user)));
    }

    #[tokio::test]
    async fn delete_returns_record_then_not_found() {
        let (store, user, a, _) = seeded().await;
        let flow = OrderPricing::new(&store);
        let created = flow
            .create(NewOrder::new(Some(user), Some(vec![a])).unwrap())
            .await
            .unwrap();

        let deleted = flow.delete(created.order.id).await.unwrap();
        assert_eq!(deleted.id, created.order.id);

        let err = flow.delete(created.order.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
