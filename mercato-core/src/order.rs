//! Orders, their patches, and the composed read model

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::validation::required;
use crate::{Money, Product, ProductId, PublicUser, UserId, ValidationError};

pub type OrderId = i64;

/// Stored order snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub product_ids: Vec<ProductId>,
    /// Tax-inclusive sum of the prices behind `product_ids`
    pub total: Money,
    pub payment: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated order request, before its products are resolved
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_ids: Vec<ProductId>,
}

impl NewOrder {
    pub fn new(
        user_id: Option<UserId>,
        product_ids: Option<Vec<ProductId>>,
    ) -> Result<Self, ValidationError> {
        let user_id = required(user_id, "userId")?;
        let product_ids = product_list(required(product_ids, "productIds")?)?;
        Ok(Self {
            user_id,
            product_ids,
        })
    }
}

/// Client-side partial order update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    pub product_ids: Option<Vec<ProductId>>,
    pub payment: Option<bool>,
}

impl OrderPatch {
    pub fn new(
        product_ids: Option<Vec<ProductId>>,
        payment: Option<bool>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            product_ids: product_ids.map(product_list).transpose()?,
            payment,
        })
    }
}

/// A product list together with the total priced from it.
///
/// The only way to change an order's products, so the two cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedProducts {
    pub product_ids: Vec<ProductId>,
    pub total: Money,
}

/// Resolved changes handed to the store. `updated_at` is always refreshed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderChanges {
    pub products: Option<PricedProducts>,
    pub payment: Option<bool>,
}

impl OrderChanges {
    pub fn apply(&self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(priced) = &self.products {
            order.product_ids = priced.product_ids.clone();
            order.total = priced.total;
        }
        if let Some(payment) = self.payment {
            order.payment = payment;
        }
        order.updated_at = now;
    }
}

/// Order with its owner and current product set embedded
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub user: Option<PublicUser>,
    pub products: Vec<Product>,
}

fn product_list(ids: Vec<ProductId>) -> Result<Vec<ProductId>, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::Empty {
            field: "productIds",
        });
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        let t = Utc::now();
        Order {
            id: 1,
            user_id: 2,
            product_ids: vec![10],
            total: Money::from_cents(1200),
            payment: false,
            created_at: t,
            updated_at: t,
        }
    }

    #[test]
    fn new_order_needs_products() {
        assert_eq!(
            NewOrder::new(Some(1), Some(vec![])).unwrap_err(),
            ValidationError::Empty {
                field: "productIds"
            }
        );
        assert_eq!(
            NewOrder::new(None, Some(vec![1])).unwrap_err(),
            ValidationError::Missing { field: "userId" }
        );
    }

    #[test]
    fn payment_only_change_keeps_products() {
        let mut o = order();
        let later = o.updated_at + chrono::Duration::seconds(5);
        OrderChanges {
            products: None,
            payment: Some(true),
        }
        .apply(&mut o, later);

        assert!(o.payment);
        assert_eq!(o.product_ids, vec![10]);
        assert_eq!(o.total.cents(), 1200);
        assert_eq!(o.updated_at, later);
    }

    #[test]
    fn product_change_replaces_total() {
        let mut o = order();
        OrderChanges {
            products: Some(PricedProducts {
                product_ids: vec![3, 4],
                total: Money::from_cents(1800),
            }),
            payment: None,
        }
        .apply(&mut o, Utc::now());

        assert_eq!(o.product_ids, vec![3, 4]);
        assert_eq!(o.total.cents(), 1800);
        assert!(!o.payment);
    }

    #[test]
    fn view_serializes_camel_case() {
        let view = OrderView {
            order: order(),
            user: None,
            products: vec![],
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["userId"], 2);
        assert_eq!(json["productIds"][0], 10);
        assert_eq!(json["total"], 12.0);
        assert!(json["user"].is_null());
    }
}
