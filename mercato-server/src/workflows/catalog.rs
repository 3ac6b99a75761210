//! Product catalogue operations

use mercato_core::{NewProduct, Product, ProductDetail, ProductFilter, ProductId};

use crate::error::{Error, Result};
use crate::store::MarketStore;

pub struct Catalog<'a> {
    store: &'a dyn MarketStore,
}

impl<'a> Catalog<'a> {
    pub fn new(store: &'a dyn MarketStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, input: NewProduct) -> Result<Product> {
        let product = self.store.insert_product(&input).await?;
        tracing::info!(product_id = product.id, price = %product.price, "product created");
        Ok(product)
    }

    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        Ok(self.store.list_products(filter).await?)
    }

    /// Product with its reviews loaded live, independent of the stored
    /// reference list.
    pub async fn detail(&self, id: ProductId) -> Result<ProductDetail> {
        let product = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| Error::not_found("product", id))?;
        let reviews = self.store.reviews_for_product(id).await?;
        Ok(ProductDetail { product, reviews })
    }

    pub async fn delete(&self, id: ProductId) -> Result<Product> {
        let product = self
            .store
            .delete_product(id)
            .await?
            .ok_or_else(|| Error::not_found("product", id))?;
        tracing::info!(product_id = product.id, "product deleted");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, ReviewStore, UserStore};
    use mercato_core::{Money, NewReview, NewUser};

    fn product(name: &str, about: &str, price: f64) -> NewProduct {
        NewProduct::new(Some(name.into()), Some(about.into()), Some(price)).unwrap()
    }

    #[tokio::test]
    async fn filter_by_name_and_price() {
        let store = MemoryStore::new();
        let catalog = Catalog::new(&store);
        catalog.create(product("Red Mug", "ceramic", 8.0)).await.unwrap();
        catalog.create(product("Blue Mug", "ceramic", 12.0)).await.unwrap();
        catalog.create(product("Teapot", "red clay", 30.0)).await.unwrap();

        let all = catalog.list(&ProductFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let mugs = catalog
            .list(&ProductFilter::from_query(Some("mug".into()), None, Some("12".into())))
            .await
            .unwrap();
        assert_eq!(mugs.len(), 2);

        let cheap = catalog
            .list(&ProductFilter::from_query(Some("MUG".into()), None, Some("10".into())))
            .await
            .unwrap();
        assert_eq!(cheap.len(), 1);
        assert_eq!(cheap[0].price, Money::from_cents(800));

        let red = catalog
            .list(&ProductFilter::from_query(None, Some("RED".into()), None))
            .await
            .unwrap();
        assert_eq!(red.len(), 1);
        assert_eq!(red[0].name, "Teapot");
    }

    #[tokio::test]
    async fn detail_loads_reviews_live() {
        let store = MemoryStore::new();
        let catalog = Catalog::new(&store);
        let created = catalog.create(product("Chair", "oak", 90.0)).await.unwrap();
        let user = store
            .insert_user(
                &NewUser::new(Some("cy".into()), Some("cy@example.org".into()), Some("pw".into()))
                    .unwrap(),
            )
            .await
            .unwrap();
        // written behind the aggregation's back: reference list and average stay stale
        store
            .insert_review(
                &NewReview::new(Some(user.id), Some(created.id), Some(5), Some("sturdy".into()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let detail = catalog.detail(created.id).await.unwrap();
        assert_eq!(detail.reviews.len(), 1);
        assert!(detail.product.review_ids.is_empty());
        assert_eq!(detail.product.average_score, 0.0);
    }

    #[tokio::test]
    async fn missing_product() {
        let store = MemoryStore::new();
        let catalog = Catalog::new(&store);
        assert!(matches!(
            catalog.detail(3).await.unwrap_err(),
            Error::NotFound { resource: "product", .. }
        ));
        assert!(matches!(
            catalog.delete(3).await.unwrap_err(),
            Error::NotFound { .. }
        ));
    }
}
